use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use super::Modal;
use crate::config::ThemeConfig;
use crate::inbox::SummaryModal;

pub fn render_summary(f: &mut Frame, area: Rect, summary: &SummaryModal, theme: &ThemeConfig) {
    let title = summary.title();
    let modal = Modal::new(&title, theme);
    let modal_area = modal.centered_rect(area.width * 2 / 3, area.height * 3 / 4, area);
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(summary.text())
        .style(Style::default().fg(theme.fg()))
        .block(modal.block())
        .wrap(Wrap { trim: false })
        .scroll((summary.scroll, 0));
    f.render_widget(paragraph, modal_area);
}

/// Blocking message; any key dismisses it
pub fn render_alert(f: &mut Frame, area: Rect, message: &str, theme: &ThemeConfig) {
    let modal = Modal::new(" Alert ", theme);
    let width = (message.chars().count() as u16 + 6).clamp(30, 70);
    let modal_area = modal.centered_rect(width, 6, area);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::from(Span::styled(message, Style::default().fg(theme.fg()))),
        Line::raw(""),
        Line::from(Span::styled(
            "Press any key",
            Style::default().fg(theme.fg_muted()),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .block(modal.block())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, modal_area);
}

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::Modal;
use crate::config::ThemeConfig;
use crate::inbox::{AutoSendDropdown, AutoSendSettings, SummarizeDropdown, SummaryStyle};

pub fn render_auto_send(
    f: &mut Frame,
    area: Rect,
    dropdown: &AutoSendDropdown,
    settings: AutoSendSettings,
    theme: &ThemeConfig,
) {
    let modal = Modal::new(" Settings ", theme);
    let rect = modal.popover_rect(34, 8, area);
    f.render_widget(Clear, rect);

    let checkbox = if settings.auto_send { "[x]" } else { "[ ]" };
    // Disabled input is greyed out but keeps its value
    let (label_style, input_style) = if settings.auto_send {
        (
            Style::default().fg(theme.fg()),
            Style::default().fg(theme.fg()).bg(theme.bg_element()),
        )
    } else {
        (
            Style::default().fg(theme.fg_muted()),
            Style::default().fg(theme.fg_muted()),
        )
    };
    let input = if dropdown.input.is_empty() {
        "%".to_string()
    } else {
        format!("{}%", dropdown.input)
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(checkbox, Style::default().fg(theme.primary())),
            Span::styled(" Auto send for SOP", Style::default().fg(theme.fg())),
        ]),
        Line::raw(""),
        Line::from(Span::styled("Set Threshold", label_style)),
        Line::from(Span::styled(format!(" {:<6}", input), input_style)),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Space", Style::default().fg(theme.primary())),
            Span::styled(" toggle  ", Style::default().fg(theme.fg_subtle())),
            Span::styled("Enter", Style::default().fg(theme.primary())),
            Span::styled(" save", Style::default().fg(theme.fg_subtle())),
        ]),
    ];
    f.render_widget(Paragraph::new(lines).block(modal.block()), rect);
}

pub fn render_summarize_menu(
    f: &mut Frame,
    area: Rect,
    dropdown: &SummarizeDropdown,
    theme: &ThemeConfig,
) {
    let modal = Modal::new(" Summarize ", theme);
    let rect = modal.popover_rect(36, SummaryStyle::ALL.len() as u16 + 2, area);
    f.render_widget(Clear, rect);

    let lines: Vec<Line> = SummaryStyle::ALL
        .iter()
        .enumerate()
        .map(|(i, style)| {
            if i == dropdown.selected {
                Line::from(Span::styled(
                    format!("> {}", style.label()),
                    Style::default()
                        .fg(theme.primary())
                        .bg(theme.selected_bg())
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(
                    format!("  {}", style.label()),
                    Style::default().fg(theme.primary()),
                ))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(modal.block()), rect);
}

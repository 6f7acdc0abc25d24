use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::Modal;
use crate::config::ThemeConfig;
use crate::inbox::{ComposeField, ComposeModal, validate_attachment};

pub fn render_compose(f: &mut Frame, area: Rect, compose: &ComposeModal, theme: &ThemeConfig) {
    let modal = Modal::new(compose.title(), theme);
    let modal_area = if compose.maximized {
        modal.centered_rect(area.width * 9 / 10, area.height * 9 / 10, area)
    } else {
        modal.centered_rect(60, 22, area)
    };
    f.render_widget(Clear, modal_area);
    let block = modal.block();
    let inner = block.inner(modal_area);
    f.render_widget(block, modal_area);

    let mut constraints = vec![Constraint::Length(3)]; // From
    if !compose.is_reply() {
        constraints.push(Constraint::Length(3)); // Subject
    }
    constraints.push(Constraint::Min(5)); // Body
    constraints.push(Constraint::Length(4)); // Attachment

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let field_block = |title: &'static str, field: ComposeField| {
        let border = if compose.focus == field {
            theme.border_active()
        } else {
            theme.border()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(title, Style::default().fg(theme.fg_subtle())))
    };

    let mut idx = 0;

    // Sender is locked for replies
    let from_style = if compose.is_reply() {
        Style::default().fg(theme.fg_muted())
    } else {
        Style::default().fg(theme.fg())
    };
    let from = Paragraph::new(Span::styled(compose.sender_email.as_str(), from_style))
        .block(field_block("From", ComposeField::Sender));
    f.render_widget(from, chunks[idx]);
    idx += 1;

    if !compose.is_reply() {
        let subject = Paragraph::new(compose.subject.as_str())
            .style(Style::default().fg(theme.fg()))
            .block(field_block("Subject", ComposeField::Subject));
        f.render_widget(subject, chunks[idx]);
        idx += 1;
    }

    let body = Paragraph::new(compose.body.as_str())
        .style(Style::default().fg(theme.fg()))
        .block(field_block("Mail body", ComposeField::Body))
        .wrap(Wrap { trim: false });
    f.render_widget(body, chunks[idx]);
    idx += 1;

    let mut attachment_lines = vec![Line::from(Span::styled(
        compose.attachment_input.as_str(),
        Style::default().fg(theme.fg()),
    ))];
    match &compose.attachment {
        Some(att) => {
            let ok = validate_attachment(&att.mime, att.size).is_ok();
            let color = if ok { theme.attachment() } else { theme.error() };
            attachment_lines.push(Line::from(Span::styled(
                format!("{} ({}, {} KB)", att.file_name(), att.mime, att.size / 1024),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )));
        }
        None => attachment_lines.push(Line::from(Span::styled(
            "(no image)",
            Style::default().fg(theme.fg_muted()),
        ))),
    }
    let attachment = Paragraph::new(attachment_lines).block(field_block(
        "Attach Image (PNG, JPEG only, max 500KB)",
        ComposeField::Attachment,
    ));
    f.render_widget(attachment, chunks[idx]);
}

pub fn render_compose_help(f: &mut Frame, area: Rect, theme: &ThemeConfig) {
    let key = Style::default().fg(theme.primary());
    let text = Style::default().fg(theme.fg_subtle());
    let help = Line::from(vec![
        Span::styled("Tab", key),
        Span::styled(" field  ", text),
        Span::styled("Ctrl-E", key),
        Span::styled(" editor  ", text),
        Span::styled("Ctrl-A", key),
        Span::styled(" attach path  ", text),
        Span::styled("Ctrl-T", key),
        Span::styled(" resize  ", text),
        Span::styled("Ctrl-S", key),
        Span::styled(" send  ", text),
        Span::styled("Esc", key),
        Span::styled(" cancel", text),
    ]);

    let paragraph = Paragraph::new(help).style(Style::default().bg(theme.bg_panel()));
    f.render_widget(paragraph, area);
}

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Pane;
use crate::app::App;
use crate::config::ThemeConfig;
use crate::inbox::{Email, EmailDisplay, EmailView};

/// Draw the open thread. Returns the scroll offset that keeps the selected
/// email's header on screen.
pub fn render_thread(f: &mut Frame, area: Rect, app: &App, focused: bool, theme: &ThemeConfig) -> u16 {
    let Some(thread) = app.current_thread() else {
        let empty = Paragraph::new("No threads found :(")
            .style(Style::default().fg(theme.fg_muted()))
            .block(Pane::new("Thread", focused, theme).block());
        f.render_widget(empty, area);
        return 0;
    };

    let block = Pane::new(&thread.thread_title, focused, theme).block();
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    f.render_widget(Paragraph::new(toolbar(app, theme)), chunks[0]);

    let width = chunks[1].width as usize;
    let mut lines: Vec<Line> = Vec::new();
    let mut selected_start = 0u16;
    for (i, email) in thread.emails.iter().enumerate() {
        let selected = i == app.thread_view.selected;
        if selected {
            selected_start = lines.len() as u16;
        }
        let view = app.email_view(email);
        let display = app.email_display(email);
        lines.extend(email_lines(email, view, &display, selected, theme, width));
        lines.push(Line::raw(""));
    }

    let height = chunks[1].height;
    let mut scroll = app.thread_view.scroll;
    if selected_start < scroll {
        scroll = selected_start;
    } else if height > 0 && selected_start >= scroll + height {
        scroll = selected_start;
    }

    // Lines are pre-wrapped, so line indices are screen rows
    let body = Paragraph::new(lines).scroll((scroll, 0));
    f.render_widget(body, chunks[1]);

    scroll
}

fn toolbar<'a>(app: &App, theme: &ThemeConfig) -> Line<'a> {
    let key = Style::default().fg(theme.primary());
    let text = Style::default().fg(theme.fg_subtle());
    let settings = app.settings.get();
    let auto = match (settings.auto_send, settings.threshold_input()) {
        (true, t) if !t.is_empty() => format!(" auto-send on ({}%)", t),
        (true, _) => " auto-send on".to_string(),
        (false, _) => " auto-send off".to_string(),
    };
    Line::from(vec![
        Span::styled("S", key),
        Span::styled(" summarize ", text),
        Span::styled("Z", key),
        Span::styled(" styles  ", text),
        Span::styled("g", key),
        Span::styled(" smart reply  ", text),
        Span::styled("a", key),
        Span::styled(auto, text),
    ])
}

/// Lines for one email: header, the body for its current display state, footer.
/// Body text is wrapped to `width` columns.
pub fn email_lines<'a>(
    email: &'a Email,
    view: Option<&'a EmailView>,
    display: &EmailDisplay,
    selected: bool,
    theme: &ThemeConfig,
    width: usize,
) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    let marker = if selected { "> " } else { "  " };
    let name_style = if selected {
        Style::default()
            .fg(theme.primary())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg()).add_modifier(Modifier::BOLD)
    };
    lines.push(Line::from(vec![
        Span::styled(marker, Style::default().fg(theme.primary())),
        Span::styled(email.sender_display(), name_style),
        Span::styled(
            format!(" <{}>", email.sender_email),
            Style::default().fg(theme.fg_muted()),
        ),
        Span::styled(
            format!("  {}", email.date),
            Style::default()
                .fg(theme.fg_muted())
                .add_modifier(Modifier::ITALIC),
        ),
    ]));

    let sent_style = Style::default().fg(theme.fg()).bg(theme.bg_element());
    let show_description = view.is_some_and(|v| v.show_description);

    match display {
        EmailDisplay::Collapsed { preview } => {
            push_block(
                &mut lines,
                preview,
                "  ",
                Style::default().fg(theme.fg_muted()),
                width,
            );
        }
        EmailDisplay::Resolved => {
            // A draft sent from here is what the backend now holds
            let text = view
                .filter(|v| v.resolved)
                .map(|v| v.draft.as_str())
                .unwrap_or(&email.content);
            push_block(&mut lines, text, "  ", sent_style, width);
        }
        EmailDisplay::AutoSent { coverage, style } => {
            push_block(&mut lines, &email.content, "  ", sent_style, width);
            let mut spans = Vec::new();
            if let Some(color) = theme.coverage(*style) {
                spans.push(Span::styled(
                    format!("  Mail auto-sent with coverage: {}%", coverage),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ));
            }
            spans.push(Span::styled(" (?)", Style::default().fg(theme.fg_muted())));
            lines.push(Line::from(spans));
            if show_description {
                push_block(
                    &mut lines,
                    &email.coverage_description,
                    "    ",
                    Style::default()
                        .fg(theme.fg_subtle())
                        .add_modifier(Modifier::ITALIC),
                    width,
                );
            }
        }
        EmailDisplay::Editable { coverage } => {
            let draft = view.map(|v| v.draft.as_str()).unwrap_or(&email.content);
            push_block(
                &mut lines,
                draft,
                "  │ ",
                Style::default().fg(theme.fg()),
                width,
            );
            lines.push(Line::from(vec![
                Span::styled("  e", Style::default().fg(theme.primary())),
                Span::styled(" edit  ", Style::default().fg(theme.fg_subtle())),
                Span::styled("s", Style::default().fg(theme.primary())),
                Span::styled(" send", Style::default().fg(theme.fg_subtle())),
            ]));
            if let Some((value, style)) = coverage {
                let mut spans = Vec::new();
                if let Some(color) = theme.coverage(*style) {
                    spans.push(Span::styled(
                        format!("  Coverage: {}%", value),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ));
                }
                spans.push(Span::styled(" (?)", Style::default().fg(theme.fg_muted())));
                lines.push(Line::from(spans));
                if show_description {
                    push_block(
                        &mut lines,
                        &email.coverage_description,
                        "    ",
                        Style::default().fg(theme.fg_subtle()),
                        width,
                    );
                }
            }
        }
    }

    let mut footer = vec![Span::styled("  ↩ r", Style::default().fg(theme.fg_muted()))];
    if email.has_image() {
        footer.push(Span::styled(
            "  📎 d",
            Style::default().fg(theme.attachment()),
        ));
    }
    lines.push(Line::from(footer));

    lines
}

fn push_block<'a>(lines: &mut Vec<Line<'a>>, text: &str, prefix: &str, style: Style, width: usize) {
    if text.is_empty() {
        lines.push(Line::from(Span::styled(prefix.to_string(), style)));
        return;
    }
    let avail = width.saturating_sub(prefix.chars().count()).max(1);
    for line in text.lines() {
        for row in wrap_line(line, avail) {
            lines.push(Line::from(Span::styled(format!("{}{}", prefix, row), style)));
        }
    }
}

/// Word-wrap one line to at most `width` characters per row. Words longer than
/// a row are split.
pub(crate) fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split(' ') {
        let mut word: Vec<char> = word.chars().collect();
        let sep = if current_len == 0 { 0 } else { 1 };
        if current_len + sep + word.len() <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.extend(word.iter());
            current_len += sep + word.len();
            continue;
        }
        if current_len > 0 {
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }
        while word.len() > width {
            let rest = word.split_off(width);
            rows.push(word.into_iter().collect());
            word = rest;
        }
        current.extend(word.iter());
        current_len = word.len();
    }
    rows.push(current);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbox::CoverageStyle;

    fn text_of(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn email() -> Email {
        Email {
            email_record_id: 1,
            sender: "Ana".to_string(),
            sender_email: "ana@example.com".to_string(),
            content: "Line one\nLine two".to_string(),
            is_open: true,
            coverage_percentage: Some(85.0),
            coverage_description: "Matches refund SOP".to_string(),
            ..Email::default()
        }
    }

    #[test]
    fn test_auto_sent_badge_and_description() {
        let e = email();
        let mut view = EmailView::new(&e);
        let display = EmailDisplay::AutoSent {
            coverage: 85.0,
            style: CoverageStyle::Green,
        };
        let theme = ThemeConfig::default();
        let text = text_of(&email_lines(&e, Some(&view), &display, false, &theme, 80));
        assert!(text.contains("Mail auto-sent with coverage: 85%"));
        assert!(!text.contains("Matches refund SOP"));

        view.toggle_description();
        let text = text_of(&email_lines(&e, Some(&view), &display, false, &theme, 80));
        assert!(text.contains("Matches refund SOP"));
    }

    #[test]
    fn test_hidden_coverage_has_no_badge_text() {
        let e = email();
        let display = EmailDisplay::AutoSent {
            coverage: 75.0,
            style: CoverageStyle::Hidden,
        };
        let theme = ThemeConfig::default();
        let text = text_of(&email_lines(&e, None, &display, false, &theme, 80));
        assert!(!text.contains("auto-sent"));
    }

    #[test]
    fn test_editable_shows_draft() {
        let e = email();
        let mut view = EmailView::new(&e);
        view.set_draft("My edit".to_string());
        let display = EmailDisplay::Editable { coverage: None };
        let theme = ThemeConfig::default();
        let text = text_of(&email_lines(&e, Some(&view), &display, true, &theme, 80));
        assert!(text.contains("│ My edit"));
        assert!(!text.contains("Coverage:"));
        assert!(text.starts_with("> Ana"));
    }

    #[test]
    fn test_attachment_marker_only_with_image() {
        let mut e = email();
        let display = EmailDisplay::Resolved;
        let theme = ThemeConfig::default();
        assert!(!text_of(&email_lines(&e, None, &display, false, &theme, 80)).contains("📎"));
        e.image_path = Some("img/receipt.png".to_string());
        assert!(text_of(&email_lines(&e, None, &display, false, &theme, 80)).contains("📎"));
    }

    #[test]
    fn test_sent_draft_replaces_original_content() {
        let mut e = email();
        e.content = "original draft".to_string();
        let mut view = EmailView::new(&e);
        view.set_draft("EDITED TEXT".to_string());
        view.resolved = true;
        let theme = ThemeConfig::default();
        let text = text_of(&email_lines(&e, Some(&view), &EmailDisplay::Resolved, false, &theme, 80));
        assert!(text.contains("EDITED TEXT"));
        assert!(!text.contains("original draft"));

        // Resolved by the backend: its content is authoritative
        let untouched = EmailView::new(&e);
        let text = text_of(&email_lines(&e, Some(&untouched), &EmailDisplay::Resolved, false, &theme, 80));
        assert!(text.contains("original draft"));
    }

    #[test]
    fn test_wrap_line() {
        assert_eq!(wrap_line("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_line("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_line("", 10), vec![""]);
        assert_eq!(wrap_line("fits", 10), vec!["fits"]);
    }

    #[test]
    fn test_long_body_rows_fit_width() {
        let mut e = email();
        e.content = "word ".repeat(100);
        let theme = ThemeConfig::default();
        let lines = email_lines(&e, None, &EmailDisplay::Resolved, false, &theme, 40);
        // header + wrapped body + footer
        assert!(lines.len() > 10);
        assert!(lines[1..lines.len() - 1].iter().all(|l| l.width() <= 40));
    }
}

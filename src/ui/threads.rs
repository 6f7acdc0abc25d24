use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

use super::Pane;
use crate::config::ThemeConfig;
use crate::inbox::Thread;

pub fn render_threads(
    f: &mut Frame,
    area: Rect,
    threads: &[Thread],
    state: &mut ListState,
    focused: bool,
    theme: &ThemeConfig,
    date_width: usize,
) {
    // Available width: area minus borders (2) minus highlight symbol (2)
    let avail_width = area.width.saturating_sub(4) as usize;
    let title_width = avail_width.saturating_sub(date_width + 1);

    let items: Vec<ListItem> = threads
        .iter()
        .map(|t| {
            let open_drafts = t
                .emails
                .iter()
                .filter(|e| !e.is_resolved)
                .count();
            let marker = if open_drafts > 0 { "*" } else { " " };
            let date = t.emails.last().map(|e| e.date.as_str()).unwrap_or("");
            let title = if t.thread_title.is_empty() {
                "(untitled)"
            } else {
                t.thread_title.as_str()
            };
            let style = if open_drafts > 0 {
                Style::default().fg(theme.primary())
            } else {
                Style::default().fg(theme.fg())
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(truncate(title, title_width.saturating_sub(1)), style),
                Span::raw(" "),
                Span::styled(
                    truncate(&format_date(date), date_width),
                    Style::default().fg(theme.fg_muted()),
                ),
            ]))
        })
        .collect();

    let title = format!("Threads ({})", threads.len());
    let list = List::new(items)
        .block(Pane::new(&title, focused, theme).block())
        .highlight_style(
            Style::default()
                .bg(theme.selected_bg())
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, state);
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max < 4 {
        return s.chars().take(max).collect();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        format!("{:width$}", s, width = max)
    } else {
        let truncated: String = s.chars().take(max - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format "2024-05-02 14:30:00" as "May 02 14:30"; anything else passes through
pub(crate) fn format_date(date: &str) -> String {
    let parts: Vec<&str> = date.split([' ', 'T']).collect();
    let date_parts: Vec<&str> = parts[0].split('-').collect();
    if date_parts.len() < 3 {
        return date.to_string();
    }

    let month = match date_parts[1] {
        "01" => "Jan",
        "02" => "Feb",
        "03" => "Mar",
        "04" => "Apr",
        "05" => "May",
        "06" => "Jun",
        "07" => "Jul",
        "08" => "Aug",
        "09" => "Sep",
        "10" => "Oct",
        "11" => "Nov",
        "12" => "Dec",
        _ => return date.to_string(),
    };
    let day: String = date_parts[2].chars().take(2).collect();

    let time = parts.get(1).copied().unwrap_or("");
    let time_short: String = time.chars().take(5).collect();

    if time_short.is_empty() {
        format!("{} {}", month, day)
    } else {
        format!("{} {} {}", month, day, time_short)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 8), "hello   ");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 3), "hel");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-05-02 14:30:00"), "May 02 14:30");
        assert_eq!(format_date("2024-05-02T09:05:00Z"), "May 02 09:05");
        assert_eq!(format_date("2024-12-24"), "Dec 24");
        assert_eq!(format_date("yesterday"), "yesterday");
        assert_eq!(format_date(""), "");
    }
}

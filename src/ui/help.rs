use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{Mode, Pane};
use crate::config::ThemeConfig;

pub fn render_help(
    f: &mut Frame,
    area: Rect,
    mode: Mode,
    pane: Pane,
    status: Option<&str>,
    theme: &ThemeConfig,
) {
    let key_style = Style::default().fg(theme.primary());
    let text_style = Style::default().fg(theme.fg_subtle());

    let keys: &[(&str, &str)] = match (mode, pane) {
        (Mode::Normal, Pane::Threads) => &[
            ("j/k", "threads"),
            ("l", "open"),
            ("c", "compose"),
            ("S", "summarize"),
            ("a", "auto-send"),
            ("R", "refresh"),
            ("q", "quit"),
        ],
        (Mode::Normal, Pane::Thread) => &[
            ("h", "back"),
            ("j/k", "emails"),
            ("Enter", "expand"),
            ("e", "edit"),
            ("s", "send"),
            ("r", "reply"),
            ("d", "image"),
            ("?", "coverage"),
            ("S/Z", "summarize"),
            ("g", "smart reply"),
            ("a", "auto-send"),
        ],
        (Mode::AutoSendMenu, _) => &[
            ("Space", "toggle"),
            ("0-9", "threshold"),
            ("Enter", "save"),
            ("Esc", "close"),
        ],
        (Mode::SummarizeMenu, _) => &[("j/k", "select"), ("Enter", "summarize"), ("Esc", "close")],
        (Mode::Summary, _) => &[("j/k", "scroll"), ("q/Esc", "close")],
        (Mode::Alert, _) => &[("any key", "dismiss")],
        // Compose has its own help bar
        (Mode::Compose, _) => &[],
    };

    let mut spans = Vec::new();
    for (key, label) in keys {
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {}  ", label), text_style));
    }
    let mut line = Line::from(spans);

    if let Some(msg) = status {
        line.spans
            .push(Span::styled("│  ", Style::default().fg(theme.border())));
        line.spans
            .push(Span::styled(msg, Style::default().fg(theme.success())));
    }

    let paragraph = Paragraph::new(line).style(Style::default().bg(theme.bg_panel()));

    f.render_widget(paragraph, area);
}

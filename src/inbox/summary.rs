use super::types::{SummaryStyle, ThreadId};

pub const LOADING_TEXT: &str = "Loading summary...";

/// Read-only display of a thread summary supplied by the coordinator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryModal {
    pub thread_id: ThreadId,
    pub style: Option<SummaryStyle>,
    pub summary: Option<String>,
    pub scroll: u16,
}

impl SummaryModal {
    pub fn pending(thread_id: ThreadId, style: Option<SummaryStyle>) -> Self {
        Self {
            thread_id,
            style,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        match self.summary.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => LOADING_TEXT,
        }
    }

    pub fn title(&self) -> String {
        match self.style {
            Some(style) => format!("Summary ({})", style.label()),
            None => "Summary".to_string(),
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(3);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(3);
    }
}

use std::collections::HashMap;

use super::dropdown::{AutoSendDropdown, SummarizeDropdown};
use super::email_view::EmailView;
use super::types::{Email, EmailRecordId, SummaryStyle, Thread, ThreadId};

/// Requests a view hands up to the coordinator
#[derive(Debug, Clone, PartialEq)]
pub enum ThreadAction {
    ToggleEmail {
        thread_index: usize,
        email_index: usize,
    },
    Reply {
        sender_email: String,
        thread_id: ThreadId,
    },
    DownloadImage {
        email_record_id: EmailRecordId,
    },
    Summarize {
        thread_id: ThreadId,
        style: Option<SummaryStyle>,
    },
    SmartReply {
        thread_id: ThreadId,
    },
    SaveAutoSend,
}

/// State for the thread currently on screen
#[derive(Debug, Default)]
pub struct ThreadView {
    pub thread_id: Option<ThreadId>,
    pub selected: usize,
    pub scroll: u16,
    pub auto_send: AutoSendDropdown,
    pub summarize: SummarizeDropdown,
    views: HashMap<EmailRecordId, EmailView>,
}

impl ThreadView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the view at `thread`. Local state survives reloads of the same
    /// thread; moving to another thread drops the previous thread's views.
    pub fn sync(&mut self, thread: &Thread) {
        if self.thread_id != Some(thread.thread_id) {
            self.thread_id = Some(thread.thread_id);
            self.selected = 0;
            self.scroll = 0;
            self.auto_send.close();
            self.summarize.close();
            self.views
                .retain(|id, _| thread.emails.iter().any(|e| e.email_record_id == *id));
        }
        for email in &thread.emails {
            self.views
                .entry(email.email_record_id)
                .or_insert_with(|| EmailView::new(email));
        }
        if self.selected >= thread.emails.len() {
            self.selected = thread.emails.len().saturating_sub(1);
        }
    }

    pub fn view(&self, email: &Email) -> Option<&EmailView> {
        self.views.get(&email.email_record_id)
    }

    pub fn view_mut(&mut self, email: &Email) -> &mut EmailView {
        self.views
            .entry(email.email_record_id)
            .or_insert_with(|| EmailView::new(email))
    }

    pub fn next(&mut self, thread: &Thread) {
        if thread.emails.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(thread.emails.len() - 1);
    }

    pub fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_email<'a>(&self, thread: &'a Thread) -> Option<&'a Email> {
        thread.emails.get(self.selected)
    }

    pub fn toggle_selected(&self, thread_index: usize, thread: &Thread) -> Option<ThreadAction> {
        thread.emails.get(self.selected).map(|_| ThreadAction::ToggleEmail {
            thread_index,
            email_index: self.selected,
        })
    }

    pub fn reply_selected(&self, thread: &Thread) -> Option<ThreadAction> {
        self.selected_email(thread).map(|e| ThreadAction::Reply {
            sender_email: e.sender_email.clone(),
            thread_id: thread.thread_id,
        })
    }

    pub fn download_selected(&self, thread: &Thread) -> Option<ThreadAction> {
        self.selected_email(thread)
            .filter(|e| e.has_image())
            .map(|e| ThreadAction::DownloadImage {
                email_record_id: e.email_record_id,
            })
    }

    pub fn smart_reply(&self, thread: &Thread) -> ThreadAction {
        ThreadAction::SmartReply {
            thread_id: thread.thread_id,
        }
    }
}

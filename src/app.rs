use ratatui::widgets::ListState;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::api::InboxApi;
use crate::config::Config;
use crate::inbox::{
    ComposeModal, Email, EmailDisplay, EmailRecordId, EmailView, SettingsStore, SubmitError,
    SummaryModal, Thread, ThreadAction, ThreadView,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pane {
    Threads,
    Thread,
}

/// Which layer currently receives keys, topmost first
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Alert,
    Compose,
    Summary,
    AutoSendMenu,
    SummarizeMenu,
    Normal,
}

/// Owns the thread collection and the settings, and performs every backend call
/// the views ask for.
pub struct App {
    pub config: Arc<Config>,
    api: Box<dyn InboxApi>,
    pub threads: Vec<Thread>,
    pub list_state: ListState,
    pub focused_pane: Pane,
    pub settings: SettingsStore,
    pub thread_view: ThreadView,
    pub compose: Option<ComposeModal>,
    pub summary: Option<SummaryModal>,
    /// Blocking message the user has to dismiss
    pub alert: Option<String>,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Arc<Config>, api: Box<dyn InboxApi>) -> Self {
        let mut settings = SettingsStore::new();
        settings.subscribe(|s| {
            debug!(
                "Auto-send settings changed: auto_send={} threshold={:?}",
                s.auto_send, s.threshold
            )
        });

        Self {
            config,
            api,
            threads: Vec::new(),
            list_state: ListState::default(),
            focused_pane: Pane::Threads,
            settings,
            thread_view: ThreadView::new(),
            compose: None,
            summary: None,
            alert: None,
            status_message: None,
            should_quit: false,
        }
    }

    /// Initial fetches: threads, then auto-send settings
    pub fn load(&mut self) {
        self.load_threads();
        if self.settings.load(self.api.as_ref()).is_err() {
            self.set_status("Auto-send settings unavailable");
        }
    }

    pub fn load_threads(&mut self) {
        match self.api.list_threads() {
            Ok(threads) => {
                info!("Loaded {} threads", threads.len());
                self.set_threads(threads);
            }
            Err(e) => {
                warn!("Error fetching threads: {}", e);
                self.set_status("Could not load threads");
            }
        }
    }

    pub fn set_threads(&mut self, threads: Vec<Thread>) {
        self.threads = threads;
        let selected = match self.list_state.selected() {
            Some(i) if i < self.threads.len() => Some(i),
            _ if !self.threads.is_empty() => Some(0),
            _ => None,
        };
        self.list_state.select(selected);
        self.sync_thread_view();
    }

    fn sync_thread_view(&mut self) {
        if let Some(i) = self.list_state.selected() {
            if let Some(thread) = self.threads.get(i) {
                self.thread_view.sync(thread);
            }
        }
    }

    pub fn mode(&self) -> Mode {
        if self.alert.is_some() {
            Mode::Alert
        } else if self.compose.is_some() {
            Mode::Compose
        } else if self.summary.is_some() {
            Mode::Summary
        } else if self.thread_view.auto_send.open {
            Mode::AutoSendMenu
        } else if self.thread_view.summarize.open {
            Mode::SummarizeMenu
        } else {
            Mode::Normal
        }
    }

    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some(msg.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn alert(&mut self, msg: &str) {
        self.alert = Some(msg.to_string());
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn current_thread_index(&self) -> Option<usize> {
        self.list_state
            .selected()
            .filter(|&i| i < self.threads.len())
    }

    pub fn current_thread(&self) -> Option<&Thread> {
        self.current_thread_index().and_then(|i| self.threads.get(i))
    }

    pub fn next_thread(&mut self) {
        if self.threads.is_empty() {
            return;
        }
        let max = self.threads.len() - 1;
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(max),
            None => 0,
        };
        self.list_state.select(Some(i));
        self.sync_thread_view();
    }

    pub fn previous_thread(&mut self) {
        if self.threads.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
        self.sync_thread_view();
    }

    pub fn next_email(&mut self) {
        if let Some(i) = self.current_thread_index() {
            self.thread_view.next(&self.threads[i]);
        }
    }

    pub fn previous_email(&mut self) {
        self.thread_view.previous();
    }

    pub fn selected_email(&self) -> Option<&Email> {
        self.current_thread()
            .and_then(|t| self.thread_view.selected_email(t))
    }

    /// Display state for `email` under the current threshold
    pub fn email_display(&self, email: &Email) -> EmailDisplay {
        let threshold = self.settings.threshold();
        match self.thread_view.view(email) {
            Some(view) => view.display(email, threshold),
            None => EmailView::new(email).display(email, threshold),
        }
    }

    pub fn email_view(&self, email: &Email) -> Option<&EmailView> {
        self.thread_view.view(email)
    }

    // Thread-level actions

    pub fn toggle_selected_email(&mut self) {
        let action = self.current_thread_index().and_then(|ti| {
            self.thread_view
                .toggle_selected(ti, &self.threads[ti])
        });
        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    pub fn reply_to_selected(&mut self) {
        let action = self
            .current_thread()
            .and_then(|t| self.thread_view.reply_selected(t));
        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    pub fn download_selected(&mut self) {
        let action = self
            .current_thread()
            .and_then(|t| self.thread_view.download_selected(t));
        match action {
            Some(action) => self.dispatch(action),
            None => self.set_status("No attachment"),
        }
    }

    pub fn summarize(&mut self) {
        if let Some(thread_id) = self.current_thread().map(|t| t.thread_id) {
            let action = self.thread_view.summarize.summarize(thread_id);
            self.dispatch(action);
        }
    }

    pub fn choose_summary_style(&mut self) {
        if let Some(thread_id) = self.current_thread().map(|t| t.thread_id) {
            let action = self.thread_view.summarize.choose(thread_id);
            self.dispatch(action);
        }
    }

    pub fn smart_reply(&mut self) {
        let action = self
            .current_thread()
            .map(|t| self.thread_view.smart_reply(t));
        if let Some(action) = action {
            self.dispatch(action);
        }
    }

    pub fn toggle_auto_send_menu(&mut self) {
        self.thread_view.auto_send.toggle_open(&self.settings);
    }

    pub fn toggle_auto_send(&mut self) {
        self.thread_view
            .auto_send
            .toggle_auto_send(&mut self.settings);
    }

    pub fn threshold_digit(&mut self, digit: char) {
        self.thread_view
            .auto_send
            .push_digit(digit, &mut self.settings);
    }

    pub fn threshold_backspace(&mut self) {
        self.thread_view.auto_send.pop_digit(&mut self.settings);
    }

    pub fn save_auto_send(&mut self) {
        let action = self.thread_view.auto_send.save();
        self.dispatch(action);
    }

    pub fn open_compose(&mut self) {
        self.compose = Some(ComposeModal::new(&self.config.compose.default_sender));
    }

    /// Carry out a view's request
    pub fn dispatch(&mut self, action: ThreadAction) {
        debug!("Dispatch {:?}", action);
        match action {
            ThreadAction::ToggleEmail {
                thread_index,
                email_index,
            } => {
                if let Some(email) = self
                    .threads
                    .get_mut(thread_index)
                    .and_then(|t| t.emails.get_mut(email_index))
                {
                    email.is_open = !email.is_open;
                }
            }
            ThreadAction::Reply {
                sender_email,
                thread_id,
            } => {
                self.compose = Some(ComposeModal::reply(&sender_email, thread_id));
            }
            ThreadAction::DownloadImage { email_record_id } => {
                self.download_image(email_record_id);
            }
            ThreadAction::Summarize { thread_id, style } => {
                // Fetched by process_pending once the placeholder is on screen
                self.summary = Some(SummaryModal::pending(thread_id, style));
            }
            ThreadAction::SmartReply { thread_id } => match self.api.smart_reply(thread_id) {
                Ok(text) => {
                    let sender = self
                        .threads
                        .iter()
                        .find(|t| t.thread_id == thread_id)
                        .and_then(|t| t.emails.last())
                        .map(|e| e.sender_email.clone())
                        .unwrap_or_default();
                    let mut modal = ComposeModal::reply(&sender, thread_id);
                    modal.body = text;
                    self.compose = Some(modal);
                }
                Err(e) => {
                    error!("Error fetching smart reply for thread {}: {}", thread_id, e);
                    self.alert("Failed to generate a smart reply.");
                }
            },
            ThreadAction::SaveAutoSend => match self.settings.save(self.api.as_ref()) {
                Ok(()) => self.set_status("Auto-send settings saved"),
                Err(_) => self.alert("Failed to save auto-send settings."),
            },
        }
    }

    /// Run requests queued behind a placeholder. Called after each draw.
    pub fn process_pending(&mut self) {
        let Some((thread_id, style)) = self
            .summary
            .as_ref()
            .filter(|m| m.summary.is_none())
            .map(|m| (m.thread_id, m.style))
        else {
            return;
        };
        match self.api.summarize(thread_id, style) {
            Ok(text) => {
                if let Some(modal) = self.summary.as_mut() {
                    modal.summary = Some(text);
                }
            }
            Err(e) => {
                error!("Error summarizing thread {}: {}", thread_id, e);
                self.summary = None;
                self.alert("Failed to summarize thread.");
            }
        }
    }

    // Email-level actions

    pub fn set_selected_draft(&mut self, draft: String) {
        let Some(ti) = self.current_thread_index() else {
            return;
        };
        let thread = &self.threads[ti];
        if let Some(email) = self.thread_view.selected_email(thread) {
            self.thread_view.view_mut(email).set_draft(draft);
        }
    }

    pub fn selected_draft(&self) -> Option<String> {
        let email = self.selected_email()?;
        Some(
            self.email_view(email)
                .map(|v| v.draft.clone())
                .unwrap_or_else(|| email.content.clone()),
        )
    }

    pub fn toggle_selected_description(&mut self) {
        let Some(ti) = self.current_thread_index() else {
            return;
        };
        let thread = &self.threads[ti];
        if let Some(email) = self.thread_view.selected_email(thread) {
            self.thread_view.view_mut(email).toggle_description();
        }
    }

    /// Commit the selected draft to the backend
    pub fn send_selected(&mut self) {
        let Some(ti) = self.current_thread_index() else {
            return;
        };
        let threshold = self.settings.threshold();
        let thread = &self.threads[ti];
        let Some(email) = self.thread_view.selected_email(thread) else {
            return;
        };
        let view = self.thread_view.view_mut(email);
        match view.send(self.api.as_ref(), email, threshold) {
            Ok(true) => {
                // Mirror the commit into the collection, like a toggle
                let draft = view.draft.clone();
                let ei = self.thread_view.selected;
                if let Some(email) = self.threads[ti].emails.get_mut(ei) {
                    email.content = draft;
                    email.is_resolved = true;
                }
                self.set_status("Email updated successfully!");
            }
            Ok(false) => self.set_status("Nothing to send"),
            Err(_) => self.alert("Failed to update email."),
        }
    }

    fn download_image(&mut self, id: EmailRecordId) {
        let bytes = match self.api.download_image(id) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Error downloading image for email {}: {}", id, e);
                self.alert("Failed to download image.");
                return;
            }
        };
        let dir = self.config.downloads.dir_path();
        match save_download(&dir, id, &bytes) {
            Ok(path) => {
                info!("Saved attachment to {}", path.display());
                self.set_status(&format!("Saved {}", path.display()));
                if self.config.downloads.open_after_download {
                    let _ = std::process::Command::new("xdg-open")
                        .arg(&path)
                        .stdout(std::process::Stdio::null())
                        .stderr(std::process::Stdio::null())
                        .spawn();
                }
            }
            Err(e) => {
                error!("Error saving image to {}: {}", dir.display(), e);
                self.alert("Failed to save image.");
            }
        }
    }

    // Compose modal

    pub fn close_compose(&mut self) {
        self.compose = None;
    }

    pub fn attach_compose_image(&mut self) {
        let Some(modal) = self.compose.as_mut() else {
            return;
        };
        match modal.attach_from_input() {
            Ok(()) => {
                let name = modal.attachment.as_ref().map(|a| a.file_name());
                if let Some(name) = name {
                    self.set_status(&format!("Attached {}", name));
                }
            }
            Err(e) => self.alert(&e.to_string()),
        }
    }

    /// Post the modal; it only closes when the backend accepted the email
    pub fn submit_compose(&mut self) {
        let Some(modal) = self.compose.as_mut() else {
            return;
        };
        if let Err(e) = modal.resolve_attachment() {
            self.alert(&e.to_string());
            return;
        }
        match modal.submit(self.api.as_ref()) {
            Ok(()) => {
                let msg = modal.success_message();
                self.compose = None;
                self.set_status(msg);
                self.load_threads();
            }
            Err(SubmitError::Attachment(e)) => self.alert(&e.to_string()),
            Err(e @ SubmitError::Api(_)) => self.alert(&e.to_string()),
        }
    }

    pub fn close_summary(&mut self) {
        self.summary = None;
    }
}

/// Write a downloaded image as `email-{id}.{ext}`, sniffing the extension
pub fn save_download(dir: &Path, id: EmailRecordId, bytes: &[u8]) -> std::io::Result<PathBuf> {
    let ext = image::guess_format(bytes)
        .ok()
        .and_then(|f| f.extensions_str().first().copied())
        .unwrap_or("bin");
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("email-{}.{}", id, ext));
    std::fs::write(&path, bytes)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockInboxApi};
    use crate::inbox::{AutoSendSettings, CoverageStyle, SummaryStyle};
    use pretty_assertions::assert_eq;

    fn email(id: EmailRecordId, coverage: Option<f64>) -> Email {
        Email {
            email_record_id: id,
            sender: "Ana".to_string(),
            sender_email: "ana@example.com".to_string(),
            content: format!("draft {}", id),
            coverage_percentage: coverage,
            ..Email::default()
        }
    }

    fn threads() -> Vec<Thread> {
        vec![Thread {
            thread_id: 1,
            thread_title: "Refund".to_string(),
            emails: vec![email(10, Some(85.0)), email(11, Some(60.0))],
        }]
    }

    fn app_with(api: MockInboxApi) -> App {
        App::new(Arc::new(Config::default()), Box::new(api))
    }

    fn loaded_api() -> MockInboxApi {
        let mut api = MockInboxApi::new();
        api.expect_list_threads().returning(|| Ok(threads()));
        api.expect_get_auto_send().times(1).returning(|| {
            Ok(AutoSendSettings {
                auto_send: true,
                threshold: Some(80.0),
            })
        });
        api
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            status: 500,
            url: "http://localhost:5000".to_string(),
        }
    }

    #[test]
    fn test_threshold_scenario() {
        let mut app = app_with(loaded_api());
        app.load();

        app.toggle_auto_send_menu();
        assert_eq!(app.mode(), Mode::AutoSendMenu);
        assert_eq!(app.thread_view.auto_send.input, "80");
        assert!(app.settings.get().auto_send);

        // Open both emails
        app.toggle_selected_email();
        app.next_email();
        app.toggle_selected_email();

        let thread = app.current_thread().unwrap().clone();
        assert_eq!(
            app.email_display(&thread.emails[0]),
            EmailDisplay::AutoSent {
                coverage: 85.0,
                style: CoverageStyle::Green
            }
        );
        assert!(matches!(
            app.email_display(&thread.emails[1]),
            EmailDisplay::Editable { .. }
        ));
    }

    #[test]
    fn test_toggle_mutates_collection_symmetrically() {
        let mut app = app_with(loaded_api());
        app.load();
        app.toggle_selected_email();
        assert!(app.threads[0].emails[0].is_open);
        app.toggle_selected_email();
        assert!(!app.threads[0].emails[0].is_open);
    }

    #[test]
    fn test_settings_fetch_failure_falls_back() {
        let mut api = MockInboxApi::new();
        api.expect_list_threads().returning(|| Ok(threads()));
        api.expect_get_auto_send().returning(|| Err(server_error()));
        let mut app = app_with(api);
        app.load();
        assert_eq!(app.settings.get(), AutoSendSettings::default());
        assert_eq!(app.alert, None);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_send_failure_alerts_and_allows_retry() {
        let mut api = loaded_api();
        let mut calls = 0;
        api.expect_update_email().times(2).returning(move |_, _| {
            calls += 1;
            if calls == 1 { Err(server_error()) } else { Ok(()) }
        });
        let mut app = app_with(api);
        app.load();
        app.next_email();
        app.toggle_selected_email();

        app.send_selected();
        assert_eq!(app.alert.as_deref(), Some("Failed to update email."));
        app.dismiss_alert();

        app.send_selected();
        assert_eq!(app.alert, None);
        let email = app.selected_email().unwrap().clone();
        assert_eq!(app.email_display(&email), EmailDisplay::Resolved);
    }

    #[test]
    fn test_edited_draft_is_what_gets_sent() {
        let mut api = loaded_api();
        api.expect_update_email()
            .withf(|id, content| *id == 11 && content == "Rewritten")
            .times(1)
            .returning(|_, _| Ok(()));
        let mut app = app_with(api);
        app.load();
        app.next_email();
        app.toggle_selected_email();
        app.set_selected_draft("Rewritten".to_string());
        assert_eq!(app.selected_draft().as_deref(), Some("Rewritten"));
        app.send_selected();
        assert_eq!(
            app.status_message.as_deref(),
            Some("Email updated successfully!")
        );
    }

    #[test]
    fn test_sent_email_stays_resolved_after_switching_threads() {
        let mut api = MockInboxApi::new();
        api.expect_list_threads().returning(|| {
            let mut t = threads();
            t.push(Thread {
                thread_id: 2,
                thread_title: "Other".to_string(),
                emails: vec![email(20, None)],
            });
            Ok(t)
        });
        api.expect_get_auto_send()
            .returning(|| Ok(AutoSendSettings::default()));
        api.expect_update_email().times(1).returning(|_, _| Ok(()));
        let mut app = app_with(api);
        app.load();
        app.toggle_selected_email();
        app.set_selected_draft("Committed".to_string());
        app.send_selected();

        app.next_thread();
        app.previous_thread();
        let email = app.selected_email().unwrap().clone();
        assert_eq!(email.content, "Committed");
        assert_eq!(app.email_display(&email), EmailDisplay::Resolved);
    }

    #[test]
    fn test_save_settings_failure_is_surfaced() {
        let mut api = loaded_api();
        api.expect_set_auto_send()
            .times(1)
            .returning(|_| Err(server_error()));
        let mut app = app_with(api);
        app.load();
        app.toggle_auto_send_menu();
        app.save_auto_send();
        assert_eq!(app.mode(), Mode::Alert);
        assert_eq!(
            app.alert.as_deref(),
            Some("Failed to save auto-send settings.")
        );
    }

    #[test]
    fn test_summarize_with_style_fills_modal() {
        let mut api = loaded_api();
        api.expect_summarize()
            .withf(|id, style| *id == 1 && *style == Some(SummaryStyle::CustomerSupport))
            .times(1)
            .returning(|_, _| Ok("Resumen".to_string()));
        let mut app = app_with(api);
        app.load();
        app.thread_view.summarize.toggle_open();
        app.thread_view.summarize.next();
        app.thread_view.summarize.next();
        app.choose_summary_style();
        assert_eq!(app.mode(), Mode::Summary);
        assert_eq!(app.summary.as_ref().unwrap().text(), "Loading summary...");

        app.process_pending();
        assert_eq!(app.summary.as_ref().unwrap().text(), "Resumen");
        // Filled modals are not fetched again
        app.process_pending();
    }

    #[test]
    fn test_summary_failure_closes_modal() {
        let mut api = loaded_api();
        api.expect_summarize()
            .times(1)
            .returning(|_, _| Err(server_error()));
        let mut app = app_with(api);
        app.load();
        app.summarize();
        app.process_pending();
        assert_eq!(app.summary, None);
        assert_eq!(app.alert.as_deref(), Some("Failed to summarize thread."));
        app.process_pending();
    }

    #[test]
    fn test_smart_reply_opens_reply_modal() {
        let mut api = loaded_api();
        api.expect_smart_reply()
            .times(1)
            .returning(|_| Ok("Suggested answer".to_string()));
        let mut app = app_with(api);
        app.load();
        app.smart_reply();
        let modal = app.compose.as_ref().unwrap();
        assert!(modal.is_reply());
        assert_eq!(modal.body, "Suggested answer");
        assert_eq!(modal.thread_id, Some(1));
    }

    #[test]
    fn test_oversized_reply_attachment_blocked() {
        use std::io::Write;
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&vec![0u8; 600 * 1024]).unwrap();
        file.flush().unwrap();

        // No create_email expectation: any request would panic the mock.
        let mut app = app_with(loaded_api());
        app.load();
        app.reply_to_selected();
        let modal = app.compose.as_mut().unwrap();
        modal.attachment_input = file.path().display().to_string();
        app.attach_compose_image();
        assert_eq!(
            app.alert.as_deref(),
            Some("Image size must be less than 500KB.")
        );
        app.dismiss_alert();
        app.submit_compose();
        assert!(app.compose.is_some());
    }

    #[test]
    fn test_typed_oversized_attachment_blocks_submit() {
        use std::io::Write;
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&vec![0u8; 600 * 1024]).unwrap();
        file.flush().unwrap();

        // Path typed but never confirmed; no create_email expectation.
        let mut app = app_with(loaded_api());
        app.load();
        app.reply_to_selected();
        app.compose.as_mut().unwrap().attachment_input = file.path().display().to_string();
        app.submit_compose();
        assert_eq!(
            app.alert.as_deref(),
            Some("Image size must be less than 500KB.")
        );
        assert!(app.compose.is_some());
        assert_eq!(app.status_message, None);
    }

    #[test]
    fn test_compose_success_closes_and_reloads() {
        let mut api = MockInboxApi::new();
        api.expect_list_threads().times(2).returning(|| Ok(threads()));
        api.expect_get_auto_send()
            .returning(|| Ok(AutoSendSettings::default()));
        api.expect_create_email().times(1).returning(|_| Ok(()));
        let mut app = app_with(api);
        app.load();
        app.open_compose();
        app.submit_compose();
        assert!(app.compose.is_none());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Email sent successfully!")
        );
    }

    #[test]
    fn test_compose_failure_keeps_modal_open() {
        let mut api = loaded_api();
        api.expect_create_email()
            .times(1)
            .returning(|_| Err(server_error()));
        let mut app = app_with(api);
        app.load();
        app.open_compose();
        app.submit_compose();
        assert!(app.compose.is_some());
        assert_eq!(app.alert.as_deref(), Some("Failed to send email."));
    }

    #[test]
    fn test_save_download_sniffs_extension() {
        let dir = tempfile::tempdir().unwrap();
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        let path = save_download(dir.path(), 7, &png).unwrap();
        assert_eq!(path.file_name().unwrap(), "email-7.png");
        let other = save_download(dir.path(), 8, b"hello").unwrap();
        assert_eq!(other.file_name().unwrap(), "email-8.bin");
    }

    #[test]
    fn test_thread_navigation_resets_email_selection() {
        let mut api = MockInboxApi::new();
        api.expect_list_threads().returning(|| {
            let mut t = threads();
            t.push(Thread {
                thread_id: 2,
                thread_title: "Other".to_string(),
                emails: vec![email(20, None)],
            });
            Ok(t)
        });
        api.expect_get_auto_send()
            .returning(|| Ok(AutoSendSettings::default()));
        let mut app = app_with(api);
        app.load();
        app.next_email();
        assert_eq!(app.thread_view.selected, 1);
        app.next_thread();
        assert_eq!(app.thread_view.selected, 0);
        assert_eq!(app.current_thread().unwrap().thread_id, 2);
        app.next_thread();
        assert_eq!(app.current_thread_index(), Some(1));
    }
}

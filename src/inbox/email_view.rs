use tracing::{error, info};

use super::types::Email;
use crate::api::{ApiError, InboxApi};

/// Number of characters shown for a collapsed email
pub const PREVIEW_CHARS: usize = 100;

/// Colour bucket for a coverage score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageStyle {
    Red,
    Yellow,
    Green,
    Hidden,
}

/// [0,25] red, (25,75) yellow, (75,100] green; everything else, 75 included, is hidden
pub fn coverage_style(coverage: Option<f64>) -> CoverageStyle {
    match coverage {
        Some(c) if (0.0..=25.0).contains(&c) => CoverageStyle::Red,
        Some(c) if c > 25.0 && c < 75.0 => CoverageStyle::Yellow,
        Some(c) if c > 75.0 && c <= 100.0 => CoverageStyle::Green,
        _ => CoverageStyle::Hidden,
    }
}

/// First `PREVIEW_CHARS` characters, with an ellipsis when anything was cut
pub fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// An unresolved email counts as auto-sent when its coverage reaches the threshold.
/// A zero threshold counts as unset, the same as the blank threshold input.
pub fn is_auto_sent(email: &Email, threshold: Option<f64>) -> bool {
    match (email.coverage_percentage, threshold) {
        (Some(coverage), Some(threshold)) if threshold != 0.0 => coverage >= threshold,
        _ => false,
    }
}

/// How an email is drawn right now
#[derive(Debug, Clone, PartialEq)]
pub enum EmailDisplay {
    Collapsed {
        preview: String,
    },
    Resolved,
    AutoSent {
        coverage: f64,
        style: CoverageStyle,
    },
    Editable {
        coverage: Option<(f64, CoverageStyle)>,
    },
}

impl EmailDisplay {
    pub fn is_read_only(&self) -> bool {
        matches!(self, EmailDisplay::Resolved | EmailDisplay::AutoSent { .. })
    }
}

/// Per-email local state: the draft being edited and whether it was sent here
#[derive(Debug, Clone, PartialEq)]
pub struct EmailView {
    pub draft: String,
    pub resolved: bool,
    pub show_description: bool,
}

impl EmailView {
    pub fn new(email: &Email) -> Self {
        Self {
            draft: email.content.clone(),
            resolved: email.is_resolved,
            show_description: false,
        }
    }

    pub fn display(&self, email: &Email, threshold: Option<f64>) -> EmailDisplay {
        if !email.is_open {
            return EmailDisplay::Collapsed {
                preview: preview(&email.content),
            };
        }
        if self.resolved || email.is_resolved {
            return EmailDisplay::Resolved;
        }
        if is_auto_sent(email, threshold) {
            let coverage = email.coverage_percentage.unwrap_or_default();
            return EmailDisplay::AutoSent {
                coverage,
                style: coverage_style(Some(coverage)),
            };
        }
        let coverage = email
            .coverage_percentage
            .filter(|c| (0.0..=100.0).contains(c))
            .map(|c| (c, coverage_style(Some(c))));
        EmailDisplay::Editable { coverage }
    }

    pub fn set_draft(&mut self, draft: String) {
        self.draft = draft;
    }

    pub fn toggle_description(&mut self) {
        self.show_description = !self.show_description;
    }

    /// Commit the draft. Local state only changes once the backend accepts it.
    pub fn send(
        &mut self,
        api: &dyn InboxApi,
        email: &Email,
        threshold: Option<f64>,
    ) -> Result<bool, ApiError> {
        if !matches!(
            self.display(email, threshold),
            EmailDisplay::Editable { .. }
        ) {
            return Ok(false);
        }
        match api.update_email(email.email_record_id, &self.draft) {
            Ok(()) => {
                info!("Email {} updated", email.email_record_id);
                self.resolved = true;
                Ok(true)
            }
            Err(e) => {
                error!("Error updating email {}: {}", email.email_record_id, e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockInboxApi;
    use pretty_assertions::assert_eq;

    fn email(coverage: Option<f64>) -> Email {
        Email {
            email_record_id: 9,
            sender: "Ana".to_string(),
            sender_email: "ana@example.com".to_string(),
            content: "Thanks, we will refund you.".to_string(),
            is_open: true,
            coverage_percentage: coverage,
            coverage_description: "Refund SOP".to_string(),
            ..Email::default()
        }
    }

    #[test]
    fn test_coverage_style_buckets() {
        for c in [0.0, 10.0, 25.0] {
            assert_eq!(coverage_style(Some(c)), CoverageStyle::Red, "{}", c);
        }
        for c in [25.5, 50.0, 74.9] {
            assert_eq!(coverage_style(Some(c)), CoverageStyle::Yellow, "{}", c);
        }
        for c in [75.1, 90.0, 100.0] {
            assert_eq!(coverage_style(Some(c)), CoverageStyle::Green, "{}", c);
        }
        for c in [-1.0, 75.0, 100.5, f64::NAN] {
            assert_eq!(coverage_style(Some(c)), CoverageStyle::Hidden, "{}", c);
        }
        assert_eq!(coverage_style(None), CoverageStyle::Hidden);
    }

    #[test]
    fn test_preview_truncates_long_content() {
        let long = "a".repeat(150);
        let p = preview(&long);
        assert_eq!(p, format!("{}...", "a".repeat(100)));
        assert_eq!(preview("short"), "short");
        assert_eq!(preview(&"b".repeat(100)), "b".repeat(100));
    }

    #[test]
    fn test_preview_counts_chars_not_bytes() {
        let content = "é".repeat(120);
        assert_eq!(preview(&content), format!("{}...", "é".repeat(100)));
    }

    #[test]
    fn test_collapsed_when_closed() {
        let mut e = email(Some(90.0));
        e.is_open = false;
        let view = EmailView::new(&e);
        assert!(matches!(
            view.display(&e, Some(80.0)),
            EmailDisplay::Collapsed { .. }
        ));
    }

    #[test]
    fn test_resolved_always_read_only() {
        for coverage in [None, Some(10.0), Some(99.0)] {
            for threshold in [None, Some(50.0)] {
                let mut e = email(coverage);
                e.is_resolved = true;
                let view = EmailView::new(&e);
                assert_eq!(view.display(&e, threshold), EmailDisplay::Resolved);
            }
        }
    }

    #[test]
    fn test_auto_sent_requires_coverage_and_threshold() {
        let view = EmailView::new(&email(Some(85.0)));
        assert_eq!(
            view.display(&email(Some(85.0)), Some(80.0)),
            EmailDisplay::AutoSent {
                coverage: 85.0,
                style: CoverageStyle::Green
            }
        );
        assert_eq!(
            view.display(&email(Some(80.0)), Some(80.0)),
            EmailDisplay::AutoSent {
                coverage: 80.0,
                style: CoverageStyle::Green
            }
        );
        assert!(!view.display(&email(Some(60.0)), Some(80.0)).is_read_only());
        assert!(!view.display(&email(None), Some(80.0)).is_read_only());
        assert!(!view.display(&email(Some(85.0)), None).is_read_only());
    }

    #[test]
    fn test_zero_threshold_is_unset() {
        let e = email(Some(40.0));
        assert!(!is_auto_sent(&e, Some(0.0)));
        assert!(is_auto_sent(&e, Some(40.0)));
        assert!(!EmailView::new(&e).display(&e, Some(0.0)).is_read_only());
    }

    #[test]
    fn test_editable_shows_coverage_in_range_only() {
        let view = EmailView::new(&email(Some(60.0)));
        assert_eq!(
            view.display(&email(Some(60.0)), Some(80.0)),
            EmailDisplay::Editable {
                coverage: Some((60.0, CoverageStyle::Yellow))
            }
        );
        assert_eq!(
            view.display(&email(None), Some(80.0)),
            EmailDisplay::Editable { coverage: None }
        );
    }

    #[test]
    fn test_send_success_resolves() {
        let e = email(Some(10.0));
        let mut view = EmailView::new(&e);
        view.set_draft("Edited reply".to_string());

        let mut api = MockInboxApi::new();
        api.expect_update_email()
            .withf(|id, content| *id == 9 && content == "Edited reply")
            .times(1)
            .returning(|_, _| Ok(()));

        assert!(view.send(&api, &e, Some(80.0)).unwrap());
        assert!(view.resolved);
        assert_eq!(view.display(&e, Some(80.0)), EmailDisplay::Resolved);
    }

    #[test]
    fn test_send_failure_leaves_state_for_retry() {
        let e = email(Some(10.0));
        let mut view = EmailView::new(&e);

        let mut api = MockInboxApi::new();
        api.expect_update_email().times(1).returning(|_, _| {
            Err(ApiError::Status {
                status: 500,
                url: "http://localhost:5000/update/email/9".to_string(),
            })
        });

        assert!(view.send(&api, &e, Some(80.0)).is_err());
        assert!(!view.resolved);
        assert_eq!(view.draft, e.content);
    }

    #[test]
    fn test_send_on_auto_sent_email_makes_no_request() {
        let e = email(Some(95.0));
        let mut view = EmailView::new(&e);
        let api = MockInboxApi::new();
        assert!(!view.send(&api, &e, Some(80.0)).unwrap());
    }

    #[test]
    fn test_toggle_description() {
        let mut view = EmailView::new(&email(Some(95.0)));
        assert!(!view.show_description);
        view.toggle_description();
        assert!(view.show_description);
    }
}

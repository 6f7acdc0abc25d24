use super::settings::SettingsStore;
use super::thread_view::ThreadAction;
use super::types::{SummaryStyle, ThreadId};

pub const THRESHOLD_MAX: u32 = 100;

/// Popover for the auto-send checkbox and threshold. Only the open flag and the
/// text buffer live here; values are written straight to the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutoSendDropdown {
    pub open: bool,
    pub input: String,
}

impl AutoSendDropdown {
    pub fn toggle_open(&mut self, store: &SettingsStore) {
        self.open = !self.open;
        if self.open {
            self.input = store.get().threshold_input();
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle_auto_send(&mut self, store: &mut SettingsStore) {
        let enabled = !store.get().auto_send;
        store.set_auto_send(enabled);
    }

    /// The threshold input only accepts edits while auto-send is on
    pub fn input_enabled(store: &SettingsStore) -> bool {
        store.get().auto_send
    }

    pub fn push_digit(&mut self, digit: char, store: &mut SettingsStore) {
        if !Self::input_enabled(store) || !digit.is_ascii_digit() {
            return;
        }
        let mut candidate = self.input.clone();
        candidate.push(digit);
        self.commit(candidate, store);
    }

    pub fn pop_digit(&mut self, store: &mut SettingsStore) {
        if !Self::input_enabled(store) {
            return;
        }
        let mut candidate = self.input.clone();
        candidate.pop();
        self.commit(candidate, store);
    }

    fn commit(&mut self, candidate: String, store: &mut SettingsStore) {
        if candidate.is_empty() {
            self.input.clear();
            store.set_threshold(None);
            return;
        }
        let value = candidate
            .parse::<u32>()
            .unwrap_or(THRESHOLD_MAX)
            .min(THRESHOLD_MAX);
        self.input = value.to_string();
        store.set_threshold(Some(value as f64));
    }

    /// Closes the popover and asks the coordinator to persist the settings
    pub fn save(&mut self) -> ThreadAction {
        self.open = false;
        ThreadAction::SaveAutoSend
    }
}

/// Menu rows: the plain summary first, then each style variant
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummarizeDropdown {
    pub open: bool,
    pub selected: usize,
}

impl SummarizeDropdown {
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
        self.selected = 0;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1).min(SummaryStyle::ALL.len() - 1);
    }

    pub fn previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Primary button: summarize without a style
    pub fn summarize(&mut self, thread_id: ThreadId) -> ThreadAction {
        ThreadAction::Summarize {
            thread_id,
            style: None,
        }
    }

    pub fn choose(&mut self, thread_id: ThreadId) -> ThreadAction {
        self.open = false;
        ThreadAction::Summarize {
            thread_id,
            style: Some(SummaryStyle::ALL[self.selected]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn enabled_store(threshold: Option<f64>) -> SettingsStore {
        let mut store = SettingsStore::new();
        store.set_auto_send(true);
        store.set_threshold(threshold);
        store
    }

    #[test]
    fn test_open_prefills_input() {
        let store = enabled_store(Some(80.0));
        let mut dd = AutoSendDropdown::default();
        dd.toggle_open(&store);
        assert!(dd.open);
        assert_eq!(dd.input, "80");
    }

    #[test]
    fn test_toggle_off_keeps_threshold_and_disables_input() {
        let mut store = enabled_store(Some(80.0));
        let mut dd = AutoSendDropdown::default();
        dd.toggle_open(&store);

        dd.toggle_auto_send(&mut store);
        assert!(!store.get().auto_send);
        assert_eq!(store.threshold(), Some(80.0));
        assert!(!AutoSendDropdown::input_enabled(&store));

        dd.push_digit('5', &mut store);
        dd.pop_digit(&mut store);
        assert_eq!(store.threshold(), Some(80.0));
        assert_eq!(dd.input, "80");
    }

    #[test]
    fn test_threshold_is_bounded() {
        let mut store = enabled_store(None);
        let mut dd = AutoSendDropdown::default();
        dd.toggle_open(&store);
        for d in ['1', '5', '0'] {
            dd.push_digit(d, &mut store);
        }
        assert_eq!(dd.input, "100");
        assert_eq!(store.threshold(), Some(100.0));

        dd.pop_digit(&mut store);
        dd.pop_digit(&mut store);
        dd.pop_digit(&mut store);
        assert_eq!(dd.input, "");
        assert_eq!(store.threshold(), None);
    }

    #[test]
    fn test_save_closes_and_requests_persist() {
        let store = enabled_store(Some(70.0));
        let mut dd = AutoSendDropdown::default();
        dd.toggle_open(&store);
        assert_eq!(dd.save(), ThreadAction::SaveAutoSend);
        assert!(!dd.open);
    }

    #[test]
    fn test_summarize_primary_has_no_style() {
        let mut dd = SummarizeDropdown::default();
        assert_eq!(
            dd.summarize(7),
            ThreadAction::Summarize {
                thread_id: 7,
                style: None
            }
        );
    }

    #[test]
    fn test_every_menu_item_closes_menu() {
        for (i, style) in SummaryStyle::ALL.iter().enumerate() {
            let mut dd = SummarizeDropdown::default();
            dd.toggle_open();
            for _ in 0..i {
                dd.next();
            }
            assert_eq!(
                dd.choose(7),
                ThreadAction::Summarize {
                    thread_id: 7,
                    style: Some(*style)
                }
            );
            assert!(!dd.open);
        }
    }

    #[test]
    fn test_menu_selection_clamped() {
        let mut dd = SummarizeDropdown::default();
        dd.toggle_open();
        for _ in 0..10 {
            dd.next();
        }
        assert_eq!(dd.selected, SummaryStyle::ALL.len() - 1);
        dd.previous();
        assert_eq!(dd.selected, SummaryStyle::ALL.len() - 2);
    }
}

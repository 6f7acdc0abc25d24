use tracing::{error, info, warn};

use super::types::AutoSendSettings;
use crate::api::{ApiError, InboxApi};

pub type SubscriptionId = usize;

type Listener = Box<dyn FnMut(&AutoSendSettings)>;

/// Single owner of the auto-send settings. Views read from it and write through
/// it; listeners hear about every change.
#[derive(Default)]
pub struct SettingsStore {
    settings: AutoSendSettings,
    loaded: bool,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: SubscriptionId,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> AutoSendSettings {
        self.settings
    }

    pub fn threshold(&self) -> Option<f64> {
        self.settings.threshold
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&AutoSendSettings) + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(sid, _)| *sid != id);
    }

    /// Apply a change and notify listeners if anything actually changed
    pub fn update(&mut self, f: impl FnOnce(&mut AutoSendSettings)) {
        let before = self.settings;
        f(&mut self.settings);
        if self.settings != before {
            let settings = self.settings;
            for (_, listener) in self.listeners.iter_mut() {
                listener(&settings);
            }
        }
    }

    pub fn set_auto_send(&mut self, auto_send: bool) {
        self.update(|s| s.auto_send = auto_send);
    }

    pub fn set_threshold(&mut self, threshold: Option<f64>) {
        self.update(|s| s.threshold = threshold);
    }

    /// Fetch once from the backend. A failed read is logged and keeps the defaults.
    pub fn load(&mut self, api: &dyn InboxApi) -> Result<(), ApiError> {
        match api.get_auto_send() {
            Ok(fetched) => {
                info!(
                    "Loaded auto-send settings: auto_send={} threshold={:?}",
                    fetched.auto_send, fetched.threshold
                );
                self.loaded = true;
                self.update(|s| *s = fetched);
                Ok(())
            }
            Err(e) => {
                warn!("Error fetching auto-send settings: {}", e);
                Err(e)
            }
        }
    }

    pub fn save(&self, api: &dyn InboxApi) -> Result<(), ApiError> {
        api.set_auto_send(self.settings).inspect_err(|e| {
            error!("Error setting up threshold: {}", e);
        })
    }
}

use serde::{Deserialize, Serialize};

pub type ThreadId = i64;
pub type EmailRecordId = i64;

/// Threshold value the backend stores when auto-send is effectively off
pub const THRESHOLD_NEVER: f64 = 101.0;

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub thread_id: ThreadId,
    #[serde(default)]
    pub thread_title: String,
    #[serde(default)]
    pub emails: Vec<Email>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub email_record_id: EmailRecordId,
    #[serde(default)]
    pub sender: String,
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_open: bool,
    #[serde(default)]
    pub is_resolved: bool,
    #[serde(default)]
    pub coverage_percentage: Option<f64>,
    #[serde(default)]
    pub coverage_description: String,
    #[serde(default)]
    pub image_path: Option<String>,
}

impl Email {
    pub fn has_image(&self) -> bool {
        self.image_path.as_deref().is_some_and(|p| !p.is_empty())
    }

    pub fn sender_display(&self) -> &str {
        if self.sender.is_empty() {
            &self.sender_email
        } else {
            &self.sender
        }
    }
}

/// Auto-send settings as they travel over the wire
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq)]
pub struct AutoSendSettings {
    #[serde(rename = "isAutoSend", default)]
    pub auto_send: bool,
    #[serde(rename = "thresholdVal", default)]
    pub threshold: Option<f64>,
}

impl AutoSendSettings {
    /// Text shown in the threshold input; blank when unset or at the "never" sentinel
    pub fn threshold_input(&self) -> String {
        match self.threshold {
            Some(t) if t != 0.0 && t != THRESHOLD_NEVER => format!("{}", t),
            _ => String::new(),
        }
    }
}

/// Style variants the summarize menu offers besides the plain summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStyle {
    Spanish,
    CorporateEmail,
    CustomerSupport,
}

impl SummaryStyle {
    pub const ALL: [SummaryStyle; 3] = [
        SummaryStyle::Spanish,
        SummaryStyle::CorporateEmail,
        SummaryStyle::CustomerSupport,
    ];

    /// Tag the backend expects in the summarize path
    pub fn tag(&self) -> &'static str {
        match self {
            SummaryStyle::Spanish => "convert_to_spanish",
            SummaryStyle::CorporateEmail => "corporate_email",
            SummaryStyle::CustomerSupport => "customer_support",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SummaryStyle::Spanish => "Summarize in Spanish",
            SummaryStyle::CorporateEmail => "Summarize for Corporate Email",
            SummaryStyle::CustomerSupport => "Summarize for Customer Support",
        }
    }
}

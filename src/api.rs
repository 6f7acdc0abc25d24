//! Typed client for the inbox backend.
//!
//! Views never talk HTTP themselves; they receive an `&dyn InboxApi` so tests can
//! substitute a mock.

use reqwest::blocking::{Client, multipart};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::config::BackendConfig;
use crate::inbox::{AutoSendSettings, EmailRecordId, SummaryStyle, Thread, ThreadId};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned {status}")]
    Status { status: u16, url: String },
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Image attached to an outgoing email
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Multipart payload for the create-email endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmail {
    pub sender_email: String,
    pub subject: String,
    pub content: String,
    pub image: Option<ImageUpload>,
    /// Replies are posted to the thread-scoped endpoint
    pub thread_id: Option<ThreadId>,
}

#[cfg_attr(test, mockall::automock)]
pub trait InboxApi {
    fn get_auto_send(&self) -> Result<AutoSendSettings, ApiError>;
    fn set_auto_send(&self, settings: AutoSendSettings) -> Result<(), ApiError>;
    fn update_email(&self, id: EmailRecordId, content: &str) -> Result<(), ApiError>;
    fn create_email(&self, email: &NewEmail) -> Result<(), ApiError>;
    fn download_image(&self, id: EmailRecordId) -> Result<Vec<u8>, ApiError>;
    fn list_threads(&self) -> Result<Vec<Thread>, ApiError>;
    fn summarize(
        &self,
        thread_id: ThreadId,
        style: Option<SummaryStyle>,
    ) -> Result<String, ApiError>;
    fn smart_reply(&self, thread_id: ThreadId) -> Result<String, ApiError>;
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    content: &'a str,
}

/// `InboxApi` over HTTP with a blocking reqwest client. No timeouts are set.
pub struct HttpApi {
    client: Client,
    config: BackendConfig,
}

impl HttpApi {
    pub fn new(config: BackendConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(None::<std::time::Duration>)
            .build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn check(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                url: resp.url().to_string(),
            })
        }
    }

    fn get_text(&self, path: &str) -> Result<String, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);
        let resp = Self::check(self.client.get(&url).send()?)?;
        Ok(resp.text()?)
    }
}

impl InboxApi for HttpApi {
    fn get_auto_send(&self) -> Result<AutoSendSettings, ApiError> {
        let body = self.get_text("/get_auto_send")?;
        Ok(serde_json::from_str(&body)?)
    }

    fn set_auto_send(&self, settings: AutoSendSettings) -> Result<(), ApiError> {
        let url = self.url(&set_auto_send_path(settings));
        debug!("POST {}", url);
        Self::check(self.client.post(&url).send()?)?;
        Ok(())
    }

    fn update_email(&self, id: EmailRecordId, content: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/update/email/{}", id));
        debug!("PUT {}", url);
        Self::check(self.client.put(&url).json(&UpdateBody { content }).send()?)?;
        Ok(())
    }

    fn create_email(&self, email: &NewEmail) -> Result<(), ApiError> {
        let url = self.url(&create_email_path(email.thread_id));
        let mut form = multipart::Form::new()
            .text("senderEmail", email.sender_email.clone())
            .text("subject", email.subject.clone())
            .text("content", email.content.clone());
        if let Some(image) = &email.image {
            let part = multipart::Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.mime)?;
            form = form.part("image", part);
        }
        debug!("POST {} (multipart)", url);
        Self::check(self.client.post(&url).multipart(form).send()?)?;
        Ok(())
    }

    fn download_image(&self, id: EmailRecordId) -> Result<Vec<u8>, ApiError> {
        let url = self.url(&format!("/download_img/{}", id));
        debug!("GET {}", url);
        let resp = Self::check(self.client.get(&url).send()?)?;
        Ok(resp.bytes()?.to_vec())
    }

    fn list_threads(&self) -> Result<Vec<Thread>, ApiError> {
        let body = self.get_text(&self.config.threads_path)?;
        Ok(serde_json::from_str(&body)?)
    }

    fn summarize(
        &self,
        thread_id: ThreadId,
        style: Option<SummaryStyle>,
    ) -> Result<String, ApiError> {
        let path = summarize_path(&self.config.summarize_path, thread_id, style);
        let body = self.get_text(&path)?;
        Ok(extract_text(&body, "summary"))
    }

    fn smart_reply(&self, thread_id: ThreadId) -> Result<String, ApiError> {
        let path = format!(
            "{}/{}",
            self.config.smart_reply_path.trim_end_matches('/'),
            thread_id
        );
        let body = self.get_text(&path)?;
        Ok(extract_text(&body, "reply"))
    }
}

/// Both values travel in the path; an unset threshold is sent as `null`
pub fn set_auto_send_path(settings: AutoSendSettings) -> String {
    let threshold = settings
        .threshold
        .map(|t| format!("{}", t))
        .unwrap_or_else(|| "null".to_string());
    format!(
        "/set_auto_send/{}/{}",
        settings.auto_send,
        urlencoding::encode(&threshold)
    )
}

pub fn create_email_path(thread_id: Option<ThreadId>) -> String {
    match thread_id {
        Some(id) => format!("/create/email/{}", id),
        None => "/create/email".to_string(),
    }
}

pub fn summarize_path(base: &str, thread_id: ThreadId, style: Option<SummaryStyle>) -> String {
    let base = base.trim_end_matches('/');
    match style {
        Some(style) => format!("{}/{}/{}", base, thread_id, style.tag()),
        None => format!("{}/{}", base, thread_id),
    }
}

/// Accept either a bare text body, a JSON string, or a JSON object carrying `key`
fn extract_text(body: &str, key: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(serde_json::Value::Object(map)) => match map.get(key) {
            Some(serde_json::Value::String(s)) => s.clone(),
            _ => body.to_string(),
        },
        _ => body.to_string(),
    }
}

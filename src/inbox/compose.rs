use std::path::{Path, PathBuf};

use image::ImageFormat;
use thiserror::Error;
use tracing::{error, info, warn};

use super::types::ThreadId;
use crate::api::{ApiError, ImageUpload, InboxApi, NewEmail};

/// Attachments must stay strictly below this many bytes
pub const MAX_IMAGE_BYTES: u64 = 500 * 1024;
pub const ALLOWED_IMAGE_TYPES: [&str; 2] = ["image/png", "image/jpeg"];
pub const REPLY_SUBJECT: &str = "Re: ";

#[derive(Debug, Error, PartialEq)]
pub enum AttachmentError {
    #[error("Image type must be PNG or JPEG.")]
    UnsupportedType(String),
    #[error("Image size must be less than 500KB.")]
    TooLarge(u64),
    #[error("Could not read {0}")]
    Unreadable(String),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Attachment(#[from] AttachmentError),
    #[error("Failed to send email.")]
    Api(#[from] ApiError),
}

/// Reject anything that is not PNG/JPEG or is 500KB or more
pub fn validate_attachment(mime: &str, size: u64) -> Result<(), AttachmentError> {
    if !ALLOWED_IMAGE_TYPES.contains(&mime) {
        return Err(AttachmentError::UnsupportedType(mime.to_string()));
    }
    if size >= MAX_IMAGE_BYTES {
        return Err(AttachmentError::TooLarge(size));
    }
    Ok(())
}

/// MIME type from the file extension, the way a browser file picker reports it
pub fn mime_for_path(path: &Path) -> String {
    ImageFormat::from_path(path)
        .map(|f| f.to_mime_type().to_string())
        .unwrap_or_else(|_| "application/octet-stream".to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub path: PathBuf,
    pub mime: String,
    pub size: u64,
}

impl Attachment {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeField {
    Sender,
    Subject,
    Body,
    Attachment,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComposeModal {
    /// Set when replying; the email goes to the thread-scoped endpoint
    pub thread_id: Option<ThreadId>,
    pub sender_email: String,
    pub subject: String,
    pub body: String,
    /// Path being typed into the attachment field
    pub attachment_input: String,
    pub attachment: Option<Attachment>,
    pub focus: ComposeField,
    pub maximized: bool,
}

impl ComposeModal {
    pub fn new(default_sender: &str) -> Self {
        Self {
            thread_id: None,
            sender_email: default_sender.to_string(),
            subject: String::new(),
            body: String::new(),
            attachment_input: String::new(),
            attachment: None,
            focus: ComposeField::Sender,
            maximized: true,
        }
    }

    pub fn reply(sender_email: &str, thread_id: ThreadId) -> Self {
        Self {
            thread_id: Some(thread_id),
            sender_email: sender_email.to_string(),
            subject: REPLY_SUBJECT.to_string(),
            focus: ComposeField::Body,
            ..Self::new("")
        }
    }

    pub fn is_reply(&self) -> bool {
        self.thread_id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_reply() {
            "Reply Email"
        } else {
            "New Email"
        }
    }

    /// Replies lock the sender and hide the subject
    pub fn fields(&self) -> Vec<ComposeField> {
        if self.is_reply() {
            vec![ComposeField::Body, ComposeField::Attachment]
        } else {
            vec![
                ComposeField::Sender,
                ComposeField::Subject,
                ComposeField::Body,
                ComposeField::Attachment,
            ]
        }
    }

    pub fn next_field(&mut self) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + 1) % fields.len()];
    }

    pub fn prev_field(&mut self) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(pos + fields.len() - 1) % fields.len()];
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        let locked = self.is_reply();
        match self.focus {
            ComposeField::Sender if !locked => Some(&mut self.sender_email),
            ComposeField::Subject if !locked => Some(&mut self.subject),
            ComposeField::Body => Some(&mut self.body),
            ComposeField::Attachment => Some(&mut self.attachment_input),
            _ => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    pub fn toggle_maximize(&mut self) {
        self.maximized = !self.maximized;
    }

    /// Pick the file named in the attachment field. An empty field clears it.
    pub fn attach_from_input(&mut self) -> Result<(), AttachmentError> {
        let input = self.attachment_input.trim().to_string();
        if input.is_empty() {
            self.attachment = None;
            return Ok(());
        }
        self.attach(Path::new(shellexpand::tilde(&input).as_ref()))
    }

    /// Pick up a path typed into the attachment field but never confirmed.
    /// A no-op when the field already names the selected file.
    pub fn resolve_attachment(&mut self) -> Result<(), AttachmentError> {
        let input = self.attachment_input.trim();
        let expanded = PathBuf::from(shellexpand::tilde(input).as_ref());
        let unchanged = match &self.attachment {
            None => input.is_empty(),
            Some(att) => !input.is_empty() && att.path == expanded,
        };
        if unchanged {
            return Ok(());
        }
        self.attach_from_input()
    }

    /// Select a file. An invalid one stays selected so that sending is refused
    /// with the same message.
    pub fn attach(&mut self, path: &Path) -> Result<(), AttachmentError> {
        self.attachment = None;
        let size = std::fs::metadata(path)
            .map_err(|_| AttachmentError::Unreadable(path.display().to_string()))?
            .len();
        let mime = mime_for_path(path);
        let verdict = validate_attachment(&mime, size);
        self.attachment = Some(Attachment {
            path: path.to_path_buf(),
            mime,
            size,
        });
        verdict
    }

    pub fn success_message(&self) -> &'static str {
        if self.is_reply() {
            "Reply sent successfully!"
        } else {
            "Email sent successfully!"
        }
    }

    /// Validate, then post. Nothing reaches the network when validation fails.
    pub fn submit(&self, api: &dyn InboxApi) -> Result<(), SubmitError> {
        let image = match &self.attachment {
            Some(att) => {
                let size = std::fs::metadata(&att.path)
                    .map_err(|_| AttachmentError::Unreadable(att.path.display().to_string()))?
                    .len();
                if let Err(e) = validate_attachment(&att.mime, size) {
                    warn!("Rejected attachment {}: {}", att.path.display(), e);
                    return Err(e.into());
                }
                let bytes = std::fs::read(&att.path)
                    .map_err(|_| AttachmentError::Unreadable(att.path.display().to_string()))?;
                Some(ImageUpload {
                    file_name: att.file_name(),
                    mime: att.mime.clone(),
                    bytes,
                })
            }
            None => None,
        };

        let email = NewEmail {
            sender_email: self.sender_email.clone(),
            subject: self.subject.clone(),
            content: self.body.clone(),
            image,
            thread_id: self.thread_id,
        };
        match api.create_email(&email) {
            Ok(()) => {
                info!("Email created (thread {:?})", self.thread_id);
                Ok(())
            }
            Err(e) => {
                error!("Error sending email: {}", e);
                Err(e.into())
            }
        }
    }
}

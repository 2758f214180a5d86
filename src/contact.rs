//! Contact form state and its submit lifecycle.
//!
//! The form does no I/O: [`ContactForm::begin_submit`] validates and hands
//! back the request body, the caller posts it, and
//! [`ContactForm::apply_result`] records the outcome. A success banner is
//! cleared together with the fields by [`ContactForm::tick`] after
//! [`RESET_DELAY`].

use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::api::{ApiError, ContactRequest};

/// How long the success banner stays before the form resets.
pub const RESET_DELAY: Duration = Duration::from_secs(5);

pub const FALLBACK_ERROR: &str = "Failed to send message. Please try again.";

/// Upper bound per field, keeps a stuck key from growing the buffer forever.
const MAX_FIELD_LEN: usize = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Full Name",
            Field::Email => "Email Address",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Your name",
            Field::Email => "your@email.com",
            Field::Subject => "What is this about?",
            Field::Message => "Tell us how we can help...",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Subject,
            Field::Subject => Field::Message,
            Field::Message => Field::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Name => Field::Message,
            Field::Email => Field::Name,
            Field::Subject => Field::Email,
            Field::Message => Field::Subject,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("{} is required", .0.label())]
    Missing(Field),
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    Success { message: String, at: Instant },
    Error(String),
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    name: String,
    email: String,
    subject: String,
    message: String,
    focus: Field,
    submitting: bool,
    status: SubmitStatus,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            subject: String::new(),
            message: String::new(),
            focus: Field::Name,
            submitting: false,
            status: SubmitStatus::Idle,
        }
    }
}

impl ContactForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Type into the focused field. Inputs are locked while submitting.
    pub fn insert_char(&mut self, c: char) {
        if self.submitting || (c.is_control() && c != '\n') {
            return;
        }
        // Only the message body is multi-line
        if c == '\n' && self.focus != Field::Message {
            return;
        }
        let focus = self.focus;
        let buf = self.value_mut(focus);
        if buf.chars().count() < MAX_FIELD_LEN {
            buf.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.submitting {
            return;
        }
        let focus = self.focus;
        self.value_mut(focus).pop();
    }

    /// Validate and start a submission.
    ///
    /// Returns `Ok(None)` while a submission is already in flight. On
    /// success the banner is cleared and the request body returned.
    pub fn begin_submit(&mut self) -> Result<Option<ContactRequest>, ContactValidationError> {
        if self.submitting {
            return Ok(None);
        }
        if let Err(e) = self.validate() {
            self.status = SubmitStatus::Error(e.to_string());
            return Err(e);
        }
        self.submitting = true;
        self.status = SubmitStatus::Idle;
        Ok(Some(ContactRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }))
    }

    fn validate(&self) -> Result<(), ContactValidationError> {
        for field in Field::ALL {
            if self.value(field).trim().is_empty() {
                return Err(ContactValidationError::Missing(field));
            }
        }
        if !looks_like_email(self.email.trim()) {
            return Err(ContactValidationError::InvalidEmail);
        }
        Ok(())
    }

    /// Record the outcome of a submission started at `now`.
    ///
    /// A success without a confirmation message leaves the banner idle.
    pub fn apply_result(&mut self, result: Result<Option<String>, ApiError>, now: Instant) {
        self.submitting = false;
        self.status = match result {
            Ok(Some(message)) => {
                tracing::info!("Contact message sent");
                SubmitStatus::Success { message, at: now }
            }
            Ok(None) => {
                tracing::debug!("Contact submission acknowledged without message");
                SubmitStatus::Idle
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to submit contact form");
                SubmitStatus::Error(
                    e.server_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| FALLBACK_ERROR.to_string()),
                )
            }
        };
    }

    /// Give up on a submission whose task never reported back.
    pub fn abort_submit(&mut self) {
        if self.submitting {
            self.submitting = false;
            self.status = SubmitStatus::Error(FALLBACK_ERROR.to_string());
        }
    }

    /// Reset the form once the success banner has been shown long enough.
    ///
    /// Returns true if anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.status {
            SubmitStatus::Success { at, .. } if now.duration_since(at) >= RESET_DELAY => {
                *self = Self {
                    focus: self.focus,
                    ..Self::default()
                };
                true
            }
            _ => false,
        }
    }
}

fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(head, tail)| !head.is_empty() && !tail.is_empty())
        && !domain.ends_with('.')
}

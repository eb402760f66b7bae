//! # Contact Form
//!
//! Validation of contact form submissions.
//!
//! Submissions are never delivered anywhere; the app acknowledges a valid
//! message and forgets it. This module only decides what "valid" means.

use crate::FolioError;
use crate::primitives::{
    MAX_CONTACT_EMAIL_LENGTH, MAX_CONTACT_MESSAGE_LENGTH, MAX_CONTACT_NAME_LENGTH,
    MAX_CONTACT_SUBJECT_LENGTH,
};
use serde::Serialize;

/// A validated contact form submission with trimmed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactMessage {
    name: String,
    email: String,
    subject: Option<String>,
    message: String,
}

impl ContactMessage {
    /// Validate raw form fields.
    ///
    /// A blank subject is treated as absent.
    pub fn new(
        name: &str,
        email: &str,
        subject: Option<&str>,
        message: &str,
    ) -> Result<Self, FolioError> {
        let name = required("name", name, MAX_CONTACT_NAME_LENGTH)?;
        let email = required("email", email, MAX_CONTACT_EMAIL_LENGTH)?;
        validate_email(&email)?;
        let message = required("message", message, MAX_CONTACT_MESSAGE_LENGTH)?;

        let subject = match subject.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) if s.len() > MAX_CONTACT_SUBJECT_LENGTH => {
                return Err(too_long("subject", s.len(), MAX_CONTACT_SUBJECT_LENGTH));
            }
            Some(s) => Some(s.to_string()),
            None => None,
        };

        Ok(Self {
            name,
            email,
            subject,
            message,
        })
    }

    /// Sender name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sender email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Subject line, if given.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Canonical byte form of the submission, used to derive a receipt.
    #[must_use]
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let fields = [
            self.name.as_str(),
            self.email.as_str(),
            self.subject.as_deref().unwrap_or_default(),
            self.message.as_str(),
        ];
        fields.join("\u{1f}").into_bytes()
    }
}

fn required(field: &'static str, raw: &str, max: usize) -> Result<String, FolioError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(FolioError::InvalidContact {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    if value.len() > max {
        return Err(too_long(field, value.len(), max));
    }
    Ok(value.to_string())
}

fn too_long(field: &'static str, len: usize, max: usize) -> FolioError {
    FolioError::InvalidContact {
        field,
        reason: format!("length {} exceeds maximum {} bytes", len, max),
    }
}

/// One `@`, a non-empty local part, and a dotted domain whose labels are
/// not empty at either end.
fn validate_email(email: &str) -> Result<(), FolioError> {
    let invalid = || FolioError::InvalidContact {
        field: "email",
        reason: format!("'{}' is not a valid address", email),
    };

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

//! Validation Error Types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reason an address was rejected.
///
/// Serializes as the bare snake_case code so callers can forward it to
/// clients or logs verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    /// Address does not match the accepted shape
    #[error("Invalid email format")]
    InvalidEmailFormat,

    /// Local part or domain exceeds its length limit
    #[error("Email local part or domain is too long")]
    EmailPartTooLong,

    /// Domain is on the disposable mailbox list
    #[error("Disposable email addresses are not allowed")]
    DisposableEmailNotAllowed,

    /// Local part contains a forbidden character
    #[error("Email local part contains invalid characters")]
    InvalidCharacters,
}

impl ValidationError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmailFormat => "invalid_email_format",
            Self::EmailPartTooLong => "email_part_too_long",
            Self::DisposableEmailNotAllowed => "disposable_email_not_allowed",
            Self::InvalidCharacters => "invalid_characters",
        }
    }
}

/// Errors while loading an [`EmailConfig`](crate::EmailConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Source could not be read or deserialized
    #[error("Failed to load email config: {0}")]
    Load(#[from] config::ConfigError),
}

//! Email Validation and Normalization
//!
//! Policy validation of email addresses (shape, length, disposable domains,
//! forbidden characters) and provider-aware canonicalization that folds
//! dot and `+`/`-` alias variants to a single address for deduplication.
//!
//! Both operations are pure. Call [`validate_email`] first and only
//! normalize addresses that pass.

mod config;
mod error;
mod normalizer;
mod validator;

pub use crate::config::{
    EmailConfig, NormalizationConfig, ProviderRule, ValidationConfig, DEFAULT_DISPOSABLE_DOMAINS,
};
pub use error::{ConfigError, ValidationError};
pub use normalizer::{AliasRule, Normalizer};
pub use validator::{
    ValidationResult, Validator, MAX_DOMAIN_LENGTH, MAX_EMAIL_LENGTH, MAX_LOCAL_PART_LENGTH,
    MIN_EMAIL_LENGTH,
};

pub use ::config::FileFormat;

use std::sync::OnceLock;

static DEFAULT_VALIDATOR: OnceLock<Validator> = OnceLock::new();
static DEFAULT_NORMALIZER: OnceLock<Normalizer> = OnceLock::new();

/// Validate `email` against the default policy
pub fn validate_email(email: &str) -> ValidationResult {
    DEFAULT_VALIDATOR.get_or_init(Validator::default).validate(email)
}

/// Canonicalize `email` with the default provider table
pub fn normalize_email(email: &str) -> String {
    DEFAULT_NORMALIZER.get_or_init(Normalizer::default).normalize(email)
}

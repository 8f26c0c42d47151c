//! Email Address Validator
//!
//! Checks run in a fixed order and stop at the first failure, so an address
//! with several defects always reports the earliest one:
//!
//! 1. overall shape (length, allowed characters, `local@label.tld`)
//! 2. local part and domain lengths
//! 3. disposable domain membership
//! 4. forbidden characters in the local part

use crate::config::ValidationConfig;
use crate::error::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

/// Shortest accepted address, `@` included
pub const MIN_EMAIL_LENGTH: usize = 6;
/// Longest accepted address, `@` included
pub const MAX_EMAIL_LENGTH: usize = 254;
/// Longest accepted local part
pub const MAX_LOCAL_PART_LENGTH: usize = 64;
/// Longest accepted domain
pub const MAX_DOMAIN_LENGTH: usize = 255;

// The length bound lives in `fits_overall_bounds` since `regex` has no lookahead.
const SHAPE_PATTERN: &str =
    r"^[A-Za-z0-9._%+-]{1,64}@(?:[A-Za-z0-9-]{1,63}\.){1,8}[A-Za-z]{2,63}$";

static SHAPE_RE: OnceLock<Regex> = OnceLock::new();

fn shape_regex() -> &'static Regex {
    SHAPE_RE.get_or_init(|| {
        Regex::new(SHAPE_PATTERN)
            .unwrap_or_else(|error| panic!("email shape regex failed to compile: {error}"))
    })
}

fn fits_overall_bounds(input: &str) -> bool {
    (MIN_EMAIL_LENGTH..=MAX_EMAIL_LENGTH).contains(&input.len())
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '_' | '%' | '+' | '-'))
}

fn is_forbidden_local_char(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '<' | '>' | '(' | ')' | '[' | ']' | '\\' | '.' | ',' | ';' | ':' | '"'
        )
}

/// Outcome of validating one address
///
/// Serializes as `{"isValid": true}` or
/// `{"isValid": false, "error": "<code>"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<ValidationError>,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    /// Create an invalid result
    pub fn invalid(error: ValidationError) -> Self {
        Self {
            is_valid: false,
            error: Some(error),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Rejection reason, `None` when valid
    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    /// Convert to a `Result` for `?`-style call sites
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Policy validator for email addresses
#[derive(Debug, Clone)]
pub struct Validator {
    disposable_domains: HashSet<String>,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        let disposable_domains: HashSet<String> = config
            .disposable_domains
            .iter()
            .map(|domain| domain.to_lowercase())
            .collect();
        debug!(
            "Creating email validator with {} disposable domains",
            disposable_domains.len()
        );
        Self { disposable_domains }
    }

    /// Classify an address. Never panics, whatever the input.
    pub fn validate(&self, input: &str) -> ValidationResult {
        match self.check(input) {
            Ok(()) => ValidationResult::valid(),
            Err(error) => {
                debug!("Email rejected: {}", error.code());
                ValidationResult::invalid(error)
            }
        }
    }

    fn check(&self, input: &str) -> Result<(), ValidationError> {
        self.check_format(input)?;

        let Some((local_part, domain)) = input.split_once('@') else {
            return Err(ValidationError::InvalidEmailFormat);
        };

        // Unreachable after the format check today; kept as a second gate.
        if domain.len() > MAX_DOMAIN_LENGTH || local_part.len() > MAX_LOCAL_PART_LENGTH {
            return Err(ValidationError::EmailPartTooLong);
        }

        if self.is_disposable(domain) {
            return Err(ValidationError::DisposableEmailNotAllowed);
        }

        // Stricter than the format check: dots pass there but not here.
        if local_part.chars().any(is_forbidden_local_char) {
            return Err(ValidationError::InvalidCharacters);
        }

        Ok(())
    }

    fn check_format(&self, input: &str) -> Result<(), ValidationError> {
        if fits_overall_bounds(input) && shape_regex().is_match(input) {
            Ok(())
        } else {
            Err(ValidationError::InvalidEmailFormat)
        }
    }

    /// Whether `domain` is on the disposable list, ignoring case
    pub fn is_disposable(&self, domain: &str) -> bool {
        self.disposable_domains.contains(&domain.to_lowercase())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

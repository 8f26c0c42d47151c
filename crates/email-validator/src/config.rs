//! Email policy configuration

use crate::error::ConfigError;
use crate::normalizer::{AliasRule, Normalizer};
use crate::validator::Validator;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Domains rejected out of the box
pub const DEFAULT_DISPOSABLE_DOMAINS: [&str; 3] =
    ["tempmail.com", "throwawaymail.com", "tempmail100.com"];

/// Validation policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Domains offering throwaway mailboxes. Matched case-insensitively.
    pub disposable_domains: BTreeSet<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            disposable_domains: DEFAULT_DISPOSABLE_DOMAINS
                .iter()
                .map(|domain| domain.to_string())
                .collect(),
        }
    }
}

impl ValidationConfig {
    /// Add more disposable domains on top of the current set
    pub fn with_disposable_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.disposable_domains
            .extend(domains.into_iter().map(|d| d.as_ref().to_lowercase()));
        self
    }
}

/// One exact-match entry in the provider alias table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRule {
    pub domain: String,
    pub rule: AliasRule,
}

impl ProviderRule {
    pub fn new(domain: impl Into<String>, rule: AliasRule) -> Self {
        Self {
            domain: domain.into(),
            rule,
        }
    }
}

/// Normalization policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    /// Provider table. Later entries win when a domain repeats.
    pub providers: Vec<ProviderRule>,
    /// Rule for every domain not in `providers`
    pub fallback: AliasRule,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            providers: vec![
                ProviderRule::new("gmail.com", AliasRule::StripDotsAndPlus),
                ProviderRule::new("outlook.com", AliasRule::StripPlus),
                ProviderRule::new("hotmail.com", AliasRule::StripPlus),
                ProviderRule::new("live.com", AliasRule::StripPlus),
                ProviderRule::new("yahoo.com", AliasRule::StripDash),
            ],
            fallback: AliasRule::StripPlus,
        }
    }
}

/// Combined validation and normalization policy
///
/// Sections or keys missing from a loaded source keep their defaults. A
/// `providers` list, when present, replaces the default table wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub validation: ValidationConfig,
    pub normalization: NormalizationConfig,
}

impl EmailConfig {
    /// Load from a file; the format is picked from the extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Load from an in-memory document
    pub fn from_source(contents: &str, format: FileFormat) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(contents, format))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Build the validator and normalizer described by this config
    pub fn build(self) -> (Validator, Normalizer) {
        (
            Validator::new(self.validation),
            Normalizer::new(self.normalization),
        )
    }
}

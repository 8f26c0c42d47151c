//! Alias-aware email canonicalization

use crate::config::NormalizationConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

/// How a provider folds alias variants of a local part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasRule {
    /// Drop every `.`, then cut at the first `+`
    StripDotsAndPlus,
    /// Cut at the first `+`
    StripPlus,
    /// Cut at the first `-`
    StripDash,
}

impl AliasRule {
    /// Apply the rule to an already-lowercased local part
    pub fn apply(&self, local_part: &str) -> String {
        match self {
            Self::StripDotsAndPlus => {
                let undotted: String = local_part.chars().filter(|&c| c != '.').collect();
                truncate_at(&undotted, '+').to_string()
            }
            Self::StripPlus => truncate_at(local_part, '+').to_string(),
            Self::StripDash => truncate_at(local_part, '-').to_string(),
        }
    }
}

fn truncate_at(s: &str, delimiter: char) -> &str {
    s.split_once(delimiter).map_or(s, |(head, _)| head)
}

/// Collapses provider alias variants to one canonical address
///
/// Dispatch is exact-match on the lowercased domain; `mail.yahoo.com` gets
/// the fallback rule, not Yahoo's.
#[derive(Debug, Clone)]
pub struct Normalizer {
    providers: HashMap<String, AliasRule>,
    fallback: AliasRule,
}

impl Normalizer {
    /// Create a new normalizer with given config
    pub fn new(config: NormalizationConfig) -> Self {
        let providers = config
            .providers
            .into_iter()
            .map(|entry| (entry.domain.to_lowercase(), entry.rule))
            .collect();
        Self {
            providers,
            fallback: config.fallback,
        }
    }

    /// Add or replace the rule for one domain
    pub fn with_rule(mut self, domain: impl AsRef<str>, rule: AliasRule) -> Self {
        self.providers.insert(domain.as_ref().to_lowercase(), rule);
        self
    }

    /// Rule applied to a lowercase `domain`
    pub fn rule_for(&self, domain: &str) -> AliasRule {
        self.providers.get(domain).copied().unwrap_or(self.fallback)
    }

    /// Canonical lowercase form of `input`.
    ///
    /// Expects an address that already passed validation. Input without an
    /// `@` comes back lowercased and otherwise untouched; with several `@`
    /// the domain is everything after the first one.
    pub fn normalize(&self, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }

        let lowered = input.to_lowercase();
        let Some((local_part, domain)) = lowered.split_once('@') else {
            return lowered;
        };

        let rule = self.rule_for(domain);
        trace!("Normalizing address for {} with {:?}", domain, rule);
        format!("{}@{}", rule.apply(local_part), domain)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderRule;

    #[test]
    fn test_gmail_collapses_dots_and_plus() {
        let norm = Normalizer::default();
        assert_eq!(norm.normalize("John.Doe+promo@gmail.com"), "johndoe@gmail.com");
        assert_eq!(norm.normalize("j.o.h.n@GMAIL.COM"), "john@gmail.com");
        assert_eq!(norm.normalize("a+b.c+d@gmail.com"), "a@gmail.com");
        assert_eq!(norm.normalize("jane-doe@gmail.com"), "jane-doe@gmail.com");
    }

    #[test]
    fn test_microsoft_strips_plus_only() {
        let norm = Normalizer::default();
        for domain in ["outlook.com", "hotmail.com", "live.com"] {
            assert_eq!(
                norm.normalize(&format!("First.Last+news@{domain}")),
                format!("first.last@{domain}")
            );
        }
    }

    #[test]
    fn test_yahoo_strips_dash_and_keeps_plus() {
        let norm = Normalizer::default();
        assert_eq!(norm.normalize("jane+tag-x@yahoo.com"), "jane+tag@yahoo.com");
        assert_eq!(norm.normalize("Jane.Doe-shopping@Yahoo.com"), "jane.doe@yahoo.com");
        assert_eq!(norm.normalize("jane+tag@yahoo.com"), "jane+tag@yahoo.com");
    }

    #[test]
    fn test_default_rule_strips_plus() {
        let norm = Normalizer::default();
        assert_eq!(norm.normalize("a+b@mail.yahoo.com"), "a@mail.yahoo.com");
        assert_eq!(norm.normalize("a-b+c@example.org"), "a-b@example.org");
        assert_eq!(norm.normalize("a.b@googlemail.com"), "a.b@googlemail.com");
    }

    #[test]
    fn test_empty_and_degenerate_input() {
        let norm = Normalizer::default();
        assert_eq!(norm.normalize(""), "");
        assert_eq!(norm.normalize("NoAtSign+x"), "noatsign+x");
        assert_eq!(norm.normalize("a+b@c@d.com"), "a@c@d.com");
        assert_eq!(norm.normalize("+tag@gmail.com"), "@gmail.com");
    }

    #[test]
    fn test_rule_table_lookup() {
        let norm = Normalizer::default();
        assert_eq!(norm.rule_for("gmail.com"), AliasRule::StripDotsAndPlus);
        assert_eq!(norm.rule_for("yahoo.com"), AliasRule::StripDash);
        assert_eq!(norm.rule_for("live.com"), AliasRule::StripPlus);
        assert_eq!(norm.rule_for("example.com"), AliasRule::StripPlus);
    }

    #[test]
    fn test_extending_rule_table() {
        let norm = Normalizer::default().with_rule("GoogleMail.com", AliasRule::StripDotsAndPlus);
        assert_eq!(norm.normalize("a.b+c@googlemail.com"), "ab@googlemail.com");
        assert_eq!(norm.normalize("a.b+c@gmail.com"), "ab@gmail.com");
    }

    #[test]
    fn test_configured_table_and_fallback() {
        let config = NormalizationConfig {
            providers: vec![
                ProviderRule::new("Example.com", AliasRule::StripPlus),
                ProviderRule::new("example.com", AliasRule::StripDash),
            ],
            fallback: AliasRule::StripDotsAndPlus,
        };
        let norm = Normalizer::new(config);
        assert_eq!(norm.normalize("a+b-c@example.com"), "a+b@example.com");
        assert_eq!(norm.normalize("a.b+c@gmail.com"), "ab@gmail.com");
        assert_eq!(norm.normalize("a.b+c@other.net"), "ab@other.net");
    }

    #[test]
    fn test_alias_rule_apply() {
        assert_eq!(AliasRule::StripDotsAndPlus.apply("a.b+c"), "ab");
        assert_eq!(AliasRule::StripPlus.apply("a.b+c"), "a.b");
        assert_eq!(AliasRule::StripDash.apply("a+b-c-d"), "a+b");
        assert_eq!(AliasRule::StripDash.apply("plain"), "plain");
    }
}

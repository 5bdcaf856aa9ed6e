//! Language code aliases
//!
//! Requests carry whatever language tag the caller uses (`en`, `en-US`,
//! `de_AT`, ...). Backends load one model per canonical code, so regional
//! variants are folded onto the code a model is registered under.

use std::collections::BTreeMap;

/// Maps request language tags to model language codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageMap {
    aliases: BTreeMap<String, String>,
}

impl Default for LanguageMap {
    fn default() -> Self {
        Self::empty()
            .with_alias("en", "en")
            .with_alias("en_US", "en")
            .with_alias("en_GB", "en")
            .with_alias("en_AU", "en")
            .with_alias("en_CA", "en")
            .with_alias("de", "de")
            .with_alias("de_DE", "de")
            .with_alias("de_AT", "de")
            .with_alias("de_CH", "de")
    }
}

impl LanguageMap {
    /// Map without any aliases
    pub fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    /// Add or replace an alias
    pub fn with_alias(mut self, tag: impl Into<String>, code: impl Into<String>) -> Self {
        self.aliases.insert(normalize_tag(&tag.into()), code.into());
        self
    }

    /// Canonical code for `tag`, or `tag` itself when unknown
    pub fn resolve<'a>(&'a self, tag: &'a str) -> &'a str {
        self.aliases
            .get(&normalize_tag(tag))
            .map(String::as_str)
            .unwrap_or(tag)
    }

    /// Whether `tag` has a registered alias
    pub fn contains(&self, tag: &str) -> bool {
        self.aliases.contains_key(&normalize_tag(tag))
    }

    /// Distinct canonical codes
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.aliases.values().map(String::as_str).collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }

    /// Registered tags with their codes
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases
            .iter()
            .map(|(tag, code)| (tag.as_str(), code.as_str()))
    }
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().replace('-', "_")
}

//! Locale-aware text with deterministic fallback resolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A human-readable text with optional per-locale translations.
///
/// Resolution is a pure function of the value and the requested locale:
/// exact tag match, then primary language subtag, then the default text.
/// Translation keys are stored normalized (lowercase, `-` separators).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub default: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub translations: BTreeMap<String, String>,
}

impl LocalizedText {
    pub fn new(default: impl Into<String>) -> Self {
        Self { default: default.into(), translations: BTreeMap::new() }
    }

    /// Adds a translation, normalizing the locale tag.
    #[must_use]
    pub fn with(mut self, locale: &str, text: impl Into<String>) -> Self {
        self.translations.insert(normalize(locale), text.into());
        self
    }

    /// Resolves the text for `locale`.
    ///
    /// Lookup order: exact normalized tag (`de-at`), primary language
    /// subtag (`de`), default text.
    #[must_use]
    pub fn resolve(&self, locale: &str) -> &str {
        let tag = normalize(locale);
        if let Some(text) = self.translations.get(&tag) {
            return text;
        }
        if let Some((primary, _)) = tag.split_once('-')
            && let Some(text) = self.translations.get(primary)
        {
            return text;
        }
        &self.default
    }
}

/// Normalizes a BCP 47-ish tag: lowercase, `_` treated as `-`.
#[must_use]
pub fn normalize(locale: &str) -> String {
    locale.trim().to_ascii_lowercase().replace('_', "-")
}

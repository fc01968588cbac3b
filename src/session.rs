//! The visitor's active language, carried as a value.
//!
//! Changing language produces a new [`LanguageSession`]; applying the
//! direction to a document or persisting the preference is left to the
//! caller.

use serde::{
    Deserialize,
    Serialize,
};

use crate::language::{
    Direction,
    Language,
    LanguageInfo,
};
use crate::localizer::Localizer;

/// Active and default language of one visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSession {
    /// Language content is shown in.
    language: Language,
    /// Language stored under bare field names.
    default_language: Language,
}

impl LanguageSession {
    /// Session showing the default language.
    #[must_use]
    pub const fn new(default_language: Language) -> Self {
        Self { language: default_language, default_language }
    }

    /// Restores a session from a stored preference. A missing or unsupported
    /// value starts the session in `default_language`.
    #[must_use]
    pub fn restore(stored: Option<&str>, default_language: Language) -> Self {
        let language = stored.map_or(default_language, |code| {
            code.parse().unwrap_or_else(|_| {
                tracing::debug!(stored = code, "ignoring unsupported stored language preference");
                default_language
            })
        });
        Self { language, default_language }
    }

    /// Returns a session switched to `language`.
    #[must_use]
    pub const fn set_language(self, language: Language) -> Self {
        Self { language, ..self }
    }

    /// Language content is shown in.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Language stored under bare field names.
    #[must_use]
    pub const fn default_language(&self) -> Language {
        self.default_language
    }

    /// Metadata of the active language.
    #[must_use]
    pub const fn info(&self) -> &'static LanguageInfo {
        self.language.info()
    }

    /// Writing direction of the active language.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.language.direction()
    }

    /// Whether the active language is right to left.
    #[must_use]
    pub const fn is_rtl(&self) -> bool {
        self.language.is_rtl()
    }

    /// Whether the active language is the default one.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.language == self.default_language
    }

    /// A [`Localizer`] using this session's default language.
    #[must_use]
    pub fn localizer(&self) -> Localizer {
        Localizer::new(self.default_language)
    }

    /// `path` with this session's language prefix (`/en/cart`). The default
    /// language is served without a prefix.
    #[must_use]
    pub fn localized_path(&self, path: &str) -> String {
        let (_, clean) = split_language_prefix(path);
        if self.is_default() {
            return clean;
        }
        normalize_path(&format!("/{}/{clean}", self.language.code()))
    }
}

/// Splits a leading language segment off `path`.
///
/// `/he/catalog/bread` yields `(Some(He), "/catalog/bread")`; a path without
/// a recognised prefix is returned unchanged.
#[must_use]
pub fn split_language_prefix(path: &str) -> (Option<Language>, String) {
    let mut segments = path.split('/').filter(|segment| !segment.is_empty());
    let Some(first) = segments.next() else {
        return (None, path.to_string());
    };

    match Language::ALL.into_iter().find(|language| language.code() == first) {
        Some(language) => {
            let rest: Vec<&str> = segments.collect();
            (Some(language), format!("/{}", rest.join("/")))
        }
        None => (None, path.to_string()),
    }
}

/// Collapses repeated slashes and drops a trailing slash; empty becomes `/`.
fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

//! Supported storefront languages and their static metadata.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// A language the storefront can render content in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Russian, the storefront default.
    #[default]
    Ru,
    /// English
    En,
    /// Hebrew
    He,
    /// Arabic
    Ar,
}

/// Text direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Left to right
    Ltr,
    /// Right to left
    Rtl,
}

impl Direction {
    /// Value for the HTML `dir` attribute.
    #[must_use]
    pub const fn as_html_dir(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }

    /// CSS `text-align` value for the start edge of a line.
    #[must_use]
    pub const fn text_align_start(self) -> &'static str {
        match self {
            Self::Ltr => "left",
            Self::Rtl => "right",
        }
    }
}

/// Display metadata for a [`Language`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageInfo {
    /// Lowercase ISO 639-1 code (e.g. `"he"`).
    pub code: &'static str,
    /// English name.
    pub name: &'static str,
    /// Name of the language written in itself.
    pub native_name: &'static str,
    /// Writing direction.
    pub direction: Direction,
    /// ISO 3166 country code used to pick a flag icon.
    pub flag_code: &'static str,
}

/// Metadata for [`Language::Ru`].
const RUSSIAN: LanguageInfo = LanguageInfo {
    code: "ru",
    name: "Russian",
    native_name: "Русский",
    direction: Direction::Ltr,
    flag_code: "ru",
};

/// Metadata for [`Language::En`].
const ENGLISH: LanguageInfo = LanguageInfo {
    code: "en",
    name: "English",
    native_name: "English",
    direction: Direction::Ltr,
    flag_code: "us",
};

/// Metadata for [`Language::He`].
const HEBREW: LanguageInfo = LanguageInfo {
    code: "he",
    name: "Hebrew",
    native_name: "עברית",
    direction: Direction::Rtl,
    flag_code: "il",
};

/// Metadata for [`Language::Ar`].
const ARABIC: LanguageInfo = LanguageInfo {
    code: "ar",
    name: "Arabic",
    native_name: "العربية",
    direction: Direction::Rtl,
    flag_code: "sa",
};

/// Error returned when a string is not a supported language code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported language code '{code}' (expected one of: ru, en, he, ar)")]
pub struct LanguageError {
    /// The rejected input, trimmed.
    pub code: String,
}

impl Language {
    /// Every supported language in canonical order.
    pub const ALL: [Self; 4] = [Self::Ru, Self::En, Self::He, Self::Ar];

    /// Static metadata for this language.
    #[must_use]
    pub const fn info(self) -> &'static LanguageInfo {
        match self {
            Self::Ru => &RUSSIAN,
            Self::En => &ENGLISH,
            Self::He => &HEBREW,
            Self::Ar => &ARABIC,
        }
    }

    /// Lowercase language code, as used in field suffixes and URLs.
    #[must_use]
    pub const fn code(self) -> &'static str {
        self.info().code
    }

    /// Code with an upper-case first letter (`"En"`), as used in camel-case field keys.
    #[must_use]
    pub const fn capitalized_code(self) -> &'static str {
        match self {
            Self::Ru => "Ru",
            Self::En => "En",
            Self::He => "He",
            Self::Ar => "Ar",
        }
    }

    /// Writing direction of this language.
    #[must_use]
    pub const fn direction(self) -> Direction {
        self.info().direction
    }

    /// Whether this language is written right to left.
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self.direction(), Direction::Rtl)
    }

    /// Parses `code`, degrading to `default` for anything unsupported.
    #[must_use]
    pub fn from_code_or(code: &str, default: Self) -> Self {
        code.parse().unwrap_or(default)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LanguageError;

    /// Accepts `en`, `EN`, ` en ` and region tags such as `en-US` or `he_IL`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let primary = trimmed.split(['-', '_']).next().unwrap_or_default().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|language| language.code() == primary)
            .ok_or_else(|| LanguageError { code: trimmed.to_string() })
    }
}

/// Metadata for `language`.
#[must_use]
pub const fn describe(language: Language) -> &'static LanguageInfo {
    language.info()
}

/// Metadata for a raw language code; unknown codes describe `default`.
#[must_use]
pub fn describe_code(code: &str, default: Language) -> &'static LanguageInfo {
    Language::from_code_or(code, default).info()
}

/// Whether `language` is written right to left.
#[must_use]
pub const fn is_rtl(language: Language) -> bool {
    language.is_rtl()
}

//! storefront-i18n
//!
//! Resolves multilingual storefront content stored as flat records, where
//! every translatable field exists once per language (`name`, `name_en`,
//! `name_he`, ...). Missing translations fall back to the default language.

pub mod cli;
pub mod config;
pub mod exchange;
pub mod field;
pub mod language;
pub mod localizer;
pub mod progress;
pub mod record;
pub mod schema;
pub mod session;

#[cfg(test)]
mod test_utils;

pub use language::{
    Direction,
    Language,
    LanguageInfo,
};
pub use localizer::Localizer;
pub use progress::TranslationProgress;
pub use record::{
    FieldSource,
    UpdatePayload,
};
pub use schema::EntityKind;
pub use session::LanguageSession;

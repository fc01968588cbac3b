use std::collections::{
    BTreeMap,
    HashSet,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::field::{
    FieldPolicies,
    SuffixPolicy,
};
use crate::language::Language;
use crate::localizer::Localizer;
use crate::schema::EntityKind;

/// A single problem found by [`I18nSettings::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "languages[2]")
    pub field_path: String,
    /// What is wrong and how to fix it
    pub message: String,
}

impl ValidationError {
    /// Creates a validation error for `field_path`
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Errors raised while loading or applying settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or more settings failed validation
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The configuration file could not be read
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The configuration file is not valid JSON for [`I18nSettings`]
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list of validation errors, one per line
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Contents of `.storefront-i18n.json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Language stored under bare field names and used as the fallback.
    pub default_language: Language,

    /// Languages content is authored in. Must include `default_language`.
    pub languages: Vec<Language>,

    /// Also read `{field}{Lang}` keys written by older storefront versions.
    pub legacy_camel_case_lookup: bool,

    /// Fields whose default-language value lives under `{field}_{default}`,
    /// per entity kind. Replaces the built-in list for any kind present here.
    pub always_suffixed: BTreeMap<EntityKind, Vec<String>>,
}

impl I18nSettings {
    /// # Errors
    /// - No languages enabled
    /// - Duplicate language
    /// - Default language not enabled
    /// - Always-suffixed field that is empty or not translatable for its kind
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.languages.is_empty() {
            errors.push(ValidationError::new(
                "languages",
                "At least one language is required. Example: [\"ru\", \"en\"]",
            ));
        } else if !self.languages.contains(&self.default_language) {
            errors.push(ValidationError::new(
                "defaultLanguage",
                format!(
                    "Default language '{}' must also be listed in 'languages'",
                    self.default_language
                ),
            ));
        }

        let mut seen = HashSet::new();
        for (index, language) in self.languages.iter().enumerate() {
            if !seen.insert(language) {
                errors.push(ValidationError::new(
                    format!("languages[{index}]"),
                    format!("Language '{language}' is listed more than once"),
                ));
            }
        }

        for (kind, fields) in &self.always_suffixed {
            for (index, field) in fields.iter().enumerate() {
                let path = format!("alwaysSuffixed.{kind}[{index}]");
                if field.is_empty() {
                    errors.push(ValidationError::new(path, "The field name cannot be empty"));
                } else if kind.field(field).is_none() {
                    errors.push(ValidationError::new(
                        path,
                        format!(
                            "'{field}' is not a translatable {kind} field. Known fields: {}",
                            kind.base_fields().join(", ")
                        ),
                    ));
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Suffix policies for `kind`: the configured list if present, else the built-in one.
    #[must_use]
    pub fn policies_for(&self, kind: EntityKind) -> FieldPolicies {
        self.always_suffixed.get(&kind).map_or_else(
            || kind.default_policies(),
            |fields| FieldPolicies::always_suffixed(fields.iter().map(String::as_str)),
        )
    }

    /// Localizer with these settings and no suffix exceptions.
    #[must_use]
    pub fn localizer(&self) -> Localizer {
        Localizer::new(self.default_language)
            .with_languages(self.languages.iter().copied())
            .with_camel_case_lookup(self.legacy_camel_case_lookup)
    }

    /// Localizer with these settings and the suffix policies of `kind`.
    #[must_use]
    pub fn localizer_for(&self, kind: EntityKind) -> Localizer {
        self.localizer().with_policies(self.policies_for(kind))
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        let always_suffixed = EntityKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let fields: Vec<String> = kind
                    .fields()
                    .iter()
                    .filter(|spec| {
                        kind.default_policies().policy(spec.name) == SuffixPolicy::AlwaysSuffixed
                    })
                    .map(|spec| spec.name.to_string())
                    .collect();
                (!fields.is_empty()).then_some((kind, fields))
            })
            .collect();

        Self {
            default_language: Language::Ru,
            languages: Language::ALL.to_vec(),
            legacy_camel_case_lookup: true,
            always_suffixed,
        }
    }
}

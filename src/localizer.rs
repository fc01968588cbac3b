//! Language-variant key computation and value resolution with fallback.

use crate::field::{
    FieldPolicies,
    camel_key,
    underscore_key,
};
use crate::language::Language;
use crate::record::{
    FieldSource,
    UpdatePayload,
};

/// Resolves localized field values against a default language.
///
/// A `Localizer` holds no record state; it only carries the conventions
/// (default language, enabled languages, suffix policies) needed to map a
/// base field to concrete record keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localizer {
    /// Language stored under bare field names.
    default_language: Language,
    /// Enabled languages, default first.
    languages: Vec<Language>,
    /// Per-field suffix exceptions.
    policies: FieldPolicies,
    /// Also read `{base}{Code}` keys.
    legacy_camel_case_lookup: bool,
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl Localizer {
    /// Creates a localizer for every supported language, with no suffix
    /// exceptions and camel-case lookup enabled.
    #[must_use]
    pub fn new(default_language: Language) -> Self {
        Self {
            default_language,
            languages: Language::ALL.to_vec(),
            policies: FieldPolicies::default(),
            legacy_camel_case_lookup: true,
        }
    }

    /// Replaces the suffix policy table.
    #[must_use]
    pub fn with_policies(mut self, policies: FieldPolicies) -> Self {
        self.policies = policies;
        self
    }

    /// Restricts the enabled languages. The default language is always kept
    /// and listed first.
    #[must_use]
    pub fn with_languages(mut self, languages: impl IntoIterator<Item = Language>) -> Self {
        let mut enabled = vec![self.default_language];
        for language in languages {
            if !enabled.contains(&language) {
                enabled.push(language);
            }
        }
        self.languages = enabled;
        self
    }

    /// Enables or disables reading the legacy `{base}{Code}` keys.
    #[must_use]
    pub const fn with_camel_case_lookup(mut self, enabled: bool) -> Self {
        self.legacy_camel_case_lookup = enabled;
        self
    }

    /// Language stored under bare field names.
    #[must_use]
    pub const fn default_language(&self) -> Language {
        self.default_language
    }

    /// Enabled languages, default first.
    #[must_use]
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Suffix policy table.
    #[must_use]
    pub const fn policies(&self) -> &FieldPolicies {
        &self.policies
    }

    /// Concrete record key holding `base_field` in `language`.
    ///
    /// The default language maps to the bare base name unless the field is
    /// always suffixed; every other language maps to `{base}_{code}`.
    #[must_use]
    pub fn field_key(&self, base_field: &str, language: Language) -> String {
        if language == self.default_language && !self.policies.is_always_suffixed(base_field) {
            return base_field.to_string();
        }
        underscore_key(base_field, language)
    }

    /// Best displayable value of `base_field` in `language`.
    ///
    /// Tries the requested language, then the default language, and returns
    /// an empty string when neither has a value. A missing record resolves
    /// to an empty string.
    #[must_use]
    pub fn resolve<R>(&self, record: Option<&R>, base_field: &str, language: Language) -> String
    where
        R: FieldSource + ?Sized,
    {
        let Some(record) = record else {
            return String::new();
        };

        if language != self.default_language {
            if let Some(value) = self.translated_value(record, base_field, language) {
                return value.to_string();
            }
            tracing::trace!(
                field = base_field,
                %language,
                default = %self.default_language,
                "translation missing, falling back to default language"
            );
        }

        self.default_value(record, base_field).unwrap_or_default().to_string()
    }

    /// Value of `base_field` in exactly `language`, without falling back to
    /// the default language. Used by editing screens, where an untranslated
    /// field must show as empty.
    #[must_use]
    pub fn resolve_strict<R>(
        &self,
        record: Option<&R>,
        base_field: &str,
        language: Language,
    ) -> String
    where
        R: FieldSource + ?Sized,
    {
        let Some(record) = record else {
            return String::new();
        };

        let value = if language == self.default_language {
            self.default_value(record, base_field)
        } else {
            self.translated_value(record, base_field, language)
        };
        value.unwrap_or_default().to_string()
    }

    /// Single-entry payload writing `value` into the slot for `language`.
    #[must_use]
    pub fn field_update(
        &self,
        base_field: &str,
        language: Language,
        value: impl Into<String>,
    ) -> UpdatePayload {
        UpdatePayload::from([(self.field_key(base_field, language), value.into())])
    }

    /// Every concrete key of `base_field`, default language first.
    #[must_use]
    pub fn variant_keys(&self, base_field: &str) -> Vec<String> {
        self.languages.iter().map(|&language| self.field_key(base_field, language)).collect()
    }

    /// [`Localizer::variant_keys`] for each base field, in input order.
    #[must_use]
    pub fn translatable_keys<S: AsRef<str>>(&self, base_fields: &[S]) -> Vec<String> {
        base_fields.iter().flat_map(|field| self.variant_keys(field.as_ref())).collect()
    }

    /// Default-language value: the bare base key, then the default slot.
    pub(crate) fn default_value<'r, R>(&self, record: &'r R, base_field: &str) -> Option<&'r str>
    where
        R: FieldSource + ?Sized,
    {
        record
            .non_empty(base_field)
            .or_else(|| record.non_empty(&self.field_key(base_field, self.default_language)))
    }

    /// Non-default value: the underscore key, then the legacy camel-case key.
    fn translated_value<'r, R>(
        &self,
        record: &'r R,
        base_field: &str,
        language: Language,
    ) -> Option<&'r str>
    where
        R: FieldSource + ?Sized,
    {
        record.non_empty(&underscore_key(base_field, language)).or_else(|| {
            self.legacy_camel_case_lookup
                .then(|| record.non_empty(&camel_key(base_field, language)))
                .flatten()
        })
    }
}

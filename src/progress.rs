//! Translation completeness and batch translation updates.
//!
//! In the default language a field counts as filled when its default value
//! is present (the bare key, then the suffixed slot of an always-suffixed
//! field). In any other language only the `{base}_{code}` key counts: unlike
//! [`Localizer::resolve`], progress never consults the legacy camel-case key
//! or the default language, so a field can display a value while still
//! counting as untranslated.

use serde::{
    Deserialize,
    Serialize,
};

use crate::field::underscore_key;
use crate::language::Language;
use crate::localizer::Localizer;
use crate::record::{
    FieldSource,
    UpdatePayload,
};

/// How many of a set of base fields have an explicit value in one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationProgress {
    /// Fields with a value in the language.
    pub filled: usize,
    /// Fields considered.
    pub total: usize,
    /// `filled / total` as a rounded percentage in `0..=100`; zero when `total` is zero.
    pub percentage: u8,
}

impl TranslationProgress {
    /// Progress for `filled` of `total` fields; `filled` is capped at `total`.
    #[must_use]
    pub fn new(filled: usize, total: usize) -> Self {
        let filled = filled.min(total);
        Self { filled, total, percentage: rounded_percentage(filled, total) }
    }

    /// Whether every field is filled.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.filled == self.total
    }
}

/// Integer round-half-up of `filled * 100 / total`.
fn rounded_percentage(filled: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let scaled = (filled.saturating_mul(200) + total) / total.saturating_mul(2);
    u8::try_from(scaled.min(100)).unwrap_or(100)
}

impl Localizer {
    /// Counts the base fields whose `language` slot is filled.
    #[must_use]
    pub fn progress<R, S>(
        &self,
        record: Option<&R>,
        base_fields: &[S],
        language: Language,
    ) -> TranslationProgress
    where
        R: FieldSource + ?Sized,
        S: AsRef<str>,
    {
        let filled = base_fields
            .iter()
            .filter(|field| self.is_slot_filled(record, field.as_ref(), language))
            .count();
        TranslationProgress::new(filled, base_fields.len())
    }

    /// Base fields whose `language` slot is empty, in input order.
    #[must_use]
    pub fn empty_fields<R, S>(
        &self,
        record: Option<&R>,
        base_fields: &[S],
        language: Language,
    ) -> Vec<String>
    where
        R: FieldSource + ?Sized,
        S: AsRef<str>,
    {
        base_fields
            .iter()
            .map(AsRef::as_ref)
            .filter(|field| !self.is_slot_filled(record, field, language))
            .map(str::to_string)
            .collect()
    }

    /// Copies every filled default-language value into the `target` slot,
    /// overwriting existing translations. Copying onto the default language
    /// yields an empty payload.
    #[must_use]
    pub fn copy_defaults<R, S>(
        &self,
        record: Option<&R>,
        base_fields: &[S],
        target: Language,
    ) -> UpdatePayload
    where
        R: FieldSource + ?Sized,
        S: AsRef<str>,
    {
        let mut updates = UpdatePayload::new();
        let Some(record) = record else {
            return updates;
        };
        if target == self.default_language() {
            return updates;
        }

        for field in base_fields.iter().map(AsRef::as_ref) {
            if let Some(value) = self.default_value(record, field) {
                updates.insert(self.field_key(field, target), value.to_string());
            }
        }
        tracing::debug!(
            target_language = %target,
            copied = updates.len(),
            "staged default-language copies"
        );
        updates
    }

    /// Payload resetting every base field to `""` in `target`: the bare
    /// field for the default language, `{base}_{code}` otherwise.
    #[must_use]
    pub fn clear_all<S: AsRef<str>>(&self, base_fields: &[S], target: Language) -> UpdatePayload {
        base_fields
            .iter()
            .map(AsRef::as_ref)
            .map(|field| {
                let key = if target == self.default_language() {
                    field.to_string()
                } else {
                    underscore_key(field, target)
                };
                (key, String::new())
            })
            .collect()
    }

    /// Whether `base_field` has an explicit value in `language`.
    fn is_slot_filled<R>(&self, record: Option<&R>, base_field: &str, language: Language) -> bool
    where
        R: FieldSource + ?Sized,
    {
        let Some(record) = record else {
            return false;
        };
        if language == self.default_language() {
            self.default_value(record, base_field).is_some()
        } else {
            record.non_empty(&underscore_key(base_field, language)).is_some()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::field::FieldPolicies;
    use crate::test_utils::record;

    const FIELDS: [&str; 2] = ["storeName", "welcomeTitle"];

    #[fixture]
    fn localizer() -> Localizer {
        Localizer::new(Language::Ru)
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(0, 3, 0)]
    #[case(1, 3, 33)]
    #[case(2, 3, 67)]
    #[case(1, 2, 50)]
    #[case(1, 8, 13)]
    #[case(3, 3, 100)]
    fn percentage_rounding(#[case] filled: usize, #[case] total: usize, #[case] expected: u8) {
        assert_that!(TranslationProgress::new(filled, total).percentage, eq(expected));
    }

    #[rstest]
    fn progress_for_translation_language(localizer: Localizer) {
        let r = record(&[("storeName_en", "Shop")]);

        let progress = localizer.progress(Some(&r), &FIELDS, Language::En);

        assert_that!(
            progress,
            eq(TranslationProgress { filled: 1, total: 2, percentage: 50 })
        );
        assert_that!(progress.is_complete(), eq(false));
        assert_eq!(localizer.empty_fields(Some(&r), &FIELDS, Language::En), ["welcomeTitle"]);
    }

    #[rstest]
    fn progress_for_default_language_counts_bare_fields(localizer: Localizer) {
        let r = record(&[("storeName", "Магазин"), ("welcomeTitle_ru", "Добро пожаловать")]);

        let progress = localizer.progress(Some(&r), &FIELDS, Language::Ru);

        assert_that!(progress.filled, eq(1));
        assert_eq!(localizer.empty_fields(Some(&r), &FIELDS, Language::Ru), ["welcomeTitle"]);
    }

    #[rstest]
    fn progress_ignores_camel_case_and_fallback(localizer: Localizer) {
        let r = record(&[("storeName", "Магазин"), ("welcomeTitleEn", "Welcome")]);

        let progress = localizer.progress(Some(&r), &FIELDS, Language::En);

        assert_that!(progress.filled, eq(0));
        assert_that!(localizer.resolve(Some(&r), "welcomeTitle", Language::En), eq("Welcome"));
    }

    #[fixture]
    fn about_localizer() -> Localizer {
        Localizer::new(Language::Ru).with_policies(FieldPolicies::always_suffixed(["aboutText"]))
    }

    #[rstest]
    #[case::suffixed_slot("aboutText_ru")]
    #[case::bare_key("aboutText")]
    fn progress_counts_either_default_key(about_localizer: Localizer, #[case] key: &str) {
        let r = record(&[(key, "О нас")]);

        let progress = about_localizer.progress(Some(&r), &["aboutText"], Language::Ru);

        assert_that!(progress, eq(TranslationProgress::new(1, 1)));
        assert_that!(about_localizer.empty_fields(Some(&r), &["aboutText"], Language::Ru), is_empty());
    }

    #[rstest]
    fn progress_without_fields(localizer: Localizer) {
        let r = record(&[("storeName", "Магазин")]);
        let fields: [&str; 0] = [];

        assert_that!(
            localizer.progress(Some(&r), &fields, Language::En),
            eq(TranslationProgress { filled: 0, total: 0, percentage: 0 })
        );
    }

    #[rstest]
    fn progress_without_record(localizer: Localizer) {
        let missing: Option<&BTreeMap<String, String>> = None;

        assert_that!(
            localizer.progress(missing, &FIELDS, Language::En),
            eq(TranslationProgress { filled: 0, total: 2, percentage: 0 })
        );
        assert_that!(localizer.empty_fields(missing, &FIELDS, Language::En), len(eq(2)));
    }

    #[rstest]
    fn copy_defaults_skips_empty_sources(localizer: Localizer) {
        let r = record(&[("storeName", "Магазин"), ("welcomeTitle", "")]);

        let updates = localizer.copy_defaults(Some(&r), &FIELDS, Language::En);

        assert_that!(
            updates,
            eq(&UpdatePayload::from([("storeName_en".to_string(), "Магазин".to_string())]))
        );
    }

    #[rstest]
    fn copy_defaults_overwrites_existing_translation(localizer: Localizer) {
        let r = record(&[("storeName", "Магазин"), ("storeName_he", "חנות")]);

        let updates = localizer.copy_defaults(Some(&r), &FIELDS, Language::He);

        assert_that!(updates.get("storeName_he").map(String::as_str), some(eq("Магазин")));
    }

    #[rstest]
    fn copy_defaults_onto_default_language_is_noop(localizer: Localizer) {
        let r = record(&[("storeName", "Магазин")]);

        assert_that!(localizer.copy_defaults(Some(&r), &FIELDS, Language::Ru), is_empty());
    }

    #[rstest]
    fn copy_defaults_reads_suffixed_default_slot() {
        let localizer = Localizer::new(Language::Ru)
            .with_policies(FieldPolicies::always_suffixed(["bannerButtonText"]));
        let r = record(&[("bannerButtonText_ru", "Заказать")]);

        let updates = localizer.copy_defaults(Some(&r), &["bannerButtonText"], Language::Ar);

        assert_that!(
            updates.get("bannerButtonText_ar").map(String::as_str),
            some(eq("Заказать"))
        );
    }

    #[rstest]
    fn copy_defaults_reads_bare_key_of_suffixed_field(about_localizer: Localizer) {
        let r = record(&[("aboutText", "О нас")]);

        let updates = about_localizer.copy_defaults(Some(&r), &["aboutText"], Language::En);

        assert_that!(
            updates,
            eq(&UpdatePayload::from([("aboutText_en".to_string(), "О нас".to_string())]))
        );
        assert_that!(about_localizer.resolve(Some(&r), "aboutText", Language::Ru), eq("О нас"));
    }

    #[rstest]
    fn clear_all_default_language_clears_bare_key_of_suffixed_field(about_localizer: Localizer) {
        let updates = about_localizer.clear_all(&["aboutText"], Language::Ru);

        assert_that!(
            updates,
            eq(&UpdatePayload::from([("aboutText".to_string(), String::new())]))
        );
    }

    #[rstest]
    fn clear_all_translation_language(localizer: Localizer) {
        let updates = localizer.clear_all(&FIELDS, Language::Ar);

        assert_that!(updates.len(), eq(2));
        assert_that!(updates.get("storeName_ar").map(String::as_str), some(eq("")));
        assert_that!(updates.get("welcomeTitle_ar").map(String::as_str), some(eq("")));
    }

    #[rstest]
    fn clear_all_default_language_uses_bare_fields(localizer: Localizer) {
        let updates = localizer.clear_all(&FIELDS, Language::Ru);

        let keys: Vec<&str> = updates.keys().map(String::as_str).collect();
        assert_eq!(keys, ["storeName", "welcomeTitle"]);
    }
}

//! Naming scheme for language-variant record keys.
//!
//! A base field such as `storeName` is stored once per language. The
//! canonical key for a non-default language is `storeName_en`; older records
//! may still carry the camel-case form `storeNameEn`, which is only ever read.

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};

use crate::language::Language;

/// Where the default-language value of a base field lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SuffixPolicy {
    /// Stored under the bare base name (`storeName`).
    #[default]
    BareDefault,
    /// Stored under `{base}_{default}` even for the default language (`aboutText_ru`).
    AlwaysSuffixed,
}

/// Per-field suffix policies. Fields without an entry use [`SuffixPolicy::BareDefault`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPolicies {
    /// Policy per base field; absent fields use [`SuffixPolicy::BareDefault`].
    policies: BTreeMap<String, SuffixPolicy>,
}

impl FieldPolicies {
    /// Empty table: every field keeps its default value under the bare name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table marking every field in `fields` as [`SuffixPolicy::AlwaysSuffixed`].
    #[must_use]
    pub fn always_suffixed<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let policies =
            fields.into_iter().map(|field| (field.into(), SuffixPolicy::AlwaysSuffixed)).collect();
        Self { policies }
    }

    /// Sets the policy of `base_field`.
    pub fn set(&mut self, base_field: impl Into<String>, policy: SuffixPolicy) {
        self.policies.insert(base_field.into(), policy);
    }

    /// Policy of `base_field`.
    #[must_use]
    pub fn policy(&self, base_field: &str) -> SuffixPolicy {
        self.policies.get(base_field).copied().unwrap_or_default()
    }

    /// Whether `base_field` stores its default value under `{base}_{default}`.
    #[must_use]
    pub fn is_always_suffixed(&self, base_field: &str) -> bool {
        self.policy(base_field) == SuffixPolicy::AlwaysSuffixed
    }

    /// Merges `other` into `self`; entries in `other` win.
    pub fn extend(&mut self, other: Self) {
        self.policies.extend(other.policies);
    }

    /// Whether no field has an explicit policy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

/// Canonical key `{base}_{code}`.
#[must_use]
pub fn underscore_key(base_field: &str, language: Language) -> String {
    format!("{base_field}_{}", language.code())
}

/// Legacy key `{base}{Code}` (`logoUrl` → `logoUrlEn`).
#[must_use]
pub fn camel_key(base_field: &str, language: Language) -> String {
    format!("{base_field}{}", language.capitalized_code())
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("storeName", Language::En, "storeName_en")]
    #[case("welcomeTitle", Language::He, "welcomeTitle_he")]
    #[case("aboutText", Language::Ru, "aboutText_ru")]
    fn underscore_keys(#[case] base: &str, #[case] language: Language, #[case] expected: &str) {
        assert_that!(underscore_key(base, language), eq(expected));
    }

    #[rstest]
    #[case("logoUrl", Language::En, "logoUrlEn")]
    #[case("bannerImageUrl", Language::Ar, "bannerImageUrlAr")]
    fn camel_keys(#[case] base: &str, #[case] language: Language, #[case] expected: &str) {
        assert_that!(camel_key(base, language), eq(expected));
    }

    #[rstest]
    fn unlisted_fields_use_bare_default() {
        let policies = FieldPolicies::always_suffixed(["aboutText"]);

        assert_that!(policies.policy("storeName"), eq(SuffixPolicy::BareDefault));
        assert_that!(policies.is_always_suffixed("aboutText"), eq(true));
    }

    #[rstest]
    fn extend_overrides_existing_entries() {
        let mut policies = FieldPolicies::always_suffixed(["aboutText", "bannerButtonText"]);
        let mut overrides = FieldPolicies::new();
        overrides.set("bannerButtonText", SuffixPolicy::BareDefault);

        policies.extend(overrides);

        assert_that!(policies.is_always_suffixed("aboutText"), eq(true));
        assert_that!(policies.is_always_suffixed("bannerButtonText"), eq(false));
    }

    #[rstest]
    fn deserializes_from_plain_object() {
        let json = r#"{"aboutText": "alwaysSuffixed", "storeName": "bareDefault"}"#;

        let policies: FieldPolicies = serde_json::from_str(json).unwrap_or_default();

        assert_that!(policies.is_always_suffixed("aboutText"), eq(true));
        assert_that!(policies.policy("storeName"), eq(SuffixPolicy::BareDefault));
    }
}

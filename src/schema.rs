//! Translatable fields of each storefront entity.

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::field::FieldPolicies;

/// A kind of record carrying translatable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Catalog product
    Product,
    /// Product category
    Category,
    /// The single store settings record
    StoreSetting,
    /// Storefront theme
    Theme,
}

/// A translatable base field and its human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Base field name as stored in records.
    pub name: &'static str,
    /// Label shown to translators.
    pub description: &'static str,
}

/// Shorthand for the catalog tables below.
const fn spec(name: &'static str, description: &'static str) -> FieldSpec {
    FieldSpec { name, description }
}

/// Translatable product fields.
const PRODUCT_FIELDS: &[FieldSpec] = &[
    spec("name", "Product Name"),
    spec("description", "Product Description"),
    spec("ingredients", "Product Ingredients"),
    spec("imageUrl", "Product Image URL"),
];

/// Translatable category fields.
const CATEGORY_FIELDS: &[FieldSpec] =
    &[spec("name", "Category Name"), spec("description", "Category Description")];

/// Translatable store settings fields.
const STORE_SETTING_FIELDS: &[FieldSpec] = &[
    spec("storeName", "Store Name"),
    spec("welcomeTitle", "Welcome Title"),
    spec("storeDescription", "Store Description"),
    spec("deliveryInfo", "Delivery Information"),
    spec("paymentInfo", "Payment Information"),
    spec("aboutText", "About Text"),
    spec("bannerButtonText", "Banner Button Text"),
    spec("discountBadgeText", "Discount Badge Text"),
    spec("whatsappDefaultMessage", "WhatsApp Default Message"),
    spec("cartBannerText", "Cart Banner Text"),
    spec("contactPhone", "Contact Phone"),
    spec("contactEmail", "Contact Email"),
    spec("address", "Address"),
    spec("slide1Title", "Slide 1 Title"),
    spec("slide1Subtitle", "Slide 1 Subtitle"),
    spec("slide1ButtonText", "Slide 1 Button Text"),
    spec("slide2Title", "Slide 2 Title"),
    spec("slide2Subtitle", "Slide 2 Subtitle"),
    spec("slide2ButtonText", "Slide 2 Button Text"),
    spec("slide3Title", "Slide 3 Title"),
    spec("slide3Subtitle", "Slide 3 Subtitle"),
    spec("slide3ButtonText", "Slide 3 Button Text"),
    spec("slide4Title", "Slide 4 Title"),
    spec("slide4Subtitle", "Slide 4 Subtitle"),
    spec("slide4ButtonText", "Slide 4 Button Text"),
    spec("slide5Title", "Slide 5 Title"),
    spec("slide5Subtitle", "Slide 5 Subtitle"),
    spec("slide5ButtonText", "Slide 5 Button Text"),
    spec("modernBlock1Text", "Modern Block 1 Text"),
    spec("modernBlock2Text", "Modern Block 2 Text"),
    spec("modernBlock3Text", "Modern Block 3 Text"),
    spec("pwaName", "PWA App Name"),
    spec("pwaDescription", "PWA App Description"),
];

/// Translatable theme fields.
const THEME_FIELDS: &[FieldSpec] = &[
    spec("name", "Theme Name"),
    spec("description", "Theme Description"),
    spec("bannerButtonText", "Banner Button Text"),
    spec("logoUrl", "Logo URL"),
    spec("bannerImageUrl", "Banner Image URL"),
];

/// Store-setting fields whose Russian value was never stored under the bare name.
const STORE_SETTING_ALWAYS_SUFFIXED: &[&str] = &["aboutText", "bannerButtonText"];

/// Error returned when a string names no [`EntityKind`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown entity kind '{0}' (expected one of: product, category, store_setting, theme)")]
pub struct EntityKindError(pub String);

impl EntityKind {
    /// Every entity kind.
    pub const ALL: [Self; 4] = [Self::Product, Self::Category, Self::StoreSetting, Self::Theme];

    /// Snake-case name, as used in JSON and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Category => "category",
            Self::StoreSetting => "store_setting",
            Self::Theme => "theme",
        }
    }

    /// Translatable fields of this entity, in display order.
    #[must_use]
    pub const fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Product => PRODUCT_FIELDS,
            Self::Category => CATEGORY_FIELDS,
            Self::StoreSetting => STORE_SETTING_FIELDS,
            Self::Theme => THEME_FIELDS,
        }
    }

    /// Names of [`EntityKind::fields`].
    #[must_use]
    pub fn base_fields(self) -> Vec<&'static str> {
        self.fields().iter().map(|field| field.name).collect()
    }

    /// Looks up a translatable field by base name.
    #[must_use]
    pub fn field(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|field| field.name == name)
    }

    /// Built-in suffix exceptions for this entity.
    #[must_use]
    pub fn default_policies(self) -> FieldPolicies {
        match self {
            Self::StoreSetting => {
                FieldPolicies::always_suffixed(STORE_SETTING_ALWAYS_SUFFIXED.iter().copied())
            }
            Self::Product | Self::Category | Self::Theme => FieldPolicies::default(),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = EntityKindError;

    /// Accepts both `store_setting` and `store-setting`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| EntityKindError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(EntityKind::Product, 4)]
    #[case(EntityKind::Category, 2)]
    #[case(EntityKind::StoreSetting, 33)]
    #[case(EntityKind::Theme, 5)]
    fn field_counts(#[case] kind: EntityKind, #[case] expected: usize) {
        assert_that!(kind.fields().len(), eq(expected));
    }

    #[rstest]
    fn field_names_are_unique_per_kind() {
        for kind in EntityKind::ALL {
            let names: HashSet<&str> = kind.base_fields().into_iter().collect();
            assert_that!(names.len(), eq(kind.fields().len()));
        }
    }

    #[rstest]
    fn only_store_settings_have_suffix_exceptions() {
        let store = EntityKind::StoreSetting.default_policies();

        assert_that!(store.is_always_suffixed("aboutText"), eq(true));
        assert_that!(store.is_always_suffixed("bannerButtonText"), eq(true));
        assert_that!(store.is_always_suffixed("storeName"), eq(false));
        let theme = EntityKind::Theme.default_policies();
        assert_that!(theme.is_always_suffixed("bannerButtonText"), eq(false));
    }

    #[rstest]
    #[case("product", EntityKind::Product)]
    #[case("store_setting", EntityKind::StoreSetting)]
    #[case("Store-Setting", EntityKind::StoreSetting)]
    #[case(" theme ", EntityKind::Theme)]
    fn parse_kind(#[case] input: &str, #[case] expected: EntityKind) {
        assert_that!(input.parse::<EntityKind>(), ok(eq(&expected)));
    }

    #[rstest]
    fn parse_unknown_kind() {
        assert_that!("order".parse::<EntityKind>(), err(anything()));
    }

    #[rstest]
    fn lookup_field_spec() {
        let spec = EntityKind::Theme.field("logoUrl");

        assert_that!(spec.map(|s| s.description), some(eq("Logo URL")));
        assert_that!(EntityKind::Category.field("ingredients"), none());
    }

    #[rstest]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&EntityKind::StoreSetting).unwrap_or_default();
        assert_that!(json, eq("\"store_setting\""));
    }
}

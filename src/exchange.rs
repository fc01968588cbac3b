//! Translation table export and import.
//!
//! Content editors translate in bulk through a flat table: one row per
//! (entity, field) with a column per language. Exporting reads each
//! language's slot from a record; importing turns edited rows back into one
//! update payload per entity.

use std::collections::BTreeMap;
use std::io::{
    Read,
    Write,
};

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::language::Language;
use crate::localizer::Localizer;
use crate::record::{
    FieldSource,
    UpdatePayload,
};
use crate::schema::EntityKind;

/// Record identifier; products and categories use numeric ids, themes use strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    /// Numeric primary key
    Number(i64),
    /// Slug or other string key
    Text(String),
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        id.parse().map_or_else(|_| Self::Text(id.to_string()), Self::Number)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

/// One translatable field of one entity, with its value in every language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRow {
    /// Entity the field belongs to.
    pub kind: EntityKind,
    /// Record the field belongs to.
    pub id: EntityId,
    /// Base field name (`storeName`).
    pub field: String,
    /// Human-readable location, e.g. `Theme 3 - Logo URL`.
    #[serde(default)]
    pub label: String,
    /// Value per language; missing languages are left untouched on import.
    #[serde(default)]
    pub values: BTreeMap<Language, String>,
}

/// Staged changes for a single entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityUpdate {
    /// Entity kind of the record.
    pub kind: EntityKind,
    /// Record to patch.
    pub id: EntityId,
    /// Concrete keys and their new values.
    pub updates: UpdatePayload,
}

/// Errors raised while reading, writing or importing rows.
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// A row names a field outside the schema of its entity kind.
    #[error("Field '{field}' is not translatable for {kind} (row for id {id})")]
    UnknownField {
        /// Entity kind of the row.
        kind: EntityKind,
        /// Record id of the row.
        id: EntityId,
        /// Offending base field.
        field: String,
    },

    /// Reading or writing the table failed.
    #[error("Failed to read or write translation table: {0}")]
    Io(#[from] std::io::Error),

    /// The table is not valid JSON rows.
    #[error("Invalid translation table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Builds one row per translatable field of `kind`, reading every enabled
/// language through `localizer`. Missing values export as `""`.
#[must_use]
pub fn export_rows<R>(
    kind: EntityKind,
    id: &EntityId,
    record: &R,
    localizer: &Localizer,
) -> Vec<TranslationRow>
where
    R: FieldSource + ?Sized,
{
    kind.fields()
        .iter()
        .map(|spec| {
            let values = localizer
                .languages()
                .iter()
                .map(|&language| {
                    let value = record.field(&localizer.field_key(spec.name, language));
                    (language, value.unwrap_or_default().to_string())
                })
                .collect();

            TranslationRow {
                kind,
                id: id.clone(),
                field: spec.name.to_string(),
                label: row_label(kind, id, spec.description),
                values,
            }
        })
        .collect()
}

/// Groups rows by entity and converts them into update payloads.
///
/// `localizer_for` supplies the key conventions of each entity kind. Rows
/// are applied in order, so a later row for the same field wins. Entities
/// whose rows carry no values are skipped.
pub fn import_rows<F>(
    rows: &[TranslationRow],
    mut localizer_for: F,
) -> Result<Vec<EntityUpdate>, ExchangeError>
where
    F: FnMut(EntityKind) -> Localizer,
{
    let mut localizers: BTreeMap<EntityKind, Localizer> = BTreeMap::new();
    let mut grouped: BTreeMap<(EntityKind, EntityId), UpdatePayload> = BTreeMap::new();

    for row in rows {
        if row.kind.field(&row.field).is_none() {
            return Err(ExchangeError::UnknownField {
                kind: row.kind,
                id: row.id.clone(),
                field: row.field.clone(),
            });
        }

        let localizer = localizers.entry(row.kind).or_insert_with(|| localizer_for(row.kind));
        let updates = grouped.entry((row.kind, row.id.clone())).or_default();
        for (&language, value) in &row.values {
            if !localizer.languages().contains(&language) {
                tracing::warn!(
                    kind = %row.kind,
                    field = %row.field,
                    %language,
                    "skipping value for a language that is not enabled"
                );
                continue;
            }
            updates.insert(localizer.field_key(&row.field, language), value.clone());
        }
    }

    let updates: Vec<EntityUpdate> = grouped
        .into_iter()
        .filter(|(_, updates)| !updates.is_empty())
        .map(|((kind, id), updates)| EntityUpdate { kind, id, updates })
        .collect();
    tracing::debug!(rows = rows.len(), entities = updates.len(), "grouped translation rows");

    Ok(updates)
}

/// Reads a JSON array of rows.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<TranslationRow>, ExchangeError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Writes rows as a pretty-printed JSON array.
pub fn write_rows<W: Write>(mut writer: W, rows: &[TranslationRow]) -> Result<(), ExchangeError> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Location shown to translators, e.g. `Product 3 - Product Name`.
fn row_label(kind: EntityKind, id: &EntityId, description: &str) -> String {
    match kind {
        EntityKind::Product => format!("Product {id} - {description}"),
        EntityKind::Category => format!("Category {id} - {description}"),
        EntityKind::StoreSetting => format!("Store Settings - {description}"),
        EntityKind::Theme => format!("Theme {id} - {description}"),
    }
}

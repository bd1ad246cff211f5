//! Side-by-side key comparison of two locales

use std::collections::BTreeSet;

use serde::Serialize;

use crate::cldr::FlatLocaleData;

/// Translation state of one key in the target locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RowStatus {
    /// The reference has the key but the target lacks it or leaves it blank
    Missing,
    /// The target repeats the reference value; likely untranslated
    SameAsReference,
    /// The target has its own value
    Translated,
}

/// One key with its target and reference values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    /// Flattened key
    pub key: String,
    /// Target value, empty when absent
    pub value: String,
    /// Reference value, empty when absent
    pub reference: String,
    /// Translation state of the key
    pub status: RowStatus,
}

impl ComparisonRow {
    /// Whether the target lacks this key.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self.status, RowStatus::Missing)
    }

    /// Case-insensitive substring match on key, value or reference value.
    ///
    /// An empty filter matches every row.
    #[must_use]
    pub fn matches(&self, filter: &str) -> bool {
        if filter.is_empty() {
            return true;
        }
        let filter = filter.to_lowercase();
        [&self.key, &self.value, &self.reference]
            .iter()
            .any(|field| field.to_lowercase().contains(&filter))
    }
}

/// Rows for the union of target and reference keys, sorted by key.
#[must_use]
pub fn compare_flat(target: &FlatLocaleData, reference: &FlatLocaleData) -> Vec<ComparisonRow> {
    let keys: BTreeSet<&String> = target.keys().chain(reference.keys()).collect();

    keys.into_iter()
        .map(|key| {
            let value = target.get(key).cloned().unwrap_or_default();
            let reference_value = reference.get(key).cloned().unwrap_or_default();

            let status = if reference.contains_key(key) && value.trim().is_empty() {
                RowStatus::Missing
            } else if !value.is_empty() && value == reference_value {
                RowStatus::SameAsReference
            } else {
                RowStatus::Translated
            };

            ComparisonRow { key: key.clone(), value, reference: reference_value, status }
        })
        .collect()
}

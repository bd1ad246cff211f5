//! Coverage statistics types

use serde::ser::SerializeMap;
use serde::{
    Serialize,
    Serializer,
};

use crate::cldr::{
    Category,
    FlatLocaleData,
};

/// Translation coverage of one category.
///
/// `present + missing == total` and `missing == missing_keys.len()` always hold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRecord {
    /// Number of keys in the reference locale
    pub total: usize,
    /// Reference keys with a non-blank value in the target locale
    pub present: usize,
    /// Reference keys absent from the target or blank there
    pub missing: usize,
    /// `present / total * 100` rounded to one decimal, `100.0` when `total` is zero
    pub percent: f64,
    /// Reference keys absent from the target or blank there, sorted ascending
    pub missing_keys: Vec<String>,
}

impl CoverageRecord {
    /// Compare `target` against `reference`.
    ///
    /// A key counts as present only when the target has it and its trimmed value is
    /// non-empty.
    #[must_use]
    pub fn compute(reference: &FlatLocaleData, target: &FlatLocaleData) -> Self {
        let mut missing_keys: Vec<String> = reference
            .keys()
            .filter(|key| target.get(*key).is_none_or(|value| value.trim().is_empty()))
            .cloned()
            .collect();
        missing_keys.sort_unstable();

        let total = reference.len();
        let missing = missing_keys.len();
        let present = total - missing;

        Self { total, present, missing, percent: coverage_percent(present, total), missing_keys }
    }

    /// Heat-map bucket of `percent`.
    #[must_use]
    pub fn level(&self) -> CoverageLevel {
        CoverageLevel::from_percent(self.percent)
    }
}

/// `present / total * 100` rounded to one decimal; `100.0` when there is nothing to cover.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::float_arithmetic)]
pub fn coverage_percent(present: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    let percent = present as f64 / total as f64 * 100.0;
    round_to_tenth(percent).clamp(0.0, 100.0)
}

/// Round to one decimal place, ties to even on the exact binary value of `value`.
///
/// `value * 10.0` may itself round onto a tie; the exact residual of that product
/// decides which side the true value lies on.
#[allow(clippy::float_arithmetic, clippy::float_cmp)]
fn round_to_tenth(value: f64) -> f64 {
    let scaled = value * 10.0;
    let residual = value.mul_add(10.0, -scaled);
    let floor = scaled.floor();
    let tenths = if scaled - floor == 0.5 && residual != 0.0 {
        if residual > 0.0 { floor + 1.0 } else { floor }
    } else {
        scaled.round_ties_even()
    };
    tenths / 10.0
}

/// Heat-map bucket of a coverage percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CoverageLevel {
    /// 95% and above
    Complete,
    /// 70% and above
    Good,
    /// 40% and above
    Partial,
    /// Anything above zero
    Low,
    /// Nothing translated
    None,
}

impl CoverageLevel {
    /// Bucket containing `percent`.
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 95.0 {
            Self::Complete
        } else if percent >= 70.0 {
            Self::Good
        } else if percent >= 40.0 {
            Self::Partial
        } else if percent > 0.0 {
            Self::Low
        } else {
            Self::None
        }
    }
}

/// Coverage of one category within a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCoverage {
    /// Category the record belongs to
    pub category: Category,
    /// Counts and missing keys of the category
    pub record: CoverageRecord,
}

/// Aggregate over every category of a report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoverageSummary {
    /// Reference keys across all categories
    pub total: usize,
    /// Translated keys across all categories
    pub present: usize,
    /// `total - present`
    pub missing: usize,
    /// Overall percentage, rounded like [`coverage_percent`]
    pub percent: f64,
}

/// Coverage of every registered category, in registry order.
///
/// Serializes as a JSON object keyed by category id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoverageReport {
    /// One entry per category
    entries: Vec<CategoryCoverage>,
}

impl CoverageReport {
    /// Report over `entries`, kept in the given order.
    #[must_use]
    pub const fn new(entries: Vec<CategoryCoverage>) -> Self {
        Self { entries }
    }

    /// Record of `category`, if the report covers it.
    #[must_use]
    pub fn get(&self, category: Category) -> Option<&CoverageRecord> {
        self.entries.iter().find(|entry| entry.category == category).map(|entry| &entry.record)
    }

    /// Entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryCoverage> {
        self.entries.iter()
    }

    /// Covered categories in registry order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.entries.iter().map(|entry| entry.category).collect()
    }

    /// Number of categories covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report covers no category.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Categories that have some coverage but less than half.
    #[must_use]
    pub fn low_coverage(&self) -> Vec<Category> {
        self.entries
            .iter()
            .filter(|entry| entry.record.percent > 0.0 && entry.record.percent < 50.0)
            .map(|entry| entry.category)
            .collect()
    }

    /// Totals over every category.
    #[must_use]
    pub fn summary(&self) -> CoverageSummary {
        let total = self.entries.iter().map(|entry| entry.record.total).sum();
        let present = self.entries.iter().map(|entry| entry.record.present).sum();
        CoverageSummary {
            total,
            present,
            missing: total - present,
            percent: coverage_percent(present, total),
        }
    }
}

impl<'a> IntoIterator for &'a CoverageReport {
    type Item = &'a CategoryCoverage;
    type IntoIter = std::slice::Iter<'a, CategoryCoverage>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for CoverageReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(entry.category.id(), &entry.record)?;
        }
        map.end()
    }
}

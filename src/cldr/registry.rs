//! Category registry: which CLDR package and file hold each data category

use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::CldrError;

/// Placeholder substituted with the locale code in path templates.
pub const LOCALE_PLACEHOLDER: &str = "{locale}";

/// Data categories the viewer knows how to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Gregorian calendar: month, day and era names, date formats
    Dates,
    /// Relative field names ("yesterday", "next week")
    DateFields,
    /// Currency display names and symbols
    Currencies,
    /// Measurement unit patterns
    Units,
    /// Time zone and metazone names
    TimeZoneNames,
    /// Language display names
    Languages,
    /// Territory display names
    Territories,
}

impl Category {
    /// All categories in registry definition order.
    pub const ALL: [Self; 7] = [
        Self::Dates,
        Self::DateFields,
        Self::Currencies,
        Self::Units,
        Self::TimeZoneNames,
        Self::Languages,
        Self::Territories,
    ];

    /// Identifier used on the wire and on the command line.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Dates => "dates",
            Self::DateFields => "dateFields",
            Self::Currencies => "currencies",
            Self::Units => "units",
            Self::TimeZoneNames => "timeZoneNames",
            Self::Languages => "languages",
            Self::Territories => "territories",
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dates => "Date Formats",
            Self::DateFields => "Date Fields",
            Self::Currencies => "Currencies",
            Self::Units => "Units",
            Self::TimeZoneNames => "Time Zone Names",
            Self::Languages => "Language Names",
            Self::Territories => "Territory Names",
        }
    }

    /// Identifiers of every category, in definition order.
    #[must_use]
    pub fn ids() -> Vec<&'static str> {
        Self::ALL.iter().map(|category| category.id()).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = CldrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.id() == s)
            .ok_or_else(|| CldrError::UnknownCategory(s.to_string()))
    }
}

/// Where one category lives in the CLDR JSON distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Category served by this entry
    pub category: Category,
    /// Package directory, e.g. `cldr-dates-full`
    pub package: String,
    /// Path inside the package containing [`LOCALE_PLACEHOLDER`]
    pub path_template: String,
}

impl RegistryEntry {
    /// Entry serving `category` from `package`/`path_template`.
    #[must_use]
    pub fn new(
        category: Category,
        package: impl Into<String>,
        path_template: impl Into<String>,
    ) -> Self {
        Self { category, package: package.into(), path_template: path_template.into() }
    }

    /// Path of this entry for `locale`, relative to the base URL.
    #[must_use]
    pub fn path_for(&self, locale: &str) -> String {
        format!("{}/{}", self.package, self.path_template.replace(LOCALE_PLACEHOLDER, locale))
    }
}

/// Ordered, immutable mapping from category to its package and path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    /// Entries in definition order, one per category
    entries: Vec<RegistryEntry>,
}

impl CategoryRegistry {
    /// Build a registry from explicit entries. Later duplicates of a category are ignored.
    #[must_use]
    pub fn new(entries: Vec<RegistryEntry>) -> Self {
        let mut unique: Vec<RegistryEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            if unique.iter().any(|existing| existing.category == entry.category) {
                tracing::warn!(category = %entry.category, "Duplicate registry entry ignored");
                continue;
            }
            unique.push(entry);
        }
        Self { entries: unique }
    }

    /// The registry of the public CLDR JSON distribution.
    #[must_use]
    pub fn cldr() -> Self {
        Self::new(vec![
            RegistryEntry::new(Category::Dates, "cldr-dates-full", "main/{locale}/ca-gregorian.json"),
            RegistryEntry::new(
                Category::DateFields,
                "cldr-dates-full",
                "main/{locale}/dateFields.json",
            ),
            RegistryEntry::new(
                Category::Currencies,
                "cldr-numbers-full",
                "main/{locale}/currencies.json",
            ),
            RegistryEntry::new(Category::Units, "cldr-units-full", "main/{locale}/units.json"),
            RegistryEntry::new(
                Category::TimeZoneNames,
                "cldr-dates-full",
                "main/{locale}/timeZoneNames.json",
            ),
            RegistryEntry::new(
                Category::Languages,
                "cldr-localenames-full",
                "main/{locale}/languages.json",
            ),
            RegistryEntry::new(
                Category::Territories,
                "cldr-localenames-full",
                "main/{locale}/territories.json",
            ),
        ])
    }

    /// Look up the entry of `category`.
    ///
    /// # Errors
    /// [`CldrError::UnregisteredCategory`] when the registry has no such entry.
    pub fn resolve(&self, category: Category) -> Result<&RegistryEntry, CldrError> {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .ok_or(CldrError::UnregisteredCategory(category))
    }

    /// Entries in definition order.
    pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    /// Registered categories in definition order.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.entries.iter().map(|entry| entry.category).collect()
    }

    /// Number of registered categories.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no category is registered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::cldr()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("dates", Category::Dates)]
    #[case("dateFields", Category::DateFields)]
    #[case("timeZoneNames", Category::TimeZoneNames)]
    #[case("territories", Category::Territories)]
    fn parse_category_ids(#[case] id: &str, #[case] expected: Category) {
        assert_eq!(id.parse::<Category>().unwrap(), expected);
        assert_eq!(expected.to_string(), id);
    }

    #[rstest]
    #[case("Dates")]
    #[case("date_fields")]
    #[case("")]
    fn parse_unknown_category(#[case] id: &str) {
        assert_eq!(id.parse::<Category>(), Err(CldrError::UnknownCategory(id.to_string())));
    }

    #[googletest::test]
    fn cldr_registry_keeps_definition_order() {
        let registry = CategoryRegistry::cldr();

        assert_eq!(registry.categories(), Category::ALL.to_vec());
    }

    #[googletest::test]
    fn resolve_builds_locale_path() {
        let registry = CategoryRegistry::cldr();

        let entry = registry.resolve(Category::Currencies).unwrap();

        expect_that!(entry.package, eq("cldr-numbers-full"));
        expect_that!(entry.path_for("fr"), eq("cldr-numbers-full/main/fr/currencies.json"));
    }

    #[googletest::test]
    fn resolve_unregistered_category_fails() {
        let registry = CategoryRegistry::new(vec![RegistryEntry::new(
            Category::Dates,
            "pkg",
            "{locale}.json",
        )]);

        assert_eq!(
            registry.resolve(Category::Units),
            Err(CldrError::UnregisteredCategory(Category::Units))
        );
    }

    #[googletest::test]
    fn duplicate_entries_keep_first() {
        let registry = CategoryRegistry::new(vec![
            RegistryEntry::new(Category::Dates, "first", "{locale}.json"),
            RegistryEntry::new(Category::Dates, "second", "{locale}.json"),
        ]);

        expect_that!(registry.len(), eq(1));
        expect_that!(registry.resolve(Category::Dates).unwrap().package, eq("first"));
    }

    #[googletest::test]
    fn unknown_category_message_lists_ids() {
        let message = CldrError::UnknownCategory("foo".to_string()).to_string();

        expect_that!(message, contains_substring("dates, dateFields, currencies"));
    }
}

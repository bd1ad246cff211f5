//! (locale, category) → resource address → flattened data

use serde_json::Value;

use super::flatten::{
    FlatLocaleData,
    flatten_json,
};
use super::registry::{
    Category,
    CategoryRegistry,
    RegistryEntry,
};
use crate::error::CldrError;
use crate::fetch::{
    FetchCache,
    Transport,
};

/// Root of the CLDR JSON distribution.
pub const DEFAULT_BASE_URL: &str =
    "https://raw.githubusercontent.com/unicode-org/cldr-json/main/cldr-json";

/// Resolves categories to addresses and loads their flattened data through the cache.
#[derive(Debug)]
pub struct CategoryResolver<T> {
    /// Disk cache every document goes through
    cache: FetchCache<T>,
    /// Category → package and path
    registry: CategoryRegistry,
    /// Base URL without trailing slash
    base_url: String,
}

impl<T: Transport> CategoryResolver<T> {
    /// Resolver over `cache`; a trailing slash on `base_url` is ignored.
    #[must_use]
    pub fn new(cache: FetchCache<T>, registry: CategoryRegistry, base_url: &str) -> Self {
        Self { cache, registry, base_url: base_url.trim_end_matches('/').to_string() }
    }

    /// Active category registry.
    #[must_use]
    pub const fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    /// Underlying fetch cache.
    #[must_use]
    pub const fn cache(&self) -> &FetchCache<T> {
        &self.cache
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Package and path template registered for `category`.
    ///
    /// # Errors
    /// [`CldrError::UnregisteredCategory`] when the registry has no entry for it.
    pub fn resolve_address(&self, category: Category) -> Result<(&str, &str), CldrError> {
        let entry = self.registry.resolve(category)?;
        Ok((&entry.package, &entry.path_template))
    }

    /// Full resource address of `category` for `locale`.
    ///
    /// # Errors
    /// [`CldrError::UnregisteredCategory`] when the registry has no entry for it.
    pub fn address(&self, locale: &str, category: Category) -> Result<String, CldrError> {
        let entry = self.registry.resolve(category)?;
        Ok(self.entry_address(entry, locale))
    }

    /// Address of an arbitrary file relative to the base URL.
    #[must_use]
    pub fn url_for(&self, relative_path: &str) -> String {
        format!("{}/{}", self.base_url, relative_path.trim_start_matches('/'))
    }

    /// Raw nested document of `category` for `locale`, `None` when unavailable.
    ///
    /// # Errors
    /// [`CldrError::UnregisteredCategory`] when the registry has no entry for it.
    pub async fn get_category_data(
        &self,
        locale: &str,
        category: Category,
    ) -> Result<Option<Value>, CldrError> {
        let url = self.address(locale, category)?;
        Ok(self.cache.fetch(&url).await)
    }

    /// Flattened data of `category` for `locale`. Missing data yields an empty map.
    ///
    /// # Errors
    /// [`CldrError::UnregisteredCategory`] when the registry has no entry for it.
    pub async fn get_flat_category(
        &self,
        locale: &str,
        category: Category,
    ) -> Result<FlatLocaleData, CldrError> {
        let entry = self.registry.resolve(category)?;
        Ok(self.flat_for_entry(entry, locale).await)
    }

    /// Flattened data of a registry entry for `locale`.
    pub(crate) async fn flat_for_entry(&self, entry: &RegistryEntry, locale: &str) -> FlatLocaleData {
        let url = self.entry_address(entry, locale);
        tracing::debug!(locale, category = %entry.category, %url, "Loading category");
        self.cache.fetch(&url).await.map(|json| flatten_json(&json)).unwrap_or_default()
    }

    /// Address of `entry` for `locale`.
    fn entry_address(&self, entry: &RegistryEntry, locale: &str) -> String {
        self.url_for(&entry.path_for(locale))
    }
}

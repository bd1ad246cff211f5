//! Entry point tying the cache, registry and settings together

use crate::cldr::{
    Category,
    CategoryRegistry,
    CategoryResolver,
    FlatLocaleData,
};
use crate::config::ViewerSettings;
use crate::coverage::{
    ComparisonRow,
    CoverageReport,
    compare_flat,
};
use crate::error::{
    CldrError,
    TransportError,
};
use crate::fetch::{
    FetchCache,
    HttpTransport,
    Transport,
};

/// CLDR locale data browser.
///
/// Every operation goes through one on-disk cache, so repeated calls within the
/// freshness window never touch the network.
#[derive(Debug)]
pub struct CldrViewer<T = HttpTransport> {
    /// Registry and cache the operations go through
    resolver: CategoryResolver<T>,
    /// Bound on concurrently running fetches
    concurrency: usize,
}

impl CldrViewer<HttpTransport> {
    /// Viewer over HTTP with the default category registry.
    ///
    /// # Errors
    /// When the HTTP client cannot be built.
    pub fn from_settings(settings: &ViewerSettings) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(settings.request_timeout(), &settings.user_agent)?;
        Ok(Self::with_transport(transport, settings, CategoryRegistry::cldr()))
    }
}

impl<T: Transport> CldrViewer<T> {
    /// Viewer over `transport` and `registry`, configured by `settings`.
    #[must_use]
    pub fn with_transport(
        transport: T,
        settings: &ViewerSettings,
        registry: CategoryRegistry,
    ) -> Self {
        let cache_dir = settings.resolved_cache_dir();
        tracing::debug!(?cache_dir, base_url = %settings.base_url, "Creating viewer");

        let cache = FetchCache::new(transport, cache_dir, settings.cache_ttl());
        Self {
            resolver: CategoryResolver::new(cache, registry, &settings.base_url),
            concurrency: settings.concurrency(),
        }
    }

    /// Underlying resolver.
    #[must_use]
    pub const fn resolver(&self) -> &CategoryResolver<T> {
        &self.resolver
    }

    /// Locales published by the data source, sorted.
    pub async fn get_available_locales(&self) -> Vec<String> {
        self.resolver.available_locales().await
    }

    /// Flattened data of `category` for `locale`, empty when unavailable.
    ///
    /// # Errors
    /// [`CldrError::UnregisteredCategory`] when the registry has no entry for `category`.
    pub async fn get_flat_category(
        &self,
        locale: &str,
        category: Category,
    ) -> Result<FlatLocaleData, CldrError> {
        self.resolver.get_flat_category(locale, category).await
    }

    /// Coverage of `locale` against `reference` for every registered category.
    pub async fn compute_coverage(&self, locale: &str, reference: &str) -> CoverageReport {
        crate::coverage::compute_coverage(&self.resolver, locale, reference, self.concurrency)
            .await
    }

    /// Key-by-key comparison of `locale` against `reference` for one category.
    ///
    /// # Errors
    /// [`CldrError::UnregisteredCategory`] when the registry has no entry for `category`.
    pub async fn compare_category(
        &self,
        locale: &str,
        reference: &str,
        category: Category,
    ) -> Result<Vec<ComparisonRow>, CldrError> {
        let (target, reference) = futures::join!(
            self.resolver.get_flat_category(locale, category),
            self.resolver.get_flat_category(reference, category),
        );
        Ok(compare_flat(&target?, &reference?))
    }

    /// Delete every cached document. Returns how many were removed.
    pub async fn clear_cache(&self) -> usize {
        self.resolver.cache().clear().await
    }
}

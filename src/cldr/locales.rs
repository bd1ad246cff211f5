//! Locale discovery

use serde_json::Value;

use super::resolver::CategoryResolver;
use crate::fetch::Transport;

/// Locales offered when the published list cannot be obtained.
pub const FALLBACK_LOCALES: [&str; 2] = ["en", "sv"];

/// Location of the locale list, relative to the base URL.
pub const AVAILABLE_LOCALES_PATH: &str = "cldr-dates-full/availableLocales.json";

impl<T: Transport> CategoryResolver<T> {
    /// Sorted list of locale codes published by the data source.
    ///
    /// Falls back to [`FALLBACK_LOCALES`] when the list is unavailable.
    pub async fn available_locales(&self) -> Vec<String> {
        let url = self.url_for(AVAILABLE_LOCALES_PATH);
        let document = self.cache().fetch(&url).await;
        parse_available_locales(document.as_ref())
    }
}

/// Extract `availableLocales.full` from the locale list document.
///
/// A document without `availableLocales` counts as unavailable. A present
/// `availableLocales` without a `full` array yields no locales.
#[must_use]
pub fn parse_available_locales(document: Option<&Value>) -> Vec<String> {
    let Some(available) = document.and_then(|doc| doc.get("availableLocales")) else {
        tracing::warn!("Locale list unavailable, using fallback locales");
        return FALLBACK_LOCALES.iter().map(ToString::to_string).collect();
    };

    let mut locales: Vec<String> = available
        .get("full")
        .and_then(Value::as_array)
        .map(|codes| codes.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();
    locales.sort();
    locales
}

use std::path::PathBuf;
use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::cldr::DEFAULT_BASE_URL;

/// Name of the directory used under the platform cache and config directories.
pub const APP_NAME: &str = "cldr-viewer";

/// Upper bound accepted for `maxConcurrentFetches`.
const MAX_CONCURRENT_FETCHES_LIMIT: usize = 64;

/// Default bound on in-flight fetches.
const DEFAULT_CONCURRENT_FETCHES: usize = 8;

/// One rule a settings file violates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "baseUrl")
    pub field_path: String,
    /// What is wrong, with an example where useful
    pub message: String,
}

impl ValidationError {
    /// Error for the field at `field_path`.
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Failure to obtain valid settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Every rule the settings violate
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    /// The file could not be read
    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file is not valid settings JSON
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered, one error per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings of the viewer, read from `config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerSettings {
    /// Root URL of the CLDR JSON distribution.
    pub base_url: String,

    /// Cache location. Defaults to the per-user cache directory.
    pub cache_dir: Option<PathBuf>,

    /// Age after which a cached document is refreshed.
    pub cache_ttl_secs: u64,

    /// Total time allowed for one request.
    pub request_timeout_secs: u64,

    /// Sent as `User-Agent` on every request.
    pub user_agent: String,

    /// Bound on concurrently running fetches.
    /// Default: CPU count, at most 8.
    pub max_concurrent_fetches: Option<usize>,

    /// Locale the others are compared against.
    pub reference_locale: String,
}

impl ViewerSettings {
    /// # Errors
    /// - Base URL is empty or not http(s)
    /// - Timeout is zero
    /// - User agent or reference locale is empty
    /// - Concurrency out of range
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.base_url.is_empty() {
            errors.push(ValidationError::new(
                "baseUrl",
                "The URL cannot be empty. Example: \"https://raw.githubusercontent.com/unicode-org/cldr-json/main/cldr-json\"",
            ));
        } else if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            errors.push(ValidationError::new(
                "baseUrl",
                format!("Unsupported URL '{}'. Only http:// and https:// are allowed", self.base_url),
            ));
        }

        if self.request_timeout_secs == 0 {
            errors.push(ValidationError::new(
                "requestTimeoutSecs",
                "The timeout must be at least 1 second",
            ));
        }

        if self.user_agent.trim().is_empty() {
            errors.push(ValidationError::new("userAgent", "The user agent cannot be empty"));
        }

        if self.reference_locale.trim().is_empty() {
            errors.push(ValidationError::new(
                "referenceLocale",
                "The reference locale cannot be empty. Example: \"en\"",
            ));
        }

        if let Some(limit) = self.max_concurrent_fetches
            && !(1..=MAX_CONCURRENT_FETCHES_LIMIT).contains(&limit)
        {
            errors.push(ValidationError::new(
                "maxConcurrentFetches",
                format!("Must be between 1 and {MAX_CONCURRENT_FETCHES_LIMIT}, got {limit}"),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Configured cache directory, or `<user cache dir>/cldr-viewer`.
    ///
    /// Falls back to the system temp directory on platforms without a cache directory.
    #[must_use]
    pub fn resolved_cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| {
            dirs::cache_dir().unwrap_or_else(std::env::temp_dir).join(APP_NAME)
        })
    }

    /// Freshness window of cached documents.
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Effective bound on concurrently running fetches.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_fetches
            .unwrap_or_else(|| num_cpus::get().clamp(1, DEFAULT_CONCURRENT_FETCHES))
    }
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_dir: None,
            cache_ttl_secs: 24 * 60 * 60,
            request_timeout_secs: 15,
            user_agent: format!("{APP_NAME}/{}", env!("CARGO_PKG_VERSION")),
            max_concurrent_fetches: None,
            reference_locale: "en".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = ViewerSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"referenceLocale": "de", "cacheTtlSecs": 60}"#;

        let settings: ViewerSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.reference_locale, eq("de"));
        assert_that!(settings.cache_ttl(), eq(Duration::from_secs(60)));
        assert_that!(settings.request_timeout(), eq(Duration::from_secs(15)));
        assert_that!(settings.base_url, eq(DEFAULT_BASE_URL));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: ViewerSettings = serde_json::from_str("{}").unwrap();

        assert_eq!(settings, ViewerSettings::default());
        assert_that!(settings.user_agent, starts_with("cldr-viewer/"));
    }

    #[rstest]
    fn explicit_cache_dir_wins() {
        let settings = ViewerSettings {
            cache_dir: Some(PathBuf::from("/tmp/cldr")),
            ..ViewerSettings::default()
        };

        assert_eq!(settings.resolved_cache_dir(), PathBuf::from("/tmp/cldr"));
    }

    #[rstest]
    fn default_cache_dir_ends_with_app_name() {
        let settings = ViewerSettings::default();

        assert!(settings.resolved_cache_dir().ends_with(APP_NAME));
    }

    #[rstest]
    fn default_concurrency_is_bounded() {
        let concurrency = ViewerSettings::default().concurrency();

        assert!((1..=8).contains(&concurrency));
    }

    #[rstest]
    #[case("")]
    #[case("ftp://mirror.test/cldr")]
    #[case("raw.githubusercontent.com")]
    fn validate_invalid_base_url(#[case] base_url: &str) {
        let settings = ViewerSettings { base_url: base_url.to_string(), ..ViewerSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(ValidationError.field_path, eq("baseUrl"))])
        );
    }

    #[rstest]
    #[case(Some(0))]
    #[case(Some(65))]
    fn validate_invalid_concurrency(#[case] limit: Option<usize>) {
        let settings =
            ViewerSettings { max_concurrent_fetches: limit, ..ViewerSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("maxConcurrentFetches")),
                field!(ValidationError.message, contains_substring("between 1 and 64"))
            ]])
        );
    }

    #[rstest]
    fn validate_zero_timeout() {
        let settings = ViewerSettings { request_timeout_secs: 0, ..ViewerSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(ValidationError.field_path, eq("requestTimeoutSecs"))])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = ViewerSettings {
            user_agent: String::new(),
            reference_locale: " ".to_string(),
            ..ViewerSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. userAgent"));
        assert_that!(error_message, contains_substring("2. referenceLocale"));
        assert_that!(error_message, contains_substring("cannot be empty"));
    }
}

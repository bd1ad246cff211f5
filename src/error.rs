use thiserror::Error;

use crate::cldr::Category;

/// Errors raised by category resolution
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CldrError {
    /// The category exists but the active registry has no entry for it
    #[error("Category '{0}' is not registered")]
    UnregisteredCategory(Category),
    /// The identifier does not name any known category
    #[error("Unknown category '{0}'. Expected one of: {ids}", ids = Category::ids().join(", "))]
    UnknownCategory(String),
}

/// Failure of the HTTP client or of a single network retrieval.
///
/// Retrieval failures are recovered inside the fetch cache by falling back to a stale
/// entry or by reporting absence.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, TLS, timeout or body read failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),
}

/// Reasons a cache refresh produced no usable document
#[derive(Error, Debug)]
pub enum CacheError {
    /// The download itself failed
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The body or the cached file is not valid JSON
    #[error("Malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
    /// Reading or writing the cache file failed
    #[error("Cache I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

//! Disk-backed JSON cache with a freshness window and stale-on-failure fallback

use std::path::{
    Path,
    PathBuf,
};
use std::sync::atomic::{
    AtomicU64,
    Ordering,
};
use std::time::{
    Duration,
    SystemTime,
};

use serde_json::Value;
use sha2::{
    Digest,
    Sha256,
};

use super::transport::Transport;
use crate::error::CacheError;

/// Default freshness window.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Number of hex characters of the address digest used as the file name.
const CACHE_KEY_LEN: usize = 16;

/// Disambiguates temp files written concurrently by this process.
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Derive the cache key of a resource address.
///
/// The first 16 hex characters of the SHA-256 of the address, stable across runs.
#[must_use]
pub fn cache_key(url: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(url.as_bytes()));
    digest.chars().take(CACHE_KEY_LEN).collect()
}

/// Fetches remote JSON documents through an on-disk cache.
///
/// Each address maps to `<cache_key>.json` inside the cache directory. The file holds
/// the body exactly as received and its modification time is the freshness clock.
#[derive(Debug)]
pub struct FetchCache<T> {
    /// Network seam used on a miss
    transport: T,
    /// Directory holding one file per address
    dir: PathBuf,
    /// Age after which an entry is refreshed
    ttl: Duration,
}

impl<T: Transport> FetchCache<T> {
    /// Cache in `dir` that refreshes entries older than `ttl`. The directory is created lazily.
    #[must_use]
    pub fn new(transport: T, dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self { transport, dir: dir.into(), ttl }
    }

    /// Cache directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Freshness window
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Path of the cache entry for `url`.
    #[must_use]
    pub fn entry_path(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.json", cache_key(url)))
    }

    /// Return the JSON document at `url`, or `None` when no data is available.
    ///
    /// A fresh entry is served without touching the network. Otherwise the document is
    /// downloaded and written through; if that fails for any reason the existing entry is
    /// served regardless of its age.
    pub async fn fetch(&self, url: &str) -> Option<Value> {
        if let Err(e) = tokio::fs::create_dir_all(&self.dir).await {
            tracing::warn!(dir = %self.dir.display(), "Failed to create cache directory: {e}");
        }

        let path = self.entry_path(url);

        if self.is_fresh(&path).await {
            match read_entry(&path).await {
                Ok(value) => {
                    tracing::debug!(url, "Cache hit");
                    return Some(value);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Ignoring unreadable cache entry: {e}");
                }
            }
        }

        match self.download(url).await {
            Ok((body, value)) => {
                if let Err(e) = self.write_entry(&path, &body).await {
                    tracing::warn!(url, "Failed to write cache entry: {e}");
                }
                Some(value)
            }
            Err(e) => {
                tracing::warn!(url, "Fetch failed: {e}");
                match read_entry(&path).await {
                    Ok(value) => {
                        tracing::debug!(url, "Serving stale cache entry");
                        Some(value)
                    }
                    Err(CacheError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
                    Err(e) => {
                        tracing::warn!(path = %path.display(), "Stale cache entry unusable: {e}");
                        None
                    }
                }
            }
        }
    }

    /// Remove every file in the cache directory.
    ///
    /// Best effort: entries that cannot be removed are skipped. Returns the number of
    /// files removed.
    pub async fn clear(&self) -> usize {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %self.dir.display(), "Nothing to clear: {e}");
                return 0;
            }
        };

        let mut removed = 0;
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let path = entry.path();
                    match tokio::fs::remove_file(&path).await {
                        Ok(()) => removed += 1,
                        Err(e) => tracing::debug!(path = %path.display(), "Skipped: {e}"),
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(dir = %self.dir.display(), "Failed to list cache directory: {e}");
                    break;
                }
            }
        }

        tracing::debug!(removed, "Cache cleared");
        removed
    }

    /// Whether the entry at `path` exists and is younger than the TTL.
    async fn is_fresh(&self, path: &Path) -> bool {
        let Ok(modified) = tokio::fs::metadata(path).await.and_then(|meta| meta.modified())
        else {
            return false;
        };
        // mtime in the future counts as age zero
        SystemTime::now().duration_since(modified).map_or(true, |age| age < self.ttl)
    }

    /// Download `url` and parse it, keeping the raw body for the cache file.
    async fn download(&self, url: &str) -> Result<(Vec<u8>, Value), CacheError> {
        tracing::debug!(url, "Downloading");
        let body = self.transport.get(url).await?;
        let value = serde_json::from_slice(&body)?;
        Ok((body, value))
    }

    /// Replace the entry atomically so concurrent writers never leave a torn file.
    async fn write_entry(&self, path: &Path, body: &[u8]) -> Result<(), CacheError> {
        let file_name = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
        let temp_path = self.dir.join(format!(
            ".{file_name}.{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));

        tokio::fs::write(&temp_path, body).await?;
        if let Err(e) = tokio::fs::rename(&temp_path, path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }
}

/// Read and parse a cache file.
async fn read_entry(path: &Path) -> Result<Value, CacheError> {
    let content = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&content)?)
}

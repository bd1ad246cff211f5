//! Remote JSON retrieval
/// On-disk cache in front of the transport
mod cache;
/// Network access
mod transport;

pub use cache::{
    DEFAULT_CACHE_TTL,
    FetchCache,
    cache_key,
};
pub use transport::{
    HttpTransport,
    Transport,
};

//! CLDR data categories and their retrieval
/// Nested JSON flattening
mod flatten;
/// Locale discovery
mod locales;
/// Category → package/path registry
mod registry;
/// Address resolution and flattened loading
mod resolver;

pub use flatten::{
    FlatLocaleData,
    KEY_SEPARATOR,
    flatten_json,
};
pub use locales::{
    AVAILABLE_LOCALES_PATH,
    FALLBACK_LOCALES,
    parse_available_locales,
};
pub use registry::{
    Category,
    CategoryRegistry,
    LOCALE_PLACEHOLDER,
    RegistryEntry,
};
pub use resolver::{
    CategoryResolver,
    DEFAULT_BASE_URL,
};

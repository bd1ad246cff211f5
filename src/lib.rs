//! cldr-viewer
//!
//! Browse Unicode CLDR locale data and measure how completely a locale is translated
//! relative to a reference locale. Remote documents are cached on disk for a day and
//! served stale when the source is unreachable.

pub mod cldr;
pub mod config;
pub mod coverage;
pub mod error;
pub mod fetch;
mod test_utils;
pub mod viewer;

pub use cldr::{
    Category,
    FlatLocaleData,
};
pub use coverage::{
    ComparisonRow,
    CoverageRecord,
    CoverageReport,
};
pub use viewer::CldrViewer;

//! Translation coverage analysis
/// Side-by-side key comparison
mod compare;
/// Coverage computation across categories
mod engine;
/// Coverage statistics types
mod record;

pub use compare::{
    ComparisonRow,
    RowStatus,
    compare_flat,
};
pub use engine::compute_coverage;
pub use record::{
    CategoryCoverage,
    CoverageLevel,
    CoverageRecord,
    CoverageReport,
    CoverageSummary,
    coverage_percent,
};

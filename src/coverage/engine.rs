//! Per-category coverage of a target locale against a reference locale

use futures::StreamExt;
use futures::stream;

use super::record::{
    CategoryCoverage,
    CoverageRecord,
    CoverageReport,
};
use crate::cldr::CategoryResolver;
use crate::fetch::Transport;

/// Compute coverage of `target` against `reference` for every registered category.
///
/// Reference and target data of all categories are loaded concurrently with at most
/// `max_in_flight` fetches running at once. The report keeps registry order.
pub async fn compute_coverage<T: Transport>(
    resolver: &CategoryResolver<T>,
    target: &str,
    reference: &str,
    max_in_flight: usize,
) -> CoverageReport {
    tracing::debug!(target, reference, max_in_flight, "Computing coverage");

    // reference then target for each entry, so results pair up in order
    let requests: Vec<_> = resolver
        .registry()
        .entries()
        .flat_map(|entry| [(entry, reference), (entry, target)])
        .collect();

    let mut loaded = stream::iter(requests)
        .map(|(entry, locale)| resolver.flat_for_entry(entry, locale))
        .buffered(max_in_flight.max(1))
        .collect::<Vec<_>>()
        .await
        .into_iter();

    let entries = resolver
        .registry()
        .entries()
        .map_while(|entry| {
            let reference_data = loaded.next()?;
            let target_data = loaded.next()?;
            let record = CoverageRecord::compute(&reference_data, &target_data);
            tracing::debug!(
                category = %entry.category,
                present = record.present,
                total = record.total,
                "Category coverage"
            );
            Some(CategoryCoverage { category: entry.category, record })
        })
        .collect();

    CoverageReport::new(entries)
}

//! Slot width resolution by catalog prefix.

use loadplan_core::CatalogEntry;
use loadplan_core::catalog::match_entry;

/// Width used when no catalog entry matches.
pub const DEFAULT_WIDTH: usize = 1;

/// Number of contiguous slots `unit_id` occupies.
///
/// The first catalog entry whose prefix starts `unit_id` wins, so catalog
/// order matters. A declared width of 0 is treated as 1.
pub fn resolve_width(catalog: &[CatalogEntry], unit_id: &str) -> usize {
    match_entry(catalog, unit_id)
        .map(|e| e.width_slots.max(1))
        .unwrap_or(DEFAULT_WIDTH)
}

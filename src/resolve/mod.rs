//! Record Resolution
//!
//! Translates a display name into the base-name of the image file that
//! represents it. Record tiers are probed in strictly descending order and
//! the first tier with a readable row wins; for a fixed store state the
//! same inputs always return the same result.

use crate::error::FindError;
use crate::store::{RecordQuery, RecordStore, StoreSchema};
use tracing::debug;

/// Outcome of a single resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
    /// Base-name of the matching image; never empty.
    Found(String),
    /// No tier yielded a row for the name.
    NotFoundInRecords,
    /// The join column does not exist in the store's designated table.
    ColumnMissing,
}

/// Resolve `display_name` through the store's designated (first) table.
///
/// The join column is checked against the table schema before any row
/// query is issued; a mismatch short-circuits to `ColumnMissing` so a
/// wrong spreadsheet is never silently matched against the wrong schema.
pub fn resolve(
    store: &dyn RecordStore,
    schema: &StoreSchema,
    name_column: &str,
    display_name: &str,
) -> Result<ResolutionResult, FindError> {
    let Some(table) = store.first_table()? else {
        // No tables at all: the join column cannot exist anywhere.
        return Ok(ResolutionResult::ColumnMissing);
    };
    if !store.has_column(&table, name_column)? {
        return Ok(ResolutionResult::ColumnMissing);
    }

    for tier in (1..=schema.highest_tier).rev() {
        let tier_tag = schema.tier_tag(tier);
        let query = RecordQuery {
            table: &table,
            image_column: &schema.image_column,
            name_column,
            name_prefix: display_name,
            tier_column: &schema.tier_column,
            tier_tag: &tier_tag,
        };
        let Some(identifier) = store.first_image_id(&query)? else {
            continue;
        };
        let base = base_name(&identifier);
        if base.is_empty() {
            debug!(tier, identifier = %identifier, "row has no usable image identifier");
            continue;
        }
        debug!(tier, base_name = base, "record resolved");
        return Ok(ResolutionResult::Found(base.to_string()));
    }

    Ok(ResolutionResult::NotFoundInRecords)
}

/// Strip any directory component from an image identifier. Identifiers
/// originate on either host family, so both separators are honored.
fn base_name(identifier: &str) -> &str {
    identifier.rsplit(['/', '\\']).next().unwrap_or(identifier)
}

//! Record Store
//!
//! Contract for the external tabular store that maps display names to
//! image identifiers. Rows are tagged with a record tier ("Type N");
//! resolution probes tiers from the highest down.

pub mod sqlite;

use crate::error::FindError;
use serde::{Deserialize, Serialize};

/// Column and tier bindings for the store's designated table.
///
/// Defaults mirror the upstream archive layout: identifiers in `IMAGE_ID`,
/// tier tags in `MULTI_RECORD_TYPE`, tiers 2 down to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSchema {
    #[serde(default = "default_image_column")]
    pub image_column: String,

    #[serde(default = "default_tier_column")]
    pub tier_column: String,

    /// Highest record tier; probes run from here down to 1.
    #[serde(default = "default_highest_tier")]
    pub highest_tier: u32,
}

impl StoreSchema {
    /// Tag value stored in the tier column for tier `n`.
    pub fn tier_tag(&self, tier: u32) -> String {
        format!("Type {}", tier)
    }
}

impl Default for StoreSchema {
    fn default() -> Self {
        Self {
            image_column: default_image_column(),
            tier_column: default_tier_column(),
            highest_tier: default_highest_tier(),
        }
    }
}

fn default_image_column() -> String {
    "IMAGE_ID".to_string()
}

fn default_tier_column() -> String {
    "MULTI_RECORD_TYPE".to_string()
}

fn default_highest_tier() -> u32 {
    2
}

/// One tier probe: select the image identifier of the first row whose
/// name column starts with `name_prefix` and whose tier tag matches.
#[derive(Debug, Clone)]
pub struct RecordQuery<'a> {
    pub table: &'a str,
    pub image_column: &'a str,
    pub name_column: &'a str,
    pub name_prefix: &'a str,
    pub tier_column: &'a str,
    pub tier_tag: &'a str,
}

/// Query surface the resolver needs from a record store.
///
/// Implementations must keep row order stable for a fixed store state so
/// that repeated resolutions return the same row.
pub trait RecordStore {
    /// First table discovered in the store, if any.
    fn first_table(&self) -> Result<Option<String>, FindError>;

    /// Whether `column` exists on `table`, without failing on absence.
    fn has_column(&self, table: &str, column: &str) -> Result<bool, FindError>;

    /// Image identifier of the first row matching the probe; `None` when
    /// the tier has no readable row.
    fn first_image_id(&self, query: &RecordQuery<'_>) -> Result<Option<String>, FindError>;
}

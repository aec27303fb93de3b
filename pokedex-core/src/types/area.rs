//! Location area types.

use serde::{Deserialize, Serialize};

/// A location area as returned by an [`AreaFetcher`](crate::traits::AreaFetcher).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedArea {
    /// Area name (e.g. "canalave-city-area")
    pub name: String,
    /// Creatures encountered in the area, in upstream order (may repeat)
    pub creatures: Vec<String>,
}

impl FetchedArea {
    /// Creates a fetched area.
    pub fn new(name: impl Into<String>, creatures: Vec<String>) -> Self {
        Self {
            name: name.into(),
            creatures,
        }
    }
}

/// Outcome recorded for a cached area.
///
/// A failed fetch is cached like a real entry so the id is not retried until
/// the reaper expires it, but it stays distinguishable from a real name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AreaStatus {
    /// The area was fetched successfully.
    Fetched,
    /// The fetch failed; `reason` is the error message.
    Failed { reason: String },
}

impl AreaStatus {
    /// Returns true for a failed fetch.
    pub fn is_failed(&self) -> bool {
        matches!(self, AreaStatus::Failed { .. })
    }
}

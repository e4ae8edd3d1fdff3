//! Owned, read-only copies of simulation state.

use serde::{Deserialize, Serialize};

use crate::bin::BinSpec;
use crate::id::BinId;
use crate::item::PlacedItem;

/// One bin and its items at the time of a snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinSnapshot {
    /// Bin identity and dimensions.
    pub spec: BinSpec,
    /// Items in arrival order.
    pub items: Vec<PlacedItem>,
}

/// Every bin at a single instant, between two command applications.
///
/// `generation` counts successfully applied mutations (accepted
/// placements and resets) since the engine was created, so a snapshot can
/// be matched to the exact prefix of commands it reflects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Bins in configuration order.
    pub bins: Vec<BinSnapshot>,
    /// Mutation counter at the time of the snapshot.
    pub generation: u64,
}

impl StateSnapshot {
    /// Look up a bin by id.
    pub fn bin(&self, id: BinId) -> Option<&BinSnapshot> {
        self.bins.iter().find(|b| b.spec.id == id)
    }

    /// Total items across all bins.
    pub fn total_items(&self) -> usize {
        self.bins.iter().map(|b| b.items.len()).sum()
    }
}

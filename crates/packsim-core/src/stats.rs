//! Utilization statistics derived from a [`StateSnapshot`].
//!
//! Statistics are recomputed from a snapshot on every request and never
//! cached, so they always describe exactly the state the snapshot was
//! taken from.
//!
//! Utilization uses each item's bounding-box area regardless of shape: a
//! triangle contributes its full rectangle, not half of it.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::bin::BinSpec;
use crate::id::BinId;
use crate::item::PlacedItem;
use crate::snapshot::{BinSnapshot, StateSnapshot};

/// Per-bin statistics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinStats {
    /// Bin id.
    pub bin_id: BinId,
    /// Bin width.
    pub width: f64,
    /// Bin height.
    pub height: f64,
    /// Number of items in the bin.
    pub item_count: usize,
    /// Sum of item bounding-box areas.
    pub used_area: f64,
    /// `used_area / bin area * 100`; 0 for a zero-area bin.
    pub utilization: f64,
    /// Distinct item type labels, first-seen order.
    pub item_types: Vec<String>,
}

/// Statistics for the whole simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Per-bin statistics in configuration order.
    pub bins: Vec<BinStats>,
    /// Items across all bins.
    pub total_items: usize,
    /// Unweighted mean of per-bin utilization; 0 when there are no bins.
    pub average_utilization: f64,
    /// Generation of the snapshot these statistics were derived from.
    pub generation: u64,
}

/// Utilization percentage of `items` inside `spec`.
///
/// Returns 0 for a bin with zero area.
pub fn bin_utilization(spec: &BinSpec, items: &[PlacedItem]) -> f64 {
    let total = spec.area();
    if total == 0.0 {
        return 0.0;
    }
    used_area(items) / total * 100.0
}

fn used_area(items: &[PlacedItem]) -> f64 {
    items.iter().map(|item| item.bounds.area()).sum()
}

impl BinStats {
    /// Derive statistics for one bin.
    pub fn from_bin(bin: &BinSnapshot) -> Self {
        let item_types: IndexSet<&str> = bin.items.iter().map(|i| i.item_type.as_str()).collect();
        Self {
            bin_id: bin.spec.id,
            width: bin.spec.width,
            height: bin.spec.height,
            item_count: bin.items.len(),
            used_area: used_area(&bin.items),
            utilization: bin_utilization(&bin.spec, &bin.items),
            item_types: item_types.into_iter().map(str::to_owned).collect(),
        }
    }
}

impl SimulationStats {
    /// Derive statistics from a snapshot.
    pub fn from_snapshot(snapshot: &StateSnapshot) -> Self {
        let bins: Vec<BinStats> = snapshot.bins.iter().map(BinStats::from_bin).collect();
        let total_items = bins.iter().map(|b| b.item_count).sum();
        let average_utilization = if bins.is_empty() {
            0.0
        } else {
            bins.iter().map(|b| b.utilization).sum::<f64>() / bins.len() as f64
        };
        Self {
            bins,
            total_items,
            average_utilization,
            generation: snapshot.generation,
        }
    }

    /// Look up a bin's statistics by id.
    pub fn bin(&self, id: BinId) -> Option<&BinStats> {
        self.bins.iter().find(|b| b.bin_id == id)
    }
}

impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SIMULATION STATISTICS")?;
        writeln!(f, "{}", "=".repeat(50))?;
        writeln!(f)?;
        for bin in &self.bins {
            writeln!(f, "Bin {} ({}x{}):", bin.bin_id, bin.width, bin.height)?;
            writeln!(f, "  Items: {}", bin.item_count)?;
            writeln!(f, "  Utilization: {:.1}%", bin.utilization)?;
            writeln!(f, "  Item types: {}", bin.item_types.join(", "))?;
            writeln!(f)?;
        }
        writeln!(f, "Total Items: {}", self.total_items)?;
        write!(f, "Average Utilization: {:.1}%", self.average_utilization)
    }
}

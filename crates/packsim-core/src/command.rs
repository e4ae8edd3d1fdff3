//! Commands delivered to the state owner and the outcomes it returns.

use std::fmt;

use crate::error::Rejection;
use crate::id::{BinId, ItemId};
use crate::item::PlacementRecord;
use crate::snapshot::StateSnapshot;
use crate::stats::SimulationStats;

/// A command for the simulation state owner.
///
/// Commands are applied strictly in the order they were enqueued.
///
/// # Examples
///
/// ```
/// use packsim_core::{BinId, Command, ItemId, PlacementRecord, Rect, ShapeKind};
///
/// let cmd = Command::Place(PlacementRecord {
///     item_id: ItemId(1),
///     bin_id: BinId(0),
///     bounds: Rect::new(0.0, 0.0, 50.0, 50.0),
///     shape: ShapeKind::Circle,
///     item_type: "Circle Small".into(),
/// });
/// assert!(cmd.is_mutating());
/// assert!(!Command::QueryStats.is_mutating());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Validate and place one item.
    Place(PlacementRecord),
    /// Clear every bin. Bin identities and dimensions are kept.
    Reset,
    /// Compute statistics from the current state.
    QueryStats,
    /// Return a full copy of the current state.
    Snapshot,
}

impl Command {
    /// Whether this command may change simulation state.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Self::Place(_) | Self::Reset)
    }

    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Place(_) => "place",
            Self::Reset => "reset",
            Self::QueryStats => "query_stats",
            Self::Snapshot => "snapshot",
        }
    }
}

/// Result of applying one [`Command`].
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The item was appended to its bin.
    Placed {
        /// The placed item.
        item_id: ItemId,
        /// The bin it now lives in.
        bin_id: BinId,
    },
    /// The placement failed validation. State is unchanged.
    Rejected(Rejection),
    /// Every bin was cleared.
    Reset,
    /// Statistics derived from the state at the moment of the query.
    Stats(SimulationStats),
    /// A copy of the state at the moment of the query.
    Snapshot(StateSnapshot),
}

impl Outcome {
    /// Whether this outcome is a successful placement.
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }

    /// The rejection, if the placement was rejected.
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placed { item_id, bin_id } => {
                write!(f, "placed item {item_id} in bin {bin_id}")
            }
            Self::Rejected(r) => write!(f, "{r}"),
            Self::Reset => write!(f, "simulation reset"),
            Self::Stats(stats) => write!(
                f,
                "{} items, average utilization {:.1}%",
                stats.total_items, stats.average_utilization
            ),
            Self::Snapshot(snap) => write!(
                f,
                "snapshot of {} bins at generation {}",
                snap.bins.len(),
                snap.generation
            ),
        }
    }
}

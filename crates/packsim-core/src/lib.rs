//! Core types, geometry checks, and statistics for packsim.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! placement data model (bins, records, placed items), the command and
//! outcome types exchanged with the engine, the pure geometry validator,
//! and the statistics aggregator that derives utilization from snapshots.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bin;
pub mod command;
pub mod error;
pub mod geometry;
pub mod id;
pub mod item;
pub mod shape;
pub mod snapshot;
pub mod stats;

pub use bin::{standard_bins, BinSpec};
pub use command::{Command, Outcome};
pub use error::{RejectReason, Rejection, ShapeParseError};
pub use geometry::{first_overlap, fits, overlaps, Rect};
pub use id::{BinId, ItemId};
pub use item::{PlacedItem, PlacementRecord};
pub use shape::ShapeKind;
pub use snapshot::{BinSnapshot, StateSnapshot};
pub use stats::{BinStats, SimulationStats};

//! Rejection outcomes and parse errors.
//!
//! A [`Rejection`] is an expected, non-fatal result of validating a
//! placement. It travels back to the command's issuer as a value inside
//! [`Outcome::Rejected`](crate::command::Outcome::Rejected) and is never
//! raised as a fault.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::{BinId, ItemId};

/// Why a placement was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// The record's geometry is unusable (non-finite or non-positive size,
    /// non-finite position).
    Malformed {
        /// Human-readable description of the defect.
        detail: String,
    },
    /// The target bin was never configured.
    BinNotFound,
    /// The item's bounding box leaves the bin.
    DoesNotFit,
    /// The item's bounding box overlaps an item already in the bin.
    Overlaps {
        /// The first existing item (arrival order) that overlaps.
        other: ItemId,
    },
}

/// A rejected placement: which item, which bin, and why.
///
/// `Display` renders the stable reason strings callers match on:
///
/// - `bin <id> does not exist`
/// - `item <id> does not fit in bin <bin_id>`
/// - `item <id> overlaps with existing item <other_id>`
/// - `item <id> is malformed: <detail>`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// Bin the item was aimed at.
    pub bin_id: BinId,
    /// Item that failed.
    pub item_id: ItemId,
    /// Reason tag.
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            RejectReason::Malformed { detail } => {
                write!(f, "item {} is malformed: {detail}", self.item_id)
            }
            RejectReason::BinNotFound => write!(f, "bin {} does not exist", self.bin_id),
            RejectReason::DoesNotFit => {
                write!(f, "item {} does not fit in bin {}", self.item_id, self.bin_id)
            }
            RejectReason::Overlaps { other } => write!(
                f,
                "item {} overlaps with existing item {other}",
                self.item_id
            ),
        }
    }
}

impl Error for Rejection {}

/// A shape name that is not one of `RECTANGLE`, `CIRCLE`, `TRIANGLE`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeParseError {
    /// The rejected input.
    pub value: String,
}

impl fmt::Display for ShapeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown shape '{}'", self.value)
    }
}

impl Error for ShapeParseError {}

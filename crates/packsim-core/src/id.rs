//! Strongly-typed identifiers for bins and items.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a bin.
///
/// Bin ids are fixed when the engine is configured and are unique within
/// one engine instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinId(pub u32);

impl fmt::Display for BinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BinId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a placed item.
///
/// Uniqueness within a run is the plan producer's responsibility; the
/// engine never deduplicates item ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ItemId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

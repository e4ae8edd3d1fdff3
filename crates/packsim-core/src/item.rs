//! Placement records and the items they produce.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;
use crate::id::{BinId, ItemId};
use crate::shape::ShapeKind;

/// One typed step of a placement plan: put this item at this position in
/// this bin.
///
/// Records are built once at the plan boundary, so every field is
/// present. Geometric well-formedness is still checked by the engine,
/// which rejects a malformed record on its own without touching state.
///
/// # Examples
///
/// ```
/// use packsim_core::{BinId, ItemId, PlacementRecord, Rect, ShapeKind};
///
/// let record = PlacementRecord {
///     item_id: ItemId(1),
///     bin_id: BinId(0),
///     bounds: Rect::new(0.0, 0.0, 50.0, 50.0),
///     shape: ShapeKind::Rectangle,
///     item_type: "Rectangle A".into(),
/// };
/// assert_eq!(record.bounds.area(), 2500.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Item being placed.
    pub item_id: ItemId,
    /// Target bin.
    pub bin_id: BinId,
    /// Position and size in bin-local coordinates.
    pub bounds: Rect,
    /// Display shape; never affects collision.
    pub shape: ShapeKind,
    /// Free-form type label used for grouping in statistics.
    pub item_type: String,
}

/// An item that has been accepted into a bin.
///
/// Immutable once created. Items leave a bin only through a full reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedItem {
    /// Item id as supplied by the plan.
    pub id: ItemId,
    /// Free-form type label.
    pub item_type: String,
    /// Owning bin.
    pub bin_id: BinId,
    /// Position and size in bin-local coordinates.
    pub bounds: Rect,
    /// Display shape.
    pub shape: ShapeKind,
}

impl From<PlacementRecord> for PlacedItem {
    fn from(record: PlacementRecord) -> Self {
        Self {
            id: record.item_id,
            item_type: record.item_type,
            bin_id: record.bin_id,
            bounds: record.bounds,
            shape: record.shape,
        }
    }
}

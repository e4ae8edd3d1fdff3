//! Bins, item templates, and record constructors.

pub use packsim_core::standard_bins;
use packsim_core::{BinId, ItemId, PlacementRecord, Rect, ShapeKind};

/// A rectangle placement with a generic item type.
pub fn record(item: u32, bin: u32, x: f64, y: f64, width: f64, height: f64) -> PlacementRecord {
    shaped_record(item, bin, Rect::new(x, y, width, height), ShapeKind::Rectangle, "Rectangle A")
}

/// A placement with an explicit shape and item type.
pub fn shaped_record(
    item: u32,
    bin: u32,
    bounds: Rect,
    shape: ShapeKind,
    item_type: &str,
) -> PlacementRecord {
    PlacementRecord {
        item_id: ItemId(item),
        bin_id: BinId(bin),
        bounds,
        shape,
        item_type: item_type.to_string(),
    }
}

/// One kind of item the optimizer packs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemTemplate {
    pub item_type: &'static str,
    pub width: f64,
    pub height: f64,
    pub shape: ShapeKind,
    /// How many of this kind the full catalogue holds.
    pub count: u32,
}

/// The optimizer's 230-item catalogue, grouped by kind.
pub const ITEM_CATALOGUE: [ItemTemplate; 8] = [
    ItemTemplate { item_type: "Rectangle A", width: 50.0, height: 50.0, shape: ShapeKind::Rectangle, count: 15 },
    ItemTemplate { item_type: "Rectangle B", width: 35.0, height: 45.0, shape: ShapeKind::Rectangle, count: 25 },
    ItemTemplate { item_type: "Rectangle C", width: 25.0, height: 30.0, shape: ShapeKind::Rectangle, count: 40 },
    ItemTemplate { item_type: "Rectangle D", width: 30.0, height: 40.0, shape: ShapeKind::Rectangle, count: 60 },
    ItemTemplate { item_type: "Triangle Small", width: 30.0, height: 30.0, shape: ShapeKind::Triangle, count: 30 },
    ItemTemplate { item_type: "Triangle Large", width: 45.0, height: 45.0, shape: ShapeKind::Triangle, count: 20 },
    ItemTemplate { item_type: "Circle Small", width: 30.0, height: 30.0, shape: ShapeKind::Circle, count: 25 },
    ItemTemplate { item_type: "Circle Medium", width: 40.0, height: 40.0, shape: ShapeKind::Circle, count: 15 },
];

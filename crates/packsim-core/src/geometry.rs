//! Bounding-box geometry and the two placement checks.
//!
//! Both checks work on axis-aligned boxes in bin-local coordinates, with
//! the origin at the bin's top-left corner. Shape kind is never consulted:
//! a circle or triangle is validated by its declared bounding rectangle.
//!
//! The checks are pure and independent of the engine so they can be
//! tested on their own. The engine's simulation state runs them fit-first.

use serde::{Deserialize, Serialize};

use crate::bin::BinSpec;
use crate::item::PlacedItem;

/// Axis-aligned rectangle: top-left corner plus size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Bounding-box area, used for utilization regardless of shape.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Describe why this rectangle cannot be a placement, if it can't.
    ///
    /// Positions must be finite; sizes must be finite and strictly
    /// positive. Negative positions are well-formed here: they are
    /// rejected later by [`fits`].
    pub fn malformation(&self) -> Option<String> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Some(format!(
                "position ({}, {}) is not finite",
                self.x, self.y
            ));
        }
        if !(self.width.is_finite() && self.width > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
        {
            return Some(format!(
                "size {}x{} must be finite and positive",
                self.width, self.height
            ));
        }
        None
    }
}

/// Fit check: `rect` lies entirely within `bin`.
///
/// True iff `x >= 0`, `y >= 0`, `x + width <= bin.width` and
/// `y + height <= bin.height`. Any NaN coordinate makes this false.
pub fn fits(rect: &Rect, bin: &BinSpec) -> bool {
    rect.x >= 0.0 && rect.y >= 0.0 && rect.right() <= bin.width && rect.bottom() <= bin.height
}

/// Overlap check for two boxes in the same bin.
///
/// Boxes that only share an edge or a corner do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.right() <= b.x || b.right() <= a.x || a.bottom() <= b.y || b.bottom() <= a.y)
}

/// The first item, in arrival order, whose box overlaps `rect`.
pub fn first_overlap<'a, I>(rect: &Rect, items: I) -> Option<&'a PlacedItem>
where
    I: IntoIterator<Item = &'a PlacedItem>,
{
    items.into_iter().find(|item| overlaps(rect, &item.bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{BinId, ItemId};
    use crate::shape::ShapeKind;
    use proptest::prelude::*;

    fn bin_220() -> BinSpec {
        BinSpec::new(BinId(0), 220.0, 220.0)
    }

    fn item(id: u32, rect: Rect) -> PlacedItem {
        PlacedItem {
            id: ItemId(id),
            item_type: "Rectangle A".into(),
            bin_id: BinId(0),
            bounds: rect,
            shape: ShapeKind::Rectangle,
        }
    }

    // ── fits ─────────────────────────────────────────────────────

    #[test]
    fn fits_inside_and_flush_with_edges() {
        let bin = bin_220();
        assert!(fits(&Rect::new(0.0, 0.0, 50.0, 50.0), &bin));
        assert!(fits(&Rect::new(170.0, 170.0, 50.0, 50.0), &bin));
        assert!(fits(&Rect::new(0.0, 0.0, 220.0, 220.0), &bin));
    }

    #[test]
    fn does_not_fit_past_right_or_bottom_edge() {
        let bin = bin_220();
        assert!(!fits(&Rect::new(200.0, 0.0, 50.0, 50.0), &bin));
        assert!(!fits(&Rect::new(0.0, 171.0, 50.0, 50.0), &bin));
    }

    #[test]
    fn does_not_fit_at_negative_position() {
        let bin = bin_220();
        assert!(!fits(&Rect::new(-1.0, 0.0, 10.0, 10.0), &bin));
        assert!(!fits(&Rect::new(0.0, -0.5, 10.0, 10.0), &bin));
    }

    #[test]
    fn nan_never_fits() {
        let bin = bin_220();
        assert!(!fits(&Rect::new(f64::NAN, 0.0, 10.0, 10.0), &bin));
        assert!(!fits(&Rect::new(0.0, 0.0, f64::NAN, 10.0), &bin));
    }

    // ── overlaps ─────────────────────────────────────────────────

    #[test]
    fn overlapping_boxes_detected() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(25.0, 25.0, 50.0, 50.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        assert!(!overlaps(&a, &Rect::new(50.0, 0.0, 50.0, 50.0)));
        assert!(!overlaps(&a, &Rect::new(0.0, 50.0, 50.0, 50.0)));
        assert!(!overlaps(&a, &Rect::new(50.0, 50.0, 10.0, 10.0)));
    }

    #[test]
    fn containment_counts_as_overlap() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn first_overlap_reports_earliest_item() {
        let items = vec![
            item(1, Rect::new(0.0, 0.0, 50.0, 50.0)),
            item(2, Rect::new(60.0, 0.0, 50.0, 50.0)),
            item(3, Rect::new(40.0, 0.0, 30.0, 30.0)),
        ];
        let candidate = Rect::new(45.0, 10.0, 20.0, 20.0);
        let hit = first_overlap(&candidate, &items).unwrap();
        assert_eq!(hit.id, ItemId(1));

        let clear = Rect::new(0.0, 100.0, 20.0, 20.0);
        assert!(first_overlap(&clear, &items).is_none());
    }

    // ── malformation ─────────────────────────────────────────────

    #[test]
    fn malformation_flags_bad_sizes() {
        assert!(Rect::new(0.0, 0.0, 10.0, 10.0).malformation().is_none());
        assert!(Rect::new(-5.0, 0.0, 10.0, 10.0).malformation().is_none());
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).malformation().is_some());
        assert!(Rect::new(0.0, 0.0, 10.0, -1.0).malformation().is_some());
        assert!(Rect::new(f64::INFINITY, 0.0, 1.0, 1.0).malformation().is_some());
        assert!(Rect::new(0.0, 0.0, f64::NAN, 1.0).malformation().is_some());
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (0.0f64..200.0, 0.0f64..200.0, 1.0f64..80.0, 1.0f64..80.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn a_box_overlaps_itself(a in arb_rect()) {
            prop_assert!(overlaps(&a, &a));
        }

        #[test]
        fn fitting_boxes_stay_in_bounds(a in arb_rect()) {
            let bin = bin_220();
            if fits(&a, &bin) {
                prop_assert!(a.x >= 0.0 && a.y >= 0.0);
                prop_assert!(a.right() <= bin.width && a.bottom() <= bin.height);
            }
        }
    }
}

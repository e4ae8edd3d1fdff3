//! Ready-made placement plans.

use packsim_core::{BinSpec, PlacementRecord, Rect};

use crate::fixtures::{record, shaped_record, ITEM_CATALOGUE};

/// Bin 0: A placed, B overlaps A, C placed beside A.
pub fn overlap_scenario() -> Vec<PlacementRecord> {
    vec![
        record(1, 0, 0.0, 0.0, 50.0, 50.0),
        record(2, 0, 25.0, 25.0, 50.0, 50.0),
        record(3, 0, 60.0, 0.0, 50.0, 50.0),
    ]
}

/// Two placements at the same spot in bin 3; the first one enqueued
/// wins.
pub fn order_sensitive_pair() -> [PlacementRecord; 2] {
    [
        record(10, 3, 0.0, 0.0, 100.0, 100.0),
        record(11, 3, 50.0, 50.0, 100.0, 100.0),
    ]
}

/// Fill each bin row by row with catalogue items, without overlaps.
///
/// Item ids start at `first_id` and are consecutive. Stops after `limit`
/// records or when every bin is full.
pub fn grid_plan(bins: &[BinSpec], first_id: u32, limit: usize) -> Vec<PlacementRecord> {
    let mut plan = Vec::new();
    let mut next_id = first_id;
    let mut kinds = ITEM_CATALOGUE.iter().cycle();

    for bin in bins {
        let (mut x, mut y, mut row_height) = (0.0_f64, 0.0_f64, 0.0_f64);
        while plan.len() < limit {
            let Some(kind) = kinds.next() else { break };
            if x + kind.width > bin.width {
                x = 0.0;
                y += row_height;
                row_height = 0.0;
            }
            if y + kind.height > bin.height {
                break;
            }
            plan.push(shaped_record(
                next_id,
                bin.id.0,
                Rect::new(x, y, kind.width, kind.height),
                kind.shape,
                kind.item_type,
            ));
            next_id += 1;
            x += kind.width;
            row_height = row_height.max(kind.height);
        }
    }
    plan
}

/// A plan document in the optimizer's output format.
///
/// Step 2 overlaps step 1 and step 4 targets a bin that does not exist.
pub const SAMPLE_PLAN_JSON: &str = r#"{
  "fitness": 812.5,
  "packed_value": 600.0,
  "unplaced_items": 1,
  "plan": [
    { "step": 1, "item_id": 0, "item_type": "Rectangle A", "bin_id": 0,
      "x": 0, "y": 0, "width": 50, "height": 50, "shape": "RECTANGLE" },
    { "step": 2, "item_id": 1, "item_type": "Rectangle B", "bin_id": 0,
      "x": 25, "y": 25, "width": 35, "height": 45, "shape": "RECTANGLE" },
    { "step": 3, "item_id": 2, "item_type": "Circle Small", "bin_id": 1,
      "x": 0, "y": 0, "width": 30, "height": 30, "shape": "CIRCLE" },
    { "step": 4, "item_id": 3, "item_type": "Triangle Small", "bin_id": 7,
      "x": 0, "y": 0, "width": 30, "height": 30, "shape": "TRIANGLE" },
    { "step": 5, "item_id": 4, "item_type": "Triangle Large", "bin_id": 2,
      "x": 100, "y": 100, "width": 45, "height": 45, "shape": "TRIANGLE" }
  ],
  "bins": [
    { "bin_id": 0, "utilization": 5.2, "items_count": 1 },
    { "bin_id": 1, "utilization": 2.5, "items_count": 1 },
    { "bin_id": 2, "utilization": 5.6, "items_count": 1 },
    { "bin_id": 3, "utilization": 0.0, "items_count": 0 }
  ]
}"#;

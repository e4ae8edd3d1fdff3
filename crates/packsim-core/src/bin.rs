//! Bin specifications.

use serde::{Deserialize, Serialize};

use crate::id::BinId;

/// Identity and dimensions of one bin.
///
/// Fixed for the lifetime of an engine; only the items inside a bin
/// change.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BinSpec {
    /// Unique bin id.
    pub id: BinId,
    /// Interior width.
    pub width: f64,
    /// Interior height.
    pub height: f64,
}

impl BinSpec {
    /// Create a bin specification.
    pub fn new(id: BinId, width: f64, height: f64) -> Self {
        Self { id, width, height }
    }

    /// Interior area (`width * height`).
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// The four bins of the optimizer's default run: 220x220, 180x200,
/// 200x180 and 160x160 with ids 0 to 3.
pub fn standard_bins() -> Vec<BinSpec> {
    vec![
        BinSpec::new(BinId(0), 220.0, 220.0),
        BinSpec::new(BinId(1), 180.0, 200.0),
        BinSpec::new(BinId(2), 200.0, 180.0),
        BinSpec::new(BinId(3), 160.0, 160.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_bins_are_distinct_and_ordered() {
        let bins = standard_bins();
        let ids: Vec<u32> = bins.iter().map(|b| b.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(bins[0].area(), 48_400.0);
        assert_eq!(bins[3], BinSpec::new(BinId(3), 160.0, 160.0));
    }
}

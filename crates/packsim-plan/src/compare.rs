//! Cross-checks optimizer-reported utilization against a simulation.

use std::fmt;

use packsim_core::{BinId, SimulationStats};

use crate::document::ReportedBin;

/// A bin whose reported and simulated utilization disagree.
#[derive(Clone, Debug, PartialEq)]
pub struct UtilizationDrift {
    /// Which bin.
    pub bin_id: BinId,
    /// Optimizer's value, if it reported this bin.
    pub reported: Option<f64>,
    /// Simulated value, if the simulation has this bin.
    pub simulated: Option<f64>,
}

impl UtilizationDrift {
    /// Absolute difference in percentage points, when both sides exist.
    pub fn delta(&self) -> Option<f64> {
        Some((self.reported? - self.simulated?).abs())
    }
}

impl fmt::Display for UtilizationDrift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.reported, self.simulated) {
            (Some(r), Some(s)) => write!(
                f,
                "bin {}: reported {r:.1}%, simulated {s:.1}%",
                self.bin_id
            ),
            (Some(r), None) => write!(
                f,
                "bin {}: reported {r:.1}% but not simulated",
                self.bin_id
            ),
            (None, Some(s)) => write!(
                f,
                "bin {}: simulated {s:.1}% but not reported",
                self.bin_id
            ),
            (None, None) => write!(f, "bin {}: no data", self.bin_id),
        }
    }
}

/// Bins whose utilization differs by more than `tolerance` percentage
/// points, plus bins present on only one side.
///
/// Reported bins come first in reported order, then simulated-only bins
/// in simulation order.
pub fn compare_utilization(
    reported: &[ReportedBin],
    simulated: &SimulationStats,
    tolerance: f64,
) -> Vec<UtilizationDrift> {
    let mut drifts = Vec::new();

    for bin in reported {
        let sim = simulated.bin(bin.bin_id).map(|b| b.utilization);
        let drift = UtilizationDrift {
            bin_id: bin.bin_id,
            reported: Some(bin.utilization),
            simulated: sim,
        };
        if drift.delta().is_none_or(|d| d > tolerance) {
            drifts.push(drift);
        }
    }

    for bin in &simulated.bins {
        if !reported.iter().any(|r| r.bin_id == bin.bin_id) {
            drifts.push(UtilizationDrift {
                bin_id: bin.bin_id,
                reported: None,
                simulated: Some(bin.utilization),
            });
        }
    }

    if !drifts.is_empty() {
        log::warn!("{} bins drift from reported utilization", drifts.len());
    }
    drifts
}

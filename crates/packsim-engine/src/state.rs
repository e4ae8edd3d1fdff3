//! Authoritative simulation state: bins and the items placed in them.
//!
//! [`SimulationState`] is owned by exactly one thread of control, the
//! dispatch thread in [`Engine`](crate::engine::Engine) or the caller's
//! thread in [`LockstepSimulation`](crate::lockstep::LockstepSimulation).
//! It is plain data with no interior locking; the single-writer rule is
//! enforced by ownership.

use indexmap::IndexMap;
use log::debug;

use packsim_core::geometry::{first_overlap, fits};
use packsim_core::{
    BinId, BinSnapshot, BinSpec, Command, Outcome, PlacedItem, PlacementRecord, RejectReason,
    Rejection, SimulationStats, StateSnapshot,
};

use crate::config::{ConfigError, EngineConfig};

/// One bin and its items, in arrival order.
#[derive(Clone, Debug)]
pub struct BinState {
    spec: BinSpec,
    items: Vec<PlacedItem>,
}

impl BinState {
    /// Identity and dimensions.
    pub fn spec(&self) -> &BinSpec {
        &self.spec
    }

    /// Items in arrival order.
    pub fn items(&self) -> &[PlacedItem] {
        &self.items
    }
}

/// All bins and their placed items.
///
/// Every successful mutation bumps [`generation()`](Self::generation).
/// Rejections never mutate.
#[derive(Clone, Debug)]
pub struct SimulationState {
    bins: IndexMap<BinId, BinState>,
    generation: u64,
}

impl SimulationState {
    /// Build empty bins from a configuration.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bins = config
            .bins
            .iter()
            .map(|spec| {
                (
                    spec.id,
                    BinState {
                        spec: *spec,
                        items: Vec::new(),
                    },
                )
            })
            .collect();
        Ok(Self {
            bins,
            generation: 0,
        })
    }

    /// Apply any command and produce its outcome.
    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::Place(record) => self.apply_placement(record),
            Command::Reset => self.reset(),
            Command::QueryStats => Outcome::Stats(self.stats()),
            Command::Snapshot => Outcome::Snapshot(self.snapshot()),
        }
    }

    /// Validate a placement and append it to its bin.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// well-formedness, bin existence, fit, then overlap. An item that
    /// neither fits nor overlaps is therefore always reported as not
    /// fitting.
    pub fn apply_placement(&mut self, record: PlacementRecord) -> Outcome {
        let item_id = record.item_id;
        let bin_id = record.bin_id;
        let reject = move |reason| {
            Outcome::Rejected(Rejection {
                bin_id,
                item_id,
                reason,
            })
        };

        if let Some(detail) = record.bounds.malformation() {
            return reject(RejectReason::Malformed { detail });
        }
        let Some(bin) = self.bins.get_mut(&record.bin_id) else {
            return reject(RejectReason::BinNotFound);
        };
        if !fits(&record.bounds, &bin.spec) {
            return reject(RejectReason::DoesNotFit);
        }
        if let Some(existing) = first_overlap(&record.bounds, &bin.items) {
            return reject(RejectReason::Overlaps { other: existing.id });
        }

        bin.items.push(PlacedItem::from(record));
        self.generation += 1;
        debug!("placed item {item_id} in bin {bin_id} (generation {})", self.generation);
        Outcome::Placed { item_id, bin_id }
    }

    /// Clear every bin. Identities and dimensions are preserved.
    pub fn reset(&mut self) -> Outcome {
        for bin in self.bins.values_mut() {
            bin.items.clear();
        }
        self.generation += 1;
        debug!("reset all bins (generation {})", self.generation);
        Outcome::Reset
    }

    /// Owned copy of every bin at this instant.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            bins: self
                .bins
                .values()
                .map(|b| BinSnapshot {
                    spec: b.spec,
                    items: b.items.clone(),
                })
                .collect(),
            generation: self.generation,
        }
    }

    /// Statistics derived from a fresh snapshot.
    pub fn stats(&self) -> SimulationStats {
        SimulationStats::from_snapshot(&self.snapshot())
    }

    /// Look up a bin.
    pub fn bin(&self, id: BinId) -> Option<&BinState> {
        self.bins.get(&id)
    }

    /// Bins in configuration order.
    pub fn bins(&self) -> impl Iterator<Item = &BinState> {
        self.bins.values()
    }

    /// Items across all bins.
    pub fn total_items(&self) -> usize {
        self.bins.values().map(|b| b.items.len()).sum()
    }

    /// Successful mutations applied so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

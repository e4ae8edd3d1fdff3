//! Lockstep (synchronous) simulation.
//!
//! [`LockstepSimulation`] applies commands on the caller's thread with
//! the same validation and ordering rules as the threaded
//! [`Engine`](crate::engine::Engine), without a channel or a dispatch
//! thread. Useful for tests and for embedding in code that already
//! serializes access.
//!
//! # Ownership model
//!
//! Mutating methods take `&mut self`, so the borrow checker gives the
//! single-writer guarantee that the threaded engine gets from its
//! channel.

use std::time::Instant;

use packsim_core::{Command, Outcome, PlacementRecord, SimulationStats, StateSnapshot};

use crate::config::{ConfigError, EngineConfig};
use crate::dispatch::apply_recorded;
use crate::metrics::{DispatchCounters, DispatchMetrics};
use crate::sink::{CommandSink, PendingOutcome, SubmitError};
use crate::state::SimulationState;

// Compile-time assertion: LockstepSimulation can move between threads.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<LockstepSimulation>();
    }
};

/// Single-threaded placement simulation.
pub struct LockstepSimulation {
    state: SimulationState,
    counters: DispatchCounters,
}

impl LockstepSimulation {
    /// Validate `config` and build an empty simulation.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            state: SimulationState::new(config)?,
            counters: DispatchCounters::new(),
        })
    }

    /// Apply one command immediately.
    pub fn execute(&mut self, command: Command) -> Outcome {
        let start = Instant::now();
        let outcome = apply_recorded(&mut self.state, &self.counters, command);
        // Every call is a drain of one.
        self.counters.record_drain(1, start.elapsed());
        outcome
    }

    /// Validate and place one item.
    pub fn place(&mut self, record: PlacementRecord) -> Outcome {
        self.execute(Command::Place(record))
    }

    /// Clear every bin.
    pub fn reset(&mut self) {
        self.execute(Command::Reset);
    }

    /// Current statistics.
    pub fn stats(&self) -> SimulationStats {
        self.state.stats()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> StateSnapshot {
        self.state.snapshot()
    }

    /// Direct read access to the state.
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Counters for commands applied through [`execute`](Self::execute).
    pub fn metrics(&self) -> DispatchMetrics {
        self.counters.snapshot()
    }

    /// Consume the simulation and return its state.
    pub fn into_state(self) -> SimulationState {
        self.state
    }
}

impl CommandSink for LockstepSimulation {
    fn submit(&mut self, command: Command) -> Result<PendingOutcome, SubmitError> {
        Ok(PendingOutcome::ready(self.execute(command)))
    }
}

impl std::fmt::Debug for LockstepSimulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockstepSimulation")
            .field("generation", &self.state.generation())
            .field("total_items", &self.state.total_items())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packsim_core::{BinId, ItemId, Rect, ShapeKind};

    fn record(item: u32, bin: u32, x: f64, y: f64) -> PlacementRecord {
        PlacementRecord {
            item_id: ItemId(item),
            bin_id: BinId(bin),
            bounds: Rect::new(x, y, 50.0, 50.0),
            shape: ShapeKind::Triangle,
            item_type: "Triangle".to_string(),
        }
    }

    #[test]
    fn place_and_query() {
        let mut sim = LockstepSimulation::new(&EngineConfig::standard()).unwrap();
        assert!(sim.place(record(1, 0, 0.0, 0.0)).is_placed());
        let rejected = sim.place(record(2, 0, 25.0, 25.0));
        assert_eq!(
            rejected.rejection().unwrap().to_string(),
            "item 2 overlaps with existing item 1"
        );
        assert_eq!(sim.stats().total_items, 1);

        let m = sim.metrics();
        assert_eq!(m.placements_accepted, 1);
        assert_eq!(m.placements_rejected, 1);
    }

    #[test]
    fn reset_clears_and_counts() {
        let mut sim = LockstepSimulation::new(&EngineConfig::standard()).unwrap();
        sim.place(record(1, 3, 0.0, 0.0));
        sim.reset();
        assert_eq!(sim.snapshot().total_items(), 0);
        assert_eq!(sim.metrics().resets, 1);
    }

    #[test]
    fn each_call_is_a_timed_drain_of_one() {
        let mut sim = LockstepSimulation::new(&EngineConfig::standard()).unwrap();
        for i in 0..50 {
            sim.place(record(i, 0, f64::from(i % 4) * 50.0, f64::from(i / 4) * 50.0));
        }
        let m = sim.metrics();
        assert_eq!(m.drain_cycles, 50);
        assert_eq!(m.max_drain_len, 1);
        assert_eq!(m.commands_applied, 50);
        // Fifty overlap scans cannot all take longer than a second.
        assert!(m.last_drain_us < 1_000_000);
    }

    #[test]
    fn sink_trait_matches_direct_calls() {
        let mut sim = LockstepSimulation::new(&EngineConfig::standard()).unwrap();
        let sink: &mut dyn CommandSink = &mut sim;
        assert!(sink.place(record(1, 1, 0.0, 0.0)).unwrap().is_placed());
        assert_eq!(sink.stats().unwrap().total_items, 1);
        sink.reset().unwrap();
        assert_eq!(sink.snapshot().unwrap().total_items(), 0);
    }
}

//! Dispatch counters for the simulation engine.
//!
//! [`DispatchCounters`] is written by the state owner and read from any
//! thread through atomics. [`DispatchMetrics`] is a plain copy taken at
//! one point in time.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use packsim_core::Outcome;

/// Counters describing the dispatch loop's work so far.
///
/// Counters accumulate over the engine's lifetime; a `Reset` command
/// clears bins, not metrics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchMetrics {
    /// Commands of every kind applied.
    pub commands_applied: u64,
    /// Placements accepted into a bin.
    pub placements_accepted: u64,
    /// Placements rejected by validation.
    pub placements_rejected: u64,
    /// Reset commands applied.
    pub resets: u64,
    /// Stats and snapshot queries answered.
    pub queries: u64,
    /// Idle-to-draining transitions.
    pub drain_cycles: u64,
    /// Most commands applied in a single drain.
    pub max_drain_len: u64,
    /// Wall-clock time of the most recent drain, in microseconds.
    pub last_drain_us: u64,
}

/// Lock-free counters shared between the state owner and observers.
#[derive(Debug, Default)]
pub struct DispatchCounters {
    commands_applied: AtomicU64,
    placements_accepted: AtomicU64,
    placements_rejected: AtomicU64,
    resets: AtomicU64,
    queries: AtomicU64,
    drain_cycles: AtomicU64,
    max_drain_len: AtomicU64,
    last_drain_us: AtomicU64,
}

impl DispatchCounters {
    /// Fresh, zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one applied command by its outcome.
    pub fn record_outcome(&self, outcome: &Outcome) {
        self.commands_applied.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            Outcome::Placed { .. } => &self.placements_accepted,
            Outcome::Rejected(_) => &self.placements_rejected,
            Outcome::Reset => &self.resets,
            Outcome::Stats(_) | Outcome::Snapshot(_) => &self.queries,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one completed drain of `len` commands.
    pub fn record_drain(&self, len: u64, elapsed: Duration) {
        self.drain_cycles.fetch_add(1, Ordering::Relaxed);
        self.max_drain_len.fetch_max(len, Ordering::Relaxed);
        let us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.last_drain_us.store(us, Ordering::Relaxed);
    }

    /// Copy the current values.
    pub fn snapshot(&self) -> DispatchMetrics {
        DispatchMetrics {
            commands_applied: self.commands_applied.load(Ordering::Relaxed),
            placements_accepted: self.placements_accepted.load(Ordering::Relaxed),
            placements_rejected: self.placements_rejected.load(Ordering::Relaxed),
            resets: self.resets.load(Ordering::Relaxed),
            queries: self.queries.load(Ordering::Relaxed),
            drain_cycles: self.drain_cycles.load(Ordering::Relaxed),
            max_drain_len: self.max_drain_len.load(Ordering::Relaxed),
            last_drain_us: self.last_drain_us.load(Ordering::Relaxed),
        }
    }
}

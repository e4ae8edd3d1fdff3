//! User-facing threaded [`Engine`] and its cloneable [`CommandSender`].
//!
//! # Architecture
//!
//! ```text
//! Producer thread(s)                       Dispatch thread
//!     |                                          |
//!     |--submit(cmd)---------------------------->| rx.recv() / try_recv()
//!     |   [unbounded Envelope channel]           | state.apply(cmd)
//!     |<--outcome via bounded(1) reply-----------| counters.record_outcome()
//!     |                                          |
//!     |--shutdown()----------------------------->| drain, then exit
//!     |<--SimulationState via JoinHandle---------|
//! ```

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::Sender;

use packsim_core::{BinSpec, Command, Outcome, PlacementRecord, SimulationStats, StateSnapshot};

use crate::config::{ConfigError, EngineConfig};
use crate::dispatch::{DispatchLoop, Envelope};
use crate::metrics::{DispatchCounters, DispatchMetrics};
use crate::sink::{
    expect_reset, expect_snapshot, expect_stats, CommandSink, PendingOutcome, SubmitError,
};
use crate::state::SimulationState;

// ── ShutdownReport ───────────────────────────────────────────────

/// Report from [`Engine::shutdown`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Time spent draining the queue and joining the dispatch thread.
    pub total_ms: u64,
    /// Whether the dispatch thread was joined and its state recovered.
    pub dispatch_joined: bool,
    /// Commands applied over the engine's lifetime.
    pub commands_applied: u64,
}

// ── CommandSender ────────────────────────────────────────────────

/// Cloneable producer handle. Send one to each thread that submits
/// commands.
///
/// Each sender preserves the order of its own commands. Commands from
/// different senders interleave in enqueue order.
#[derive(Clone, Debug)]
pub struct CommandSender {
    tx: Sender<Envelope>,
}

impl CommandSender {
    /// Enqueue a command. Never blocks.
    pub fn submit(&self, command: Command) -> Result<PendingOutcome, SubmitError> {
        let (reply, reply_rx) = crossbeam_channel::bounded(1);
        self.tx
            .send(Envelope::Command { command, reply })
            .map_err(|_| SubmitError::Shutdown)?;
        Ok(PendingOutcome::new(reply_rx))
    }

    /// Submit and wait.
    pub fn execute(&self, command: Command) -> Result<Outcome, SubmitError> {
        self.submit(command)?.wait()
    }

    /// Place one item and wait for the verdict.
    pub fn place(&self, record: PlacementRecord) -> Result<Outcome, SubmitError> {
        self.execute(Command::Place(record))
    }

    /// Clear every bin.
    pub fn reset(&self) -> Result<(), SubmitError> {
        expect_reset(self.execute(Command::Reset)?)
    }

    /// Statistics for the state as of this command's turn in the queue.
    pub fn stats(&self) -> Result<SimulationStats, SubmitError> {
        expect_stats(self.execute(Command::QueryStats)?)
    }

    /// A copy of the state as of this command's turn in the queue.
    pub fn snapshot(&self) -> Result<StateSnapshot, SubmitError> {
        expect_snapshot(self.execute(Command::Snapshot)?)
    }
}

impl CommandSink for CommandSender {
    fn submit(&mut self, command: Command) -> Result<PendingOutcome, SubmitError> {
        CommandSender::submit(self, command)
    }
}

// ── Engine ───────────────────────────────────────────────────────

/// Threaded placement simulation.
///
/// Owns the dispatch thread. The simulation state lives on that thread
/// and is reachable only through commands.
///
/// # Examples
///
/// ```
/// use packsim_core::{BinId, ItemId, PlacementRecord, Rect, ShapeKind};
/// use packsim_engine::{Engine, EngineConfig};
///
/// let mut engine = Engine::new(EngineConfig::standard()).unwrap();
/// let outcome = engine
///     .place(PlacementRecord {
///         item_id: ItemId(1),
///         bin_id: BinId(0),
///         bounds: Rect::new(0.0, 0.0, 50.0, 50.0),
///         shape: ShapeKind::Rectangle,
///         item_type: "Rectangle A".into(),
///     })
///     .unwrap();
/// assert!(outcome.is_placed());
///
/// let report = engine.shutdown();
/// assert!(report.dispatch_joined);
/// assert_eq!(engine.recovered_state().unwrap().total_items(), 1);
/// ```
pub struct Engine {
    sender: Option<CommandSender>,
    dispatch_thread: Option<JoinHandle<SimulationState>>,
    counters: Arc<DispatchCounters>,
    /// Recovered from the dispatch thread on shutdown.
    recovered_state: Option<SimulationState>,
    bins: Vec<BinSpec>,
    thread_name: String,
}

impl Engine {
    /// Validate `config`, build the state and spawn the dispatch thread.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        let state = SimulationState::new(&config)?;
        let counters = Arc::new(DispatchCounters::new());
        let mut engine = Self {
            sender: None,
            dispatch_thread: None,
            counters,
            recovered_state: None,
            bins: config.bins,
            thread_name: config.thread_name,
        };
        engine.spawn_dispatch(state)?;
        log::info!(
            "engine started with {} bins on thread '{}'",
            engine.bins.len(),
            engine.thread_name
        );
        Ok(engine)
    }

    fn spawn_dispatch(&mut self, state: SimulationState) -> Result<(), ConfigError> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let counters = Arc::clone(&self.counters);
        let handle = thread::Builder::new()
            .name(self.thread_name.clone())
            .spawn(move || DispatchLoop::new(state, rx, counters).run())
            .map_err(|e| ConfigError::ThreadSpawnFailed {
                reason: e.to_string(),
            })?;
        self.sender = Some(CommandSender { tx });
        self.dispatch_thread = Some(handle);
        Ok(())
    }

    fn live_sender(&self) -> Result<&CommandSender, SubmitError> {
        self.sender.as_ref().ok_or(SubmitError::Shutdown)
    }

    /// Enqueue a command without waiting.
    pub fn submit(&self, command: Command) -> Result<PendingOutcome, SubmitError> {
        self.live_sender()?.submit(command)
    }

    /// Place one item and wait for the verdict.
    pub fn place(&self, record: PlacementRecord) -> Result<Outcome, SubmitError> {
        self.live_sender()?.place(record)
    }

    /// Clear every bin.
    pub fn reset(&self) -> Result<(), SubmitError> {
        self.live_sender()?.reset()
    }

    /// Current statistics.
    pub fn stats(&self) -> Result<SimulationStats, SubmitError> {
        self.live_sender()?.stats()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> Result<StateSnapshot, SubmitError> {
        self.live_sender()?.snapshot()
    }

    /// A producer handle for another thread.
    pub fn sender(&self) -> Result<CommandSender, SubmitError> {
        self.live_sender().cloned()
    }

    /// Dispatch counters so far.
    pub fn metrics(&self) -> DispatchMetrics {
        self.counters.snapshot()
    }

    /// Configured bins, in configuration order.
    pub fn bins(&self) -> &[BinSpec] {
        &self.bins
    }

    /// Whether the dispatch thread is accepting commands.
    pub fn is_running(&self) -> bool {
        self.sender.is_some()
    }

    /// Stop the dispatch thread.
    ///
    /// Every command enqueued before this call is applied and answered
    /// first. Commands that outside [`CommandSender`] clones enqueue
    /// afterwards are dropped, and their waiters see
    /// [`SubmitError::Shutdown`]. Calling this again is a no-op.
    pub fn shutdown(&mut self) -> ShutdownReport {
        let start = Instant::now();
        let Some(sender) = self.sender.take() else {
            return ShutdownReport {
                total_ms: 0,
                dispatch_joined: self.recovered_state.is_some(),
                commands_applied: self.counters.snapshot().commands_applied,
            };
        };

        // The thread may already be gone if it panicked; join reports it.
        let _ = sender.tx.send(Envelope::Shutdown);
        drop(sender);

        let dispatch_joined = match self.dispatch_thread.take().map(JoinHandle::join) {
            Some(Ok(state)) => {
                self.recovered_state = Some(state);
                true
            }
            Some(Err(_)) => {
                log::error!("dispatch thread panicked; final state lost");
                false
            }
            None => false,
        };

        let report = ShutdownReport {
            total_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            dispatch_joined,
            commands_applied: self.counters.snapshot().commands_applied,
        };
        log::info!(
            "engine stopped after {} commands in {}ms",
            report.commands_applied,
            report.total_ms
        );
        report
    }

    /// The final state, once [`shutdown`](Self::shutdown) has run.
    pub fn recovered_state(&self) -> Option<&SimulationState> {
        self.recovered_state.as_ref()
    }

    /// Stop the dispatch thread if needed, then start a fresh one that
    /// continues from the recovered state.
    ///
    /// Existing [`CommandSender`]s are disconnected; take new ones with
    /// [`sender`](Self::sender). Metrics keep accumulating.
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        if self.is_running() {
            self.shutdown();
        }
        let state = self
            .recovered_state
            .take()
            .ok_or(ConfigError::StateRecoveryFailed)?;
        self.spawn_dispatch(state)?;
        log::info!("engine restarted on thread '{}'", self.thread_name);
        Ok(())
    }
}

impl CommandSink for Engine {
    fn submit(&mut self, command: Command) -> Result<PendingOutcome, SubmitError> {
        Engine::submit(self, command)
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if self.is_running() {
            self.shutdown();
        }
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("bins", &self.bins)
            .field("thread_name", &self.thread_name)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

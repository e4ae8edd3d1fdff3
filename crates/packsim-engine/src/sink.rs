//! The producer-side contract: submit a command, then wait for its outcome.
//!
//! # Cancellation
//!
//! Commands are not cancelable once submitted. A producer may stop
//! waiting (for example after [`PendingOutcome::wait_timeout`] returns
//! [`SubmitError::Timeout`]), but the state owner still applies the
//! command unless the engine shuts down first.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};

use packsim_core::{Command, Outcome, PlacementRecord, SimulationStats, StateSnapshot};

// ── SubmitError ──────────────────────────────────────────────────

/// Failure to deliver a command or receive its outcome.
///
/// Validation rejections are not errors; they arrive as
/// [`Outcome::Rejected`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitError {
    /// The state owner has shut down; the command was not (or may not
    /// have been) applied.
    Shutdown,
    /// No outcome arrived within the caller's timeout. The command is
    /// still queued and will be applied.
    Timeout,
    /// The state owner answered with an outcome of the wrong kind.
    UnexpectedOutcome {
        /// Kind of command that was sent.
        command: &'static str,
    },
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shutdown => write!(f, "simulation engine has shut down"),
            Self::Timeout => write!(f, "timed out waiting for command outcome"),
            Self::UnexpectedOutcome { command } => {
                write!(f, "unexpected outcome for '{command}' command")
            }
        }
    }
}

impl std::error::Error for SubmitError {}

// ── PendingOutcome ───────────────────────────────────────────────

/// The not-yet-known outcome of a submitted command.
#[derive(Debug)]
pub struct PendingOutcome {
    reply: Receiver<Outcome>,
}

impl PendingOutcome {
    pub(crate) fn new(reply: Receiver<Outcome>) -> Self {
        Self { reply }
    }

    /// An outcome that is already known, for synchronous sinks.
    pub(crate) fn ready(outcome: Outcome) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(1);
        // Capacity 1 and a live receiver: cannot fail.
        let _ = tx.send(outcome);
        Self { reply: rx }
    }

    /// Block until the command has been applied.
    pub fn wait(self) -> Result<Outcome, SubmitError> {
        self.reply.recv().map_err(|_| SubmitError::Shutdown)
    }

    /// Block for at most `timeout`.
    ///
    /// On [`SubmitError::Timeout`] the command stays queued. The caller
    /// may wait again or drop this handle.
    pub fn wait_timeout(&self, timeout: Duration) -> Result<Outcome, SubmitError> {
        self.reply.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => SubmitError::Timeout,
            RecvTimeoutError::Disconnected => SubmitError::Shutdown,
        })
    }

    /// The outcome, if it has already arrived.
    pub fn try_outcome(&self) -> Option<Outcome> {
        self.reply.try_recv().ok()
    }
}

// ── CommandSink ──────────────────────────────────────────────────

/// Anything that accepts commands for a simulation state.
///
/// Implemented by the threaded [`Engine`](crate::engine::Engine), its
/// cloneable [`CommandSender`](crate::engine::CommandSender), and the
/// synchronous [`LockstepSimulation`](crate::lockstep::LockstepSimulation).
pub trait CommandSink {
    /// Enqueue a command without waiting for it to be applied.
    fn submit(&mut self, command: Command) -> Result<PendingOutcome, SubmitError>;

    /// Submit and wait for the outcome.
    fn execute(&mut self, command: Command) -> Result<Outcome, SubmitError> {
        self.submit(command)?.wait()
    }

    /// Place one item.
    fn place(&mut self, record: PlacementRecord) -> Result<Outcome, SubmitError> {
        self.execute(Command::Place(record))
    }

    /// Clear every bin.
    fn reset(&mut self) -> Result<(), SubmitError> {
        expect_reset(self.execute(Command::Reset)?)
    }

    /// Statistics for the current state.
    fn stats(&mut self) -> Result<SimulationStats, SubmitError> {
        expect_stats(self.execute(Command::QueryStats)?)
    }

    /// A copy of the current state.
    fn snapshot(&mut self) -> Result<StateSnapshot, SubmitError> {
        expect_snapshot(self.execute(Command::Snapshot)?)
    }
}

pub(crate) fn expect_reset(outcome: Outcome) -> Result<(), SubmitError> {
    match outcome {
        Outcome::Reset => Ok(()),
        _ => Err(SubmitError::UnexpectedOutcome { command: "reset" }),
    }
}

pub(crate) fn expect_stats(outcome: Outcome) -> Result<SimulationStats, SubmitError> {
    match outcome {
        Outcome::Stats(stats) => Ok(stats),
        _ => Err(SubmitError::UnexpectedOutcome {
            command: "query_stats",
        }),
    }
}

pub(crate) fn expect_snapshot(outcome: Outcome) -> Result<StateSnapshot, SubmitError> {
    match outcome {
        Outcome::Snapshot(snap) => Ok(snap),
        _ => Err(SubmitError::UnexpectedOutcome {
            command: "snapshot",
        }),
    }
}

//! The state owner's loop: receive, drain, apply, reply.
//!
//! The dispatch thread owns [`SimulationState`] exclusively (moved in
//! via `thread::Builder::spawn`). Producers never touch the state; they
//! send an [`Envelope`] over an unbounded crossbeam channel and get the
//! outcome back on a per-command `bounded(1)` reply channel.
//!
//! ```text
//!            recv() blocks
//!   ┌──────┐ ───────────────▶ ┌──────────┐
//!   │ Idle │                  │ Draining │ ── try_recv() until empty
//!   └──────┘ ◀─────────────── └──────────┘
//!            queue empty
//! ```
//!
//! Shutdown is an envelope like any other, so every command enqueued
//! before it is applied and answered first.

use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use packsim_core::{Command, Outcome};

use crate::metrics::DispatchCounters;
use crate::state::SimulationState;

/// One message on the command channel.
pub(crate) enum Envelope {
    /// A command and where to send its outcome.
    Command {
        command: Command,
        reply: Sender<Outcome>,
    },
    /// Stop after everything queued ahead of this has been applied.
    Shutdown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoopState {
    Idle,
    Draining,
}

/// What the loop should do after handling one envelope.
enum Flow {
    Continue,
    Stop,
}

/// State held by the dispatch thread.
pub(crate) struct DispatchLoop {
    state: SimulationState,
    rx: Receiver<Envelope>,
    counters: Arc<DispatchCounters>,
}

impl DispatchLoop {
    pub fn new(
        state: SimulationState,
        rx: Receiver<Envelope>,
        counters: Arc<DispatchCounters>,
    ) -> Self {
        Self {
            state,
            rx,
            counters,
        }
    }

    /// Run until a shutdown envelope arrives or every sender is gone.
    ///
    /// Consumes self and returns the state so the engine can recover it
    /// through the `JoinHandle`.
    pub fn run(mut self) -> SimulationState {
        let mut loop_state = LoopState::Idle;
        let mut drain_start = Instant::now();
        let mut drained: u64 = 0;

        loop {
            match loop_state {
                LoopState::Idle => {
                    let Ok(envelope) = self.rx.recv() else {
                        log::debug!("command channel disconnected; dispatch loop exiting");
                        break;
                    };
                    loop_state = LoopState::Draining;
                    drain_start = Instant::now();
                    drained = 0;
                    if let Flow::Stop = self.handle(envelope, &mut drained) {
                        self.finish_drain(drained, drain_start);
                        break;
                    }
                }
                LoopState::Draining => match self.rx.try_recv() {
                    Ok(envelope) => {
                        if let Flow::Stop = self.handle(envelope, &mut drained) {
                            self.finish_drain(drained, drain_start);
                            break;
                        }
                    }
                    Err(TryRecvError::Empty) => {
                        self.finish_drain(drained, drain_start);
                        loop_state = LoopState::Idle;
                    }
                    Err(TryRecvError::Disconnected) => {
                        self.finish_drain(drained, drain_start);
                        log::debug!("command channel disconnected while draining");
                        break;
                    }
                },
            }
        }

        log::debug!(
            "dispatch loop stopped at generation {} with {} items",
            self.state.generation(),
            self.state.total_items()
        );
        self.state
    }

    fn handle(&mut self, envelope: Envelope, drained: &mut u64) -> Flow {
        match envelope {
            Envelope::Command { command, reply } => {
                let outcome = apply_recorded(&mut self.state, &self.counters, command);
                *drained += 1;
                // The producer may have stopped waiting. The command
                // still counts as applied.
                if reply.send(outcome).is_err() {
                    log::trace!("outcome dropped: producer no longer waiting");
                }
                Flow::Continue
            }
            Envelope::Shutdown => {
                log::debug!("shutdown envelope received");
                Flow::Stop
            }
        }
    }

    fn finish_drain(&self, drained: u64, started: Instant) {
        if drained == 0 {
            return;
        }
        let elapsed = started.elapsed();
        self.counters.record_drain(drained, elapsed);
        log::trace!("drained {drained} commands in {elapsed:?}");
    }
}

/// Apply one command and count it.
///
/// Shared by the dispatch thread and the lockstep simulation so both
/// report identical metrics.
pub(crate) fn apply_recorded(
    state: &mut SimulationState,
    counters: &DispatchCounters,
    command: Command,
) -> Outcome {
    let outcome = state.apply(command);
    counters.record_outcome(&outcome);
    outcome
}

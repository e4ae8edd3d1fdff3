//! Placement simulation engine for packsim.
//!
//! A single dispatch thread owns the [`SimulationState`]. Producers on any
//! thread submit [`Command`](packsim_core::Command)s through an
//! [`Engine`] or a cloned [`CommandSender`] and wait on a
//! [`PendingOutcome`]. Commands apply strictly in enqueue order, so
//! validation of each placement sees every placement enqueued before it.
//!
//! [`LockstepSimulation`] runs the same state machine on the caller's
//! thread, and [`PlanRunner`] replays an optimizer's placement plan
//! against either mode through the [`CommandSink`] trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub(crate) mod dispatch;
pub mod engine;
pub mod lockstep;
pub mod metrics;
pub mod runner;
pub mod sink;
pub mod state;

pub use config::{ConfigError, EngineConfig, DEFAULT_DISPATCH_THREAD_NAME};
pub use engine::{CommandSender, Engine, ShutdownReport};
pub use lockstep::LockstepSimulation;
pub use metrics::{DispatchCounters, DispatchMetrics};
pub use runner::{PlanRunner, RunReport, RunnerConfig, StepReport, StepResult, DEFAULT_PACING};
pub use sink::{CommandSink, PendingOutcome, SubmitError};
pub use state::{BinState, SimulationState};

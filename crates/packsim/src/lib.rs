//! packsim: a placement simulation engine for 2D bin-packing plans.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the packsim sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use packsim::prelude::*;
//!
//! let mut engine = Engine::new(EngineConfig::standard()).unwrap();
//! let plan = PlanDocument::from_json_str(r#"{ "plan": [
//!     { "step": 1, "item_id": 1, "item_type": "Rectangle A", "bin_id": 0,
//!       "x": 0, "y": 0, "width": 50, "height": 50, "shape": "RECTANGLE" },
//!     { "step": 2, "item_id": 2, "item_type": "Rectangle A", "bin_id": 0,
//!       "x": 25, "y": 25, "width": 50, "height": 50, "shape": "RECTANGLE" }
//! ] }"#).unwrap();
//!
//! let report = PlanRunner::new(RunnerConfig::immediate())
//!     .run(&mut engine, plan.into_records())
//!     .unwrap();
//! assert_eq!(report.placed, 1);
//! assert_eq!(report.rejected, 1);
//! engine.shutdown();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `packsim-core` | Ids, bins, records, geometry, commands, statistics |
//! | [`engine`] | `packsim-engine` | Threaded and lockstep engines, plan runner |
//! | [`plan`] | `packsim-plan` | JSON plan and bin-configuration parsing |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, geometry checks, and statistics (`packsim-core`).
pub use packsim_core as types;

/// Simulation engines and the plan runner (`packsim-engine`).
///
/// [`engine::Engine`] owns a dispatch thread;
/// [`engine::LockstepSimulation`] applies commands on the caller's thread.
pub use packsim_engine as engine;

/// Plan documents (`packsim-plan`).
pub use packsim_plan as plan;

/// Common imports for typical packsim usage.
pub mod prelude {
    pub use packsim_core::{
        BinId, BinSpec, Command, ItemId, Outcome, PlacementRecord, Rect, Rejection, ShapeKind,
        SimulationStats, StateSnapshot,
    };

    pub use packsim_engine::{
        CommandSender, CommandSink, ConfigError, Engine, EngineConfig, LockstepSimulation,
        PlanRunner, RunReport, RunnerConfig, SubmitError,
    };

    pub use packsim_plan::{PlanDocument, PlanError};
}

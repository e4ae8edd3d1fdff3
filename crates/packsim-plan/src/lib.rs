//! Placement-plan documents for packsim.
//!
//! An optimizer emits a JSON plan: ordered placement steps plus optional
//! summary data. This crate parses that document once, at the boundary,
//! into typed [`PlacementRecord`](packsim_core::PlacementRecord)s. Every
//! required field is checked here, so nothing downstream re-checks field
//! presence.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod document;
pub mod error;

pub use compare::{compare_utilization, UtilizationDrift};
pub use document::{parse_bin_specs, PlanDocument, PlanSummary, ReportedBin};
pub use error::PlanError;

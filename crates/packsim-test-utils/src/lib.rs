//! Test fixtures and plan builders for packsim development.
//!
//! Provides the standard bin layout, the optimizer's item catalogue, a
//! terse [`record`] constructor, and ready-made plans for the scenarios
//! the engine tests exercise.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod plans;

pub use fixtures::{record, shaped_record, standard_bins, ItemTemplate, ITEM_CATALOGUE};
pub use plans::{grid_plan, overlap_scenario, order_sensitive_pair, SAMPLE_PLAN_JSON};

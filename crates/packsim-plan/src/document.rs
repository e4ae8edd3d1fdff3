//! The optimizer's plan document and bin-configuration document.
//!
//! Deserialization happens in two passes. Serde reads the JSON into raw
//! structs whose step fields are all optional. [`PlanDocument`] then
//! checks each step once and produces typed records, reporting the first
//! missing field or unknown shape by step number.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use packsim_core::{BinId, BinSpec, ItemId, PlacementRecord, Rect, ShapeKind, ShapeParseError};

use crate::error::PlanError;

#[derive(Deserialize)]
struct RawPlanDocument {
    fitness: Option<f64>,
    packed_value: Option<f64>,
    unplaced_items: Option<u64>,
    plan: Vec<RawStep>,
    #[serde(default)]
    bins: Vec<ReportedBin>,
}

#[derive(Deserialize)]
struct RawStep {
    step: Option<usize>,
    item_id: Option<i64>,
    item_type: Option<String>,
    bin_id: Option<i64>,
    x: Option<f64>,
    y: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    shape: Option<String>,
}

impl RawStep {
    fn into_record(self, position: usize) -> Result<PlacementRecord, PlanError> {
        let step = self.step.unwrap_or(position);
        let missing = |field: &'static str| PlanError::MissingField { step, field };
        let id = |field: &'static str, value: Option<i64>| -> Result<u32, PlanError> {
            let value = value.ok_or_else(|| missing(field))?;
            u32::try_from(value).map_err(|_| PlanError::IdOutOfRange { step, field, value })
        };

        let shape: ShapeKind = self
            .shape
            .ok_or_else(|| missing("shape"))?
            .parse()
            .map_err(|e: ShapeParseError| PlanError::UnknownShape {
                step,
                value: e.value,
            })?;

        Ok(PlacementRecord {
            item_id: ItemId(id("item_id", self.item_id)?),
            bin_id: BinId(id("bin_id", self.bin_id)?),
            bounds: Rect::new(
                self.x.ok_or_else(|| missing("x"))?,
                self.y.ok_or_else(|| missing("y"))?,
                self.width.ok_or_else(|| missing("width"))?,
                self.height.ok_or_else(|| missing("height"))?,
            ),
            shape,
            item_type: self.item_type.ok_or_else(|| missing("item_type"))?,
        })
    }
}

/// The optimizer's own view of one bin after packing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportedBin {
    /// Which bin.
    pub bin_id: BinId,
    /// Utilization percentage the optimizer computed.
    pub utilization: f64,
    /// Items the optimizer packed into this bin.
    #[serde(default)]
    pub items_count: usize,
}

/// Optimizer summary values. All optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Objective value of the plan.
    pub fitness: Option<f64>,
    /// Total value of the packed items.
    pub packed_value: Option<f64>,
    /// Items the optimizer could not place.
    pub unplaced_items: Option<u64>,
}

/// A parsed and checked placement plan.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanDocument {
    summary: PlanSummary,
    records: Vec<PlacementRecord>,
    reported_bins: Vec<ReportedBin>,
}

impl PlanDocument {
    /// Parse a plan from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, PlanError> {
        Self::from_raw(serde_json::from_str(json)?)
    }

    /// Parse a plan from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PlanError> {
        Self::from_raw(serde_json::from_reader(reader)?)
    }

    /// Read and parse a plan file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        let path = path.as_ref();
        log::debug!("reading plan from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    fn from_raw(raw: RawPlanDocument) -> Result<Self, PlanError> {
        let records = raw
            .plan
            .into_iter()
            .enumerate()
            .map(|(i, step)| step.into_record(i + 1))
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "parsed plan with {} steps and {} reported bins",
            records.len(),
            raw.bins.len()
        );
        Ok(Self {
            summary: PlanSummary {
                fitness: raw.fitness,
                packed_value: raw.packed_value,
                unplaced_items: raw.unplaced_items,
            },
            records,
            reported_bins: raw.bins,
        })
    }

    /// Placement records in plan order.
    pub fn records(&self) -> &[PlacementRecord] {
        &self.records
    }

    /// Take the placement records, dropping the summary data.
    pub fn into_records(self) -> Vec<PlacementRecord> {
        self.records
    }

    /// Optimizer summary values.
    pub fn summary(&self) -> &PlanSummary {
        &self.summary
    }

    /// Per-bin utilization as the optimizer reported it.
    pub fn reported_bins(&self) -> &[ReportedBin] {
        &self.reported_bins
    }

    /// Number of placement steps.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the plan has no steps.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse a bin configuration: `[{"id": 0, "width": 220, "height": 220}, ...]`.
///
/// Dimensions are not checked here; engine configuration validation does
/// that.
pub fn parse_bin_specs(json: &str) -> Result<Vec<BinSpec>, PlanError> {
    Ok(serde_json::from_str(json)?)
}

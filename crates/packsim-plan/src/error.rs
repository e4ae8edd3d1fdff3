//! Errors raised while reading plan and bin documents.

use std::error::Error;
use std::fmt;
use std::io;

/// A plan or bin document could not be turned into typed records.
#[derive(Debug)]
pub enum PlanError {
    /// A required step field is absent (or `null`).
    MissingField {
        /// 1-based step number, taken from the step's `step` field when
        /// present and its position otherwise.
        step: usize,
        /// Name of the missing field.
        field: &'static str,
    },
    /// A step names a shape that is not rectangle, circle or triangle.
    UnknownShape {
        /// 1-based step number.
        step: usize,
        /// The unrecognized value.
        value: String,
    },
    /// An item or bin id does not fit the engine's unsigned 32-bit ids.
    IdOutOfRange {
        /// 1-based step number.
        step: usize,
        /// `item_id` or `bin_id`.
        field: &'static str,
        /// The value as written in the document.
        value: i64,
    },
    /// The document is not valid JSON of the expected structure.
    Json(serde_json::Error),
    /// The document could not be read.
    Io(io::Error),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { step, field } => {
                write!(f, "plan step {step} is missing required field '{field}'")
            }
            Self::UnknownShape { step, value } => {
                write!(f, "plan step {step} has unknown shape '{value}'")
            }
            Self::IdOutOfRange { step, field, value } => write!(
                f,
                "plan step {step} has {field} {value} outside the supported range 0..={}",
                u32::MAX
            ),
            Self::Json(e) => write!(f, "invalid plan document: {e}"),
            Self::Io(e) => write!(f, "failed to read plan document: {e}"),
        }
    }
}

impl Error for PlanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<io::Error> for PlanError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

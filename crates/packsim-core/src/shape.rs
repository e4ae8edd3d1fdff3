//! Shape kinds carried by placement records.
//!
//! The shape only affects how an item is drawn. Collision and utilization
//! always use the item's bounding rectangle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShapeParseError;

/// The display shape of a placed item.
///
/// Wire names are upper case (`RECTANGLE`, `CIRCLE`, `TRIANGLE`), as
/// emitted by the optimizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShapeKind {
    /// Axis-aligned rectangle filling its bounding box.
    Rectangle,
    /// Circle inscribed in its bounding box.
    Circle,
    /// Triangle with its base on the bottom edge of its bounding box.
    Triangle,
}

impl ShapeKind {
    /// All shape kinds, in wire order.
    pub const ALL: [ShapeKind; 3] = [Self::Rectangle, Self::Circle, Self::Triangle];

    /// The upper-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "RECTANGLE",
            Self::Circle => "CIRCLE",
            Self::Triangle => "TRIANGLE",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeParseError;

    /// Parses a wire name. Matching ignores ASCII case and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ShapeParseError {
                value: s.to_string(),
            })
    }
}

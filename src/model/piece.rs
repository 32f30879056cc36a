//! FlatPiece - A single physical cut to place on a bar.

use serde::{Deserialize, Serialize};

/// One cut produced by expanding a requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatPiece {
    /// `{requirement}_{unit}`, with an `_s{segment}` suffix for splice segments.
    pub id: String,
    /// Cut length in meters.
    pub length: f64,
    /// Bar diameter in millimetres.
    pub diameter: u32,
    /// Cut list label.
    pub label: String,
}

impl FlatPiece {
    /// Create a new flat piece.
    pub fn new(
        id: impl Into<String>,
        length: f64,
        diameter: u32,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            length,
            diameter,
            label: label.into(),
        }
    }
}

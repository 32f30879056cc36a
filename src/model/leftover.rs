//! LeftoverStock - Reusable offcut carried between elements.

use serde::{Deserialize, Serialize};

/// An offcut left over from an earlier element, available for reuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeftoverStock {
    /// Identifier, unique within a project run.
    pub id: String,
    /// Length in meters.
    pub length: f64,
    /// Bar diameter in millimetres.
    pub diameter: u32,
    /// Where the offcut came from, for cut lists.
    pub origin: String,
    /// Whether a later element already consumed it.
    #[serde(default)]
    pub used: bool,
}

impl LeftoverStock {
    /// Create an unused leftover.
    pub fn new(
        id: impl Into<String>,
        length: f64,
        diameter: u32,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            length,
            diameter,
            origin: origin.into(),
            used: false,
        }
    }
}

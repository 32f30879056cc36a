//! PieceRequirement - One line of a rebar takeoff.

use serde::{Deserialize, Serialize};

use crate::config::{float_cmp, DEFAULT_FOLD_LENGTH};

fn default_fold_length() -> f64 {
    DEFAULT_FOLD_LENGTH
}

/// A required bar shape: `quantity` identical pieces of one diameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceRequirement {
    /// Requirement identifier, unique within an element.
    pub id: String,
    /// Straight length in meters, excluding folds.
    pub length: f64,
    /// Bar diameter in millimetres.
    pub diameter: u32,
    /// Number of identical pieces.
    pub quantity: u32,
    /// Free text shown on cut lists.
    #[serde(default)]
    pub label: String,
    /// Number of folds (hooks), normally 0, 1 or 2.
    #[serde(default)]
    pub fold_count: u8,
    /// Length added by each fold, in meters.
    #[serde(default = "default_fold_length")]
    pub fold_length: f64,
}

impl PieceRequirement {
    /// Create a straight requirement without folds.
    pub fn new(
        id: impl Into<String>,
        length: f64,
        diameter: u32,
        quantity: u32,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            length,
            diameter,
            quantity,
            label: label.into(),
            fold_count: 0,
            fold_length: DEFAULT_FOLD_LENGTH,
        }
    }

    /// Set the fold count, keeping the current fold length.
    pub fn with_folds(mut self, fold_count: u8) -> Self {
        self.fold_count = fold_count;
        self
    }

    /// Cut length including folds, on the millimetre grid.
    pub fn effective_length(&self) -> f64 {
        float_cmp::round_mm(self.length + f64::from(self.fold_count) * self.fold_length)
    }

    /// Whether this requirement produces any piece at all.
    pub fn is_valid(&self) -> bool {
        self.length.is_finite()
            && self.length > 0.0
            && self.quantity > 0
            && self.has_valid_fold_length()
            && self.effective_length() > 0.0
    }

    /// Fold length is finite and not negative.
    pub fn has_valid_fold_length(&self) -> bool {
        self.fold_length.is_finite() && self.fold_length >= 0.0
    }

    /// Label annotated with the fold count.
    pub fn display_label(&self) -> String {
        match self.fold_count {
            0 => self.label.clone(),
            1 => format!("{} (+1 fold)", self.label),
            n => format!("{} (+{} folds)", self.label, n),
        }
    }
}

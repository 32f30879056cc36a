//! StockBar - A physical bar with the cuts assigned to it.

use serde::{Deserialize, Serialize};

use super::FlatPiece;
use crate::config::float_cmp;

/// Where a bar comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BarSource {
    /// Bought new at a standard stock length.
    Purchased,
    /// An offcut reused from an earlier element.
    Leftover {
        /// Id of the reused [`LeftoverStock`](super::LeftoverStock).
        leftover_id: String,
    },
}

/// One piece placed on a bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutAssignment {
    /// Id of the placed [`FlatPiece`].
    pub piece_id: String,
    /// Cut length in meters.
    pub length: f64,
    /// Cut list label.
    pub label: String,
    /// Bar diameter in millimetres.
    pub diameter: u32,
}

impl From<&FlatPiece> for CutAssignment {
    fn from(piece: &FlatPiece) -> Self {
        Self {
            piece_id: piece.id.clone(),
            length: piece.length,
            label: piece.label.clone(),
            diameter: piece.diameter,
        }
    }
}

/// A purchased or reused bar and its cutting pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockBar {
    /// Sequential id within its source kind, starting at 1.
    pub id: usize,
    /// Purchased or leftover-backed.
    pub source: BarSource,
    /// Length of the bar before cutting, in meters.
    pub nominal_length: f64,
    /// Cuts in placement order.
    pub cuts: Vec<CutAssignment>,
    /// Unused length, in meters.
    pub slack: f64,
}

impl StockBar {
    /// Open an empty purchased bar.
    pub fn purchased(id: usize, nominal_length: f64) -> Self {
        Self {
            id,
            source: BarSource::Purchased,
            nominal_length,
            cuts: Vec::new(),
            slack: nominal_length,
        }
    }

    /// Open an empty bar backed by a leftover.
    pub fn from_leftover(id: usize, leftover_id: impl Into<String>, nominal_length: f64) -> Self {
        Self {
            id,
            source: BarSource::Leftover {
                leftover_id: leftover_id.into(),
            },
            nominal_length,
            cuts: Vec::new(),
            slack: nominal_length,
        }
    }

    /// Check if this bar was bought new.
    pub fn is_purchased(&self) -> bool {
        self.source == BarSource::Purchased
    }

    /// Check if a piece fits into the remaining slack.
    pub fn can_fit(&self, length: f64) -> bool {
        float_cmp::fits(length, self.slack)
    }

    /// Append a cut and shrink the slack.
    ///
    /// The caller must have checked [`StockBar::can_fit`].
    pub fn place(&mut self, piece: &FlatPiece) {
        debug_assert!(self.can_fit(piece.length));
        self.cuts.push(CutAssignment::from(piece));
        self.slack = float_cmp::round_mm(self.slack - piece.length).max(0.0);
    }

    /// Total length of all cuts.
    pub fn used_length(&self) -> f64 {
        float_cmp::round_mm(self.cuts.iter().map(|c| c.length).sum())
    }

    /// Cut labels joined for display.
    pub fn labels(&self) -> String {
        self.cuts
            .iter()
            .map(|c| c.label.as_str())
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_reduces_slack() {
        let mut bar = StockBar::purchased(1, 12.0);
        bar.place(&FlatPiece::new("a_1", 5.0, 12, "A"));
        bar.place(&FlatPiece::new("a_2", 5.0, 12, "A"));
        assert_eq!(bar.slack, 2.0);
        assert_eq!(bar.used_length(), 10.0);
        assert!(!bar.can_fit(5.0));
        assert!(bar.can_fit(2.0));
        assert_eq!(bar.labels(), "A + A");
    }

    #[test]
    fn test_source_kinds() {
        assert!(StockBar::purchased(1, 6.0).is_purchased());
        let reused = StockBar::from_leftover(1, "s_12_1", 3.0);
        assert!(!reused.is_purchased());
        assert_eq!(
            reused.source,
            BarSource::Leftover {
                leftover_id: "s_12_1".to_string()
            }
        );
    }

    #[test]
    fn test_exact_fit_leaves_zero_slack() {
        let mut bar = StockBar::purchased(1, 6.0);
        bar.place(&FlatPiece::new("a_1", 3.3, 8, "A"));
        bar.place(&FlatPiece::new("a_2", 2.7, 8, "A"));
        assert_eq!(bar.slack, 0.0);
    }
}

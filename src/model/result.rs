//! Optimization results per diameter and per structural element.

use serde::{Deserialize, Serialize};

use super::{LeftoverStock, StockBar};

/// Cutting plan and metrics for one diameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiameterResult {
    /// Bar diameter in millimetres.
    pub diameter: u32,
    /// Leftover-backed bars first, then purchased bars.
    pub bars: Vec<StockBar>,
    /// Number of purchased bars.
    pub bar_count: usize,
    /// Number of cuts placed.
    pub piece_count: usize,
    /// Total length of all cuts.
    pub meters_used: f64,
    /// Total nominal length of purchased bars.
    pub meters_purchased: f64,
    /// Length of cuts placed on reused leftovers.
    pub meters_from_leftovers: f64,
    /// Purchased length not turned into cuts.
    pub meters_wasted: f64,
    /// `meters_wasted` as a percentage of `meters_purchased`.
    pub waste_percent: f64,
    /// Mass of all cuts.
    pub weight_kg: f64,
}

impl DiameterResult {
    /// Purchased bars only.
    pub fn purchased_bars(&self) -> impl Iterator<Item = &StockBar> {
        self.bars.iter().filter(|b| b.is_purchased())
    }

    /// Leftover-backed bars only.
    pub fn leftover_bars(&self) -> impl Iterator<Item = &StockBar> {
        self.bars.iter().filter(|b| !b.is_purchased())
    }
}

/// Complete result of optimizing one structural element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementResult {
    /// Per-diameter plans, ascending by diameter.
    pub diameters: Vec<DiameterResult>,
    /// Sum of per-diameter weights.
    pub total_weight_kg: f64,
    /// Sum of per-diameter waste.
    pub total_waste_m: f64,
    /// Offered leftovers that received at least one cut.
    pub leftovers_consumed: Vec<LeftoverStock>,
    /// Offcuts this element makes available to later elements.
    pub leftovers_produced: Vec<LeftoverStock>,
    /// Estimated purchased bars avoided through reuse.
    pub bars_saved: usize,
}

impl ElementResult {
    /// Number of purchased bars across all diameters.
    pub fn purchased_bar_count(&self) -> usize {
        self.diameters.iter().map(|d| d.bar_count).sum()
    }

    /// Total purchased length across all diameters.
    pub fn meters_purchased(&self) -> f64 {
        crate::config::float_cmp::round_mm(self.diameters.iter().map(|d| d.meters_purchased).sum())
    }

    /// Result for one diameter, if any piece used it.
    pub fn diameter(&self, diameter: u32) -> Option<&DiameterResult> {
        self.diameters.iter().find(|d| d.diameter == diameter)
    }

    /// Check if the element required no cuts.
    pub fn is_empty(&self) -> bool {
        self.diameters.is_empty()
    }
}

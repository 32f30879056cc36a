//! Configuration constants and optimizer settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{OptimizeError, Result};

/// Floating-point comparison epsilon, in meters.
pub const EPS: f64 = 0.0001;

/// Offcuts shorter than this (meters) are scrap and never offered for reuse.
pub const MIN_LEFTOVER_LENGTH: f64 = 0.20;

/// Default length of a single fold (hook) in meters.
pub const DEFAULT_FOLD_LENGTH: f64 = 0.15;

/// Splice overlap used for diameters missing from the overlap table.
pub const DEFAULT_SPLICE_OVERLAP: f64 = 0.50;

/// Stock length used when no configuration is supplied.
pub const DEFAULT_STOCK_LENGTH: f64 = 12.0;

/// Nominal mass per linear meter (kg/m) of standard diameters.
pub const STANDARD_WEIGHTS_PER_METER: [(u32, f64); 9] = [
    (6, 0.222),
    (8, 0.395),
    (10, 0.617),
    (12, 0.888),
    (14, 1.21),
    (16, 1.58),
    (20, 2.47),
    (25, 3.85),
    (32, 6.31),
];

/// Lap splice lengths (m) of standard diameters.
pub const STANDARD_SPLICE_OVERLAPS: [(u32, f64); 9] = [
    (6, 0.30),
    (8, 0.35),
    (10, 0.40),
    (12, 0.50),
    (14, 0.55),
    (16, 0.60),
    (20, 0.80),
    (25, 1.00),
    (32, 1.30),
];

/// How the packer picks the length of a freshly opened stock bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewBarPolicy {
    /// Open the shortest stock length that holds the piece.
    #[default]
    SmallestFit,
    /// Open the longest stock length, then re-pack lightly loaded bars into
    /// the shortest length where that buys less steel.
    LargestThenDowngrade,
}

/// Settings for one optimization run.
///
/// Diameter-keyed tables fall back to [`DEFAULT_SPLICE_OVERLAP`] and a zero
/// weight for diameters they don't list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Stock bar lengths available for purchase, in meters.
    pub stock_lengths: Vec<f64>,
    /// Splice overlap per diameter (mm → m).
    pub splice_overlaps: BTreeMap<u32, f64>,
    /// Mass per meter per diameter (mm → kg/m).
    pub weights_per_meter: BTreeMap<u32, f64>,
    /// Stock length choice for new bars.
    pub new_bar_policy: NewBarPolicy,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            stock_lengths: vec![DEFAULT_STOCK_LENGTH],
            splice_overlaps: STANDARD_SPLICE_OVERLAPS.into_iter().collect(),
            weights_per_meter: STANDARD_WEIGHTS_PER_METER.into_iter().collect(),
            new_bar_policy: NewBarPolicy::default(),
        }
    }
}

impl OptimizerConfig {
    /// Create a configuration with the given stock lengths and standard tables.
    pub fn with_stock_lengths(stock_lengths: impl Into<Vec<f64>>) -> Self {
        Self {
            stock_lengths: stock_lengths.into(),
            ..Default::default()
        }
    }

    /// Usable stock lengths: positive, finite, ascending, deduplicated.
    ///
    /// Fails with [`OptimizeError::NoStockLengths`] when nothing usable remains.
    pub fn normalized_stock_lengths(&self) -> Result<Vec<f64>> {
        let mut lengths: Vec<f64> = Vec::with_capacity(self.stock_lengths.len());
        for &length in &self.stock_lengths {
            if length.is_finite() && length > EPS {
                lengths.push(float_cmp::round_mm(length));
            } else {
                tracing::warn!("Ignoring invalid stock length {}", length);
            }
        }

        lengths.sort_by(f64::total_cmp);
        lengths.dedup_by(|a, b| float_cmp::approx_eq(*a, *b));

        if lengths.is_empty() {
            return Err(OptimizeError::NoStockLengths);
        }
        Ok(lengths)
    }

    /// Splice overlap for a diameter.
    pub fn splice_overlap(&self, diameter: u32) -> f64 {
        self.splice_overlaps
            .get(&diameter)
            .copied()
            .unwrap_or(DEFAULT_SPLICE_OVERLAP)
    }

    /// Mass per meter for a diameter, zero when unknown.
    pub fn weight_per_meter(&self, diameter: u32) -> f64 {
        self.weights_per_meter.get(&diameter).copied().unwrap_or(0.0)
    }
}

/// Utility functions for floating-point lengths.
pub mod float_cmp {
    use super::EPS;

    /// Check if two lengths are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if a piece of `length` fits into `capacity`.
    #[inline]
    pub fn fits(length: f64, capacity: f64) -> bool {
        length <= capacity + EPS
    }

    /// Snap a length in meters to the millimetre grid.
    #[inline]
    pub fn round_mm(meters: f64) -> f64 {
        (meters * 1000.0).round() / 1000.0
    }

    /// Round to a fixed number of decimals.
    #[inline]
    pub fn round_to(value: f64, decimals: i32) -> f64 {
        let factor = 10f64.powi(decimals);
        (value * factor).round() / factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_tables() {
        let config = OptimizerConfig::default();
        assert_eq!(config.stock_lengths, vec![12.0]);
        assert_eq!(config.splice_overlap(12), 0.50);
        assert_eq!(config.splice_overlap(25), 1.00);
        assert_eq!(config.weight_per_meter(16), 1.58);
    }

    #[test]
    fn test_unknown_diameter_fallbacks() {
        let config = OptimizerConfig::default();
        assert_eq!(config.splice_overlap(40), DEFAULT_SPLICE_OVERLAP);
        assert_eq!(config.weight_per_meter(40), 0.0);
    }

    #[test]
    fn test_normalized_stock_lengths() {
        let config = OptimizerConfig::with_stock_lengths(vec![12.0, 6.0, -1.0, 12.0, 0.0]);
        assert_eq!(config.normalized_stock_lengths().unwrap(), vec![6.0, 12.0]);
    }

    #[test]
    fn test_no_positive_stock_lengths() {
        let config = OptimizerConfig::with_stock_lengths(vec![0.0, -6.0]);
        assert!(matches!(
            config.normalized_stock_lengths(),
            Err(OptimizeError::NoStockLengths)
        ));

        let empty = OptimizerConfig::with_stock_lengths(Vec::new());
        assert!(empty.normalized_stock_lengths().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: OptimizerConfig =
            serde_json::from_str(r#"{ "stock_lengths": [6, 12] }"#).unwrap();
        assert_eq!(config.stock_lengths, vec![6.0, 12.0]);
        assert_eq!(config.splice_overlap(8), 0.35);
        assert_eq!(config.new_bar_policy, NewBarPolicy::SmallestFit);
    }

    #[test]
    fn test_policy_names() {
        let config: OptimizerConfig =
            serde_json::from_str(r#"{ "new_bar_policy": "largest_then_downgrade" }"#).unwrap();
        assert_eq!(config.new_bar_policy, NewBarPolicy::LargestThenDowngrade);
        assert_eq!(config.stock_lengths, vec![DEFAULT_STOCK_LENGTH]);
    }

    #[test]
    fn test_round_mm() {
        assert_eq!(float_cmp::round_mm(12.0 - 11.5), 0.5);
        assert_eq!(float_cmp::round_mm(0.1 + 0.2), 0.3);
        assert_eq!(float_cmp::round_to(12.345, 1), 12.3);
    }
}

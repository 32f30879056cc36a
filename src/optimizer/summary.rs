//! Per-diameter metrics and leftover bookkeeping.

use crate::config::{float_cmp, OptimizerConfig, EPS, MIN_LEFTOVER_LENGTH};
use crate::model::{DiameterResult, LeftoverStock};

use super::{LeftoverPool, PackedBars};

/// Everything one diameter contributes to an element result.
#[derive(Debug, Clone, Default)]
pub struct DiameterSummary {
    /// Cutting plan and metrics.
    pub result: DiameterResult,
    /// Offcuts available to later elements.
    pub produced: Vec<LeftoverStock>,
    /// Offered leftovers that received cuts, marked as used.
    pub consumed: Vec<LeftoverStock>,
    /// Estimated purchased bars avoided through reuse.
    pub bars_saved: usize,
}

/// Compute metrics and leftover deltas for one packed diameter.
///
/// `reference_length` is the longest configured stock length; reused meters
/// are expressed in bars of that length for `bars_saved`.
pub fn summarize_diameter(
    diameter: u32,
    packed: PackedBars,
    pool: &LeftoverPool,
    config: &OptimizerConfig,
    reference_length: f64,
) -> DiameterSummary {
    let PackedBars {
        purchased,
        from_leftovers,
    } = packed;

    let meters_purchased = float_cmp::round_mm(purchased.iter().map(|b| b.nominal_length).sum());
    let meters_in_purchased = float_cmp::round_mm(purchased.iter().map(|b| b.used_length()).sum());
    let meters_from_leftovers =
        float_cmp::round_mm(from_leftovers.iter().map(|b| b.used_length()).sum());
    let meters_used = float_cmp::round_mm(meters_in_purchased + meters_from_leftovers);

    let meters_wasted =
        float_cmp::round_mm(meters_purchased - (meters_used - meters_from_leftovers)).max(0.0);
    let waste_percent = if meters_purchased > 0.0 {
        float_cmp::round_to(meters_wasted / meters_purchased * 100.0, 1)
    } else {
        0.0
    };
    let weight_kg = float_cmp::round_to(meters_used * config.weight_per_meter(diameter), 2);

    let mut produced = Vec::new();
    let mut next_id = 1usize;
    let mut new_id = || {
        let id = format!("s_{}_{}", diameter, next_id);
        next_id += 1;
        id
    };

    for bar in &purchased {
        if bar.slack + EPS >= MIN_LEFTOVER_LENGTH {
            produced.push(LeftoverStock::new(
                new_id(),
                bar.slack,
                diameter,
                format!("bar #{} {}m ({})", bar.id, bar.nominal_length, bar.labels()),
            ));
        }
    }

    let mut consumed = Vec::new();
    for entry in pool.entries().iter().filter(|e| e.touched) {
        if entry.is_available() {
            produced.push(LeftoverStock::new(
                new_id(),
                entry.remaining,
                diameter,
                format!("offcut of reused leftover ({})", entry.stock.origin),
            ));
        }
        consumed.push(LeftoverStock {
            used: true,
            ..entry.stock.clone()
        });
    }

    let bars_saved = if from_leftovers.is_empty() || reference_length <= 0.0 {
        0
    } else {
        (meters_from_leftovers / reference_length).round() as usize
    };

    let piece_count = purchased
        .iter()
        .chain(from_leftovers.iter())
        .map(|b| b.cuts.len())
        .sum();
    let bar_count = purchased.len();

    let mut bars = from_leftovers;
    bars.extend(purchased);

    DiameterSummary {
        result: DiameterResult {
            diameter,
            bars,
            bar_count,
            piece_count,
            meters_used,
            meters_purchased,
            meters_from_leftovers,
            meters_wasted,
            waste_percent,
            weight_kg,
        },
        produced,
        consumed,
        bars_saved,
    }
}

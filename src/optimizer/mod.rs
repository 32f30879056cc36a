//! Cutting-stock optimization for one structural element.

mod downgrade;
mod expand;
mod packer;
mod pool;
mod summary;

use std::collections::BTreeMap;

pub use downgrade::downgrade_bars;
pub use expand::{expand_pieces, splice_segments};
pub use packer::{best_open_bar, pack_pieces, smallest_fitting_length, PackedBars};
pub use pool::{LeftoverPool, PoolEntry};
pub use summary::{summarize_diameter, DiameterSummary};

use crate::config::{float_cmp, NewBarPolicy, OptimizerConfig};
use crate::error::{OptimizeError, Result};
use crate::model::{ElementResult, FlatPiece, LeftoverStock, PieceRequirement};

/// Optimize the cutting plan for one element.
///
/// Each diameter is packed independently against the configured stock
/// lengths, drawing first on the `leftovers` offered by earlier elements.
/// The inputs are not modified; consumed and newly produced leftovers are
/// reported in the result for the caller to thread into the next element.
///
/// # Errors
///
/// Fails before any packing when the configuration has no positive stock
/// length, or when a splice overlap leaves no usable span on the longest bar.
pub fn optimize(
    requirements: &[PieceRequirement],
    config: &OptimizerConfig,
    leftovers: &[LeftoverStock],
) -> Result<ElementResult> {
    let stock_lengths = config.normalized_stock_lengths()?;
    let Some(&max_length) = stock_lengths.last() else {
        return Err(OptimizeError::NoStockLengths);
    };

    let pieces = expand_pieces(requirements, max_length, config)?;

    let mut by_diameter: BTreeMap<u32, Vec<FlatPiece>> = BTreeMap::new();
    for piece in pieces {
        by_diameter.entry(piece.diameter).or_default().push(piece);
    }

    let mut result = ElementResult::default();

    for (diameter, pieces) in by_diameter {
        let mut pool = LeftoverPool::new(diameter, leftovers);
        let mut packed = pack_pieces(&pieces, &stock_lengths, config.new_bar_policy, &mut pool)?;

        if config.new_bar_policy == NewBarPolicy::LargestThenDowngrade {
            packed.purchased = downgrade_bars(packed.purchased, &stock_lengths);
        }

        let summary = summarize_diameter(diameter, packed, &pool, config, max_length);

        result.total_weight_kg += summary.result.weight_kg;
        result.total_waste_m += summary.result.meters_wasted;
        result.bars_saved += summary.bars_saved;
        result.leftovers_produced.extend(summary.produced);
        result.leftovers_consumed.extend(summary.consumed);
        result.diameters.push(summary.result);
    }

    result.total_weight_kg = float_cmp::round_to(result.total_weight_kg, 2);
    result.total_waste_m = float_cmp::round_mm(result.total_waste_m);

    tracing::debug!(
        "Optimized {} diameter(s): {} purchased bar(s), {} leftover(s) reused, {} produced",
        result.diameters.len(),
        result.purchased_bar_count(),
        result.leftovers_consumed.len(),
        result.leftovers_produced.len()
    );

    Ok(result)
}

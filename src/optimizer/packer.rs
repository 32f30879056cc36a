//! Best-fit decreasing assignment of pieces to leftovers and stock bars.

use crate::config::{float_cmp, NewBarPolicy};
use crate::error::{OptimizeError, Result};
use crate::model::{FlatPiece, StockBar};

use super::LeftoverPool;

/// Bars produced by one packing run.
#[derive(Debug, Clone, Default)]
pub struct PackedBars {
    /// Newly purchased bars, in opening order.
    pub purchased: Vec<StockBar>,
    /// Bars cut from reused leftovers, in first-use order.
    pub from_leftovers: Vec<StockBar>,
}

/// Place every piece of one diameter.
///
/// Pieces are handled longest first (stable for equal lengths). Each one goes
/// to the first tier that can take it:
/// 1. the best-fitting leftover in `pool`;
/// 2. the open purchased bar left with the least slack;
/// 3. a new bar, sized according to `policy`.
///
/// `stock_lengths` must be ascending.
pub fn pack_pieces(
    pieces: &[FlatPiece],
    stock_lengths: &[f64],
    policy: NewBarPolicy,
    pool: &mut LeftoverPool,
) -> Result<PackedBars> {
    let mut order: Vec<&FlatPiece> = pieces.iter().collect();
    order.sort_by(|a, b| b.length.total_cmp(&a.length));

    let mut packed = PackedBars::default();
    // Pool entry index → position in `packed.from_leftovers`.
    let mut leftover_bar_of: Vec<Option<usize>> = vec![None; pool.entries().len()];
    let mut stats = TierStats::default();

    for piece in order {
        if let Some(entry_idx) = pool.try_consume(piece.length) {
            let bar_idx = match leftover_bar_of[entry_idx] {
                Some(bar_idx) => bar_idx,
                None => {
                    let stock = &pool.entry(entry_idx).stock;
                    let bar = StockBar::from_leftover(
                        packed.from_leftovers.len() + 1,
                        stock.id.as_str(),
                        float_cmp::round_mm(stock.length),
                    );
                    packed.from_leftovers.push(bar);
                    leftover_bar_of[entry_idx] = Some(packed.from_leftovers.len() - 1);
                    packed.from_leftovers.len() - 1
                }
            };
            packed.from_leftovers[bar_idx].place(piece);
            stats.leftover += 1;
            continue;
        }

        if let Some(bar_idx) = best_open_bar(&packed.purchased, piece.length) {
            packed.purchased[bar_idx].place(piece);
            stats.open_bar += 1;
            continue;
        }

        let nominal = new_bar_length(stock_lengths, piece.length, policy).ok_or_else(|| {
            OptimizeError::PieceTooLong {
                piece_id: piece.id.clone(),
                length: piece.length,
                max_length: stock_lengths.last().copied().unwrap_or(0.0),
            }
        })?;
        let mut bar = StockBar::purchased(packed.purchased.len() + 1, nominal);
        bar.place(piece);
        packed.purchased.push(bar);
        stats.new_bar += 1;
    }

    tracing::debug!(
        "Diameter {} mm: {} piece(s) on leftovers, {} on open bars, {} opened new bars",
        pool.diameter(),
        stats.leftover,
        stats.open_bar,
        stats.new_bar
    );

    Ok(packed)
}

#[derive(Debug, Default)]
struct TierStats {
    leftover: usize,
    open_bar: usize,
    new_bar: usize,
}

/// Index of the bar whose slack after placing `length` is smallest.
///
/// Ties go to the bar opened first.
pub fn best_open_bar(bars: &[StockBar], length: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, bar) in bars.iter().enumerate() {
        if !bar.can_fit(length) {
            continue;
        }
        let residual = bar.slack - length;
        if best.map_or(true, |(_, r)| residual < r) {
            best = Some((idx, residual));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Nominal length for a new bar holding `length`.
fn new_bar_length(stock_lengths: &[f64], length: f64, policy: NewBarPolicy) -> Option<f64> {
    match policy {
        NewBarPolicy::SmallestFit => smallest_fitting_length(stock_lengths, length),
        NewBarPolicy::LargestThenDowngrade => stock_lengths
            .last()
            .copied()
            .filter(|&nominal| float_cmp::fits(length, nominal)),
    }
}

/// Shortest stock length that holds `length`, from an ascending list.
pub fn smallest_fitting_length(stock_lengths: &[f64], length: f64) -> Option<f64> {
    stock_lengths
        .iter()
        .copied()
        .find(|&nominal| float_cmp::fits(length, nominal))
}

//! Piece expansion: quantities, fold allowances, and splice segments.

use crate::config::{float_cmp, OptimizerConfig, EPS};
use crate::error::{OptimizeError, Result};
use crate::model::{FlatPiece, PieceRequirement};

/// Expand requirements into one flat piece per physical cut.
///
/// Pieces longer than `max_stock_length` are split into overlapping
/// segments. The first `n - 1` segments use the full stock length and the
/// last one carries the remainder plus one overlap, so the spliced bar covers
/// at least the effective length.
///
/// Invalid requirements (non-positive length, quantity or effective length,
/// or a bad fold length) produce nothing.
pub fn expand_pieces(
    requirements: &[PieceRequirement],
    max_stock_length: f64,
    config: &OptimizerConfig,
) -> Result<Vec<FlatPiece>> {
    let mut pieces = Vec::new();

    for req in requirements {
        if !req.is_valid() {
            tracing::debug!(
                "Skipping requirement {} (length {}, quantity {})",
                req.id,
                req.length,
                req.quantity
            );
            continue;
        }

        let length = req.effective_length();
        let label = req.display_label();

        if float_cmp::fits(length, max_stock_length) {
            for unit in 1..=req.quantity {
                pieces.push(FlatPiece::new(
                    format!("{}_{}", req.id, unit),
                    length,
                    req.diameter,
                    label.as_str(),
                ));
            }
            continue;
        }

        let overlap = config.splice_overlap(req.diameter);
        let segments = splice_segments(length, max_stock_length, overlap).ok_or(
            OptimizeError::InvalidSpliceOverlap {
                diameter: req.diameter,
                overlap,
                max_length: max_stock_length,
            },
        )?;
        let count = segments.len();

        for unit in 1..=req.quantity {
            for (idx, &segment) in segments.iter().enumerate() {
                let segment_label = if count > 1 {
                    format!("{} (segment {}/{})", label, idx + 1, count)
                } else {
                    label.clone()
                };
                pieces.push(FlatPiece::new(
                    format!("{}_{}_s{}", req.id, unit, idx + 1),
                    segment,
                    req.diameter,
                    segment_label,
                ));
            }
        }
    }

    Ok(pieces)
}

/// Segment lengths for a spliced piece, or `None` when the overlap leaves no
/// usable span on a stock bar.
pub fn splice_segments(length: f64, max_stock_length: f64, overlap: f64) -> Option<Vec<f64>> {
    let span = float_cmp::round_mm(max_stock_length - overlap);
    if span <= EPS {
        return None;
    }

    // Snap the quotient before ceil so that exact multiples don't gain a segment.
    let count = (float_cmp::round_to(length / span, 6).ceil() as usize).max(1);

    let mut segments = Vec::with_capacity(count);
    let mut remaining = length;
    for _ in 1..count {
        segments.push(max_stock_length);
        remaining = float_cmp::round_mm(remaining - span);
    }
    segments.push(float_cmp::round_mm((remaining + overlap).min(max_stock_length)));

    Some(segments)
}

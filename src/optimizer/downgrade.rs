//! Optional post-pass that moves lightly loaded bars to shorter stock.

use crate::config::{float_cmp, EPS};
use crate::model::{CutAssignment, StockBar};

/// Re-pack purchased bars into the shortest stock length where that buys less steel.
///
/// A bar qualifies when every cut fits the shortest length and the re-packed
/// bars add up to less than its nominal length. Ids are renumbered in order.
pub fn downgrade_bars(bars: Vec<StockBar>, stock_lengths: &[f64]) -> Vec<StockBar> {
    let Some(&shortest) = stock_lengths.first() else {
        return bars;
    };
    if stock_lengths.len() < 2 {
        return bars;
    }

    let mut result: Vec<StockBar> = Vec::with_capacity(bars.len());
    let mut downgraded = 0usize;

    for bar in bars {
        let all_fit = bar.cuts.iter().all(|c| float_cmp::fits(c.length, shortest));
        if all_fit && bar.nominal_length > shortest {
            let repacked = repack(&bar.cuts, shortest);
            let purchased = repacked.len() as f64 * shortest;
            if purchased < bar.nominal_length - EPS {
                downgraded += 1;
                result.extend(repacked);
                continue;
            }
        }
        result.push(bar);
    }

    for (idx, bar) in result.iter_mut().enumerate() {
        bar.id = idx + 1;
    }

    if downgraded > 0 {
        tracing::debug!("Downgraded {} bar(s) to {} m stock", downgraded, shortest);
    }

    result
}

/// Best-fit decreasing of existing cuts into bars of one length.
fn repack(cuts: &[CutAssignment], nominal: f64) -> Vec<StockBar> {
    let mut sorted: Vec<&CutAssignment> = cuts.iter().collect();
    sorted.sort_by(|a, b| b.length.total_cmp(&a.length));

    let mut bars: Vec<StockBar> = Vec::new();
    for cut in sorted {
        let target = super::packer::best_open_bar(&bars, cut.length);
        let bar = match target {
            Some(idx) => &mut bars[idx],
            None => {
                bars.push(StockBar::purchased(0, nominal));
                let last = bars.len() - 1;
                &mut bars[last]
            }
        };
        bar.cuts.push(cut.clone());
        bar.slack = float_cmp::round_mm(bar.slack - cut.length).max(0.0);
    }
    bars
}

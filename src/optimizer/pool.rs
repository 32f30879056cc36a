//! Per-diameter inventory of reusable offcuts.

use crate::config::{float_cmp, EPS, MIN_LEFTOVER_LENGTH};
use crate::model::LeftoverStock;

/// An offered leftover and what is left of it.
#[derive(Debug, Clone)]
pub struct PoolEntry {
    /// The leftover as offered by the caller.
    pub stock: LeftoverStock,
    /// Remaining capacity in meters.
    pub remaining: f64,
    /// Whether at least one piece was cut from it.
    pub touched: bool,
}

impl PoolEntry {
    /// Check if the entry can still be offered.
    pub fn is_available(&self) -> bool {
        self.remaining + EPS >= MIN_LEFTOVER_LENGTH
    }
}

/// Leftovers of one diameter, consumed best-fit.
///
/// Entries keep the caller's order, which breaks ties between equally good fits.
#[derive(Debug, Clone, Default)]
pub struct LeftoverPool {
    diameter: u32,
    entries: Vec<PoolEntry>,
}

impl LeftoverPool {
    /// Build a pool from offered leftovers, keeping unused entries of `diameter`
    /// that are long enough to be worth cutting.
    pub fn new<'a>(diameter: u32, offered: impl IntoIterator<Item = &'a LeftoverStock>) -> Self {
        let entries = offered
            .into_iter()
            .filter(|s| s.diameter == diameter && !s.used)
            .map(|s| PoolEntry {
                stock: s.clone(),
                remaining: float_cmp::round_mm(s.length),
                touched: false,
            })
            .filter(PoolEntry::is_available)
            .collect();

        Self { diameter, entries }
    }

    /// An empty pool; never matches.
    pub fn empty(diameter: u32) -> Self {
        Self {
            diameter,
            entries: Vec::new(),
        }
    }

    /// Diameter served by this pool.
    pub fn diameter(&self) -> u32 {
        self.diameter
    }

    /// Check if the pool has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cut `length` from the leftover that leaves the least residual.
    ///
    /// Returns the entry index, or `None` when no available leftover fits.
    pub fn try_consume(&mut self, length: f64) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;

        for (idx, entry) in self.entries.iter().enumerate() {
            if !entry.is_available() || !float_cmp::fits(length, entry.remaining) {
                continue;
            }
            let residual = entry.remaining - length;
            if best.map_or(true, |(_, r)| residual < r) {
                best = Some((idx, residual));
            }
        }

        let (idx, _) = best?;
        let entry = &mut self.entries[idx];
        entry.remaining = float_cmp::round_mm(entry.remaining - length).max(0.0);
        entry.touched = true;
        Some(idx)
    }

    /// Entry by index, as returned from [`LeftoverPool::try_consume`].
    pub fn entry(&self, idx: usize) -> &PoolEntry {
        &self.entries[idx]
    }

    /// All entries in offer order.
    pub fn entries(&self) -> &[PoolEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leftover(id: &str, length: f64, diameter: u32) -> LeftoverStock {
        LeftoverStock::new(id, length, diameter, "test")
    }

    #[test]
    fn test_filters_diameter_used_and_short() {
        let mut used = leftover("used", 5.0, 12);
        used.used = true;
        let offered = vec![
            leftover("a", 3.0, 12),
            leftover("other", 3.0, 16),
            used,
            leftover("scrap", 0.15, 12),
        ];
        let pool = LeftoverPool::new(12, &offered);

        assert_eq!(pool.entries().len(), 1);
        assert_eq!(pool.entries()[0].stock.id, "a");
    }

    #[test]
    fn test_best_fit_picks_tightest() {
        let offered = vec![
            leftover("long", 6.0, 12),
            leftover("tight", 2.6, 12),
            leftover("short", 1.0, 12),
        ];
        let mut pool = LeftoverPool::new(12, &offered);

        let idx = pool.try_consume(2.5).unwrap();
        assert_eq!(pool.entry(idx).stock.id, "tight");
        assert!(pool.entry(idx).touched);
        // 0.1 m left is below the reuse threshold.
        assert!(!pool.entry(idx).is_available());
    }

    #[test]
    fn test_ties_break_by_offer_order() {
        let offered = vec![leftover("first", 4.0, 10), leftover("second", 4.0, 10)];
        let mut pool = LeftoverPool::new(10, &offered);

        let idx = pool.try_consume(1.0).unwrap();
        assert_eq!(pool.entry(idx).stock.id, "first");
        assert_eq!(pool.entry(idx).remaining, 3.0);
    }

    #[test]
    fn test_exact_fit_consumes_fully() {
        let offered = vec![leftover("a", 3.0, 12)];
        let mut pool = LeftoverPool::new(12, &offered);

        assert_eq!(pool.try_consume(3.0), Some(0));
        assert_eq!(pool.entry(0).remaining, 0.0);
        assert_eq!(pool.try_consume(0.2), None);
    }

    #[test]
    fn test_short_remainder_takes_no_more_pieces() {
        let offered = vec![leftover("a", 2.0, 12)];
        let mut pool = LeftoverPool::new(12, &offered);

        assert_eq!(pool.try_consume(1.85), Some(0));
        assert_eq!(pool.entry(0).remaining, 0.15);

        // 0.1 m would fit physically, but 0.15 m is scrap.
        assert_eq!(pool.try_consume(0.1), None);
        assert_eq!(pool.entry(0).remaining, 0.15);
    }

    #[test]
    fn test_no_fit() {
        let offered = vec![leftover("a", 1.0, 12)];
        let mut pool = LeftoverPool::new(12, &offered);
        assert_eq!(pool.try_consume(1.5), None);
        assert!(!pool.entry(0).touched);

        let mut empty = LeftoverPool::empty(12);
        assert!(empty.is_empty());
        assert_eq!(empty.try_consume(0.5), None);
    }
}

//! One side of the book: the set of price levels for bids or asks.
//!
//! ## Design
//!
//! A single `BTreeMap` keyed by price serves both views the book needs:
//!
//! - **Priority sequence**: ascending price for asks, descending for bids
//! - **Price lookup**: O(log n) access to the level at an exact price
//!
//! Because there is only one structure, the two views always contain the
//! same levels and the sequence never needs re-sorting after an insert.
//! Empty levels are dropped by the book as soon as they drain, so every
//! indexed level holds at least one order.

use std::collections::BTreeMap;

use crate::orderbook::PriceLevel;
use crate::types::Side;

/// Price levels of one side, ordered best-price-first.
#[derive(Debug, Clone)]
pub struct BookSide {
    side: Side,
    levels: BTreeMap<u64, PriceLevel>,
}

impl BookSide {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            levels: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Number of price levels
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Best price: lowest ask or highest bid
    pub fn best_price(&self) -> Option<u64> {
        match self.side {
            Side::Ask => self.levels.keys().next().copied(),
            Side::Bid => self.levels.keys().next_back().copied(),
        }
    }

    /// Level at the best price
    pub fn best_level(&self) -> Option<&PriceLevel> {
        self.best_price().and_then(|price| self.levels.get(&price))
    }

    /// Level at an exact price
    #[inline]
    pub fn level(&self, price: u64) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    #[inline]
    pub fn level_mut(&mut self, price: u64) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    /// Level at `price`, created empty if absent
    pub fn level_or_insert(&mut self, price: u64) -> &mut PriceLevel {
        let side = self.side;
        self.levels
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price, side))
    }

    /// Drop the level at `price` from both views
    pub fn remove_level(&mut self, price: u64) -> Option<PriceLevel> {
        self.levels.remove(&price)
    }

    /// Levels in priority order (best price first)
    pub fn iter(&self) -> impl Iterator<Item = &PriceLevel> + '_ {
        let (ascending, descending) = match self.side {
            Side::Ask => (Some(self.levels.values()), None),
            Side::Bid => (None, Some(self.levels.values().rev())),
        };
        ascending
            .into_iter()
            .flatten()
            .chain(descending.into_iter().flatten())
    }

    /// Prices in priority order
    pub fn prices(&self) -> Vec<u64> {
        self.iter().map(|level| level.price).collect()
    }

    /// Sum of every level's total volume
    ///
    /// `OrderBook::place_limit_order` refuses any order that would push this
    /// past `u64::MAX`, so the sum is exact.
    pub fn total_volume(&self) -> u64 {
        self.levels.values().map(|level| level.total_volume).sum()
    }

    /// Number of resting orders across all levels
    pub fn order_count(&self) -> usize {
        self.levels.values().map(|level| level.order_count).sum()
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

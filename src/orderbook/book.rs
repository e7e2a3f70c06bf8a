//! Limit order book: resting liquidity for one instrument.
//!
//! ## Architecture
//!
//! - **Slab**: Pre-allocated storage for every resting order node
//! - **BookSide**: Price-ordered levels, one per side
//!
//! ## Price Ordering
//!
//! - **Bids** (buy orders): best bid = highest price
//! - **Asks** (sell orders): best ask = lowest price
//!
//! ## Limit Orders
//!
//! A limit order always rests. Placing a bid at or above the best ask does
//! not trade: crossing orders sit in the book until a market order consumes
//! them. Matching only happens through `place_market_order`.

use std::time::{SystemTime, UNIX_EPOCH};

use sha2::{Digest, Sha256};
use slab::Slab;
use tracing::{trace, warn};

use crate::error::OrderBookError;
use crate::orderbook::{BookSide, LevelOrders, OrderHandle, OrderNode};
use crate::types::{Order, Side};

/// Single-instrument limit order book
#[derive(Debug)]
pub struct OrderBook {
    /// Resting order storage
    pub(crate) orders: Slab<OrderNode>,

    pub(crate) bids: BookSide,

    pub(crate) asks: BookSide,

    /// Next id handed out by `new_order`
    next_order_id: u64,

    /// Next match id
    pub(crate) next_match_id: u64,
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBook {
    /// Create a new empty book
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a book with storage pre-allocated for `order_capacity` resting orders
    ///
    /// ```
    /// use lob_core::orderbook::OrderBook;
    ///
    /// let book = OrderBook::with_capacity(100_000);
    /// assert!(book.capacity() >= 100_000);
    /// ```
    pub fn with_capacity(order_capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(order_capacity),
            bids: BookSide::new(Side::Bid),
            asks: BookSide::new(Side::Ask),
            next_order_id: 1,
            next_match_id: 1,
        }
    }

    // ========================================================================
    // Capacity and Size
    // ========================================================================

    #[inline]
    pub fn capacity(&self) -> usize {
        self.orders.capacity()
    }

    /// Number of resting orders on both sides
    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    #[inline]
    pub fn bid_levels(&self) -> usize {
        self.bids.len()
    }

    #[inline]
    pub fn ask_levels(&self) -> usize {
        self.asks.len()
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Create an order with the next order id and the current arrival time
    ///
    /// The order is not placed; hand it to `place_limit_order` or
    /// `place_market_order`.
    pub fn new_order(&mut self, side: Side, size: u64) -> Order {
        let id = self.next_order_id;
        self.next_order_id += 1;
        Order::new(id, side, size, arrival_timestamp())
    }

    /// Rest an order at `price` on its own side
    ///
    /// Creates the price level if none exists. No matching is attempted.
    ///
    /// # Returns
    ///
    /// A handle for later lookup or deletion, `InvalidSize` for a zero-size
    /// order, or `VolumeOverflow` if the side's resting volume would exceed
    /// `u64::MAX`. A rejected order leaves the book unchanged.
    pub fn place_limit_order(
        &mut self,
        price: u64,
        order: Order,
    ) -> Result<OrderHandle, OrderBookError> {
        if order.size == 0 {
            return Err(OrderBookError::InvalidSize);
        }

        let side = order.side();
        let id = order.id;
        let size = order.size;

        // A level never holds more than its side, so this covers both totals
        if self.side(side).total_volume().checked_add(size).is_none() {
            warn!(order_id = id, %side, price, size, "limit order rejected: volume overflow");
            return Err(OrderBookError::VolumeOverflow { side, price, size });
        }

        let key = self.orders.insert(OrderNode::new(order));

        let book_side = match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        if book_side.level(price).is_none() {
            trace!(%side, price, "creating price level");
        }
        book_side
            .level_or_insert(price)
            .add(key, &mut self.orders)?;

        trace!(order_id = id, %side, price, size, "limit order resting");

        Ok(OrderHandle { key, id })
    }

    /// Delete a resting order
    ///
    /// Drops its price level if the order was the last resident.
    ///
    /// # Returns
    ///
    /// The removed order, or `OrderNotFound` if the handle does not name a
    /// resting order (already filled, already deleted, or never placed)
    pub fn delete_order(&mut self, handle: OrderHandle) -> Result<Order, OrderBookError> {
        let not_found = OrderBookError::OrderNotFound {
            key: handle.key,
            order_id: handle.id,
        };

        let (price, side) = self
            .orders
            .get(handle.key)
            .filter(|node| node.matches_handle(handle))
            .and_then(|node| node.level.map(|price| (price, node.order.side())))
            .ok_or_else(|| not_found.clone())?;

        let book_side = match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        };
        let level = book_side.level_mut(price).ok_or_else(|| not_found.clone())?;
        level.remove(handle, &mut self.orders)?;

        if level.is_empty() {
            book_side.remove_level(price);
            trace!(%side, price, "removed empty price level");
        }

        let node = self.orders.try_remove(handle.key).ok_or(not_found)?;
        trace!(order_id = handle.id, %side, price, "order deleted");

        Ok(node.order)
    }

    /// Look up a resting order
    pub fn order(&self, handle: OrderHandle) -> Option<&Order> {
        self.orders
            .get(handle.key)
            .filter(|node| node.matches_handle(handle) && node.level.is_some())
            .map(|node| &node.order)
    }

    /// Resting orders at one price, oldest first
    pub fn level_orders(&self, side: Side, price: u64) -> Option<LevelOrders<'_>> {
        self.side(side)
            .level(price)
            .map(|level| level.orders(&self.orders))
    }

    /// Drop every resting order
    pub fn clear(&mut self) {
        self.orders.clear();
        self.bids.clear();
        self.asks.clear();
    }

    // ========================================================================
    // Sides and Aggregates
    // ========================================================================

    #[inline]
    pub fn bids(&self) -> &BookSide {
        &self.bids
    }

    #[inline]
    pub fn asks(&self) -> &BookSide {
        &self.asks
    }

    pub fn side(&self, side: Side) -> &BookSide {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// Sum of resting bid volume
    pub fn bid_total_volume(&self) -> u64 {
        self.bids.total_volume()
    }

    /// Sum of resting ask volume
    pub fn ask_total_volume(&self) -> u64 {
        self.asks.total_volume()
    }

    /// Highest bid price
    #[inline]
    pub fn best_bid(&self) -> Option<u64> {
        self.bids.best_price()
    }

    /// Lowest ask price
    #[inline]
    pub fn best_ask(&self) -> Option<u64> {
        self.asks.best_price()
    }

    /// best_ask - best_bid
    ///
    /// None if either side is empty or the book is crossed.
    pub fn spread(&self) -> Option<u64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask >= bid => Some(ask - bid),
            _ => None,
        }
    }

    // ========================================================================
    // State Root
    // ========================================================================

    /// SHA-256 over every level and resident order in priority order
    ///
    /// Two books with the same levels, volumes and queued orders produce
    /// the same root.
    pub fn compute_state_root(&self) -> Result<[u8; 32], OrderBookError> {
        let mut hasher = Sha256::new();

        for book_side in [&self.asks, &self.bids] {
            hasher.update([book_side.side().to_u8()]);
            for level in book_side.iter() {
                hasher.update(level.price.to_le_bytes());
                hasher.update(level.total_volume.to_le_bytes());
                for (_, order) in level.orders(&self.orders) {
                    let bytes = ssz_rs::serialize(order)
                        .map_err(|e| OrderBookError::Encoding(format!("{e:?}")))?;
                    hasher.update(&bytes);
                }
            }
        }

        let mut root = [0u8; 32];
        root.copy_from_slice(&hasher.finalize());
        Ok(root)
    }
}

/// Wall-clock arrival time in nanoseconds since the Unix epoch
fn arrival_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ask(id: u64, size: u64) -> Order {
        Order::new(id, Side::Ask, size, id)
    }

    fn bid(id: u64, size: u64) -> Order {
        Order::new(id, Side::Bid, size, id)
    }

    #[test]
    fn test_book_new() {
        let book = OrderBook::new();

        assert!(book.is_empty());
        assert_eq!(book.order_count(), 0);
        assert_eq!(book.bid_levels(), 0);
        assert_eq!(book.ask_levels(), 0);
        assert_eq!(book.bid_total_volume(), 0);
        assert_eq!(book.ask_total_volume(), 0);
        assert!(book.best_bid().is_none());
        assert!(book.best_ask().is_none());
        assert!(book.spread().is_none());
    }

    #[test]
    fn test_new_order_assigns_increasing_ids() {
        let mut book = OrderBook::new();

        let first = book.new_order(Side::Bid, 5);
        let second = book.new_order(Side::Ask, 10);

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.side(), Side::Ask);
        assert_eq!(second.size, 10);
        assert!(second.timestamp >= first.timestamp);
    }

    #[test]
    fn test_place_limit_orders_on_both_sides() {
        let mut book = OrderBook::with_capacity(16);

        book.place_limit_order(9_000, bid(1, 8)).unwrap();
        book.place_limit_order(10_000, bid(2, 5)).unwrap();
        book.place_limit_order(11_000, ask(3, 4)).unwrap();

        assert_eq!(book.order_count(), 3);
        assert_eq!(book.bid_levels(), 2);
        assert_eq!(book.ask_levels(), 1);
        assert_eq!(book.bid_total_volume(), 13);
        assert_eq!(book.ask_total_volume(), 4);
        assert_eq!(book.best_bid(), Some(10_000));
        assert_eq!(book.best_ask(), Some(11_000));
        assert_eq!(book.spread(), Some(1_000));
    }

    #[test]
    fn test_same_price_shares_level_in_arrival_order() {
        let mut book = OrderBook::new();

        book.place_limit_order(5_000, bid(1, 10)).unwrap();
        book.place_limit_order(5_000, bid(2, 1)).unwrap();

        assert_eq!(book.bid_levels(), 1);
        let ids: Vec<u64> = book
            .level_orders(Side::Bid, 5_000)
            .unwrap()
            .map(|(_, order)| order.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(book.bids().level(5_000).unwrap().total_volume, 11);
    }

    #[test]
    fn test_crossing_limit_order_rests_without_matching() {
        let mut book = OrderBook::new();

        book.place_limit_order(10_000, ask(1, 5)).unwrap();
        book.place_limit_order(12_000, bid(2, 5)).unwrap();

        assert_eq!(book.ask_total_volume(), 5);
        assert_eq!(book.bid_total_volume(), 5);
        assert_eq!(book.best_bid(), Some(12_000));
        assert_eq!(book.best_ask(), Some(10_000));
        // Crossed book has no spread
        assert!(book.spread().is_none());
    }

    #[test]
    fn test_zero_size_limit_order_rejected() {
        let mut book = OrderBook::new();

        let err = book.place_limit_order(10_000, ask(1, 0)).unwrap_err();

        assert_eq!(err, OrderBookError::InvalidSize);
        assert!(book.is_empty());
        assert_eq!(book.ask_levels(), 0);
    }

    #[test]
    fn test_volume_overflow_at_one_price_rejected() {
        let mut book = OrderBook::new();

        book.place_limit_order(100, ask(1, 1 << 63)).unwrap();
        let root_before = book.compute_state_root().unwrap();

        let err = book.place_limit_order(100, ask(2, 1 << 63)).unwrap_err();

        assert_eq!(
            err,
            OrderBookError::VolumeOverflow {
                side: Side::Ask,
                price: 100,
                size: 1 << 63
            }
        );
        assert_eq!(book.order_count(), 1);
        assert_eq!(book.ask_levels(), 1);
        assert_eq!(book.ask_total_volume(), 1 << 63);
        assert_eq!(book.compute_state_root().unwrap(), root_before);

        // The resting volume is still fully fillable
        let mut buy = bid(3, 1 << 63);
        let matches = book.place_market_order(&mut buy).unwrap();
        assert_eq!(matches.len(), 1);
        assert!(book.is_empty());
    }

    #[test]
    fn test_volume_overflow_across_prices_rejected() {
        let mut book = OrderBook::new();

        book.place_limit_order(100, bid(1, u64::MAX - 5)).unwrap();
        book.place_limit_order(90, bid(2, 5)).unwrap();

        assert!(matches!(
            book.place_limit_order(80, bid(3, 1)),
            Err(OrderBookError::VolumeOverflow { price: 80, .. })
        ));
        assert_eq!(book.bid_levels(), 2);
        assert_eq!(book.bid_total_volume(), u64::MAX);

        // The other side is unaffected
        book.place_limit_order(200, ask(4, 1)).unwrap();
        assert_eq!(book.ask_total_volume(), 1);
    }

    #[test]
    fn test_delete_order_removes_empty_level() {
        let mut book = OrderBook::new();

        let a = book.place_limit_order(10_000, ask(1, 10)).unwrap();
        let b = book.place_limit_order(9_000, ask(2, 5)).unwrap();

        let deleted = book.delete_order(b).unwrap();

        assert_eq!(deleted.id, 2);
        assert_eq!(deleted.size, 5);
        assert_eq!(book.ask_levels(), 1);
        assert_eq!(book.best_ask(), Some(10_000));
        assert_eq!(book.ask_total_volume(), 10);
        assert!(book.order(b).is_none());
        assert!(book.order(a).is_some());
    }

    #[test]
    fn test_delete_order_keeps_non_empty_level() {
        let mut book = OrderBook::new();

        let a = book.place_limit_order(10_000, ask(1, 10)).unwrap();
        book.place_limit_order(10_000, ask(2, 5)).unwrap();

        book.delete_order(a).unwrap();

        assert_eq!(book.ask_levels(), 1);
        assert_eq!(book.ask_total_volume(), 5);
    }

    #[test]
    fn test_delete_unknown_or_stale_handle() {
        let mut book = OrderBook::new();

        let a = book.place_limit_order(10_000, ask(1, 10)).unwrap();
        book.delete_order(a).unwrap();

        // Already deleted
        assert_eq!(
            book.delete_order(a).unwrap_err(),
            OrderBookError::OrderNotFound { key: a.key, order_id: 1 }
        );

        // Slot reused by another order: the old handle must not reach it
        let b = book.place_limit_order(10_000, ask(2, 3)).unwrap();
        assert_eq!(a.key, b.key);
        assert!(book.delete_order(a).is_err());
        assert!(book.order(a).is_none());
        assert_eq!(book.ask_total_volume(), 3);
    }

    #[test]
    fn test_clear() {
        let mut book = OrderBook::new();

        book.place_limit_order(9_000, bid(1, 8)).unwrap();
        book.place_limit_order(11_000, ask(2, 4)).unwrap();
        book.clear();

        assert!(book.is_empty());
        assert_eq!(book.bid_levels(), 0);
        assert_eq!(book.ask_levels(), 0);
        assert_eq!(book.bid_total_volume(), 0);
    }

    #[test]
    fn test_state_root_tracks_book_contents() {
        let mut first = OrderBook::new();
        let mut second = OrderBook::new();
        assert_eq!(
            first.compute_state_root().unwrap(),
            second.compute_state_root().unwrap()
        );

        first.place_limit_order(10_000, ask(1, 10)).unwrap();
        second.place_limit_order(10_000, ask(1, 10)).unwrap();
        assert_eq!(
            first.compute_state_root().unwrap(),
            second.compute_state_root().unwrap()
        );

        let handle = second.place_limit_order(9_000, bid(2, 3)).unwrap();
        assert_ne!(
            first.compute_state_root().unwrap(),
            second.compute_state_root().unwrap()
        );

        second.delete_order(handle).unwrap();
        assert_eq!(
            first.compute_state_root().unwrap(),
            second.compute_state_root().unwrap()
        );
    }
}

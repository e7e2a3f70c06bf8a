//! Price level management for orders at the same price.
//!
//! ## Design
//!
//! A `PriceLevel` represents all orders resting at a single price on one
//! side. Orders are kept in a doubly-linked list for FIFO ordering
//! (price-time priority).
//!
//! ## Queue Structure
//!
//! ```text
//! head (oldest) <-> order2 <-> order3 <-> tail (newest)
//! ```
//!
//! - New orders are appended at the tail, so arrival order is queue order
//! - Filling consumes orders from the head
//! - Any order can be unlinked in O(1) using its slab key, which leaves the
//!   relative order of the remaining residents untouched

use slab::Slab;

use crate::error::OrderBookError;
use crate::orderbook::{OrderHandle, OrderNode};
use crate::types::{Match, Order, Side};

/// A price level containing orders at a single price.
///
/// The order data lives in the slab; this struct only holds the queue
/// metadata and the running volume.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Price for this level
    pub price: u64,

    /// Side every resident order belongs to
    pub side: Side,

    /// Sum of the resident orders' remaining sizes
    pub total_volume: u64,

    /// Head of the order queue (oldest order, slab key)
    pub head: Option<usize>,

    /// Tail of the order queue (newest order, slab key)
    pub tail: Option<usize>,

    /// Number of orders at this price level
    pub order_count: usize,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new(price: u64, side: Side) -> Self {
        Self {
            price,
            side,
            total_volume: 0,
            head: None,
            tail: None,
            order_count: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order_count == 0
    }

    /// Slab key of the oldest resident, the next one to be filled
    #[inline]
    pub fn peek_head(&self) -> Option<usize> {
        self.head
    }

    /// Iterate resident orders oldest-first
    pub fn orders<'a>(&self, orders: &'a Slab<OrderNode>) -> LevelOrders<'a> {
        LevelOrders {
            orders,
            cursor: self.head,
        }
    }

    /// Append an order to the tail of the queue
    ///
    /// Sets the node's back-reference and adds its size to the level volume.
    /// No matching is attempted. Fails with `VolumeOverflow`, leaving the
    /// level untouched, if the level volume would exceed `u64::MAX`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present in the slab
    pub fn add(&mut self, key: usize, orders: &mut Slab<OrderNode>) -> Result<(), OrderBookError> {
        let old_tail = self.tail;

        let size = orders[key].size();
        let total_volume = self
            .total_volume
            .checked_add(size)
            .ok_or(OrderBookError::VolumeOverflow {
                side: self.side,
                price: self.price,
                size,
            })?;

        let node = &mut orders[key];
        node.level = Some(self.price);
        node.prev = old_tail;
        node.next = None;

        match old_tail {
            Some(tail_key) => orders[tail_key].next = Some(key),
            None => self.head = Some(key),
        }

        self.tail = Some(key);
        self.order_count += 1;
        self.total_volume = total_volume;

        Ok(())
    }

    /// Remove a resident order by identity
    ///
    /// The node stays in the slab, unlinked and with its back-reference
    /// cleared; releasing the slot is up to the caller.
    ///
    /// # Returns
    ///
    /// The remaining size of the removed order, or `OrderNotFound` if the
    /// handle does not name an order resting in this level
    pub fn remove(
        &mut self,
        handle: OrderHandle,
        orders: &mut Slab<OrderNode>,
    ) -> Result<u64, OrderBookError> {
        let resident = orders.get(handle.key).is_some_and(|node| {
            node.matches_handle(handle)
                && node.level == Some(self.price)
                && node.order.side() == self.side
        });

        if !resident {
            return Err(OrderBookError::OrderNotFound {
                key: handle.key,
                order_id: handle.id,
            });
        }

        Ok(self.unlink(handle.key, orders))
    }

    /// Match an incoming order against this level's residents
    ///
    /// Walks residents oldest-first, exchanging `min(incoming, resident)` at
    /// this level's price, until the incoming order is filled or the level
    /// is exhausted. Residents that reach zero are unlinked and released
    /// from the slab once the walk is over.
    ///
    /// # Returns
    ///
    /// The matches in the order the fills happened
    pub fn fill(
        &mut self,
        incoming: &mut Order,
        orders: &mut Slab<OrderNode>,
        next_match_id: &mut u64,
    ) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut exhausted = Vec::new();
        let mut cursor = self.head;

        while let Some(key) = cursor {
            if incoming.is_filled() {
                break;
            }
            let Some(resident) = orders.get_mut(key) else {
                break;
            };
            cursor = resident.next;

            let size = incoming.size.min(resident.size());
            resident.fill(size);
            incoming.fill(size);
            self.total_volume = self.total_volume.saturating_sub(size);

            let (ask_order_id, bid_order_id) = match incoming.side() {
                Side::Bid => (resident.order_id(), incoming.id),
                Side::Ask => (incoming.id, resident.order_id()),
            };
            matches.push(Match::new(
                *next_match_id,
                ask_order_id,
                bid_order_id,
                self.price,
                size,
            ));
            *next_match_id += 1;

            if resident.is_filled() {
                exhausted.push(key);
            }
        }

        for key in exhausted {
            self.unlink(key, orders);
            orders.try_remove(key);
        }

        matches
    }

    /// Unlink a node from the queue, returning its remaining size
    fn unlink(&mut self, key: usize, orders: &mut Slab<OrderNode>) -> u64 {
        let Some(node) = orders.get_mut(key) else {
            return 0;
        };
        let prev_key = node.prev.take();
        let next_key = node.next.take();
        node.level = None;
        let size = node.size();

        match prev_key {
            Some(prev) => {
                if let Some(prev_node) = orders.get_mut(prev) {
                    prev_node.next = next_key;
                }
            }
            None => self.head = next_key,
        }

        match next_key {
            Some(next) => {
                if let Some(next_node) = orders.get_mut(next) {
                    next_node.prev = prev_key;
                }
            }
            None => self.tail = prev_key,
        }

        self.order_count = self.order_count.saturating_sub(1);
        self.total_volume = self.total_volume.saturating_sub(size);

        size
    }
}

/// Iterator over a level's residents in FIFO order.
///
/// Yields `(slab key, order)` pairs.
pub struct LevelOrders<'a> {
    orders: &'a Slab<OrderNode>,
    cursor: Option<usize>,
}

impl<'a> Iterator for LevelOrders<'a> {
    type Item = (usize, &'a Order);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let node = self.orders.get(key)?;
        self.cursor = node.next;
        Some((key, &node.order))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

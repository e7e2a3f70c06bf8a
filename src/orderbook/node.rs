//! Order node for slab-based storage.
//!
//! ## Design
//!
//! `OrderNode` wraps an `Order` with the bookkeeping a price level needs:
//! doubly-linked list pointers for FIFO order and O(1) removal, and a
//! back-reference to the owning level.
//!
//! ## Back-reference
//!
//! `level` holds the price of the level the order rests in. It is a plain
//! identifier, not an owning pointer: the level owns the membership, and the
//! field is set by `PriceLevel::add` and cleared by `PriceLevel::remove`.

use crate::types::Order;

/// Handle to a resting order: its slab key plus its id.
///
/// Slab keys are reused once an order leaves the book, so the id is checked
/// on every lookup. A stale handle never reaches a different order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderHandle {
    /// Slab key of the order node
    pub key: usize,
    /// Id of the order stored at `key`
    pub id: u64,
}

/// Order node stored in the slab.
///
/// The pointers are slab keys (`usize`), not direct references.
#[derive(Debug, Clone)]
pub struct OrderNode {
    /// The actual order data
    pub order: Order,

    /// Price of the level this order rests in, None while unlinked
    pub level: Option<u64>,

    /// Next (newer) order in the level queue
    pub next: Option<usize>,

    /// Previous (older) order in the level queue
    pub prev: Option<usize>,
}

impl OrderNode {
    /// Create a new, unlinked order node
    ///
    /// ```
    /// use lob_core::orderbook::OrderNode;
    /// use lob_core::types::{Order, Side};
    ///
    /// let node = OrderNode::new(Order::new(1, Side::Bid, 10, 0));
    ///
    /// assert!(node.level.is_none());
    /// assert!(node.is_unlinked());
    /// ```
    #[inline]
    pub fn new(order: Order) -> Self {
        Self {
            order,
            level: None,
            next: None,
            prev: None,
        }
    }

    /// Check if this node has no queue neighbours
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }

    #[inline]
    pub fn order_id(&self) -> u64 {
        self.order.id
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.order.size
    }

    /// Fill a portion of this order, returning the size actually filled
    #[inline]
    pub fn fill(&mut self, size: u64) -> u64 {
        self.order.fill(size)
    }

    #[inline]
    pub fn is_filled(&self) -> bool {
        self.order.is_filled()
    }

    /// Check whether this node is the order `handle` refers to
    #[inline]
    pub fn matches_handle(&self, handle: OrderHandle) -> bool {
        self.order.id == handle.id
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

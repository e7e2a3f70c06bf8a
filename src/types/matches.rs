//! Match record produced when an incoming order trades against a resting one.
//!
//! ## SSZ Serialization
//!
//! Matches are serialized using SSZ for deterministic encoding, so a
//! downstream consumer can hash or persist a match sequence byte-for-byte.

use ssz_rs::prelude::*;

use crate::types::price;

/// One matching event between an ask order and a bid order.
///
/// ## Price Improvement
///
/// The match always executes at the resting level's price. A market order has
/// no price of its own, so it takes whatever the resting side offers.
///
/// ## Example
///
/// ```
/// use lob_core::types::Match;
///
/// let m = Match::new(
///     1,          // match id
///     10,         // ask order id
///     20,         // bid order id
///     5_000,      // price
///     5,          // size filled
/// );
/// assert_eq!(m.size_filled, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Match {
    /// Match identifier (assigned by the book, strictly increasing)
    pub id: u64,

    /// Id of the ask-side order involved
    pub ask_order_id: u64,

    /// Id of the bid-side order involved
    pub bid_order_id: u64,

    /// Trade price: the resting level's price
    pub price: u64,

    /// Size exchanged: min of both orders' sizes at match time
    pub size_filled: u64,
}

impl Match {
    /// Create a new match record
    pub fn new(
        id: u64,
        ask_order_id: u64,
        bid_order_id: u64,
        price: u64,
        size_filled: u64,
    ) -> Self {
        Self {
            id,
            ask_order_id,
            bid_order_id,
            price,
            size_filled,
        }
    }

    /// Notional value (price * size) in 10^8 fixed-point.
    ///
    /// The book itself treats prices and sizes as plain ticks and lots; this
    /// is only meaningful when the caller placed orders with values built by
    /// `price::to_fixed` (or scaled by `price::SCALE`). Returns `None` on
    /// overflow.
    pub fn notional(&self) -> Option<u64> {
        price::checked_mul(self.price, self.size_filled)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

//! Order types for the limit order book.
//!
//! ## SSZ Serialization
//!
//! `Order` derives `SimpleSerialize` from ssz_rs so that the book state can be
//! hashed deterministically (see `OrderBook::compute_state_root`).
//!
//! ## Units
//!
//! Sizes are unsigned integer lots. An order carries no price of its own: a
//! limit order is given its price when it is placed, and a market order takes
//! whatever price the resting side offers.

use ssz_rs::prelude::*;

// ============================================================================
// Side enum
// ============================================================================

/// Order side: Bid or Ask
///
/// Represented as u8 for SSZ compatibility:
/// - Bid = 0
/// - Ask = 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Buy side - wants to purchase the asset
    #[default]
    Bid,
    /// Sell side - wants to sell the asset
    Ask,
}

impl Side {
    /// Convert to u8 for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            Side::Bid => 0,
            Side::Ask => 1,
        }
    }

    /// Convert from u8 for deserialization
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Side::Bid),
            1 => Some(Side::Ask),
            _ => None,
        }
    }

    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Ask,
            Side::Ask => Side::Bid,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Bid => write!(f, "bid"),
            Side::Ask => write!(f, "ask"),
        }
    }
}

// ============================================================================
// Order struct
// ============================================================================

/// A single resting or incoming order.
///
/// `size` is the remaining size. It only ever decreases, and the order is
/// filled once it reaches zero.
///
/// ## Example
///
/// ```
/// use lob_core::types::{Order, Side};
///
/// let order = Order::new(1, Side::Bid, 10, 1703577600000);
/// assert_eq!(order.side(), Side::Bid);
/// assert!(!order.is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct Order {
    /// Order identifier (assigned by the book when created via `new_order`)
    pub id: u64,

    /// Order side as u8 (0=Bid, 1=Ask)
    pub side_raw: u8,

    /// Remaining size in lots
    pub size: u64,

    /// Arrival timestamp, only used to order residents of a level
    pub timestamp: u64,
}

impl Order {
    /// Create a new order
    ///
    /// # Arguments
    ///
    /// * `id` - Order identifier
    /// * `side` - Bid or Ask
    /// * `size` - Size in lots
    /// * `timestamp` - Arrival timestamp
    pub fn new(id: u64, side: Side, size: u64, timestamp: u64) -> Self {
        Self {
            id,
            side_raw: side.to_u8(),
            size,
            timestamp,
        }
    }

    /// Get the order side
    pub fn side(&self) -> Side {
        Side::from_u8(self.side_raw).unwrap_or_default()
    }

    /// Check if the order is fully filled
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.size == 0
    }

    /// Fill a portion of this order
    ///
    /// # Returns
    ///
    /// The size actually filled, capped at the remaining size
    pub fn fill(&mut self, fill_size: u64) -> u64 {
        let actual_fill = fill_size.min(self.size);
        self.size -= actual_fill;
        actual_fill
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

//! Order book error types

use thiserror::Error;

use crate::types::Side;

/// Errors returned by order book operations.
///
/// Every variant is recoverable: a failed call leaves the book exactly as it
/// was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderBookError {
    /// Market order larger than the opposite side's aggregate volume
    #[error("insufficient liquidity for {side} market order: requested {requested}, available {available}")]
    InsufficientLiquidity {
        /// Side of the rejected market order
        side: Side,
        /// Size requested
        requested: u64,
        /// Opposite side aggregate volume at the time of the call
        available: u64,
    },

    /// The order is not resident where the caller expected it
    #[error("order {order_id} not found at slot {key}")]
    OrderNotFound {
        /// Slab key supplied by the caller
        key: usize,
        /// Order id supplied by the caller
        order_id: u64,
    },

    /// Resting volume on one side would no longer fit in a u64
    #[error("{side} order of size {size} at {price} would overflow resting volume")]
    VolumeOverflow {
        /// Side the order was placed on
        side: Side,
        /// Limit price of the order
        price: u64,
        /// Size of the order
        size: u64,
    },

    /// Orders must carry a positive size
    #[error("order size must be positive")]
    InvalidSize,

    /// SSZ encoding failed while hashing book state
    #[error("state encoding failed: {0}")]
    Encoding(String),
}

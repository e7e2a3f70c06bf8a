//! # lob-core
//!
//! Single-instrument limit order book with price-time priority matching.
//!
//! ## Architecture
//!
//! - **Types**: Core data structures (Order, Side, Match)
//! - **OrderBook**: Price levels per side, slab-backed order storage, and
//!   the market order matching algorithm
//!
//! ## Behavior
//!
//! 1. **Limit orders rest**: they are queued at their price and never trade
//!    on arrival, even when they cross the spread
//! 2. **Market orders fill or fail**: a market order is matched in full
//!    against the opposite side, or rejected with no side effects
//! 3. **Price-time priority**: best price first, then oldest first
//! 4. **Integer units**: prices are ticks and sizes are lots, no floating point
//!
//! ## Concurrency
//!
//! Every operation is synchronous and takes `&mut self` when it mutates.
//! Callers sharing a book across threads wrap it in a single lock.
//!
//! ## Example
//!
//! ```
//! use lob_core::{OrderBook, Side};
//!
//! let mut book = OrderBook::new();
//!
//! let a = book.new_order(Side::Ask, 10);
//! let b = book.new_order(Side::Ask, 5);
//! book.place_limit_order(10_000, a).unwrap();
//! book.place_limit_order(9_000, b).unwrap();
//!
//! assert_eq!(book.ask_total_volume(), 15);
//! assert_eq!(book.asks().prices(), vec![9_000, 10_000]);
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: Order, Side, Match
pub mod types;

/// Order book: price levels, sides, matching
pub mod orderbook;

/// Error type shared by all book operations
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::OrderBookError;
pub use orderbook::{BookSide, OrderBook, OrderHandle, PriceLevel};
pub use types::{Match, Order, Side};

//! Order book module.
//!
//! ## Architecture
//!
//! The order book is a single-instrument limit order book with:
//!
//! - **Slab-based storage**: O(1) order insertion, removal, and lookup
//! - **Price levels**: Orders grouped by price in a `BTreeMap` per side
//! - **Price-time priority**: FIFO ordering at each price level
//!
//! ## Components
//!
//! - [`OrderNode`]: Wrapper around `Order` with level back-reference and queue links
//! - [`PriceLevel`]: FIFO queue of orders at a single price, owns the fill primitive
//! - [`BookSide`]: Price levels of one side, iterated best-price-first
//! - [`OrderBook`]: Bid and ask sides plus the matching algorithm
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Place limit order | O(log n) |
//! | Delete order by handle | O(log n) |
//! | Best bid/ask | O(log n) |
//! | Place market order | O(k log n) |
//!
//! ## Example
//!
//! ```
//! use lob_core::orderbook::OrderBook;
//! use lob_core::types::Side;
//!
//! let mut book = OrderBook::with_capacity(1_000);
//!
//! let ask = book.new_order(Side::Ask, 10);
//! book.place_limit_order(10_000, ask).unwrap();
//!
//! let mut buy = book.new_order(Side::Bid, 4);
//! let matches = book.place_market_order(&mut buy).unwrap();
//!
//! assert_eq!(matches.len(), 1);
//! assert_eq!(book.ask_total_volume(), 6);
//! ```

pub mod node;
pub mod level;
pub mod side;
pub mod book;
mod matching;

pub use node::{OrderHandle, OrderNode};
pub use level::{LevelOrders, PriceLevel};
pub use side::BookSide;
pub use book::OrderBook;

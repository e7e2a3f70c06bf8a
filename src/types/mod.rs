//! Core data types for the order book
//!
//! ## Types
//!
//! - [`Order`]: An incoming or resting order
//! - [`Side`]: Bid or Ask
//! - [`Match`]: One matching event between an ask and a bid
//!
//! ## Units
//!
//! Prices are integer ticks and sizes are integer lots. The [`price`] module
//! converts decimal strings to the 10^8 fixed-point convention for callers
//! that want human-readable input.

mod order;
mod matches;
pub mod price;

pub use order::{Order, Side};
pub use matches::Match;

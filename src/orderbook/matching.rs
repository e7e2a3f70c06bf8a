//! Market order matching.
//!
//! ## Rules
//!
//! - **Bid** market orders match against asks, lowest price first
//! - **Ask** market orders match against bids, highest price first
//! - Within a level, the oldest resting order fills first
//! - Every match trades at the resting level's price
//!
//! A market order never rests. It is either filled completely or rejected
//! before the book is touched.

use tracing::{debug, trace, warn};

use crate::error::OrderBookError;
use crate::orderbook::OrderBook;
use crate::types::{Match, Order, Side};

impl OrderBook {
    /// Execute a market order against the opposite side
    ///
    /// On success `order.size` is zero and the returned matches cover the
    /// whole requested size, best price first. Levels drained by the order
    /// are removed from the book.
    ///
    /// # Errors
    ///
    /// - `InvalidSize` for a zero-size order
    /// - `InsufficientLiquidity` if the opposite side holds less volume than
    ///   requested; nothing is matched and the book is unchanged
    ///
    /// # Example
    ///
    /// ```
    /// use lob_core::orderbook::OrderBook;
    /// use lob_core::types::{Order, Side};
    /// use lob_core::OrderBookError;
    ///
    /// let mut book = OrderBook::new();
    /// book.place_limit_order(10_000, Order::new(1, Side::Ask, 5, 0)).unwrap();
    ///
    /// let mut too_big = Order::new(2, Side::Bid, 6, 0);
    /// assert!(matches!(
    ///     book.place_market_order(&mut too_big),
    ///     Err(OrderBookError::InsufficientLiquidity { .. })
    /// ));
    /// assert_eq!(book.ask_total_volume(), 5);
    /// ```
    pub fn place_market_order(&mut self, order: &mut Order) -> Result<Vec<Match>, OrderBookError> {
        if order.size == 0 {
            return Err(OrderBookError::InvalidSize);
        }

        let side = order.side();
        let requested = order.size;
        let available = self.side(side.opposite()).total_volume();
        if requested > available {
            warn!(
                order_id = order.id,
                %side,
                requested,
                available,
                "market order rejected: insufficient liquidity"
            );
            return Err(OrderBookError::InsufficientLiquidity {
                side,
                requested,
                available,
            });
        }

        let opposite = match side {
            Side::Bid => &mut self.asks,
            Side::Ask => &mut self.bids,
        };

        let mut matches = Vec::new();
        while !order.is_filled() {
            let Some(price) = opposite.best_price() else {
                break;
            };
            let Some(level) = opposite.level_mut(price) else {
                break;
            };

            matches.extend(level.fill(order, &mut self.orders, &mut self.next_match_id));

            if level.is_empty() {
                opposite.remove_level(price);
                trace!(side = %side.opposite(), price, "removed drained price level");
            }
        }

        debug!(
            order_id = order.id,
            %side,
            requested,
            matches = matches.len(),
            "market order filled"
        );

        Ok(matches)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

//! Shared helpers for integration tests.

#![allow(dead_code)]

use lob_core::{BookSide, OrderBook, Side};

/// Assert every structural invariant of the book.
///
/// - each level's total volume equals the sum of its residents' sizes
/// - no indexed level is empty
/// - levels are in priority order and each price appears once
/// - within a level, residents are in arrival order
/// - side aggregates equal the sum of level volumes
pub fn assert_book_invariants(book: &OrderBook) {
    assert_side_invariants(book, book.asks());
    assert_side_invariants(book, book.bids());

    let resting: usize = book.asks().order_count() + book.bids().order_count();
    assert_eq!(resting, book.order_count(), "slab and levels disagree on order count");
}

fn assert_side_invariants(book: &OrderBook, side: &BookSide) {
    let prices = side.prices();
    for pair in prices.windows(2) {
        match side.side() {
            Side::Ask => assert!(pair[0] < pair[1], "asks out of order: {:?}", prices),
            Side::Bid => assert!(pair[0] > pair[1], "bids out of order: {:?}", prices),
        }
    }
    assert_eq!(prices.len(), side.len());

    let mut side_volume = 0u64;
    for level in side.iter() {
        assert!(!level.is_empty(), "empty level {} still indexed", level.price);
        assert_eq!(side.level(level.price).map(|l| l.price), Some(level.price));

        let residents: Vec<_> = book
            .level_orders(side.side(), level.price)
            .expect("indexed level must be reachable by price")
            .map(|(_, order)| order.clone())
            .collect();

        assert_eq!(residents.len(), level.order_count);
        let resident_volume: u64 = residents.iter().map(|o| o.size).sum();
        assert_eq!(level.total_volume, resident_volume, "volume drift at {}", level.price);

        for order in &residents {
            assert!(order.size > 0, "filled order {} still resting", order.id);
            assert_eq!(order.side(), side.side());
        }
        for pair in residents.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp, "FIFO broken at {}", level.price);
        }

        side_volume += level.total_volume;
    }

    let total = match side.side() {
        Side::Ask => book.ask_total_volume(),
        Side::Bid => book.bid_total_volume(),
    };
    assert_eq!(total, side_volume);
}

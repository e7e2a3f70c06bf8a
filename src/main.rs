//! lob-core demo binary
//!
//! Seeds a small book, sends a market order through it and logs the result.
//! Log verbosity follows `RUST_LOG` (default `lob_core=debug,info`).

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lob_core::types::price::{from_fixed_trimmed, SCALE};
use lob_core::{OrderBook, OrderBookError, Side};

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lob_core=debug,info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run() {
        error!(%err, "demo session failed");
        std::process::exit(1);
    }
}

fn run() -> Result<(), OrderBookError> {
    let mut book = OrderBook::with_capacity(64);

    // (price, size) in whole units, stored at 10^8 fixed-point
    let asks = [(10_000, 20), (5_000, 5), (20_000, 40)];
    for (price, size) in asks {
        let order = book.new_order(Side::Ask, size * SCALE);
        book.place_limit_order(price * SCALE, order)?;
    }

    info!(
        levels = book.ask_levels(),
        volume = %from_fixed_trimmed(book.ask_total_volume()),
        "ask side seeded"
    );

    let mut buy = book.new_order(Side::Bid, 10 * SCALE);
    let matches = book.place_market_order(&mut buy)?;

    for m in &matches {
        info!(
            ask = m.ask_order_id,
            bid = m.bid_order_id,
            price = %from_fixed_trimmed(m.price),
            size = %from_fixed_trimmed(m.size_filled),
            "match"
        );
    }

    let mut oversized = book.new_order(Side::Bid, book.ask_total_volume() + 1);
    if let Err(err) = book.place_market_order(&mut oversized) {
        info!(%err, "oversized market order rejected as expected");
    }

    info!(
        levels = book.ask_levels(),
        volume = %from_fixed_trimmed(book.ask_total_volume()),
        state_root = %hex::encode(book.compute_state_root()?),
        "session complete"
    );

    Ok(())
}

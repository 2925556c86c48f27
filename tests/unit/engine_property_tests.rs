//! Property tests for best-price tracking and capacity handling

use orderbook_feed::{DecodedRecord, OrderBookEngine, Price, RejectReason, Side, Symbol, UpdateOutcome};
use orderbook_feed::config::EngineConfig;
use proptest::prelude::*;

const MAX_LEVELS: usize = 16;

fn engine() -> OrderBookEngine {
    OrderBookEngine::new(EngineConfig::default().with_max_levels(MAX_LEVELS)).unwrap()
}

fn symbol() -> Symbol {
    Symbol::new("PROP").unwrap()
}

fn record(raw_price: u64, quantity: u32, side: Side) -> DecodedRecord {
    DecodedRecord::new(symbol(), Price::from_raw(raw_price), quantity, side)
}

fn any_side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Bid), Just(Side::Ask)]
}

proptest! {
    #[test]
    fn best_bid_is_max_of_distinct_prices(
        prices in prop::collection::hash_set(1u64..10_000_000_000, 1..=MAX_LEVELS)
    ) {
        let engine = engine();
        for &price in &prices {
            prop_assert!(engine.apply_update(&record(price, 1, Side::Bid)).is_accepted());
        }
        let best = engine.best_bid(&symbol()).unwrap();
        prop_assert_eq!(best.price.raw(), *prices.iter().max().unwrap());
    }

    #[test]
    fn best_ask_is_min_of_distinct_prices(
        prices in prop::collection::hash_set(1u64..10_000_000_000, 1..=MAX_LEVELS)
    ) {
        let engine = engine();
        for &price in &prices {
            prop_assert!(engine.apply_update(&record(price, 1, Side::Ask)).is_accepted());
        }
        let best = engine.best_ask(&symbol()).unwrap();
        prop_assert_eq!(best.price.raw(), *prices.iter().min().unwrap());
    }

    #[test]
    fn repeated_update_is_idempotent(
        setup in prop::collection::vec((1u64..50, 0u32..100, any_side()), 0..40),
        price in 1u64..50,
        quantity in 0u32..100,
        side in any_side()
    ) {
        let once = engine();
        let twice = engine();
        for &(p, q, s) in &setup {
            once.apply_update(&record(p, q, s));
            twice.apply_update(&record(p, q, s));
        }

        let first = once.apply_update(&record(price, quantity, side));
        twice.apply_update(&record(price, quantity, side));
        let second = twice.apply_update(&record(price, quantity, side));
        prop_assert_eq!(first, second);

        let a = once.snapshot(&symbol(), Some(MAX_LEVELS));
        let b = twice.snapshot(&symbol(), Some(MAX_LEVELS));
        prop_assert_eq!(
            a.as_ref().map(|s| (&s.bids, &s.asks, s.bid_full, s.ask_full, s.sequence)),
            b.as_ref().map(|s| (&s.bids, &s.asks, s.bid_full, s.ask_full, s.sequence))
        );
    }

    #[test]
    fn at_most_one_level_per_price_and_best_is_extreme(
        updates in prop::collection::vec((1u64..40, 0u32..5, any_side()), 1..200)
    ) {
        let engine = engine();
        for &(p, q, s) in &updates {
            engine.apply_update(&record(p, q, s));
        }

        engine.with_book(&symbol(), |book| {
            for side in [Side::Bid, Side::Ask] {
                let store = book.side(side);
                let mut prices: Vec<u64> = store.iter_valid().map(|l| l.price.raw()).collect();
                let count = prices.len();
                prices.sort_unstable();
                prices.dedup();
                assert_eq!(prices.len(), count, "duplicate price on {side}");
                assert!(store.iter_valid().all(|l| l.quantity > 0));

                let expected = match side {
                    Side::Bid => prices.last().copied(),
                    Side::Ask => prices.first().copied(),
                };
                assert_eq!(store.best().map(|l| l.price.raw()), expected);
            }
        });
    }
}

#[test]
fn capacity_boundary_rejects_next_distinct_price() {
    let engine = engine();
    for i in 0..MAX_LEVELS as u64 {
        assert!(engine.apply_update(&record(1_000 + i, 1, Side::Ask)).is_accepted());
    }
    let before = engine.snapshot(&symbol(), Some(MAX_LEVELS)).unwrap();

    let outcome = engine.apply_update(&record(1, 1, Side::Ask));
    assert_eq!(outcome, UpdateOutcome::Rejected(RejectReason::CapacityExceeded));

    let after = engine.snapshot(&symbol(), Some(MAX_LEVELS)).unwrap();
    assert_eq!(before.asks, after.asks);
    assert_eq!(before.sequence, after.sequence);
    assert!(after.ask_full);
    assert_eq!(engine.best_ask(&symbol()).unwrap().price.raw(), 1_000);
}

//! End-to-end scenarios through the trading interface

#[cfg(test)]
mod interface_scenario_tests {
    use orderbook_feed::decoder::{DECODE_LATENCY_STEPS, DecoderState};
    use orderbook_feed::{
        EngineConfig, InputRecord, MessageType, PacketDecoder, Price, Side, SubmitOutcome, Symbol,
        TradingInterface,
    };

    fn scenario_a() -> TradingInterface {
        let mut ti = TradingInterface::new(EngineConfig::default()).unwrap();
        for (price, quantity, side) in [
            (104.50, 200, Side::Bid),
            (104.25, 300, Side::Bid),
            (104.75, 150, Side::Ask),
            (105.00, 100, Side::Ask),
        ] {
            let outcome = ti.submit_update("AAPL", price, quantity, side).unwrap();
            assert_eq!(outcome, SubmitOutcome::Accepted);
        }
        ti
    }

    #[test]
    fn test_scenario_a() {
        let ti = scenario_a();
        let quote = ti.query_book("AAPL").unwrap();

        assert!(quote.valid);
        assert_eq!(quote.best_bid_price, 104.50);
        assert_eq!(quote.best_bid_qty, 200);
        assert_eq!(quote.best_ask_price, 104.75);
        assert_eq!(quote.best_ask_qty, 150);
    }

    #[test]
    fn test_scenario_b() {
        let mut ti = scenario_a();
        let outcome = ti.submit_update("AAPL", 104.50, 0, Side::Bid).unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted);

        let quote = ti.query_book("AAPL").unwrap();
        assert_eq!(quote.best_bid(), Some((104.25, 300)));
        assert_eq!(quote.best_ask(), Some((104.75, 150)));

        let book = ti.engine().snapshot(&Symbol::new("AAPL").unwrap(), None).unwrap();
        assert_eq!(book.bids.len(), 1, "the 104.50 level was freed");
    }

    #[test]
    fn test_scenario_c() {
        let mut decoder = PacketDecoder::new();
        let record = InputRecord::encode(
            MessageType::Order,
            Symbol::new("AAPL").unwrap(),
            Price::from_f64(150.25).unwrap(),
            100,
            Side::Bid,
        );

        let mut decoded = None;
        let mut input = Some(&record);
        for _ in 0..DECODE_LATENCY_STEPS {
            assert!(decoded.is_none(), "output arrives on the last step only");
            decoded = decoder.step(input.take(), true);
        }

        let decoded = decoded.expect("one full state cycle yields a record");
        assert!(decoded.valid);
        assert_eq!(decoded.symbol.to_string(), "AAPL");
        assert_eq!(decoded.price.to_f64(), 150.25);
        assert_eq!(decoded.quantity, 100);
        assert_eq!(decoded.side, Side::Bid);
        assert_eq!(decoder.state(), DecoderState::Idle);
    }

    #[test]
    fn test_crossed_book_reported_as_is() {
        let mut ti = TradingInterface::new(EngineConfig::default()).unwrap();
        ti.submit_update("AAPL", 101.0, 10, Side::Bid).unwrap();
        ti.submit_update("AAPL", 100.0, 10, Side::Ask).unwrap();

        let quote = ti.query_book("AAPL").unwrap();
        assert!(quote.best_bid_price > quote.best_ask_price);
        let crossed = ti
            .engine()
            .with_book(&Symbol::new("AAPL").unwrap(), |book| book.is_crossed())
            .unwrap();
        assert!(crossed);
    }

    #[test]
    fn test_capacity_exceeded_then_recovered() {
        let mut ti = TradingInterface::new(EngineConfig::default().with_max_levels(3)).unwrap();
        for price in [10.0, 11.0, 12.0] {
            ti.submit_update("BTC", price, 1, Side::Bid).unwrap();
        }
        let before = ti.query_book("BTC").unwrap();

        assert_eq!(
            ti.submit_update("BTC", 13.0, 1, Side::Bid).unwrap(),
            SubmitOutcome::RejectedFull
        );
        let after = ti.query_book("BTC").unwrap();
        assert_eq!(before, after, "rejected update leaves the book unchanged");

        let status = ti.query_status();
        assert!(status.bid_full);
        assert!(!status.ask_full);

        // updating an existing price succeeds and clears the status
        assert_eq!(
            ti.submit_update("BTC", 12.0, 9, Side::Bid).unwrap(),
            SubmitOutcome::Accepted
        );
        assert!(!ti.query_status().bid_full);
        assert_eq!(ti.query_book("BTC").unwrap().best_bid(), Some((12.0, 9)));
    }

    #[test]
    fn test_round_trip_precision_through_the_interface() {
        let mut ti = TradingInterface::new(EngineConfig::default()).unwrap();
        ti.submit_update("AAPL", 180.55, 1, Side::Ask).unwrap();

        let level = ti.engine().best_ask(&Symbol::new("AAPL").unwrap()).unwrap();
        assert_eq!(level.price.raw(), 180_550_000);
        assert_eq!(ti.query_book("AAPL").unwrap().best_ask_price, 180.55);
    }

    #[test]
    fn test_sub_unit_digits_are_truncated_on_submit() {
        let mut ti = TradingInterface::new(EngineConfig::default()).unwrap();
        ti.submit_update("AAPL", 10.0000009, 1, Side::Bid).unwrap();
        // same fixed-point price, so this replaces the level
        ti.submit_update("AAPL", 10.0, 2, Side::Bid).unwrap();

        let snapshot = ti.snapshot("AAPL", None).unwrap();
        assert_eq!(snapshot.bids.len(), 1);
        assert_eq!(snapshot.bids[0].quantity, 2);
    }
}

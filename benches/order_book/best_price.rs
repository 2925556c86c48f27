use criterion::Criterion;
use orderbook_feed::{EngineConfig, Side, TradingInterface};
use std::hint::black_box;

/// Register benchmarks for top of book reads
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Best Price");

    let mut interface = TradingInterface::new(EngineConfig::default()).unwrap();
    for i in 0..16 {
        let _ = interface.submit_update("BENCH", 100.0 - i as f64 * 0.25, 10, Side::Bid);
        let _ = interface.submit_update("BENCH", 100.25 + i as f64 * 0.25, 10, Side::Ask);
    }

    group.bench_function("query_book", |b| {
        b.iter(|| black_box(interface.query_book(black_box("BENCH"))))
    });

    group.bench_function("query_status", |b| {
        b.iter(|| black_box(interface.query_status()))
    });

    group.finish();
}

use criterion::Criterion;
use orderbook_feed::{EngineConfig, Side, TradingInterface};

pub fn benchmark_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("Basic Interface Operations");

    group.bench_function("create_interface", |b| {
        b.iter(|| {
            let _interface = TradingInterface::new(EngineConfig::default());
        })
    });

    group.bench_function("submit_single_update", |b| {
        b.iter(|| {
            let mut interface = TradingInterface::new(EngineConfig::default()).unwrap();
            let _ = interface.submit_update("AAPL", 150.25, 100, Side::Bid);
        })
    });

    group.finish();
}

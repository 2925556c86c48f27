use criterion::{BenchmarkId, Criterion};
use orderbook_feed::config::EngineConfig;
use orderbook_feed::{DecodedRecord, OrderBook, OrderBookEngine, Price, Side, Symbol};
use std::hint::black_box;

fn update(raw_price: u64, quantity: u32, side: Side) -> DecodedRecord {
    DecodedRecord::new(Symbol::new("BENCH").unwrap(), Price::from_raw(raw_price), quantity, side)
}

/// Register all benchmarks for applying updates to a book
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Apply Updates");

    group.bench_function("insert_then_delete", |b| {
        let mut book = OrderBook::new(Symbol::new("BENCH").unwrap(), 16);
        let insert = update(1_000, 10, Side::Bid);
        let delete = update(1_000, 0, Side::Bid);
        b.iter(|| {
            black_box(book.apply_update(black_box(&insert)));
            black_box(book.apply_update(black_box(&delete)));
        })
    });

    group.bench_function("replace_existing_level", |b| {
        let mut book = OrderBook::new(Symbol::new("BENCH").unwrap(), 16);
        for i in 0..16 {
            book.apply_update(&update(1_000 + i, 10, Side::Ask));
        }
        let replace = update(1_008, 42, Side::Ask);
        b.iter(|| black_box(book.apply_update(black_box(&replace))))
    });

    group.bench_function("rejected_when_full", |b| {
        let mut book = OrderBook::new(Symbol::new("BENCH").unwrap(), 16);
        for i in 0..16 {
            book.apply_update(&update(1_000 + i, 10, Side::Bid));
        }
        let overflow = update(5_000, 1, Side::Bid);
        b.iter(|| black_box(book.apply_update(black_box(&overflow))))
    });

    // Worst case scan length grows with the slot count
    for max_levels in [8usize, 64, 512].iter() {
        group.bench_with_input(
            BenchmarkId::new("full_book_update_scaling", max_levels),
            max_levels,
            |b, &max_levels| {
                let engine =
                    OrderBookEngine::new(EngineConfig::default().with_max_levels(max_levels))
                        .unwrap();
                for i in 0..max_levels as u64 {
                    engine.apply_update(&update(1_000 + i, 10, Side::Bid));
                }
                let last = update(1_000 + max_levels as u64 - 1, 11, Side::Bid);
                b.iter(|| black_box(engine.apply_update(black_box(&last))))
            },
        );
    }

    group.finish();
}

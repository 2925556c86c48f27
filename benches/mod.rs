use criterion::{criterion_group, criterion_main};

mod order_book;
mod simple;

use decoder::register_benchmarks as register_decoder_benchmarks;
use order_book::register_benchmarks as register_order_book_benchmarks;
use simple::basic::benchmark_data;

// Define the benchmark groups
criterion_group!(
    benches,
    benchmark_data,
    register_decoder_benchmarks,
    register_order_book_benchmarks,
);

criterion_main!(benches);

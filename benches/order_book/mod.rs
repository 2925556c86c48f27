pub mod apply_updates;
pub mod best_price;

// Import common benchmarks into the main bench group
pub fn register_benchmarks(c: &mut criterion::Criterion) {
    apply_updates::register_benchmarks(c);
    best_price::register_benchmarks(c);
}

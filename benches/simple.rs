use criterion::{criterion_group, criterion_main, Criterion};
use matchbook::{Order, OrderBook, Side};

fn limit_ladder(c: &mut Criterion) {
    c.bench_function("limit ladder", |b| {
        let mut ob = OrderBook::default();
        let mut next_id = 0u64;
        b.iter(|| {
            for i in 0..5_000u64 {
                next_id += 1;
                ob.add(Order {
                    id: next_id,
                    side: Side::Bid,
                    price: 100.0 + i as f64 * 0.01,
                    qty: i + 1,
                    timestamp_ns: next_id,
                });
            }
        });
    });
}

fn add_cancel_churn(c: &mut Criterion) {
    c.bench_function("add cancel churn", |b| {
        let mut ob = OrderBook::default();
        let mut next_id = 0u64;
        b.iter(|| {
            for i in 0..5_000u64 {
                next_id += 1;
                ob.add(Order {
                    id: next_id,
                    side: Side::Bid,
                    price: 100.0 + (i % 100) as f64 * 0.01,
                    qty: 10,
                    timestamp_ns: next_id,
                });
                ob.cancel(next_id);
            }
        });
    });
}

fn crossing_flow(c: &mut Criterion) {
    c.bench_function("crossing flow", |b| {
        let mut ob = OrderBook::default();
        let mut next_id = 0u64;
        b.iter(|| {
            for _ in 0..2_500u64 {
                next_id += 1;
                ob.add(Order {
                    id: next_id,
                    side: Side::Bid,
                    price: 100.0,
                    qty: 10,
                    timestamp_ns: next_id,
                });
                next_id += 1;
                ob.add(Order {
                    id: next_id,
                    side: Side::Ask,
                    price: 100.0,
                    qty: 10,
                    timestamp_ns: next_id,
                });
            }
            ob.clear_trades();
        });
    });
}

criterion_group!(benches, limit_ladder, add_cancel_churn, crossing_flow);
criterion_main!(benches);

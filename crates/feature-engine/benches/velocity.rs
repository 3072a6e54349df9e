use criterion::{criterion_group, criterion_main, Criterion};
use feature_engine::{calculate_velocity, calculate_windowed_velocity, VelocityWindow};
use std::hint::black_box;
use txn_table::{Table, Value};

fn transactions(rows: i64, users: i64) -> Table {
    let data = (0..rows).map(|i| {
        vec![
            Value::Int(i % users),
            Value::Int(1_704_067_200_000_000_000 + i * 37_000_000_000),
        ]
    });
    Table::from_rows(["user_id", "timestamp"], data).expect("valid bench table")
}

fn velocity_benchmark(c: &mut Criterion) {
    let table = transactions(10_000, 250);
    let window = VelocityWindow::one_hour();

    c.bench_function("velocity_group_total_10k", |b| {
        b.iter(|| calculate_velocity(black_box(&table), "user_id", "timestamp"))
    });

    c.bench_function("velocity_rolling_1h_10k", |b| {
        b.iter(|| calculate_windowed_velocity(black_box(&table), "user_id", "timestamp", &window))
    });
}

criterion_group!(benches, velocity_benchmark);
criterion_main!(benches);

//! Tick throughput benchmarks
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use geothermal_portfolio::prelude::*;

fn quiet_config() -> GameConfig {
    GameConfig {
        event_probability_scale: 0.0,
        ..GameConfig::default()
    }
}

pub fn tick_benchmark(c: &mut Criterion) {
    c.bench_function("advance_quarter", |b| {
        b.iter_batched(
            || GameState::initialize(7, quiet_config()).expect("valid config"),
            |mut state| black_box(state.advance_quarter().map(|r| r.net_cash).ok()),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("forty_years", |b| {
        b.iter_batched(
            || GameState::initialize(7, quiet_config()).expect("valid config"),
            |mut state| {
                for _ in 0..160 {
                    if state.advance_quarter().is_err() {
                        break;
                    }
                }
                black_box(state.cash())
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("snapshot_json", |b| {
        let state = GameState::initialize(7, quiet_config()).expect("valid config");
        b.iter(|| black_box(state.to_json().map(|s| s.len()).ok()))
    });
}

criterion_group!(benches, tick_benchmark);
criterion_main!(benches);

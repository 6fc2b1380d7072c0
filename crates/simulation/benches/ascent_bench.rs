//! Criterion benchmarks for the per-scroll derivations.
//!
//! Benchmarks:
//!   - altitude mapping for one offset
//!   - atmosphere blend inside and outside a transition band
//!   - milestone visibility over the default table
//!   - crossing tracker fed a full 600-sample ascent
//!
//! Every call runs once per scroll event, so all of these should stay well
//! under a microsecond per sample.
//!
//! Run with: cargo bench -p simulation --bench ascent_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use simulation::altitude::ShaftGeometry;
use simulation::atmosphere::blend;
use simulation::config::{MAX_ALTITUDE, MILESTONE_BUFFER, SHAFT_VIEWPORTS};
use simulation::crossings::CrossingTracker;
use simulation::milestones::{default_milestones, visibility};
use simulation::temperature::temperature_at;

// ---------------------------------------------------------------------------
// Benchmark: pure derivations
// ---------------------------------------------------------------------------

fn bench_derivations(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivations");
    group.sample_size(1000);

    let geometry = ShaftGeometry::new(1_000.0, SHAFT_VIEWPORTS);
    group.bench_function("altitude_from_scroll", |b| {
        b.iter(|| black_box(geometry.altitude(black_box(123_456.0), MAX_ALTITUDE)));
    });

    group.bench_function("temperature_at", |b| {
        b.iter(|| black_box(temperature_at(black_box(67_500.0))));
    });

    group.bench_function("blend_solid", |b| {
        b.iter(|| black_box(blend(black_box(30_000.0))));
    });

    group.bench_function("blend_transition", |b| {
        b.iter(|| black_box(blend(black_box(10_500.0))));
    });

    let milestones = default_milestones();
    group.bench_function("visibility_17", |b| {
        b.iter(|| {
            black_box(visibility(
                black_box(420_000.0),
                &milestones,
                MILESTONE_BUFFER,
                MAX_ALTITUDE,
            ))
        });
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: crossing tracker
// ---------------------------------------------------------------------------

fn bench_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossing_tracker");

    let samples: Vec<f64> = (1..=600).map(|i| f64::from(i) * 60_000.0).collect();
    group.bench_function("ascent_600_samples", |b| {
        b.iter(|| {
            let mut tracker = CrossingTracker::default();
            let mut fired = 0;
            for &altitude in &samples {
                if let Ok(events) = tracker.update(black_box(altitude)) {
                    fired += events.len();
                }
            }
            black_box(fired)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_derivations, bench_tracker);
criterion_main!(benches);

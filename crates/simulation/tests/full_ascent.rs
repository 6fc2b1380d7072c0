//! End-to-end checks of the public engine API without a Bevy app.
//!
//! Drives the pure derivations and the crossing tracker the way a host
//! without an ECS would: one altitude sample per scroll event.
//!
//! Run: cargo test -p simulation --test full_ascent

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use simulation::altitude::{altitude_from_scroll, ShaftGeometry};
use simulation::atmosphere::blend;
use simulation::config::{MAX_ALTITUDE, MILESTONE_BUFFER, SHAFT_VIEWPORTS};
use simulation::crossings::{CrossingKey, CrossingTracker};
use simulation::milestones::{default_milestones, visibility};
use simulation::temperature::temperature_at;
use simulation::ElevatorError;

// ---------------------------------------------------------------------------
// 1. Altitude mapping clamps every out-of-range offset
// ---------------------------------------------------------------------------

#[test]
fn test_offsets_outside_the_span_clamp() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let span = 900.0 * SHAFT_VIEWPORTS;
    for _ in 0..10_000 {
        let below = -rng.gen_range(1e-6..1e9);
        let above = span + rng.gen_range(1e-6..1e9);
        assert_eq!(altitude_from_scroll(below, 900.0, span, MAX_ALTITUDE), 0.0);
        assert_eq!(altitude_from_scroll(above, 900.0, span, MAX_ALTITUDE), MAX_ALTITUDE);
    }
}

#[test]
fn test_altitude_is_monotonic_in_offset() {
    let geometry = ShaftGeometry::new(844.0, SHAFT_VIEWPORTS);
    let mut previous = 0.0;
    let mut offset = 0.0;
    while offset <= geometry.total_span {
        let altitude = geometry.altitude(offset, MAX_ALTITUDE);
        assert!(altitude >= previous, "altitude fell at offset {offset}");
        assert_eq!(altitude, altitude.floor());
        previous = altitude;
        offset += 37.5;
    }
}

// ---------------------------------------------------------------------------
// 2. Every derivation is total over a random walk
// ---------------------------------------------------------------------------

#[test]
fn test_random_walk_keeps_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let geometry = ShaftGeometry::new(1_000.0, SHAFT_VIEWPORTS);
    let milestones = default_milestones();
    let mut tracker = CrossingTracker::default();
    let mut offset = 0.0_f64;

    for _ in 0..5_000 {
        offset = (offset + rng.gen_range(-20_000.0..25_000.0))
            .clamp(-500.0, geometry.total_span + 500.0);
        let altitude = geometry.altitude(offset, MAX_ALTITUDE);
        assert!((0.0..=MAX_ALTITUDE).contains(&altitude));

        let weights = blend(altitude);
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert!(weights.nonzero_count() <= 2);

        let t = temperature_at(altitude);
        assert!((-270..=15).contains(&t));

        let map = visibility(altitude, &milestones, MILESTONE_BUFFER, MAX_ALTITUDE);
        assert_eq!(map.len(), milestones.len());

        let before = tracker.last_altitude();
        let events = tracker.update(altitude).expect("mapped altitudes are valid");
        for event in &events {
            assert!(before < event.threshold && event.threshold <= altitude);
        }
        assert!(tracker.fired_count() <= tracker.thresholds().len());
    }
}

// ---------------------------------------------------------------------------
// 3. Tracker contract
// ---------------------------------------------------------------------------

#[test]
fn test_ascent_descent_ascent() {
    let mut tracker = CrossingTracker::default();
    let first: usize = [0.0, 400_000.0, 500_000.0]
        .iter()
        .map(|&a| tracker.update(a).expect("valid").len())
        .sum();
    assert_eq!(first, 10);

    // Drop to the ground in one sample; everything may replay.
    assert!(tracker.update(0.0).expect("valid").is_empty());
    let second = tracker.update(500_000.0).expect("valid");
    assert_eq!(second.len(), 10);
    assert!(second.iter().any(|e| e.key == CrossingKey::Milestone(100_000)));
}

#[test]
fn test_rejected_sample_is_an_error_value() {
    let mut tracker = CrossingTracker::default();
    match tracker.update(-1.0) {
        Err(ElevatorError::InvalidAltitude(v)) => assert_eq!(v, -1.0),
        other => panic!("expected InvalidAltitude, got {other:?}"),
    }
    assert!(tracker.update(f64::NAN).is_err());
    assert_eq!(tracker.last_altitude(), 0.0);
}

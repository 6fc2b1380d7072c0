//! One-shot threshold crossings.
//!
//! Turns the altitude stream into events for key milestones and atmosphere
//! boundaries. Each threshold fires at most once per ascent; a descent of more
//! than the reset threshold between two samples clears the memory so the next
//! ascent replays the cues.

use std::collections::BTreeSet;
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::altitude::Altitude;
use crate::atmosphere::AtmosphereTransition;
use crate::error::ElevatorError;
use crate::params::ElevatorParams;

// =============================================================================
// Keys and events
// =============================================================================

/// Identity of a threshold in the fired set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CrossingKey {
    /// A key milestone, by whole-meter altitude.
    Milestone(u64),
    /// A boundary between two atmosphere layers.
    Atmosphere(AtmosphereTransition),
}

impl fmt::Display for CrossingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossingKey::Milestone(altitude) => write!(f, "milestone-{altitude}"),
            CrossingKey::Atmosphere(transition) => f.write_str(transition.name()),
        }
    }
}

/// A threshold the tracker watches.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Threshold {
    pub key: CrossingKey,
    pub altitude: f64,
}

/// Fired the first time an ascent reaches a threshold.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct CrossingEvent {
    pub key: CrossingKey,
    /// Altitude of the threshold that was crossed.
    pub threshold: f64,
    /// Altitude sample that crossed it.
    pub altitude: f64,
}

// =============================================================================
// Tracker
// =============================================================================

/// Session state of the crossing detector.
#[derive(Resource, Debug, Clone)]
pub struct CrossingTracker {
    /// Sorted ascending by altitude.
    thresholds: Vec<Threshold>,
    fired: BTreeSet<CrossingKey>,
    last_altitude: f64,
    descent_reset_threshold: f64,
}

impl Default for CrossingTracker {
    fn default() -> Self {
        Self::from_params(&ElevatorParams::default())
    }
}

impl CrossingTracker {
    pub fn new(mut thresholds: Vec<Threshold>, descent_reset_threshold: f64) -> Self {
        sort_thresholds(&mut thresholds);
        Self {
            thresholds,
            fired: BTreeSet::new(),
            last_altitude: 0.0,
            descent_reset_threshold,
        }
    }

    /// Key milestones plus every atmosphere boundary.
    pub fn from_params(params: &ElevatorParams) -> Self {
        Self::new(
            thresholds_from_params(params),
            params.crossings.descent_reset_threshold,
        )
    }

    /// Feed the next altitude sample and return the crossings it caused.
    ///
    /// Rejects negative and non-finite samples without touching the state.
    pub fn update(&mut self, altitude: f64) -> Result<Vec<CrossingEvent>, ElevatorError> {
        if !altitude.is_finite() || altitude < 0.0 {
            return Err(ElevatorError::InvalidAltitude(altitude));
        }

        let last = self.last_altitude;
        let mut events = Vec::new();
        for threshold in &self.thresholds {
            if last < threshold.altitude
                && threshold.altitude <= altitude
                && self.fired.insert(threshold.key)
            {
                events.push(CrossingEvent {
                    key: threshold.key,
                    threshold: threshold.altitude,
                    altitude,
                });
            }
        }

        // Runs after detection; a descent never satisfies the crossing test.
        if last - altitude > self.descent_reset_threshold {
            self.fired.clear();
        }
        self.last_altitude = altitude;

        Ok(events)
    }

    /// Swap in thresholds from new params, keeping the altitude and any fired
    /// keys that are still watched.
    pub fn retarget(&mut self, params: &ElevatorParams) {
        let mut thresholds = thresholds_from_params(params);
        sort_thresholds(&mut thresholds);
        self.fired
            .retain(|key| thresholds.iter().any(|t| t.key == *key));
        self.thresholds = thresholds;
        self.descent_reset_threshold = params.crossings.descent_reset_threshold;
    }

    /// Start a fresh session at ground level.
    pub fn reset(&mut self) {
        self.fired.clear();
        self.last_altitude = 0.0;
    }

    pub fn has_fired(&self, key: CrossingKey) -> bool {
        self.fired.contains(&key)
    }

    pub fn fired_count(&self) -> usize {
        self.fired.len()
    }

    pub fn last_altitude(&self) -> f64 {
        self.last_altitude
    }

    pub fn thresholds(&self) -> &[Threshold] {
        &self.thresholds
    }
}

fn thresholds_from_params(params: &ElevatorParams) -> Vec<Threshold> {
    let bands = params.atmosphere.bands();
    let milestones = params.crossings.key_milestones.iter().map(|&altitude| Threshold {
        key: CrossingKey::Milestone(altitude as u64),
        altitude,
    });
    let boundaries = AtmosphereTransition::ALL.into_iter().map(|t| Threshold {
        key: CrossingKey::Atmosphere(t),
        altitude: bands.boundary(t),
    });
    milestones.chain(boundaries).collect()
}

fn sort_thresholds(thresholds: &mut [Threshold]) {
    thresholds.sort_by(|a, b| {
        a.altitude
            .total_cmp(&b.altitude)
            .then_with(|| a.key.cmp(&b.key))
    });
}

// =============================================================================
// Systems
// =============================================================================

/// Pushes parameter overrides into the tracker.
pub(crate) fn sync_tracker_params(
    params: Res<ElevatorParams>,
    mut tracker: ResMut<CrossingTracker>,
) {
    if params.is_changed() {
        tracker.retarget(&params);
    }
}

/// Feeds each new altitude to the tracker and publishes the crossings.
pub(crate) fn track_crossings(
    altitude: Res<Altitude>,
    mut tracker: ResMut<CrossingTracker>,
    mut crossings: EventWriter<CrossingEvent>,
) {
    if !altitude.is_changed() {
        return;
    }

    match tracker.update(altitude.meters) {
        Ok(events) => {
            for event in events {
                info!("Crossed {} at {} m", event.key, event.altitude);
                crossings.send(event);
            }
        }
        Err(e) => warn!("Crossing tracker skipped a sample: {e}"),
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct CrossingsPlugin;

impl Plugin for CrossingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CrossingTracker>()
            .add_event::<CrossingEvent>()
            .add_systems(
                Update,
                sync_tracker_params.in_set(crate::ElevatorSet::Input),
            )
            .add_systems(Update, track_crossings.in_set(crate::ElevatorSet::Track));
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TROPOPAUSE: CrossingKey =
        CrossingKey::Atmosphere(AtmosphereTransition::TroposphereStratosphere);

    fn keys(events: &[CrossingEvent]) -> Vec<CrossingKey> {
        events.iter().map(|e| e.key).collect()
    }

    fn feed(tracker: &mut CrossingTracker, samples: &[f64]) -> Vec<Vec<CrossingEvent>> {
        samples
            .iter()
            .map(|&a| tracker.update(a).expect("valid sample"))
            .collect()
    }

    #[test]
    fn test_default_watches_twelve_thresholds() {
        let tracker = CrossingTracker::default();
        assert_eq!(tracker.thresholds().len(), 12);
        assert!(tracker
            .thresholds()
            .windows(2)
            .all(|w| w[0].altitude <= w[1].altitude));
        assert_eq!(tracker.last_altitude(), 0.0);
        assert_eq!(tracker.fired_count(), 0);
    }

    #[test]
    fn test_tropopause_fires_once_on_ascent() {
        let mut tracker = CrossingTracker::default();
        let calls = feed(&mut tracker, &[0.0, 5_000.0, 9_000.0, 12_500.0]);
        let hits: Vec<usize> = calls
            .iter()
            .enumerate()
            .filter(|(_, events)| keys(events).contains(&TROPOPAUSE))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(hits, vec![3]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut tracker = CrossingTracker::default();
        let events = tracker.update(12_000.0).expect("valid");
        assert!(keys(&events).contains(&TROPOPAUSE));
    }

    #[test]
    fn test_events_ascend_within_one_call() {
        let mut tracker = CrossingTracker::default();
        let events = tracker.update(100_000.0).expect("valid");
        assert_eq!(
            keys(&events),
            vec![
                CrossingKey::Milestone(1_000),
                CrossingKey::Milestone(8_849),
                CrossingKey::Milestone(10_000),
                TROPOPAUSE,
                CrossingKey::Atmosphere(AtmosphereTransition::StratosphereMesosphere),
                CrossingKey::Atmosphere(AtmosphereTransition::MesosphereThermosphere),
                CrossingKey::Milestone(100_000),
            ]
        );
        assert!(events.iter().all(|e| e.altitude == 100_000.0));
    }

    #[test]
    fn test_refires_after_large_descent() {
        let mut tracker = CrossingTracker::default();
        assert_eq!(tracker.update(13_000.0).expect("valid").len(), 4);
        // 13 000 -> 7 000 is a 6 000 m drop
        assert!(tracker.update(7_000.0).expect("valid").is_empty());
        assert_eq!(tracker.fired_count(), 0);
        let events = tracker.update(12_500.0).expect("valid");
        assert_eq!(
            keys(&events),
            vec![
                CrossingKey::Milestone(8_849),
                CrossingKey::Milestone(10_000),
                TROPOPAUSE
            ]
        );
    }

    #[test]
    fn test_no_refire_after_small_descent() {
        let mut tracker = CrossingTracker::default();
        tracker.update(13_000.0).expect("valid");
        tracker.update(8_500.0).expect("valid");
        assert!(tracker.has_fired(TROPOPAUSE));
        let events = tracker.update(12_500.0).expect("valid");
        assert!(events.is_empty(), "got {events:?}");
    }

    #[test]
    fn test_descent_of_exactly_threshold_keeps_memory() {
        let mut tracker = CrossingTracker::default();
        tracker.update(13_000.0).expect("valid");
        tracker.update(8_000.0).expect("valid");
        assert_eq!(tracker.fired_count(), 4);
    }

    #[test]
    fn test_gradual_descent_never_resets() {
        let mut tracker = CrossingTracker::default();
        tracker.update(13_000.0).expect("valid");
        let mut altitude = 13_000.0;
        while altitude > 0.0 {
            altitude -= 1_000.0;
            tracker.update(altitude).expect("valid");
        }
        assert_eq!(tracker.fired_count(), 4);
        assert!(tracker.update(13_000.0).expect("valid").is_empty());
    }

    #[test]
    fn test_invalid_samples_leave_state_untouched() {
        let mut tracker = CrossingTracker::default();
        tracker.update(9_000.0).expect("valid");
        for bad in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = tracker.update(bad).unwrap_err();
            assert!(matches!(err, ElevatorError::InvalidAltitude(_)));
            assert_eq!(tracker.last_altitude(), 9_000.0);
            assert_eq!(tracker.fired_count(), 2);
        }
        // 9 000 is still the reference, so only the 10 000 milestone fires here
        let events = tracker.update(10_500.0).expect("valid");
        assert_eq!(keys(&events), vec![CrossingKey::Milestone(10_000)]);
    }

    #[test]
    fn test_full_ascent_fires_everything_once() {
        let mut tracker = CrossingTracker::default();
        let mut total = 0;
        let mut altitude = 0.0;
        while altitude < 36_000_000.0 {
            altitude += 120_000.0_f64.min(36_000_000.0 - altitude);
            total += tracker.update(altitude).expect("valid").len();
        }
        assert_eq!(total, 12);
        assert_eq!(tracker.fired_count(), 12);
    }

    #[test]
    fn test_reset_restarts_session() {
        let mut tracker = CrossingTracker::default();
        tracker.update(50_000.0).expect("valid");
        tracker.reset();
        assert_eq!(tracker.last_altitude(), 0.0);
        assert_eq!(tracker.fired_count(), 0);
        assert_eq!(tracker.update(50_000.0).expect("valid").len(), 5);
    }

    #[test]
    fn test_duplicate_thresholds_fire_once() {
        let mut params = ElevatorParams::default();
        params.crossings.key_milestones.push(1_000.0);
        let mut tracker = CrossingTracker::from_params(&params);
        let events = tracker.update(2_000.0).expect("valid");
        assert_eq!(keys(&events), vec![CrossingKey::Milestone(1_000)]);
    }

    #[test]
    fn test_fractional_thresholds_in_adjacent_meters_both_fire() {
        let mut params = ElevatorParams::default();
        params.crossings.key_milestones = vec![1_000.8, 1_001.2];
        params.validate().expect("distinct whole meters");
        let mut tracker = CrossingTracker::from_params(&params);

        let first = tracker.update(1_001.0).expect("valid");
        assert_eq!(keys(&first), vec![CrossingKey::Milestone(1_000)]);
        assert_eq!(first[0].threshold, 1_000.8);

        let second = tracker.update(1_002.0).expect("valid");
        assert_eq!(keys(&second), vec![CrossingKey::Milestone(1_001)]);
        assert_eq!(second[0].threshold, 1_001.2);
    }

    #[test]
    fn test_retarget_keeps_progress() {
        let mut tracker = CrossingTracker::default();
        tracker.update(9_000.0).expect("valid");

        let mut params = ElevatorParams::default();
        params.crossings.key_milestones = vec![8_849.0, 9_500.0];
        tracker.retarget(&params);

        assert_eq!(tracker.last_altitude(), 9_000.0);
        assert!(tracker.has_fired(CrossingKey::Milestone(8_849)));
        assert!(!tracker.has_fired(CrossingKey::Milestone(1_000)));
        let events = tracker.update(9_600.0).expect("valid");
        assert_eq!(keys(&events), vec![CrossingKey::Milestone(9_500)]);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(CrossingKey::Milestone(8_849).to_string(), "milestone-8849");
        assert_eq!(TROPOPAUSE.to_string(), "troposphere-stratosphere");
    }
}

//! Top-of-shaft gate.
//!
//! Tracks whether the elevator sits at the maximum altitude and publishes a
//! [`SummitEvent`] only when that changes.

use bevy::prelude::*;

use crate::altitude::Altitude;
use crate::params::ElevatorParams;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummitEvent {
    /// The elevator arrived at the top.
    Reached,
    /// The elevator left the top.
    Left,
}

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummitState {
    pub reached: bool,
}

impl SummitState {
    /// Apply a new sample; returns the edge it caused, if any.
    pub fn observe(&mut self, altitude: f64, max_altitude: f64) -> Option<SummitEvent> {
        let reached = altitude >= max_altitude;
        if reached == self.reached {
            return None;
        }
        self.reached = reached;
        Some(if reached {
            SummitEvent::Reached
        } else {
            SummitEvent::Left
        })
    }
}

pub(crate) fn update_summit(
    altitude: Res<Altitude>,
    params: Res<ElevatorParams>,
    mut summit: ResMut<SummitState>,
    mut events: EventWriter<SummitEvent>,
) {
    if !altitude.is_changed() && !params.is_changed() {
        return;
    }
    if let Some(edge) = summit.observe(altitude.meters, params.shaft.max_altitude) {
        info!("Summit {:?} at {} m", edge, altitude.whole_meters());
        events.send(edge);
    }
}

pub struct SummitPlugin;

impl Plugin for SummitPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SummitState>()
            .add_event::<SummitEvent>()
            .add_systems(Update, update_summit.in_set(crate::ElevatorSet::Track));
    }
}

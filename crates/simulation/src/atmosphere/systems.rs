use bevy::prelude::*;

use crate::altitude::Altitude;
use crate::params::ElevatorParams;

use super::calculations::blend_with;
use super::types::AtmosphereState;

/// Recomputes the layer blend whenever the altitude changes.
pub fn update_atmosphere(
    altitude: Res<Altitude>,
    params: Res<ElevatorParams>,
    mut state: ResMut<AtmosphereState>,
) {
    if !altitude.is_changed() && !params.is_changed() {
        return;
    }

    let bands = params.atmosphere.bands();
    let weights = blend_with(altitude.meters, &bands, params.atmosphere.transition_size);
    let layer = bands.layer_at(altitude.meters);

    if layer != state.layer {
        info!("Entered {} at {} m", layer.name(), altitude.whole_meters());
    }

    let next = AtmosphereState {
        weights,
        layer,
        dominant: weights.dominant(),
    };
    if *state != next {
        *state = next;
    }
}

pub struct AtmospherePlugin;

impl Plugin for AtmospherePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AtmosphereState>().add_systems(
            Update,
            update_atmosphere.in_set(crate::ElevatorSet::Derive),
        );
    }
}

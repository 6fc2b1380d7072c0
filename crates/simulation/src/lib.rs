//! Height-derived state engine for the space elevator scroll experience.
//!
//! The host writes a scroll offset into [`altitude::ScrollInput`]; the engine
//! derives altitude, temperature, the atmosphere blend, milestone visibility
//! and scenery, and publishes one-shot crossing, cue and summit events.
//! Presentation reads the resources and events and never writes back.

use bevy::prelude::*;

pub mod altitude;
pub mod atmosphere;
pub mod audio_cues;
pub mod config;
pub mod crossings;
pub mod error;
pub mod milestones;
pub mod params;
pub mod readout;
pub mod scenery;
pub mod simulation_sets;
pub mod summit;
pub mod temperature;

mod plugin_registration;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use error::ElevatorError;
pub use params::ElevatorParams;
pub use simulation_sets::ElevatorSet;

pub struct ElevatorPlugin;

impl Plugin for ElevatorPlugin {
    fn build(&self, app: &mut App) {
        // A host may insert its own params before adding the plugin.
        app.init_resource::<ElevatorParams>()
            .configure_sets(
                Update,
                (
                    ElevatorSet::Input,
                    ElevatorSet::Derive,
                    ElevatorSet::Track,
                    ElevatorSet::Cues,
                )
                    .chain(),
            )
            .add_systems(Startup, report_params);

        plugin_registration::register_feature_plugins(app);
    }
}

fn report_params(params: Res<ElevatorParams>) {
    match params.validate() {
        Ok(()) => info!(
            "Elevator ready: {} m over {} viewports, {} milestones, {} key crossings",
            params.shaft.max_altitude,
            params.shaft.shaft_viewports,
            params.milestones.table.len(),
            params.crossings.key_milestones.len()
        ),
        Err(e) => warn!("Elevator running with unchecked parameters: {e}"),
    }
}

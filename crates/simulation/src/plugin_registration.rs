use bevy::prelude::*;

use crate::*;

/// Register all elevator feature plugins.
///
/// One plugin per line. New features append a line in the matching section.
pub(crate) fn register_feature_plugins(app: &mut App) {
    // Input
    app.add_plugins(altitude::AltitudePlugin);

    // Readouts
    app.add_plugins(temperature::TemperaturePlugin);
    app.add_plugins(atmosphere::AtmospherePlugin);
    app.add_plugins(milestones::MilestonesPlugin);
    app.add_plugins(scenery::SceneryPlugin);

    // Edge detection and cues
    app.add_plugins(crossings::CrossingsPlugin);
    app.add_plugins(summit::SummitPlugin);
    app.add_plugins(audio_cues::AudioCuesPlugin);
}

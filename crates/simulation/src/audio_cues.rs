//! Maps crossing events to sound cues.
//!
//! The engine does not play audio. It classifies each crossing into a cue
//! family and publishes a [`PlayCueEvent`] carrying the asset key and volume;
//! a downstream audio system consumes those.

use bevy::prelude::*;

use crate::crossings::{CrossingEvent, CrossingKey};
use crate::params::{CueParams, ElevatorParams};

// =============================================================================
// Cue types
// =============================================================================

/// Sound families the experience uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueKind {
    /// A key milestone was passed.
    Milestone,
    /// The elevator entered a new atmosphere layer.
    AtmosphereChange,
    /// The Kármán line milestone.
    SpaceReached,
}

impl CueKind {
    /// Asset path of the sound file.
    pub fn asset(self) -> &'static str {
        match self {
            CueKind::Milestone => "sounds/milestone.mp3",
            CueKind::AtmosphereChange => "sounds/atmosphere-change.mp3",
            CueKind::SpaceReached => "sounds/space-reached.mp3",
        }
    }

    pub fn base_volume(self, volumes: &CueParams) -> f32 {
        match self {
            CueKind::Milestone => volumes.milestone_volume,
            CueKind::AtmosphereChange => volumes.atmosphere_change_volume,
            CueKind::SpaceReached => volumes.space_reached_volume,
        }
    }
}

/// Cue family for a crossing. The milestone whose threshold is exactly
/// `space_threshold` gets its own sound.
pub fn classify(crossing: &CrossingEvent, space_threshold: f64) -> CueKind {
    match crossing.key {
        CrossingKey::Atmosphere(_) => CueKind::AtmosphereChange,
        CrossingKey::Milestone(_) if crossing.threshold == space_threshold => {
            CueKind::SpaceReached
        }
        CrossingKey::Milestone(_) => CueKind::Milestone,
    }
}

/// Request for the audio layer to play a cue.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayCueEvent {
    pub kind: CueKind,
    /// Crossing that triggered the cue.
    pub key: CrossingKey,
    /// Final volume after the master level, in `[0, 1]`.
    pub volume: f32,
}

// =============================================================================
// Settings
// =============================================================================

/// Listener-side cue settings.
///
/// Muting only suppresses [`PlayCueEvent`]s. Crossings are still tracked, so
/// unmuting never replays a cue for a threshold already passed.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CueSettings {
    pub muted: bool,
    pub master_volume: f32,
}

impl Default for CueSettings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 1.0,
        }
    }
}

impl CueSettings {
    /// Volume a cue should play at, 0 when muted.
    pub fn effective_volume(&self, base: f32) -> f32 {
        if self.muted {
            return 0.0;
        }
        (self.master_volume * base).clamp(0.0, 1.0)
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Set master volume, clamped to `[0.0, 1.0]`.
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }
}

// =============================================================================
// System
// =============================================================================

pub(crate) fn emit_audio_cues(
    mut crossings: EventReader<CrossingEvent>,
    settings: Res<CueSettings>,
    params: Res<ElevatorParams>,
    mut cues: EventWriter<PlayCueEvent>,
) {
    for crossing in crossings.read() {
        if settings.muted {
            debug!("Muted, skipping cue for {}", crossing.key);
            continue;
        }
        let kind = classify(crossing, params.crossings.space_threshold);
        let volume = settings.effective_volume(kind.base_volume(&params.cues));
        debug!("Cue {:?} ({}) at volume {volume:.2}", kind, kind.asset());
        cues.send(PlayCueEvent {
            kind,
            key: crossing.key,
            volume,
        });
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct AudioCuesPlugin;

impl Plugin for AudioCuesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CueSettings>()
            .add_event::<PlayCueEvent>()
            .add_systems(Update, emit_audio_cues.in_set(crate::ElevatorSet::Cues));
    }
}

// =============================================================================
// Tests
// =============================================================================

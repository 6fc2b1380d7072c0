//! Decorative layer visibility: cloud deck, star field and parallax sets.

use bevy::prelude::*;

use crate::altitude::Altitude;
use crate::atmosphere::fade_progress;

/// The cloud deck starts fading here.
pub const CLOUD_FADE_START: f64 = 8_000.0;
/// No clouds above this altitude.
pub const CLOUD_CEILING: f64 = 10_000.0;
/// Stars start fading in here.
pub const STAR_FADE_START: f64 = 100_000.0;
pub const STAR_FADE_WIDTH: f64 = 10_000.0;

/// Parallax birds fly below this altitude.
pub const BIRD_CEILING: f64 = 8_000.0;
/// Parallax clouds drift below this altitude.
pub const PARALLAX_CLOUD_CEILING: f64 = 15_000.0;
/// Satellites and parallax stars appear above this altitude.
pub const ORBITAL_FLOOR: f64 = 100_000.0;

// =============================================================================
// Curves
// =============================================================================

/// Cloud deck opacity: solid low down, linear fade to clear at the ceiling.
pub fn cloud_opacity(altitude: f64) -> f64 {
    1.0 - fade_progress(altitude, CLOUD_FADE_START, CLOUD_CEILING - CLOUD_FADE_START)
}

/// Star field opacity: dark until the edge of space, then a linear fade-in.
pub fn star_opacity(altitude: f64) -> f64 {
    fade_progress(altitude, STAR_FADE_START, STAR_FADE_WIDTH)
}

/// Which parallax sets are on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParallaxSets {
    pub birds: bool,
    pub clouds: bool,
    pub satellites: bool,
    pub stars: bool,
}

pub fn parallax_sets(altitude: f64) -> ParallaxSets {
    let orbital = altitude > ORBITAL_FLOOR;
    ParallaxSets {
        birds: altitude < BIRD_CEILING,
        clouds: altitude < PARALLAX_CLOUD_CEILING,
        satellites: orbital,
        stars: orbital,
    }
}

// =============================================================================
// Resource + system
// =============================================================================

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SceneryState {
    pub cloud_opacity: f64,
    pub star_opacity: f64,
    pub parallax: ParallaxSets,
}

impl SceneryState {
    pub fn at(altitude: f64) -> Self {
        Self {
            cloud_opacity: cloud_opacity(altitude),
            star_opacity: star_opacity(altitude),
            parallax: parallax_sets(altitude),
        }
    }
}

impl Default for SceneryState {
    fn default() -> Self {
        Self::at(0.0)
    }
}

pub(crate) fn update_scenery(altitude: Res<Altitude>, mut scenery: ResMut<SceneryState>) {
    if !altitude.is_changed() {
        return;
    }
    let next = SceneryState::at(altitude.meters);
    if *scenery != next {
        *scenery = next;
    }
}

pub struct SceneryPlugin;

impl Plugin for SceneryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneryState>()
            .add_systems(Update, update_scenery.in_set(crate::ElevatorSet::Derive));
    }
}

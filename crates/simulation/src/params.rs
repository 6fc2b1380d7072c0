//! Data-driven elevator parameters.
//!
//! Collects every tunable of the height engine in a single [`ElevatorParams`]
//! resource so a host can override them from a JSON file without
//! recompiling. Missing fields fall back to the defaults in [`crate::config`].
//!
//! Systems read `Res<ElevatorParams>` instead of the module-level constants.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::atmosphere::AtmosphereBands;
use crate::config::{
    DESCENT_RESET_THRESHOLD, KEY_MILESTONES, LAYER_BOUNDARIES, MAX_ALTITUDE, MILESTONE_BUFFER,
    SHAFT_VIEWPORTS, SPACE_THRESHOLD, TRANSITION_SIZE,
};
use crate::error::ElevatorError;
use crate::milestones::{default_milestones, Milestone};
use crate::temperature::TemperatureProfile;

// ---------------------------------------------------------------------------
// Shaft
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaftParams {
    /// Altitude at the bottom of the scroll span, in meters.
    pub max_altitude: f64,
    /// Shaft length in viewport heights.
    pub shaft_viewports: f64,
}

impl Default for ShaftParams {
    fn default() -> Self {
        Self {
            max_altitude: MAX_ALTITUDE,
            shaft_viewports: SHAFT_VIEWPORTS,
        }
    }
}

// ---------------------------------------------------------------------------
// Atmosphere
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereParams {
    /// Upper edges of the first five layers.
    pub boundaries: [f64; 5],
    /// Cross-fade band width below each boundary.
    pub transition_size: f64,
}

impl Default for AtmosphereParams {
    fn default() -> Self {
        Self {
            boundaries: LAYER_BOUNDARIES,
            transition_size: TRANSITION_SIZE,
        }
    }
}

impl AtmosphereParams {
    pub fn bands(&self) -> AtmosphereBands {
        AtmosphereBands::new(self.boundaries)
    }
}

// ---------------------------------------------------------------------------
// Milestones
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MilestoneParams {
    pub table: Vec<Milestone>,
    /// How far ahead of the elevator a milestone becomes visible.
    pub buffer: f64,
}

impl Default for MilestoneParams {
    fn default() -> Self {
        Self {
            table: default_milestones(),
            buffer: MILESTONE_BUFFER,
        }
    }
}

// ---------------------------------------------------------------------------
// Crossings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossingParams {
    /// Milestone altitudes that fire a cue when crossed on the way up.
    pub key_milestones: Vec<f64>,
    /// Descent that clears the fired set.
    pub descent_reset_threshold: f64,
    /// Milestone altitude whose cue is the "space reached" sound.
    pub space_threshold: f64,
}

impl Default for CrossingParams {
    fn default() -> Self {
        Self {
            key_milestones: KEY_MILESTONES.to_vec(),
            descent_reset_threshold: DESCENT_RESET_THRESHOLD,
            space_threshold: SPACE_THRESHOLD,
        }
    }
}

// ---------------------------------------------------------------------------
// Cues
// ---------------------------------------------------------------------------

/// Base volume per cue family, in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CueParams {
    pub milestone_volume: f32,
    pub atmosphere_change_volume: f32,
    pub space_reached_volume: f32,
}

impl Default for CueParams {
    fn default() -> Self {
        Self {
            milestone_volume: 0.5,
            atmosphere_change_volume: 0.6,
            space_reached_volume: 0.7,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level resource
// ---------------------------------------------------------------------------

/// Every tunable of the height engine.
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevatorParams {
    pub shaft: ShaftParams,
    pub atmosphere: AtmosphereParams,
    pub temperature: TemperatureProfile,
    pub milestones: MilestoneParams,
    pub crossings: CrossingParams,
    pub cues: CueParams,
}

impl ElevatorParams {
    /// Parse and validate a JSON parameter set.
    pub fn from_json_str(json: &str) -> Result<Self, ElevatorError> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Read, parse and validate a JSON parameter file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ElevatorError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ElevatorError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ElevatorError> {
        let shaft = &self.shaft;
        if !(shaft.max_altitude.is_finite() && shaft.max_altitude > 0.0) {
            return Err(invalid(format!(
                "max_altitude must be positive, got {}",
                shaft.max_altitude
            )));
        }
        if !(shaft.shaft_viewports.is_finite() && shaft.shaft_viewports > 0.0) {
            return Err(invalid(format!(
                "shaft_viewports must be positive, got {}",
                shaft.shaft_viewports
            )));
        }

        self.validate_atmosphere()?;

        if !self.temperature.breakpoints().windows(2).all(|w| w[0] < w[1]) {
            return Err(invalid("temperature breakpoints must be ascending".to_string()));
        }

        check_non_negative("milestone buffer", self.milestones.buffer)?;
        let mut seen = BTreeSet::new();
        for milestone in &self.milestones.table {
            check_non_negative(&milestone.name, milestone.altitude)?;
            if !seen.insert(milestone.id()) {
                return Err(invalid(format!(
                    "duplicate milestone altitude {} ({})",
                    milestone.id().0,
                    milestone.name
                )));
            }
        }

        let crossings = &self.crossings;
        check_non_negative("descent_reset_threshold", crossings.descent_reset_threshold)?;
        check_non_negative("space_threshold", crossings.space_threshold)?;
        // Key milestone crossings are keyed by whole meter.
        let mut keys = BTreeMap::new();
        for &altitude in &crossings.key_milestones {
            check_non_negative("key milestone", altitude)?;
            if let Some(other) = keys.insert(altitude as u64, altitude) {
                return Err(invalid(format!(
                    "key milestones {other} and {altitude} share whole meter {}",
                    altitude as u64
                )));
            }
        }

        for (name, volume) in [
            ("milestone_volume", self.cues.milestone_volume),
            ("atmosphere_change_volume", self.cues.atmosphere_change_volume),
            ("space_reached_volume", self.cues.space_reached_volume),
        ] {
            if !(0.0..=1.0).contains(&volume) {
                return Err(invalid(format!("{name} must be in [0, 1], got {volume}")));
            }
        }

        Ok(())
    }

    fn validate_atmosphere(&self) -> Result<(), ElevatorError> {
        let boundaries = &self.atmosphere.boundaries;
        let transition = self.atmosphere.transition_size;
        check_non_negative("transition_size", transition)?;

        let mut start = 0.0;
        for &end in boundaries {
            if !(end.is_finite() && end > start) {
                return Err(invalid(format!(
                    "atmosphere boundaries must be strictly ascending, got {boundaries:?}"
                )));
            }
            if transition > end - start {
                return Err(invalid(format!(
                    "transition_size {transition} is wider than the band [{start}, {end})"
                )));
            }
            start = end;
        }
        Ok(())
    }
}

fn invalid(msg: String) -> ElevatorError {
    ElevatorError::InvalidParams(msg)
}

fn check_non_negative(name: &str, value: f64) -> Result<(), ElevatorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite and >= 0, got {value}")))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

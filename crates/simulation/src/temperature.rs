//! Air temperature as a piecewise function of altitude.
//!
//! The profile follows a simplified standard atmosphere: a linear lapse rate
//! through the troposphere, an isothermal layer, a warming stratosphere, a
//! cooling mesosphere, and a flat "space" value above. The bands are half-open
//! and the function is deliberately discontinuous at the band edges.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::altitude::Altitude;
use crate::params::ElevatorParams;

// =============================================================================
// Profile
// =============================================================================

/// Breakpoints and coefficients of the temperature profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureProfile {
    /// Temperature at altitude 0 (Celsius).
    pub surface_c: f64,
    /// Cooling per 1000 m inside the troposphere.
    pub lapse_rate_per_km: f64,
    /// End of the linear lapse band.
    pub tropopause: f64,
    /// End of the isothermal band.
    pub isothermal_top: f64,
    /// Temperature of the isothermal band.
    pub isothermal_c: f64,
    /// End of the warming band.
    pub stratopause: f64,
    /// Total warming across the warming band.
    pub stratosphere_warming_c: f64,
    /// Temperature at the start of the cooling band.
    pub mesosphere_base_c: f64,
    /// End of the cooling band; everything above is space.
    pub mesopause: f64,
    /// Total cooling across the cooling band.
    pub mesosphere_cooling_c: f64,
    /// Temperature above the mesopause.
    pub space_c: f64,
}

impl Default for TemperatureProfile {
    fn default() -> Self {
        Self {
            surface_c: 15.0,
            lapse_rate_per_km: 6.5,
            tropopause: 12_000.0,
            isothermal_top: 20_000.0,
            isothermal_c: -56.0,
            stratopause: 50_000.0,
            stratosphere_warming_c: 16.0,
            mesosphere_base_c: -40.0,
            mesopause: 85_000.0,
            mesosphere_cooling_c: 50.0,
            space_c: -270.0,
        }
    }
}

impl TemperatureProfile {
    /// Unrounded temperature in Celsius. First matching band wins.
    pub fn raw_celsius(&self, altitude: f64) -> f64 {
        if altitude < self.tropopause {
            self.surface_c - (altitude / 1000.0) * self.lapse_rate_per_km
        } else if altitude < self.isothermal_top {
            self.isothermal_c
        } else if altitude < self.stratopause {
            let span = self.stratopause - self.isothermal_top;
            self.isothermal_c + ((altitude - self.isothermal_top) / span) * self.stratosphere_warming_c
        } else if altitude < self.mesopause {
            let span = self.mesopause - self.stratopause;
            self.mesosphere_base_c - ((altitude - self.stratopause) / span) * self.mesosphere_cooling_c
        } else {
            self.space_c
        }
    }

    /// Temperature rounded to whole degrees, halves toward positive infinity.
    pub fn celsius(&self, altitude: f64) -> i32 {
        round_half_up(self.raw_celsius(altitude))
    }

    /// Breakpoints in ascending order.
    pub fn breakpoints(&self) -> [f64; 4] {
        [
            self.tropopause,
            self.isothermal_top,
            self.stratopause,
            self.mesopause,
        ]
    }
}

/// Temperature at `altitude` with the default profile.
pub fn temperature_at(altitude: f64) -> i32 {
    TemperatureProfile::default().celsius(altitude)
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

// =============================================================================
// Resource + system
// =============================================================================

/// Current readout temperature in whole degrees Celsius.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Temperature(pub i32);

impl Default for Temperature {
    fn default() -> Self {
        Self(TemperatureProfile::default().celsius(0.0))
    }
}

pub(crate) fn update_temperature(
    altitude: Res<Altitude>,
    params: Res<ElevatorParams>,
    mut temperature: ResMut<Temperature>,
) {
    if !altitude.is_changed() && !params.is_changed() {
        return;
    }
    let celsius = params.temperature.celsius(altitude.meters);
    if temperature.0 != celsius {
        temperature.0 = celsius;
    }
}

pub struct TemperaturePlugin;

impl Plugin for TemperaturePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Temperature>().add_systems(
            Update,
            update_temperature.in_set(crate::ElevatorSet::Derive),
        );
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_temperature() {
        assert_eq!(temperature_at(0.0), 15);
    }

    #[test]
    fn test_lapse_rate_inside_troposphere() {
        // 15 - 6 * 6.5 = -24
        assert_eq!(temperature_at(6_000.0), -24);
        // 15 - 1 * 6.5 = 8.5 rounds up to 9
        assert_eq!(temperature_at(1_000.0), 9);
    }

    #[test]
    fn test_band_starts() {
        assert_eq!(temperature_at(12_000.0), -56);
        assert_eq!(temperature_at(20_000.0), -56);
        assert_eq!(temperature_at(50_000.0), -40);
        assert_eq!(temperature_at(85_000.0), -270);
    }

    #[test]
    fn test_isothermal_band_is_flat() {
        assert_eq!(temperature_at(12_000.0), temperature_at(19_999.0));
    }

    #[test]
    fn test_warming_band_midpoint() {
        // -56 + 0.5 * 16 = -48
        assert_eq!(temperature_at(35_000.0), -48);
    }

    #[test]
    fn test_cooling_band_midpoint() {
        // -40 - 0.5 * 50 = -65
        assert_eq!(temperature_at(67_500.0), -65);
    }

    #[test]
    fn test_discontinuity_at_tropopause() {
        let below = TemperatureProfile::default().raw_celsius(11_999.999);
        let expected = 15.0 - 11.999_999 * 6.5;
        assert!((below - expected).abs() < 1e-9);
        assert_eq!(temperature_at(11_999.999), -63);
        assert_ne!(temperature_at(11_999.999), temperature_at(12_000.0));
    }

    #[test]
    fn test_discontinuity_at_mesopause() {
        assert_eq!(temperature_at(84_999.0), -90);
        assert_eq!(temperature_at(85_000.0), -270);
    }

    #[test]
    fn test_space_is_constant() {
        assert_eq!(temperature_at(1_000_000.0), -270);
        assert_eq!(temperature_at(36_000_000.0), -270);
    }

    #[test]
    fn test_half_rounds_toward_positive_infinity() {
        assert_eq!(round_half_up(-56.5), -56);
        assert_eq!(round_half_up(8.5), 9);
        assert_eq!(round_half_up(-0.4), 0);
    }

    #[test]
    fn test_breakpoints_ascending() {
        let bp = TemperatureProfile::default().breakpoints();
        assert!(bp.windows(2).all(|w| w[0] < w[1]));
    }
}

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::LAYER_BOUNDARIES;

// =============================================================================
// Layers
// =============================================================================

/// The six atmospheric regions, bottom to top.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AtmosphereLayer {
    #[default]
    Troposphere,
    Stratosphere,
    Mesosphere,
    Thermosphere,
    Exosphere,
    Space,
}

impl AtmosphereLayer {
    /// All layers in ascending order.
    pub const ALL: [AtmosphereLayer; 6] = [
        AtmosphereLayer::Troposphere,
        AtmosphereLayer::Stratosphere,
        AtmosphereLayer::Mesosphere,
        AtmosphereLayer::Thermosphere,
        AtmosphereLayer::Exosphere,
        AtmosphereLayer::Space,
    ];

    /// Position in [`AtmosphereLayer::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase key, used to build transition names.
    pub fn key(self) -> &'static str {
        match self {
            AtmosphereLayer::Troposphere => "troposphere",
            AtmosphereLayer::Stratosphere => "stratosphere",
            AtmosphereLayer::Mesosphere => "mesosphere",
            AtmosphereLayer::Thermosphere => "thermosphere",
            AtmosphereLayer::Exosphere => "exosphere",
            AtmosphereLayer::Space => "space",
        }
    }

    /// Human-readable name for the readout.
    pub fn name(self) -> &'static str {
        match self {
            AtmosphereLayer::Troposphere => "Troposphere",
            AtmosphereLayer::Stratosphere => "Stratosphere",
            AtmosphereLayer::Mesosphere => "Mesosphere",
            AtmosphereLayer::Thermosphere => "Thermosphere",
            AtmosphereLayer::Exosphere => "Exosphere",
            AtmosphereLayer::Space => "Outer Space",
        }
    }

    /// Sky gradient for the compositor as (top, bottom) sRGB.
    pub fn palette(self) -> ([u8; 3], [u8; 3]) {
        match self {
            AtmosphereLayer::Troposphere => ([0x62, 0xbf, 0xe6], [0xa7, 0xd3, 0xf2]),
            AtmosphereLayer::Stratosphere => ([0x2a, 0x48, 0x80], [0x6b, 0x8c, 0xc8]),
            AtmosphereLayer::Mesosphere => ([0x1a, 0x1a, 0x40], [0x53, 0x3b, 0x78]),
            AtmosphereLayer::Thermosphere => ([0x0a, 0x0a, 0x20], [0x20, 0x16, 0x37]),
            AtmosphereLayer::Exosphere => ([0x03, 0x03, 0x11], [0x0a, 0x0a, 0x22]),
            AtmosphereLayer::Space => ([0x00, 0x00, 0x00], [0x00, 0x00, 0x00]),
        }
    }

    /// The layer directly above, if any.
    pub fn next(self) -> Option<AtmosphereLayer> {
        Self::ALL.get(self.index() + 1).copied()
    }
}

// =============================================================================
// Transitions
// =============================================================================

/// A boundary between two adjacent layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AtmosphereTransition {
    TroposphereStratosphere,
    StratosphereMesosphere,
    MesosphereThermosphere,
    ThermosphereExosphere,
    ExosphereSpace,
}

impl AtmosphereTransition {
    /// All boundaries in ascending order.
    pub const ALL: [AtmosphereTransition; 5] = [
        AtmosphereTransition::TroposphereStratosphere,
        AtmosphereTransition::StratosphereMesosphere,
        AtmosphereTransition::MesosphereThermosphere,
        AtmosphereTransition::ThermosphereExosphere,
        AtmosphereTransition::ExosphereSpace,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Layer below the boundary.
    pub fn lower(self) -> AtmosphereLayer {
        AtmosphereLayer::ALL[self.index()]
    }

    /// Layer above the boundary.
    pub fn upper(self) -> AtmosphereLayer {
        AtmosphereLayer::ALL[self.index() + 1]
    }

    /// Stable key such as `"troposphere-stratosphere"`.
    pub fn name(self) -> &'static str {
        match self {
            AtmosphereTransition::TroposphereStratosphere => "troposphere-stratosphere",
            AtmosphereTransition::StratosphereMesosphere => "stratosphere-mesosphere",
            AtmosphereTransition::MesosphereThermosphere => "mesosphere-thermosphere",
            AtmosphereTransition::ThermosphereExosphere => "thermosphere-exosphere",
            AtmosphereTransition::ExosphereSpace => "exosphere-space",
        }
    }
}

// =============================================================================
// Bands
// =============================================================================

/// Altitude bands for the six layers, defined by five ascending boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereBands {
    pub boundaries: [f64; 5],
}

impl Default for AtmosphereBands {
    fn default() -> Self {
        Self {
            boundaries: LAYER_BOUNDARIES,
        }
    }
}

impl AtmosphereBands {
    pub fn new(boundaries: [f64; 5]) -> Self {
        Self { boundaries }
    }

    /// `[start, end)` of a layer; `end` is `None` for space.
    pub fn band(&self, layer: AtmosphereLayer) -> (f64, Option<f64>) {
        let i = layer.index();
        let start = if i == 0 { 0.0 } else { self.boundaries[i - 1] };
        (start, self.boundaries.get(i).copied())
    }

    /// Altitude of a layer boundary.
    pub fn boundary(&self, transition: AtmosphereTransition) -> f64 {
        self.boundaries[transition.index()]
    }

    /// Layer whose band contains `altitude`. Boundaries belong to the upper layer.
    pub fn layer_at(&self, altitude: f64) -> AtmosphereLayer {
        self.boundaries
            .iter()
            .position(|&end| altitude < end)
            .map_or(AtmosphereLayer::Space, |i| AtmosphereLayer::ALL[i])
    }
}

// =============================================================================
// Weights
// =============================================================================

/// Opacity weight per layer, indexed by [`AtmosphereLayer::index`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerWeights(pub [f64; 6]);

impl Default for LayerWeights {
    fn default() -> Self {
        Self::solid(AtmosphereLayer::Troposphere)
    }
}

impl LayerWeights {
    /// All weight on a single layer.
    pub fn solid(layer: AtmosphereLayer) -> Self {
        let mut weights = [0.0; 6];
        weights[layer.index()] = 1.0;
        Self(weights)
    }

    pub fn get(&self, layer: AtmosphereLayer) -> f64 {
        self.0[layer.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (AtmosphereLayer, f64)> + '_ {
        AtmosphereLayer::ALL.iter().map(|&l| (l, self.0[l.index()]))
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Number of layers with a non-zero weight.
    pub fn nonzero_count(&self) -> usize {
        self.0.iter().filter(|&&w| w > 0.0).count()
    }

    /// Heaviest layer. On an exact tie the lower layer wins.
    pub fn dominant(&self) -> AtmosphereLayer {
        let mut best = AtmosphereLayer::Troposphere;
        for (layer, weight) in self.iter() {
            if weight > self.get(best) {
                best = layer;
            }
        }
        best
    }
}

/// Current layer blend for the compositor.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct AtmosphereState {
    pub weights: LayerWeights,
    /// Layer whose band contains the current altitude.
    pub layer: AtmosphereLayer,
    /// Heaviest layer of `weights`. Leads `layer` through the upper half of a
    /// transition band.
    pub dominant: AtmosphereLayer,
}

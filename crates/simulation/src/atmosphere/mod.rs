//! Six-layer atmosphere blend.
//!
//! Maps altitude to an opacity weight per layer. Inside the transition band
//! just below each boundary two adjacent layers share the weight; everywhere
//! else exactly one layer is opaque.

mod calculations;
mod systems;
mod types;

pub use calculations::{blend, blend_with, fade_progress};
pub use systems::{update_atmosphere, AtmospherePlugin};
pub use types::{
    AtmosphereBands, AtmosphereLayer, AtmosphereState, AtmosphereTransition, LayerWeights,
};

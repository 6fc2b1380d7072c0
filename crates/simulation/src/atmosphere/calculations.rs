use crate::config::TRANSITION_SIZE;

use super::types::{AtmosphereBands, LayerWeights};

/// Blend weights at `altitude` with the default bands and transition width.
pub fn blend(altitude: f64) -> LayerWeights {
    blend_with(altitude, &AtmosphereBands::default(), TRANSITION_SIZE)
}

/// Blend weights at `altitude`.
///
/// The containing layer holds all the weight except inside the last
/// `transition_size` meters below its upper boundary, where it cross-fades
/// linearly into the layer above. Space has no upper boundary and never fades.
/// Negative and NaN altitudes are treated as ground level.
pub fn blend_with(altitude: f64, bands: &AtmosphereBands, transition_size: f64) -> LayerWeights {
    let altitude = if altitude.is_nan() { 0.0 } else { altitude.max(0.0) };
    let layer = bands.layer_at(altitude);
    let mut weights = LayerWeights::solid(layer);

    let (Some(end), Some(next)) = (bands.band(layer).1, layer.next()) else {
        return weights;
    };
    if transition_size <= 0.0 {
        return weights;
    }

    let fade_start = end - transition_size;
    if altitude > fade_start {
        let progress = fade_progress(altitude, fade_start, transition_size);
        weights.0[next.index()] = progress;
        weights.0[layer.index()] = 1.0 - progress;
    }
    weights
}

/// Linear progress through a fade band, clamped to `[0, 1]`.
pub fn fade_progress(altitude: f64, fade_start: f64, width: f64) -> f64 {
    ((altitude - fade_start) / width).clamp(0.0, 1.0)
}

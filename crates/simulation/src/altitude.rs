//! Scroll offset to altitude mapping.
//!
//! The host owns scrolling. It writes the raw offset and viewport height into
//! [`ScrollInput`]; this module converts that into the [`Altitude`] every other
//! derivation reads. The shaft length is locked the first time a viewport
//! height is seen and stays fixed for the rest of the session.

use bevy::prelude::*;

use crate::params::ElevatorParams;

// =============================================================================
// Pure mapping
// =============================================================================

/// Map a scroll offset onto `[0, max_altitude]`, floored to whole meters.
///
/// Offsets outside `[0, total_scroll_span]` (rubber-band overscroll) clamp to
/// the ends. A NaN offset or a non-positive span yields 0. The viewport height
/// is accepted for parity with the host's contract but does not enter the
/// formula; the span already encodes it.
pub fn altitude_from_scroll(
    scroll_offset: f64,
    _viewport_height: f64,
    total_scroll_span: f64,
    max_altitude: f64,
) -> f64 {
    if !(total_scroll_span > 0.0) || scroll_offset.is_nan() {
        return 0.0;
    }
    if scroll_offset <= 0.0 {
        return 0.0;
    }
    if scroll_offset >= total_scroll_span {
        return max_altitude;
    }
    (scroll_offset / total_scroll_span * max_altitude).floor()
}

/// Fixed dimensions of the scroll shaft for one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaftGeometry {
    pub viewport_height: f64,
    pub total_span: f64,
}

impl ShaftGeometry {
    /// Shaft `viewports` screens tall.
    pub fn new(viewport_height: f64, viewports: f64) -> Self {
        Self {
            viewport_height,
            total_span: viewport_height * viewports,
        }
    }

    /// Altitude for a scroll offset inside this shaft.
    pub fn altitude(&self, scroll_offset: f64, max_altitude: f64) -> f64 {
        altitude_from_scroll(
            scroll_offset,
            self.viewport_height,
            self.total_span,
            max_altitude,
        )
    }

    /// Scroll offset that lands on `altitude`, clamped to the shaft.
    ///
    /// Because the forward mapping floors, `altitude(scroll_offset_for(a))` can
    /// land up to one meter below `a`.
    pub fn scroll_offset_for(&self, altitude: f64, max_altitude: f64) -> f64 {
        if !(max_altitude > 0.0) || altitude.is_nan() {
            return 0.0;
        }
        (altitude / max_altitude * self.total_span).clamp(0.0, self.total_span)
    }
}

// =============================================================================
// Resources
// =============================================================================

/// Raw scroll state written by the host each frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollInput {
    /// Vertical scroll offset in pixels.
    pub offset: f64,
    /// Viewport height in pixels.
    pub viewport_height: f64,
}

/// Shaft geometry, locked on the first usable viewport height.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct Shaft {
    geometry: Option<ShaftGeometry>,
}

impl Shaft {
    pub fn geometry(&self) -> Option<ShaftGeometry> {
        self.geometry
    }

    /// Lock the geometry if it is not locked yet. Returns true when this call locked it.
    pub fn lock(&mut self, viewport_height: f64, viewports: f64) -> bool {
        if self.geometry.is_some() || !(viewport_height > 0.0) {
            return false;
        }
        self.geometry = Some(ShaftGeometry::new(viewport_height, viewports));
        true
    }
}

/// Current altitude in whole meters.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct Altitude {
    pub meters: f64,
}

impl Altitude {
    pub fn whole_meters(&self) -> u64 {
        self.meters as u64
    }
}

// =============================================================================
// System
// =============================================================================

/// Converts the host's scroll input into the current altitude.
pub(crate) fn map_altitude(
    input: Res<ScrollInput>,
    params: Res<ElevatorParams>,
    mut shaft: ResMut<Shaft>,
    mut altitude: ResMut<Altitude>,
) {
    if !input.is_changed() && !params.is_changed() {
        return;
    }

    if shaft.lock(input.viewport_height, params.shaft.shaft_viewports) {
        if let Some(geometry) = shaft.geometry() {
            info!(
                "Shaft locked: viewport {}px, span {}px",
                geometry.viewport_height, geometry.total_span
            );
        }
    } else if let Some(geometry) = shaft.geometry() {
        if input.viewport_height != geometry.viewport_height {
            debug!(
                "Viewport changed to {}px mid-session; keeping shaft span {}px",
                input.viewport_height, geometry.total_span
            );
        }
    }

    let Some(geometry) = shaft.geometry() else {
        return;
    };

    let meters = geometry.altitude(input.offset, params.shaft.max_altitude);
    if altitude.meters != meters {
        altitude.meters = meters;
    }
}

// =============================================================================
// Plugin
// =============================================================================

pub struct AltitudePlugin;

impl Plugin for AltitudePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScrollInput>()
            .init_resource::<Shaft>()
            .init_resource::<Altitude>()
            .add_systems(Update, map_altitude.in_set(crate::ElevatorSet::Input));
    }
}

// =============================================================================
// Tests
// =============================================================================

/// Top of the shaft in meters. The scroll span maps linearly onto `[0, MAX_ALTITUDE]`.
pub const MAX_ALTITUDE: f64 = 36_000_000.0;

/// Shaft length as a multiple of the viewport height.
pub const SHAFT_VIEWPORTS: f64 = 300.0;

/// Width of the cross-fade band below each atmosphere boundary, in meters.
pub const TRANSITION_SIZE: f64 = 3_000.0;

/// Milestones appear this many meters before the elevator reaches them.
pub const MILESTONE_BUFFER: f64 = 1_000.0;

/// A drop larger than this between two samples clears the fired-cue memory.
pub const DESCENT_RESET_THRESHOLD: f64 = 5_000.0;

/// Kármán line. The milestone cue at this altitude uses the "space reached" sound.
pub const SPACE_THRESHOLD: f64 = 100_000.0;

/// Upper edges of the first five atmosphere layers, ascending. Space is unbounded.
pub const LAYER_BOUNDARIES: [f64; 5] = [12_000.0, 50_000.0, 85_000.0, 500_000.0, 10_000_000.0];

/// Altitudes whose crossing plays a milestone cue.
pub const KEY_MILESTONES: [f64; 7] = [
    1_000.0,
    8_849.0,
    10_000.0,
    100_000.0,
    400_000.0,
    420_000.0,
    35_786_000.0,
];

/// Width of the on-screen altitude counter.
pub const COUNTER_DIGITS: usize = 6;

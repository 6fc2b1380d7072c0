//! Per-frame ordering of the height engine via `SystemSet` phases.
//!
//! Every engine system runs in `Update` inside one of these sets. The sets
//! are chained, so within a frame the altitude is mapped before anything
//! derives from it, and cues are emitted after the crossings that cause them.
//!
//! ```text
//! Input  →  Derive  →  Track  →  Cues
//! ```
//!
//! * **Input** – Scroll offset to altitude, parameter sync into the tracker.
//! * **Derive** – Pure readouts of the altitude: temperature, atmosphere
//!   blend, milestone visibility, scenery.
//! * **Track** – Stateful edge detection: threshold crossings, summit gate.
//! * **Cues** – Consumers of crossing events (audio cue classification).
//!   Only these read events produced earlier in the same frame.

use bevy::prelude::*;

/// Ordered phases for elevator systems in the `Update` schedule.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElevatorSet {
    /// Host input to altitude.
    Input,
    /// Stateless derivations of the current altitude.
    Derive,
    /// Crossing and summit detection.
    Track,
    /// Event consumers.
    Cues,
}

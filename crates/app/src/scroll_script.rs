//! Scripted scroll sessions for the headless host.
//!
//! A script is a precomputed list of scroll offsets, one per frame. The
//! driver writes the next offset into `ScrollInput` each frame and asks the
//! app to exit once the list runs out.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use simulation::altitude::ScrollInput;

/// Which session to replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    /// Steady climb from the ground to the top of the shaft.
    Ascent,
    /// Seeded random scrolling with occasional long drops.
    Wander(u64),
}

/// Offsets still to be played back.
#[derive(Resource, Debug, Clone)]
pub struct ScrollScript {
    offsets: Vec<f64>,
    cursor: usize,
    /// Frames to keep running after the last offset so events drain.
    cooldown_frames: u32,
}

impl ScrollScript {
    pub fn new(kind: ScriptKind, total_span: f64, frames: usize) -> Self {
        let offsets = match kind {
            ScriptKind::Ascent => ascent_offsets(total_span, frames),
            ScriptKind::Wander(seed) => wander_offsets(total_span, frames, seed),
        };
        Self {
            offsets,
            cursor: 0,
            cooldown_frames: 3,
        }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Next offset to play, advancing the cursor.
    pub fn next_offset(&mut self) -> Option<f64> {
        let offset = self.offsets.get(self.cursor).copied();
        if offset.is_some() {
            self.cursor += 1;
        }
        offset
    }
}

/// Evenly spaced offsets from just above the ground to the bottom of the span.
pub fn ascent_offsets(total_span: f64, frames: usize) -> Vec<f64> {
    if frames == 0 {
        return Vec::new();
    }
    (1..=frames)
        .map(|i| total_span * i as f64 / frames as f64)
        .collect()
}

/// Random walk biased upward, with a rare fall back toward the ground.
///
/// Steps can overshoot both ends of the span to mimic rubber-band overscroll.
pub fn wander_offsets(total_span: f64, frames: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let step = total_span / 200.0;
    let overscroll = total_span * 0.01;
    let mut offset = 0.0_f64;
    let mut offsets = Vec::with_capacity(frames);
    for _ in 0..frames {
        if rng.gen_bool(0.02) {
            offset *= rng.gen_range(0.0..0.5);
        } else {
            offset += rng.gen_range(-step..2.0 * step);
        }
        offset = offset.clamp(-overscroll, total_span + overscroll);
        offsets.push(offset);
    }
    offsets
}

/// Feeds the script into the engine and exits after the cooldown.
pub fn drive_scroll(
    mut script: ResMut<ScrollScript>,
    mut input: ResMut<ScrollInput>,
    mut exit: EventWriter<AppExit>,
) {
    if let Some(offset) = script.next_offset() {
        input.offset = offset;
        return;
    }
    if script.cooldown_frames == 0 {
        info!("Scroll script finished after {} frames", script.len());
        exit.send(AppExit::Success);
        return;
    }
    script.cooldown_frames -= 1;
}

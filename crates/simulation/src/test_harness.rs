//! # TestElevator: headless harness for the height engine
//!
//! Wraps `bevy::app::App` + `ElevatorPlugin` so tests and benches can drive
//! the engine frame by frame without a window, and records every event the
//! engine publishes.

use bevy::app::App;
use bevy::prelude::*;

use crate::altitude::{Altitude, ScrollInput, Shaft};
use crate::atmosphere::AtmosphereState;
use crate::audio_cues::{CueSettings, PlayCueEvent};
use crate::crossings::{CrossingEvent, CrossingTracker};
use crate::milestones::MilestoneBoard;
use crate::params::ElevatorParams;
use crate::summit::{SummitEvent, SummitState};
use crate::temperature::Temperature;
use crate::ElevatorPlugin;

/// Viewport height used unless a test picks another.
pub const TEST_VIEWPORT_HEIGHT: f64 = 1_000.0;

/// A headless Bevy App wrapping `ElevatorPlugin`.
pub struct TestElevator {
    app: App,
    crossings: Vec<CrossingEvent>,
    cues: Vec<PlayCueEvent>,
    summit_events: Vec<SummitEvent>,
}

impl Default for TestElevator {
    fn default() -> Self {
        Self::new()
    }
}

impl TestElevator {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Default parameters, shaft locked on a 1000px viewport, at ground level.
    pub fn new() -> Self {
        Self::with_params(ElevatorParams::default())
    }

    /// Custom parameters, inserted before the plugin is built.
    pub fn with_params(params: ElevatorParams) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(params);
        app.add_plugins(ElevatorPlugin);
        app.insert_resource(ScrollInput {
            offset: 0.0,
            viewport_height: TEST_VIEWPORT_HEIGHT,
        });

        let mut elevator = Self {
            app,
            crossings: Vec::new(),
            cues: Vec::new(),
            summit_events: Vec::new(),
        };
        // Startup systems run and the shaft locks.
        elevator.tick(1);
        elevator
    }

    /// Start muted.
    pub fn muted(mut self) -> Self {
        self.app.world_mut().resource_mut::<CueSettings>().muted = true;
        self
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Run N frames, collecting events after each.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
            self.collect_events();
        }
    }

    /// Set the raw scroll offset and run one frame.
    pub fn scroll_to(&mut self, offset: f64) {
        self.app.world_mut().resource_mut::<ScrollInput>().offset = offset;
        self.tick(1);
    }

    /// Change the reported viewport height and run one frame.
    pub fn resize_viewport(&mut self, viewport_height: f64) {
        self.app
            .world_mut()
            .resource_mut::<ScrollInput>()
            .viewport_height = viewport_height;
        self.tick(1);
    }

    /// Scroll so the floored altitude lands on `meters` (a whole number).
    pub fn ascend_to(&mut self, meters: f64) {
        let max_altitude = self.params().shaft.max_altitude;
        let Some(geometry) = self.resource::<Shaft>().geometry() else {
            panic!("shaft is not locked; set a viewport height first");
        };
        // Half a meter of headroom absorbs the rounding in the inverse.
        let offset = geometry.scroll_offset_for(meters + 0.5, max_altitude);
        self.scroll_to(offset);
    }

    /// Visit each altitude in turn, one frame per stop.
    pub fn ride(&mut self, stops: &[f64]) {
        for &meters in stops {
            self.ascend_to(meters);
        }
    }

    fn collect_events(&mut self) {
        let world = self.app.world_mut();
        self.crossings
            .extend(world.resource_mut::<Events<CrossingEvent>>().drain());
        self.cues
            .extend(world.resource_mut::<Events<PlayCueEvent>>().drain());
        self.summit_events
            .extend(world.resource_mut::<Events<SummitEvent>>().drain());
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    /// Get a reference to any resource.
    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn params(&self) -> &ElevatorParams {
        self.resource::<ElevatorParams>()
    }

    pub fn altitude(&self) -> f64 {
        self.resource::<Altitude>().meters
    }

    pub fn temperature(&self) -> i32 {
        self.resource::<Temperature>().0
    }

    pub fn atmosphere(&self) -> &AtmosphereState {
        self.resource::<AtmosphereState>()
    }

    pub fn milestones(&self) -> &MilestoneBoard {
        self.resource::<MilestoneBoard>()
    }

    pub fn tracker(&self) -> &CrossingTracker {
        self.resource::<CrossingTracker>()
    }

    pub fn summit(&self) -> &SummitState {
        self.resource::<SummitState>()
    }

    /// Every crossing event seen so far.
    pub fn crossings(&self) -> &[CrossingEvent] {
        &self.crossings
    }

    /// Every cue event seen so far.
    pub fn cues(&self) -> &[PlayCueEvent] {
        &self.cues
    }

    pub fn summit_events(&self) -> &[SummitEvent] {
        &self.summit_events
    }

    /// Forget recorded events.
    pub fn clear_events(&mut self) {
        self.crossings.clear();
        self.cues.clear();
        self.summit_events.clear();
    }

    /// Assert a resource has been initialized.
    pub fn assert_resource_exists<T: Resource>(&self) {
        assert!(
            self.app.world().get_resource::<T>().is_some(),
            "Expected resource {} to exist",
            std::any::type_name::<T>()
        );
    }
}

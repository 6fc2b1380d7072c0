//! Integration tests for the height engine using the `TestElevator` harness.
//!
//! These spin up a headless Bevy App with `ElevatorPlugin` and check the
//! resources and events the engine publishes across whole scroll sessions.

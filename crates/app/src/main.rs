//! Headless host for the space elevator engine.
//!
//! Replays a scripted scroll session through `ElevatorPlugin` and logs the
//! readouts, milestones, cues and summit events a presentation layer would
//! render.

mod scroll_script;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::altitude::{Altitude, ScrollInput, ShaftGeometry};
use simulation::atmosphere::AtmosphereState;
use simulation::audio_cues::PlayCueEvent;
use simulation::milestones::MilestoneBoard;
use simulation::readout::{format_altitude_counter, format_temperature};
use simulation::summit::SummitEvent;
use simulation::temperature::Temperature;
use simulation::{ElevatorParams, ElevatorPlugin, ElevatorSet};

use scroll_script::{drive_scroll, ScriptKind, ScrollScript};

/// Headless viewport height in pixels.
const VIEWPORT_HEIGHT: f64 = 1_000.0;
const DEFAULT_FRAMES: usize = 600;
/// Log the readout every this many frames.
const READOUT_INTERVAL: u32 = 30;

#[derive(Parser, Debug)]
#[command(name = "space-elevator", about = "Headless replay of a space elevator ride")]
struct HostOptions {
    /// Replace the steady climb with a seeded random walk.
    #[arg(long, value_name = "SEED", conflicts_with = "ascent")]
    wander: Option<u64>,

    /// Steady climb from ground to summit (the default).
    #[arg(long)]
    ascent: bool,

    /// Number of scripted frames before the host exits.
    #[arg(long, default_value_t = DEFAULT_FRAMES)]
    frames: usize,

    /// JSON parameter file overriding the built-in defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl HostOptions {
    fn script(&self) -> ScriptKind {
        match (self.ascent, self.wander) {
            (false, Some(seed)) => ScriptKind::Wander(seed),
            _ => ScriptKind::Ascent,
        }
    }
}

/// Script sized to the shaft the engine will lock for these params.
fn script_for(options: &HostOptions, params: &ElevatorParams) -> ScrollScript {
    let geometry = ShaftGeometry::new(VIEWPORT_HEIGHT, params.shaft.shaft_viewports);
    ScrollScript::new(options.script(), geometry.total_span, options.frames)
}

fn main() -> ExitCode {
    let options = HostOptions::parse();

    let params = match &options.config {
        Some(path) => match ElevatorParams::load(path) {
            Ok(params) => params,
            Err(e) => {
                eprintln!("space-elevator: {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => ElevatorParams::default(),
    };

    let script = script_for(&options, &params);

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        ))),
        LogPlugin::default(),
    ))
    .insert_resource(params)
    .add_plugins(ElevatorPlugin)
    .insert_resource(ScrollInput {
        offset: 0.0,
        viewport_height: VIEWPORT_HEIGHT,
    })
    .insert_resource(script)
    .add_systems(Update, drive_scroll.before(ElevatorSet::Input))
    .add_systems(
        Update,
        (log_readout, log_cues, log_summit).after(ElevatorSet::Cues),
    );

    match app.run() {
        AppExit::Success => ExitCode::SUCCESS,
        AppExit::Error(_) => ExitCode::FAILURE,
    }
}

// ---------------------------------------------------------------------------
// Presentation stand-ins
// ---------------------------------------------------------------------------

fn log_readout(
    mut frame: Local<u32>,
    altitude: Res<Altitude>,
    temperature: Res<Temperature>,
    atmosphere: Res<AtmosphereState>,
    board: Res<MilestoneBoard>,
    params: Res<ElevatorParams>,
) {
    *frame += 1;

    for id in &board.newly_visible {
        if let Some(milestone) = params.milestones.table.iter().find(|m| m.id() == *id) {
            info!(
                "Milestone in view: {} ({}), {} m",
                milestone.name, milestone.description, id.0
            );
        }
    }

    if *frame % READOUT_INTERVAL == 0 {
        info!(
            "{} m | {} | {}",
            format_altitude_counter(altitude.meters),
            format_temperature(temperature.0),
            atmosphere.layer.name()
        );
    }
}

fn log_cues(mut cues: EventReader<PlayCueEvent>) {
    for cue in cues.read() {
        info!(
            "Cue {} -> {} at volume {:.2}",
            cue.key,
            cue.kind.asset(),
            cue.volume
        );
    }
}

fn log_summit(mut events: EventReader<SummitEvent>) {
    for event in events.read() {
        match event {
            SummitEvent::Reached => info!("Top of the elevator reached"),
            SummitEvent::Left => info!("Leaving the top of the elevator"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &[&str]) -> Result<HostOptions, clap::Error> {
        HostOptions::try_parse_from(std::iter::once("space-elevator").chain(list.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let options = parse(&[]).expect("no args is valid");
        assert_eq!(options.script(), ScriptKind::Ascent);
        assert_eq!(options.frames, DEFAULT_FRAMES);
        assert_eq!(options.config, None);
    }

    #[test]
    fn test_explicit_ascent() {
        let options = parse(&["--ascent", "--frames", "10"]).expect("valid args");
        assert_eq!(options.script(), ScriptKind::Ascent);
        assert_eq!(options.frames, 10);
    }

    #[test]
    fn test_wander_with_seed_and_config() {
        let options = parse(&["--wander", "9", "--config", "p.json", "--frames", "50"])
            .expect("valid args");
        assert_eq!(options.script(), ScriptKind::Wander(9));
        assert_eq!(options.frames, 50);
        assert_eq!(options.config, Some(PathBuf::from("p.json")));
    }

    #[test]
    fn test_bad_args() {
        assert!(parse(&["--wander"]).is_err());
        assert!(parse(&["--wander", "x"]).is_err());
        assert!(parse(&["--frames", "-1"]).is_err());
        assert!(parse(&["--fly"]).is_err());
        assert!(parse(&["--ascent", "--wander", "3"]).is_err());
    }

    #[test]
    fn test_ascent_script_ends_at_max_altitude() {
        let mut params = ElevatorParams::default();
        params.shaft.shaft_viewports = 240.0;
        let options = parse(&["--frames", "4"]).expect("valid args");
        let mut script = script_for(&options, &params);

        let mut last = None;
        while let Some(offset) = script.next_offset() {
            last = Some(offset);
        }
        let geometry = ShaftGeometry::new(VIEWPORT_HEIGHT, 240.0);
        let last = last.expect("four frames were scripted");
        assert_eq!(last, 240_000.0);
        assert_eq!(
            geometry.altitude(last, params.shaft.max_altitude),
            params.shaft.max_altitude
        );
    }

    #[test]
    fn test_command_definition_is_consistent() {
        use clap::CommandFactory;
        HostOptions::command().debug_assert();
    }
}

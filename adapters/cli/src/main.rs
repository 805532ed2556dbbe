#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Hidden Maze in a terminal.

mod config;
mod scene;
mod terminal;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use hidden_maze_core::{Command, Event, WELCOME_BANNER};
use hidden_maze_rendering::{
    FrameInput, Presentation, RenderingBackend, Scene, WALK_FRAME_DURATION,
};
use hidden_maze_world::{self as world, World};

use crate::{config::ConfigFile, terminal::TerminalBackend};

/// Command-line arguments for the Hidden Maze terminal game.
#[derive(Debug, Parser)]
#[command(name = "hidden-maze", version, about = "Navigate mazes whose walls vanish.")]
struct CliArgs {
    /// TOML file overriding session options and game rules.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for maze generation; overrides the configuration file.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Raises log verbosity; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Entry point for the Hidden Maze command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let seed = args
        .seed
        .or(config.session.seed)
        .unwrap_or_else(rand::random);
    log::info!("starting run with seed {seed}");

    let mut world = World::new(config.rules, seed).context("failed to start the run")?;
    let mut events = Vec::new();

    let stdin = io::stdin();
    let backend = TerminalBackend::new(stdin.lock(), io::stdout(), WALK_FRAME_DURATION);
    let presentation = Presentation::new(
        format!("{WELCOME_BANNER} (seed {seed})"),
        scene::capture(&world),
    );

    backend.run(presentation, |dt, input, scene| {
        play_frame(&mut world, &mut events, dt, input, scene);
    })
}

fn play_frame(
    world: &mut World,
    events: &mut Vec<Event>,
    dt: Duration,
    input: FrameInput,
    scene: &mut Scene,
) {
    events.clear();
    world::apply(world, Command::Tick { dt }, events);
    for command in commands_for(input) {
        log::debug!("applying {command:?}");
        world::apply(world, command, events);
    }
    scene::refresh(scene, world, events);
}

fn commands_for(input: FrameInput) -> Vec<Command> {
    let mut commands = Vec::new();
    if input.quit {
        commands.push(Command::Quit);
        return commands;
    }
    if input.reveal {
        commands.push(Command::ActivateReveal);
    }
    if let Some(direction) = input.probe {
        commands.push(Command::ProbeDirection { direction });
    }
    if let Some(text) = input.submitted_command {
        commands.push(Command::SubmitCommand { text });
    }
    commands
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    let _ = builder.filter_level(level).parse_default_env();
    if let Err(error) = builder.try_init() {
        eprintln!("logger already initialised: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hidden_maze_core::{Direction, Phase, Rules};

    #[test]
    fn quitting_ignores_the_rest_of_the_frame() {
        let input = FrameInput {
            submitted_command: Some("W".to_owned()),
            reveal: true,
            quit: true,
            ..FrameInput::default()
        };

        assert_eq!(commands_for(input), vec![Command::Quit]);
    }

    #[test]
    fn frame_inputs_become_commands_in_order() {
        let input = FrameInput {
            submitted_command: Some("W2".to_owned()),
            probe: Some(Direction::East),
            reveal: true,
            quit: false,
        };

        assert_eq!(
            commands_for(input),
            vec![
                Command::ActivateReveal,
                Command::ProbeDirection {
                    direction: Direction::East
                },
                Command::SubmitCommand {
                    text: "W2".to_owned()
                },
            ]
        );
    }

    #[test]
    fn frames_advance_time_before_commands() {
        let mut world = World::new(Rules::default(), 11).expect("valid rules");
        let mut scene = scene::capture(&world);
        let mut events = Vec::new();

        play_frame(
            &mut world,
            &mut events,
            Duration::from_secs(6),
            FrameInput {
                submitted_command: Some("X".to_owned()),
                ..FrameInput::default()
            },
            &mut scene,
        );

        assert_eq!(events.first(), Some(&Event::WallsHidden));
        assert!(!scene.walls_visible);
        assert_eq!(
            scene.messages.last(),
            Some(&"Invalid move 'X' at position 1.".to_owned())
        );
        assert_eq!(scene.hud.attempts, 4);
    }

    #[test]
    fn quit_frame_ends_the_session() {
        let mut world = World::new(Rules::default(), 11).expect("valid rules");
        let mut scene = scene::capture(&world);
        let mut events = Vec::new();

        play_frame(
            &mut world,
            &mut events,
            Duration::ZERO,
            FrameInput {
                quit: true,
                ..FrameInput::default()
            },
            &mut scene,
        );

        assert_eq!(scene.phase, Phase::Abandoned);
        assert_eq!(scene.messages.last(), Some(&"Goodbye.".to_owned()));
    }
}

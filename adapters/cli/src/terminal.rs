//! Line-oriented terminal backend.
//!
//! Each input line is one frame: an empty line only lets time pass, `?W`
//! style lines probe a direction, `!` spends a reveal hint, and anything else
//! is submitted as a movement command.

use std::{
    fmt::Write as _,
    io::{self, BufRead, Write},
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result as AnyResult};
use hidden_maze_core::{CellCoord, Direction, Phase};
use glam::Vec2;
use hidden_maze_rendering::{
    Cue, FrameInput, MoveAnimation, Presentation, RenderingBackend, Scene, WALK_FRAME_DURATION,
};
use hidden_maze_system_interpreter::{parse_probe, ParseError};

/// Renders scenes as ASCII art and reads one command per line.
#[derive(Debug)]
pub(crate) struct TerminalBackend<R, W> {
    input: R,
    output: W,
    frame_delay: Duration,
}

impl<R, W> TerminalBackend<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Creates a backend reading from `input` and drawing into `output`.
    ///
    /// `frame_delay` is the real time waited between animation frames.
    pub(crate) fn new(input: R, output: W, frame_delay: Duration) -> Self {
        Self {
            input,
            output,
            frame_delay,
        }
    }
}

impl<R, W> RenderingBackend for TerminalBackend<R, W>
where
    R: BufRead,
    W: Write,
{
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene),
    {
        let Presentation { title, mut scene } = presentation;
        writeln!(self.output, "{title}")?;
        writeln!(
            self.output,
            "Moves: W/A/S/D with optional counts (e.g. W3D2). Probe: ?W. Reveal: !. Quit: quit."
        )?;
        draw(&mut self.output, &mut scene, self.frame_delay)?;

        let mut last_frame = Instant::now();
        let mut line = String::new();
        while !scene.phase.is_terminal() {
            write!(self.output, "> ")?;
            self.output.flush()?;

            line.clear();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read from the terminal")?;
            if read == 0 {
                log::debug!("input closed, leaving the session");
                break;
            }

            let input = match parse_line(&line) {
                Ok(input) => input,
                Err(error) => {
                    writeln!(self.output, "Unknown direction: {error}")?;
                    continue;
                }
            };

            let now = Instant::now();
            let dt = now.duration_since(last_frame);
            last_frame = now;

            update_scene(dt, input, &mut scene);
            draw(&mut self.output, &mut scene, self.frame_delay)?;
        }

        self.output.flush()?;
        Ok(())
    }
}

/// Interprets one line of terminal input.
pub(crate) fn parse_line(line: &str) -> Result<FrameInput, ParseError> {
    let trimmed = line.trim();
    let mut input = FrameInput::default();

    if trimmed.is_empty() {
        return Ok(input);
    }

    if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
        input.quit = true;
    } else if trimmed == "!" || trimmed.eq_ignore_ascii_case("reveal") {
        input.reveal = true;
    } else if let Some(direction) = trimmed.strip_prefix('?') {
        input.probe = Some(parse_probe(direction.trim())?);
    } else {
        input.submitted_command = Some(trimmed.to_owned());
    }

    Ok(input)
}

fn draw<W: Write>(output: &mut W, scene: &mut Scene, frame_delay: Duration) -> io::Result<()> {
    play(output, &scene.animations, frame_delay)?;
    for trail in trails(&scene.animations) {
        writeln!(output, "  moved {trail}")?;
    }
    scene.animations.clear();

    while let Some(cue) = scene.cues.next_when_idle(false) {
        let sound = match cue {
            Cue::Wall => "*thud* a wall blocks that way",
            Cue::Path => "*chime* the way is open",
        };
        writeln!(output, "  {sound}")?;
    }

    for message in scene.messages.drain(..) {
        writeln!(output, "{message}")?;
    }

    write!(output, "{}", render_grid(scene))?;
    writeln!(output, "{}", render_hud(scene))
}

const WALK_GLYPHS: [char; 6] = ['.', 'o', 'O', '@', 'O', 'o'];

/// Plays `animations` in order on a single, repeatedly overwritten line.
fn play<W: Write>(
    output: &mut W,
    animations: &[MoveAnimation],
    frame_delay: Duration,
) -> io::Result<()> {
    if animations.is_empty() {
        return Ok(());
    }

    for animation in animations {
        let mut elapsed = Duration::ZERO;
        loop {
            write!(output, "\r  {}", walk_frame(animation, elapsed))?;
            output.flush()?;
            if animation.is_finished(elapsed) {
                break;
            }
            if !frame_delay.is_zero() {
                thread::sleep(frame_delay);
            }
            elapsed += WALK_FRAME_DURATION;
        }
    }

    writeln!(output)
}

/// Describes one sampled animation frame, in cell coordinates.
fn walk_frame(animation: &MoveAnimation, elapsed: Duration) -> String {
    let position = animation.position_at(elapsed) - Vec2::splat(0.5);
    let frame = animation.frame_at(elapsed) as usize;
    let glyph = WALK_GLYPHS.get(frame).copied().unwrap_or('@');
    format!(
        "{} {glyph} ({:.1}, {:.1})",
        animation.direction.key(),
        position.x,
        position.y
    )
}

/// Formats queued animations as cell trails, one per uninterrupted move.
fn trails(animations: &[MoveAnimation]) -> Vec<String> {
    let mut trails: Vec<String> = Vec::new();
    let mut previous: Option<(Direction, CellCoord)> = None;

    for animation in animations {
        if previous != Some((animation.direction, animation.from)) {
            trails.push(format!(
                "{} {}",
                animation.direction.key(),
                cell_label(animation.from)
            ));
        }
        if let Some(trail) = trails.last_mut() {
            let _ = write!(trail, " -> {}", cell_label(animation.to));
        }
        previous = Some((animation.direction, animation.to));
    }

    trails
}

fn cell_label(cell: CellCoord) -> String {
    format!("({}, {})", cell.column(), cell.row())
}

fn marker(scene: &Scene, cell: CellCoord) -> char {
    if cell == scene.player {
        '@'
    } else if cell == scene.end {
        'E'
    } else if scene.red_pickup == Some(cell) {
        'r'
    } else if scene.green_pickup == Some(cell) {
        'g'
    } else {
        ' '
    }
}

/// Draws the maze, showing interior walls only while they are visible.
pub(crate) fn render_grid(scene: &Scene) -> String {
    let maze = &scene.maze;
    let columns = maze.columns();
    let rows = maze.rows();
    let interior = |cell: CellCoord, direction: Direction| {
        scene.walls_visible && maze.has_wall(cell, direction)
    };

    let mut grid = String::new();
    grid.push('+');
    for _ in 0..columns {
        grid.push_str("---+");
    }
    grid.push('\n');

    for row in 0..rows {
        grid.push('|');
        for column in 0..columns {
            let cell = CellCoord::new(column, row);
            grid.push(' ');
            grid.push(marker(scene, cell));
            grid.push(' ');
            let east = column + 1 == columns || interior(cell, Direction::East);
            grid.push(if east { '|' } else { ' ' });
        }
        grid.push('\n');

        grid.push('+');
        for column in 0..columns {
            let cell = CellCoord::new(column, row);
            let south = row + 1 == rows || interior(cell, Direction::South);
            grid.push_str(if south { "---+" } else { "   +" });
        }
        grid.push('\n');
    }

    grid
}

fn render_hud(scene: &Scene) -> String {
    let walls = match scene.phase {
        Phase::WallsVisible => "walls visible",
        Phase::WallsHidden => "walls hidden",
        Phase::AttemptsExhausted => "out of attempts",
        Phase::GameComplete => "all levels cleared",
        Phase::Abandoned => "session ended",
    };
    format!(
        "Level {} | Attempts {} | Arrow hints {} | Reveal hints {} | {walls}",
        scene.hud.level, scene.hud.attempts, scene.hud.directional_hints, scene.hud.reveal_hints
    )
}

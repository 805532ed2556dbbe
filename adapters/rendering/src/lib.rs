#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Hidden Maze adapters.
//!
//! The world never animates or plays sound. Adapters capture a [`Scene`]
//! after each batch of commands and present it however they like; moves are
//! described by [`MoveAnimation`] values the backend samples per frame, and
//! hint answers by [`Cue`] values played back in order.

use std::{collections::VecDeque, time::Duration};

use anyhow::Result as AnyResult;
use glam::Vec2;
use hidden_maze_core::{CellCoord, Direction, Maze, Phase, Signal};

/// Number of walk-cycle frames drawn while crossing one cell.
pub const WALK_FRAMES: u32 = 6;

/// Time spent on each walk-cycle frame.
pub const WALK_FRAME_DURATION: Duration = Duration::from_millis(100);

/// Counters shown alongside the maze.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hud {
    /// Current level.
    pub level: u32,
    /// Attempts left on the level.
    pub attempts: u32,
    /// Directional hints left.
    pub directional_hints: u32,
    /// Reveal hints left.
    pub reveal_hints: u32,
}

/// Time-budgeted description of the player crossing a single cell edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveAnimation {
    /// Direction of travel, used to pick the walk-cycle row.
    pub direction: Direction,
    /// Cell the animation starts on.
    pub from: CellCoord,
    /// Cell the animation ends on.
    pub to: CellCoord,
    /// Total playback time.
    pub duration: Duration,
}

impl MoveAnimation {
    /// Position in cell units after `elapsed` time, clamped to the end cell.
    #[must_use]
    pub fn position_at(&self, elapsed: Duration) -> Vec2 {
        let from = cell_center(self.from);
        let to = cell_center(self.to);
        from.lerp(to, self.progress(elapsed))
    }

    /// Walk-cycle frame to draw after `elapsed` time.
    #[must_use]
    pub fn frame_at(&self, elapsed: Duration) -> u32 {
        let frame = (self.progress(elapsed) * WALK_FRAMES as f32) as u32;
        frame.min(WALK_FRAMES - 1)
    }

    /// Reports whether playback has reached the end cell.
    #[must_use]
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Splits a straight run from `from` to `to` into one animation per cell.
///
/// Runs that do not move produce no animations.
#[must_use]
pub fn animations_for(from: CellCoord, to: CellCoord, direction: Direction) -> Vec<MoveAnimation> {
    let cells = from.column().abs_diff(to.column()) + from.row().abs_diff(to.row());
    let mut animations = Vec::new();
    let mut current = from;

    for _ in 0..cells {
        let Some(next) = current.neighbor(direction, u32::MAX, u32::MAX) else {
            break;
        };
        animations.push(MoveAnimation {
            direction,
            from: current,
            to: next,
            duration: WALK_FRAME_DURATION * WALK_FRAMES,
        });
        current = next;
    }

    animations
}

fn cell_center(cell: CellCoord) -> Vec2 {
    Vec2::new(cell.column() as f32 + 0.5, cell.row() as f32 + 0.5)
}

/// Audio cue answering a directional hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    /// The probed side is walled.
    Wall,
    /// The probed side is open.
    Path,
}

impl From<Signal> for Cue {
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Blocked => Self::Wall,
            Signal::Clear => Self::Path,
        }
    }
}

/// Cues waiting to be played, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CueQueue {
    pending: VecDeque<Cue>,
}

impl CueQueue {
    /// Queues a cue behind any already waiting.
    pub fn push(&mut self, cue: Cue) {
        self.pending.push_back(cue);
    }

    /// Next cue to start, or `None` while the output is still busy.
    pub fn next_when_idle(&mut self, output_busy: bool) -> Option<Cue> {
        if output_busy {
            return None;
        }
        self.pending.pop_front()
    }

    /// Number of cues waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Reports whether no cue is waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Input gathered by an adapter for a single frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    /// Movement command submitted this frame.
    pub submitted_command: Option<String>,
    /// Direction probed with a directional hint this frame.
    pub probe: Option<Direction>,
    /// Whether a reveal hint was requested this frame.
    pub reveal: bool,
    /// Whether the player asked to quit.
    pub quit: bool,
}

/// Snapshot of everything a backend draws.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Maze of the current level.
    pub maze: Maze,
    /// Whether walls should be drawn.
    pub walls_visible: bool,
    /// Player position.
    pub player: CellCoord,
    /// Winning cell.
    pub end: CellCoord,
    /// Uncollected red pickup.
    pub red_pickup: Option<CellCoord>,
    /// Uncollected green pickup.
    pub green_pickup: Option<CellCoord>,
    /// Counters for the heads-up display.
    pub hud: Hud,
    /// Observable state of the run.
    pub phase: Phase,
    /// Moves to play back before the player is drawn idle at `player`.
    pub animations: Vec<MoveAnimation>,
    /// Hint answers waiting to be played.
    pub cues: CueQueue,
    /// Status messages produced since the previous frame.
    pub messages: Vec<String>,
}

impl Scene {
    /// Creates a scene without pending animations, cues, or messages.
    #[must_use]
    pub fn new(maze: Maze, player: CellCoord, end: CellCoord, phase: Phase) -> Self {
        Self {
            maze,
            walls_visible: phase == Phase::WallsVisible,
            player,
            end,
            red_pickup: None,
            green_pickup: None,
            hud: Hud::default(),
            phase,
            animations: Vec::new(),
            cues: CueQueue::default(),
            messages: Vec::new(),
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown by the backend.
    pub title: String,
    /// Scene content that should be displayed first.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            title: title.into(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Hidden Maze scenes.
pub trait RenderingBackend {
    /// Runs the backend until the scene reaches a terminal phase or input ends.
    ///
    /// The provided `update_scene` closure receives the elapsed wall-clock
    /// time since the previous frame and the frame's input, and refreshes the
    /// scene before it is drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene);
}

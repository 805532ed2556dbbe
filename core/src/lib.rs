#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Hidden Maze engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing player intent, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing every
//! state transition. Systems operate on borrowed [`Maze`] views and return
//! plain values; none of them retain state across calls.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Hidden Maze.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the wall-visibility clock by the provided delta time.
    Tick {
        /// Duration of wall-clock time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Submits a free-form movement command such as `W3AD`.
    SubmitCommand {
        /// Raw text typed by the player.
        text: String,
    },
    /// Spends a directional hint to learn whether a neighbouring cell is reachable.
    ProbeDirection {
        /// Direction probed from the player's current cell.
        direction: Direction,
    },
    /// Spends a reveal hint to show the maze walls for a short duration.
    ActivateReveal,
    /// Ends the session.
    Quit,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A fresh maze was generated and the level's walls became visible.
    LevelStarted {
        /// One-based level number.
        level: u32,
        /// Number of maze columns.
        columns: u32,
        /// Number of maze rows.
        rows: u32,
        /// Attempt budget granted for the level.
        attempts: u32,
    },
    /// The visibility window elapsed and the walls are hidden again.
    WallsHidden,
    /// A reveal hint forced the walls visible.
    WallsRevealed {
        /// Time the walls remain visible.
        duration: Duration,
    },
    /// A command was refused without touching any state.
    CommandRejected {
        /// Reason the command was refused.
        reason: RejectionReason,
    },
    /// A submission consumed one attempt.
    AttemptConsumed {
        /// Attempts left in the current level.
        remaining: u32,
    },
    /// The submitted text did not parse into a movement program.
    CommandMalformed {
        /// Why parsing failed.
        error: MalformedCommand,
    },
    /// One parsed instruction finished executing.
    InstructionExecuted {
        /// Instruction that ran.
        instruction: Instruction,
        /// Cell occupied before the instruction.
        from: CellCoord,
        /// Cell occupied after the instruction.
        to: CellCoord,
        /// Whether a wall or the maze boundary cut the run short.
        blocked: bool,
    },
    /// The player stepped onto a pickup.
    PickupCollected {
        /// Pickup that was collected.
        pickup: Pickup,
    },
    /// The player reached the end cell.
    LevelWon {
        /// Level that was completed.
        level: u32,
    },
    /// The attempt budget ran out before the end cell was reached.
    AttemptsExhausted {
        /// Level on which the run failed.
        level: u32,
    },
    /// The final level was completed.
    GameComplete,
    /// A directional hint was answered.
    ProbeAnswered {
        /// Direction that was probed.
        direction: Direction,
        /// Whether the direction is open.
        signal: Signal,
    },
    /// A hint was requested with an empty budget.
    HintDeclined {
        /// Hint kind that was requested.
        hint: HintKind,
    },
    /// The player quit.
    SessionEnded,
}

/// Observable state of the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Walls are on screen; movement commands are refused.
    WallsVisible,
    /// Walls are hidden and the player may submit commands.
    WallsHidden,
    /// The attempt budget ran out. Terminal.
    AttemptsExhausted,
    /// The final level was won. Terminal.
    GameComplete,
    /// The player quit. Terminal.
    Abandoned,
}

impl Phase {
    /// Reports whether the run has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::AttemptsExhausted | Self::GameComplete | Self::Abandoned
        )
    }
}

/// Reasons a command may be refused by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// Movement is disallowed while the walls are on screen.
    WallsVisible,
    /// The run already ended; no further mutations are accepted.
    Terminal,
}

/// Summary of a parse failure carried on [`Event::CommandMalformed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MalformedCommand {
    /// No instruction could be read from the text.
    Empty,
    /// The character at `index` is not part of the movement language.
    InvalidToken {
        /// Offending character, upper-cased.
        token: char,
        /// Zero-based character index within the submitted text.
        index: usize,
    },
}

/// Answer produced by a directional hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    /// A wall or the maze boundary blocks the direction.
    Blocked,
    /// The neighbouring cell can be entered.
    Clear,
}

/// Hint budgets tracked for the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HintKind {
    /// Single-direction probe.
    Directional,
    /// Temporary full-maze reveal.
    Reveal,
}

/// Optional bonus cells placed at level generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pickup {
    /// Grants one reveal hint.
    Red,
    /// Grants one directional hint.
    Green,
}

impl Pickup {
    /// Hint budget credited when the pickup is collected.
    #[must_use]
    pub const fn grants(self) -> HintKind {
        match self {
            Self::Red => HintKind::Reveal,
            Self::Green => HintKind::Directional,
        }
    }
}

/// Cardinal movement directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All directions in clockwise order starting at north.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Direction facing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Column and row delta of a single step.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Maps a movement key (`W`, `A`, `S`, `D`, any case) to its direction.
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_uppercase() {
            'W' => Some(Self::North),
            'A' => Some(Self::West),
            'S' => Some(Self::South),
            'D' => Some(Self::East),
            _ => None,
        }
    }

    /// Movement key bound to the direction.
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::North => 'W',
            Self::West => 'A',
            Self::South => 'S',
            Self::East => 'D',
        }
    }
}

/// Location of a single maze cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Neighbouring cell in `direction`, if it lies inside a `columns` × `rows` grid.
    #[must_use]
    pub fn neighbor(self, direction: Direction, columns: u32, rows: u32) -> Option<CellCoord> {
        let (dx, dy) = direction.offset();
        let column = self.column.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        (column < columns && row < rows).then_some(CellCoord::new(column, row))
    }
}

/// Wall flags of a single maze cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Walls {
    north: bool,
    east: bool,
    south: bool,
    west: bool,
}

impl Walls {
    /// Cell enclosed on all four sides.
    pub const SEALED: Walls = Walls {
        north: true,
        east: true,
        south: true,
        west: true,
    };

    /// Reports whether the side facing `direction` carries a wall.
    #[must_use]
    pub const fn has(&self, direction: Direction) -> bool {
        match direction {
            Direction::North => self.north,
            Direction::East => self.east,
            Direction::South => self.south,
            Direction::West => self.west,
        }
    }

    fn clear(&mut self, direction: Direction) {
        match direction {
            Direction::North => self.north = false,
            Direction::East => self.east = false,
            Direction::South => self.south = false,
            Direction::West => self.west = false,
        }
    }
}

/// Rectangular grid of walled cells.
///
/// Walls only ever disappear in matching pairs through [`Maze::carve`], so
/// the side of a cell facing a neighbour always agrees with the neighbour's
/// side facing back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    columns: u32,
    rows: u32,
    cells: Vec<Walls>,
}

impl Maze {
    /// Creates a maze whose cells are enclosed on every side.
    ///
    /// Zero dimensions are clamped to one so the grid is never empty.
    #[must_use]
    pub fn sealed(columns: u32, rows: u32) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        let count = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![Walls::SEALED; count],
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Wall flags of the provided cell, if it lies inside the grid.
    #[must_use]
    pub fn walls(&self, cell: CellCoord) -> Option<Walls> {
        self.index(cell).and_then(|index| self.cells.get(index).copied())
    }

    /// Reports whether `cell` has a wall on the side facing `direction`.
    ///
    /// Cells outside the grid report a wall on every side.
    #[must_use]
    pub fn has_wall(&self, cell: CellCoord, direction: Direction) -> bool {
        self.walls(cell).map_or(true, |walls| walls.has(direction))
    }

    /// Neighbouring cell in `direction`, bounds-checked against the grid.
    #[must_use]
    pub fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        if !self.contains(cell) {
            return None;
        }
        cell.neighbor(direction, self.columns, self.rows)
    }

    /// Iterator over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (0..self.rows)
            .flat_map(move |row| (0..self.columns).map(move |column| CellCoord::new(column, row)))
    }

    /// Removes the wall between `cell` and its neighbour in `direction`.
    ///
    /// Both sides of the shared edge are cleared together. Returns the
    /// neighbour, or `None` when it lies outside the grid and nothing changed.
    pub fn carve(&mut self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        let neighbor = self.neighbor(cell, direction)?;
        let here = self.index(cell)?;
        let there = self.index(neighbor)?;
        self.cells[here].clear(direction);
        self.cells[there].clear(direction.opposite());
        Some(neighbor)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }
}

/// One parsed directional move with its repeat count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Instruction {
    direction: Direction,
    steps: u8,
}

impl Instruction {
    /// Creates a move of `steps` cells toward `direction`.
    #[must_use]
    pub const fn new(direction: Direction, steps: u8) -> Self {
        Self { direction, steps }
    }

    /// Direction of travel.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Number of single-cell steps to attempt.
    #[must_use]
    pub const fn steps(&self) -> u8 {
        self.steps
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MOVE({}, {})", self.direction.key(), self.steps)
    }
}

const MIN_CELLS: u64 = 4;

/// Tunable rules of a run.
///
/// Every field falls back to its default when omitted from a configuration
/// file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Maze rows on the first level.
    pub base_rows: u32,
    /// Maze columns on the first level.
    pub base_columns: u32,
    /// Largest growth applied to both maze dimensions.
    pub max_size_offset: u32,
    /// Attempt budget before the level bonus is added.
    pub base_attempts: u32,
    /// Upper bound of the per-level attempt budget.
    pub max_attempts: u32,
    /// Last level; winning it completes the game.
    pub final_level: u32,
    /// Directional hints granted at the start of the run.
    pub directional_hints: u32,
    /// Reveal hints granted at the start of the run.
    pub reveal_hints: u32,
    /// Seconds the walls stay visible when a level starts.
    pub initial_reveal_secs: u64,
    /// Seconds the walls stay visible after a reveal hint.
    pub reveal_hint_secs: u64,
    /// A red pickup appears with probability `1 / red_pickup_odds`.
    pub red_pickup_odds: u32,
    /// A green pickup appears with probability `1 / green_pickup_odds`.
    pub green_pickup_odds: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            base_rows: 6,
            base_columns: 6,
            max_size_offset: 5,
            base_attempts: 4,
            max_attempts: 10,
            final_level: 15,
            directional_hints: 5,
            reveal_hints: 3,
            initial_reveal_secs: 5,
            reveal_hint_secs: 3,
            red_pickup_odds: 3,
            green_pickup_odds: 5,
        }
    }
}

impl Rules {
    /// Growth applied to both maze dimensions on `level`.
    #[must_use]
    pub fn size_offset(&self, level: u32) -> u32 {
        level.saturating_sub(1).min(self.max_size_offset)
    }

    /// Maze dimensions as `(columns, rows)` for `level`.
    #[must_use]
    pub fn dimensions(&self, level: u32) -> (u32, u32) {
        let offset = self.size_offset(level);
        (
            self.base_columns.saturating_add(offset),
            self.base_rows.saturating_add(offset),
        )
    }

    /// Attempt budget granted on `level`.
    #[must_use]
    pub fn attempts(&self, level: u32) -> u32 {
        self.base_attempts
            .saturating_add(level)
            .min(self.max_attempts)
    }

    /// Visibility window opened when a level starts.
    #[must_use]
    pub const fn initial_reveal(&self) -> Duration {
        Duration::from_secs(self.initial_reveal_secs)
    }

    /// Visibility window opened by a reveal hint.
    #[must_use]
    pub const fn reveal_hint(&self) -> Duration {
        Duration::from_secs(self.reveal_hint_secs)
    }

    /// Checks the rules for values that cannot produce a playable run.
    pub fn validate(&self) -> Result<(), RulesError> {
        if u64::from(self.base_rows) * u64::from(self.base_columns) < MIN_CELLS {
            return Err(RulesError::TooFewCells);
        }
        if self.final_level == 0 {
            return Err(RulesError::NoLevels);
        }
        if self.max_attempts == 0 {
            return Err(RulesError::NoAttempts);
        }
        if self.red_pickup_odds == 0 || self.green_pickup_odds == 0 {
            return Err(RulesError::ZeroOdds);
        }
        Ok(())
    }
}

/// Reasons a [`Rules`] value may be unusable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum RulesError {
    /// The first level would have fewer than four cells, leaving no room to
    /// place the start, end, and both pickups on distinct cells.
    #[error("base_rows * base_columns must be at least {}", MIN_CELLS)]
    TooFewCells,
    /// The run would have no levels.
    #[error("final_level must be at least 1")]
    NoLevels,
    /// Every level would start without attempts.
    #[error("max_attempts must be at least 1")]
    NoAttempts,
    /// A pickup chance was expressed as `1 / 0`.
    #[error("pickup odds must be at least 1")]
    ZeroOdds,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Direction, Instruction, Maze, Rules, RulesError};

    #[test]
    fn carve_clears_both_sides_of_the_shared_edge() {
        let mut maze = Maze::sealed(2, 1);
        let origin = CellCoord::new(0, 0);

        assert_eq!(maze.carve(origin, Direction::East), Some(CellCoord::new(1, 0)));
        assert!(!maze.has_wall(origin, Direction::East));
        assert!(!maze.has_wall(CellCoord::new(1, 0), Direction::West));
        assert!(maze.has_wall(origin, Direction::North));
    }

    #[test]
    fn carve_refuses_to_open_the_boundary() {
        let mut maze = Maze::sealed(2, 2);
        assert_eq!(maze.carve(CellCoord::new(0, 0), Direction::West), None);
        assert!(maze.has_wall(CellCoord::new(0, 0), Direction::West));
    }

    #[test]
    fn cells_outside_the_grid_are_walled() {
        let maze = Maze::sealed(3, 3);
        assert!(maze.has_wall(CellCoord::new(7, 0), Direction::South));
        assert_eq!(maze.neighbor(CellCoord::new(2, 2), Direction::East), None);
    }

    #[test]
    fn opposite_directions_cancel_offsets() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.offset();
            let (ox, oy) = direction.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(Direction::from_key(direction.key()), Some(direction));
        }
    }

    #[test]
    fn instruction_displays_like_a_move_call() {
        assert_eq!(Instruction::new(Direction::West, 3).to_string(), "MOVE(A, 3)");
    }

    #[test]
    fn growth_and_budget_are_capped() {
        let rules = Rules::default();
        assert_eq!(rules.dimensions(1), (6, 6));
        assert_eq!(rules.attempts(1), 5);
        for level in 7..=40 {
            assert_eq!(rules.size_offset(level), 5);
            assert_eq!(rules.attempts(level), 10);
        }
    }

    #[test]
    fn validate_rejects_mazes_without_room_for_every_marker() {
        let rules = Rules {
            base_rows: 1,
            base_columns: 3,
            ..Rules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::TooFewCells));
        assert_eq!(Rules::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_zero_odds() {
        let rules = Rules {
            green_pickup_odds: 0,
            ..Rules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::ZeroOdds));
    }

    #[test]
    fn rules_errors_describe_the_offending_setting() {
        assert_eq!(
            RulesError::TooFewCells.to_string(),
            "base_rows * base_columns must be at least 4"
        );
        assert_eq!(
            RulesError::NoLevels.to_string(),
            "final_level must be at least 1"
        );
        let error: &dyn std::error::Error = &RulesError::ZeroOdds;
        assert_eq!(error.to_string(), "pickup odds must be at least 1");
    }

    #[test]
    fn rules_round_trip_through_bincode() {
        let rules = Rules {
            final_level: 3,
            ..Rules::default()
        };
        let bytes = bincode::serialize(&rules).expect("serialize");
        let restored: Rules = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, rules);
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state for Hidden Maze.
//!
//! The [`World`] owns the current maze, the marker layout, and every counter
//! of the run. Adapters mutate it exclusively through [`apply`] and observe it
//! through the [`query`] module.

mod layout;

use std::time::Duration;

use hidden_maze_core::{
    CellCoord, Command, Direction, Event, HintKind, Maze, Phase, RejectionReason, Rules,
    RulesError,
};
use hidden_maze_system_generation::{generate, level_rng};
use hidden_maze_system_hints::HintLedger;
use hidden_maze_system_interpreter as interpreter;
use hidden_maze_system_movement as movement;

pub use layout::LevelLayout;

/// Represents the authoritative Hidden Maze run.
#[derive(Debug)]
pub struct World {
    rules: Rules,
    run_seed: u64,
    level: u32,
    maze: Maze,
    layout: LevelLayout,
    player: CellCoord,
    attempts: u32,
    hints: HintLedger,
    visible_for: Duration,
    phase: Phase,
}

impl World {
    /// Creates a run seeded with `run_seed` and enters its first level.
    pub fn new(rules: Rules, run_seed: u64) -> Result<Self, RulesError> {
        rules.validate()?;
        let hints = HintLedger::new(rules.directional_hints, rules.reveal_hints);
        let mut world = Self {
            maze: Maze::sealed(rules.base_columns, rules.base_rows),
            layout: LevelLayout::new(
                CellCoord::new(0, 0),
                CellCoord::new(0, 0),
                None,
                None,
            ),
            player: CellCoord::new(0, 0),
            attempts: 0,
            visible_for: Duration::ZERO,
            phase: Phase::WallsVisible,
            level: 1,
            hints,
            rules,
            run_seed,
        };
        world.start_level();
        Ok(world)
    }

    /// Creates a run positioned on `level` with an explicit maze and layout.
    ///
    /// Levels after `level` are generated from `run_seed` as usual.
    #[cfg(any(test, feature = "level_scaffolding"))]
    #[must_use]
    pub fn scaffold(
        rules: Rules,
        run_seed: u64,
        level: u32,
        maze: Maze,
        layout: LevelLayout,
    ) -> Self {
        Self {
            hints: HintLedger::new(rules.directional_hints, rules.reveal_hints),
            attempts: rules.attempts(level),
            visible_for: rules.initial_reveal(),
            phase: Phase::WallsVisible,
            player: layout.start(),
            level,
            maze,
            layout,
            rules,
            run_seed,
        }
    }

    fn start_level(&mut self) {
        let (columns, rows) = self.rules.dimensions(self.level);
        let mut rng = level_rng(self.run_seed, self.level);
        self.maze = generate(columns, rows, &mut rng);
        self.layout = LevelLayout::roll(columns, rows, &self.rules, &mut rng);
        self.player = self.layout.start();
        self.attempts = self.rules.attempts(self.level);
        self.visible_for = self.rules.initial_reveal();
        self.phase = Phase::WallsVisible;
        log::info!(
            "level {} started: {}x{} maze, {} attempts",
            self.level,
            columns,
            rows,
            self.attempts
        );
    }

    fn level_started_event(&self) -> Event {
        Event::LevelStarted {
            level: self.level,
            columns: self.maze.columns(),
            rows: self.maze.rows(),
            attempts: self.attempts,
        }
    }

    fn advance_clock(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.phase != Phase::WallsVisible {
            return;
        }

        self.visible_for = self.visible_for.saturating_sub(dt);
        if self.visible_for.is_zero() {
            self.phase = Phase::WallsHidden;
            out_events.push(Event::WallsHidden);
        }
    }

    fn submit(&mut self, text: &str, out_events: &mut Vec<Event>) {
        if self.phase == Phase::WallsVisible {
            log::info!("cannot move while walls are visible");
            out_events.push(Event::CommandRejected {
                reason: RejectionReason::WallsVisible,
            });
            return;
        }

        self.attempts = self.attempts.saturating_sub(1);
        out_events.push(Event::AttemptConsumed {
            remaining: self.attempts,
        });

        match interpreter::parse(text) {
            Ok(program) => {
                let execution =
                    movement::execute(&self.maze, self.player, self.layout.end(), &program);
                for outcome in &execution.trace {
                    out_events.push(Event::InstructionExecuted {
                        instruction: outcome.instruction,
                        from: outcome.from,
                        to: outcome.to,
                        blocked: outcome.blocked,
                    });
                    self.collect_pickup_at(outcome.to, out_events);
                }
                self.player = execution.position;

                if execution.reached_end {
                    self.complete_level(out_events);
                    return;
                }
            }
            Err(error) => {
                log::warn!("rejected command {text:?}: {error}");
                out_events.push(Event::CommandMalformed {
                    error: error.into(),
                });
            }
        }

        if self.attempts == 0 {
            log::info!("no attempts left on level {}", self.level);
            self.phase = Phase::AttemptsExhausted;
            out_events.push(Event::AttemptsExhausted { level: self.level });
        }
    }

    fn collect_pickup_at(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        if let Some(pickup) = self.layout.take_pickup_at(cell) {
            self.hints.grant(pickup.grants());
            log::info!("collected {pickup:?} pickup");
            out_events.push(Event::PickupCollected { pickup });
        }
    }

    fn complete_level(&mut self, out_events: &mut Vec<Event>) {
        log::info!("level {} complete", self.level);
        out_events.push(Event::LevelWon { level: self.level });

        if self.level >= self.rules.final_level {
            self.phase = Phase::GameComplete;
            out_events.push(Event::GameComplete);
            return;
        }

        self.level += 1;
        self.start_level();
        out_events.push(self.level_started_event());
    }

    fn probe(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        match self.hints.probe(&self.maze, self.player, direction) {
            Some(signal) => out_events.push(Event::ProbeAnswered { direction, signal }),
            None => out_events.push(Event::HintDeclined {
                hint: HintKind::Directional,
            }),
        }
    }

    fn reveal(&mut self, out_events: &mut Vec<Event>) {
        if !self.hints.spend_reveal() {
            out_events.push(Event::HintDeclined {
                hint: HintKind::Reveal,
            });
            return;
        }

        let duration = self.rules.reveal_hint();
        self.visible_for = duration;
        self.phase = Phase::WallsVisible;
        out_events.push(Event::WallsRevealed { duration });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once the run has ended every command except [`Command::Tick`] is answered
/// with [`RejectionReason::Terminal`]; ticks are ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.phase.is_terminal() {
        if !matches!(command, Command::Tick { .. }) {
            out_events.push(Event::CommandRejected {
                reason: RejectionReason::Terminal,
            });
        }
        return;
    }

    match command {
        Command::Tick { dt } => world.advance_clock(dt, out_events),
        Command::SubmitCommand { text } => world.submit(&text, out_events),
        Command::ProbeDirection { direction } => world.probe(direction, out_events),
        Command::ActivateReveal => world.reveal(out_events),
        Command::Quit => {
            world.phase = Phase::Abandoned;
            out_events.push(Event::SessionEnded);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{LevelLayout, World};
    use hidden_maze_core::{CellCoord, HintKind, Maze, Phase, Pickup};

    /// Current one-based level.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.level
    }

    /// Growth applied to the base maze dimensions on the current level.
    #[must_use]
    pub fn size_offset(world: &World) -> u32 {
        world.rules.size_offset(world.level)
    }

    /// Maze of the current level.
    #[must_use]
    pub fn maze(world: &World) -> &Maze {
        &world.maze
    }

    /// Marker layout of the current level, with collected pickups removed.
    #[must_use]
    pub fn layout(world: &World) -> &LevelLayout {
        &world.layout
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player(world: &World) -> CellCoord {
        world.player
    }

    /// Cell that wins the current level.
    #[must_use]
    pub fn end(world: &World) -> CellCoord {
        world.layout.end()
    }

    /// Position of an uncollected pickup on the current level.
    #[must_use]
    pub fn pickup(world: &World, pickup: Pickup) -> Option<CellCoord> {
        world.layout.pickup(pickup)
    }

    /// Attempts left on the current level.
    #[must_use]
    pub fn attempts_remaining(world: &World) -> u32 {
        world.attempts
    }

    /// Hints left of the provided kind.
    #[must_use]
    pub fn hints_remaining(world: &World, kind: HintKind) -> u32 {
        world.hints.remaining(kind)
    }

    /// Observable state of the run.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Reports whether the walls should currently be drawn.
    #[must_use]
    pub fn walls_visible(world: &World) -> bool {
        world.phase == Phase::WallsVisible
    }

    /// Time left before the walls hide again, zero when already hidden.
    #[must_use]
    pub fn visibility_remaining(world: &World) -> Duration {
        if world.phase == Phase::WallsVisible {
            world.visible_for
        } else {
            Duration::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_world_enters_level_one_with_walls_visible() {
        let world = World::new(Rules::default(), 42).expect("default rules are valid");

        assert_eq!(query::level(&world), 1);
        assert_eq!(query::phase(&world), Phase::WallsVisible);
        assert_eq!(query::attempts_remaining(&world), 5);
        assert_eq!(query::maze(&world).columns(), 6);
        assert_ne!(query::player(&world), query::end(&world));
        assert_eq!(query::visibility_remaining(&world), Duration::from_secs(5));
    }

    #[test]
    fn same_seed_builds_the_same_level() {
        let first = World::new(Rules::default(), 7).expect("valid");
        let second = World::new(Rules::default(), 7).expect("valid");

        assert_eq!(query::maze(&first), query::maze(&second));
        assert_eq!(query::layout(&first), query::layout(&second));
    }

    #[test]
    fn invalid_rules_are_refused() {
        let rules = Rules {
            final_level: 0,
            ..Rules::default()
        };
        assert_eq!(World::new(rules, 1).err(), Some(RulesError::NoLevels));
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Executes parsed movement programs against a maze.

use hidden_maze_core::{CellCoord, Direction, Instruction, Maze};

/// Cell entered by a single step from `cell` toward `direction`, if legal.
///
/// A step is legal when the destination lies inside the grid and `cell`
/// carries no wall on the side facing `direction`.
#[must_use]
pub fn step(maze: &Maze, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
    if maze.has_wall(cell, direction) {
        return None;
    }
    maze.neighbor(cell, direction)
}

/// Reports whether a single step from `cell` toward `direction` is legal.
#[must_use]
pub fn is_passable(maze: &Maze, cell: CellCoord, direction: Direction) -> bool {
    step(maze, cell, direction).is_some()
}

/// Outcome of one executed instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstructionOutcome {
    /// Instruction that ran.
    pub instruction: Instruction,
    /// Cell occupied before the instruction started.
    pub from: CellCoord,
    /// Cell occupied once the instruction stopped.
    pub to: CellCoord,
    /// Whether a wall or the boundary stopped the run before all steps were taken.
    pub blocked: bool,
}

/// Result of executing a movement program.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Execution {
    /// Final player position.
    pub position: CellCoord,
    /// Whether the end cell was entered.
    pub reached_end: bool,
    /// Executed instructions in order. Instructions skipped after reaching the
    /// end cell are absent.
    pub trace: Vec<InstructionOutcome>,
}

/// Runs `program` from `start`, stopping the moment `end` is entered.
///
/// A blocked step abandons the rest of its own instruction only; execution
/// resumes with the next instruction in the program.
#[must_use]
pub fn execute(
    maze: &Maze,
    start: CellCoord,
    end: CellCoord,
    program: &[Instruction],
) -> Execution {
    let mut position = start;
    let mut trace = Vec::with_capacity(program.len());

    for instruction in program {
        let from = position;
        let mut blocked = false;
        let mut reached_end = false;

        for _ in 0..instruction.steps() {
            let Some(next) = step(maze, position, instruction.direction()) else {
                log::warn!(
                    "wall encountered at ({}, {}) heading {:?}",
                    position.column(),
                    position.row(),
                    instruction.direction()
                );
                blocked = true;
                break;
            };

            position = next;
            if position == end {
                reached_end = true;
                break;
            }
        }

        trace.push(InstructionOutcome {
            instruction: *instruction,
            from,
            to: position,
            blocked,
        });

        if reached_end {
            return Execution {
                position,
                reached_end,
                trace,
            };
        }
    }

    Execution {
        position,
        reached_end: false,
        trace,
    }
}

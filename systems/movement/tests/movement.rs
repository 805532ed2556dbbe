use hidden_maze_core::{CellCoord, Direction, Instruction, Maze};
use hidden_maze_system_movement::{execute, is_passable, step, InstructionOutcome};

/// Builds the 3x2 maze
///
/// ```text
/// +--+--+--+
/// |a  b  c |
/// +--+--+  +
/// |d  e  f |
/// +--+--+--+
/// ```
fn snake() -> Maze {
    let mut maze = Maze::sealed(3, 2);
    let _ = maze.carve(CellCoord::new(0, 0), Direction::East);
    let _ = maze.carve(CellCoord::new(1, 0), Direction::East);
    let _ = maze.carve(CellCoord::new(2, 0), Direction::South);
    let _ = maze.carve(CellCoord::new(2, 1), Direction::West);
    let _ = maze.carve(CellCoord::new(1, 1), Direction::West);
    maze
}

#[test]
fn step_respects_walls_and_bounds() {
    let maze = snake();
    assert_eq!(
        step(&maze, CellCoord::new(0, 0), Direction::East),
        Some(CellCoord::new(1, 0))
    );
    assert_eq!(step(&maze, CellCoord::new(0, 0), Direction::South), None);
    assert_eq!(step(&maze, CellCoord::new(0, 0), Direction::West), None);
    assert!(is_passable(&maze, CellCoord::new(2, 0), Direction::South));
}

#[test]
fn wall_on_first_step_leaves_player_in_place() {
    let maze = Maze::sealed(2, 1);
    let start = CellCoord::new(0, 0);
    let execution = execute(
        &maze,
        start,
        CellCoord::new(1, 0),
        &[Instruction::new(Direction::East, 5)],
    );

    assert_eq!(execution.position, start, "the very first step is blocked");
    assert!(!execution.reached_end);
    assert!(execution.trace[0].blocked);
}

#[test]
fn wall_aborts_only_the_current_instruction() {
    let maze = snake();
    let execution = execute(
        &maze,
        CellCoord::new(0, 0),
        CellCoord::new(0, 1),
        &[
            Instruction::new(Direction::East, 5),
            Instruction::new(Direction::South, 1),
            Instruction::new(Direction::West, 1),
        ],
    );

    assert_eq!(
        execution.trace,
        vec![
            InstructionOutcome {
                instruction: Instruction::new(Direction::East, 5),
                from: CellCoord::new(0, 0),
                to: CellCoord::new(2, 0),
                blocked: true,
            },
            InstructionOutcome {
                instruction: Instruction::new(Direction::South, 1),
                from: CellCoord::new(2, 0),
                to: CellCoord::new(2, 1),
                blocked: false,
            },
            InstructionOutcome {
                instruction: Instruction::new(Direction::West, 1),
                from: CellCoord::new(2, 1),
                to: CellCoord::new(1, 1),
                blocked: false,
            },
        ],
        "instructions after a blocked run must still execute",
    );
    assert_eq!(execution.position, CellCoord::new(1, 1));
    assert!(!execution.reached_end);
}

#[test]
fn reaching_the_end_stops_the_program() {
    let mut maze = Maze::sealed(2, 2);
    let _ = maze.carve(CellCoord::new(0, 0), Direction::East);
    let _ = maze.carve(CellCoord::new(1, 0), Direction::South);

    let execution = execute(
        &maze,
        CellCoord::new(0, 0),
        CellCoord::new(1, 0),
        &[
            Instruction::new(Direction::East, 1),
            Instruction::new(Direction::South, 1),
        ],
    );

    assert!(execution.reached_end);
    assert_eq!(
        execution.position,
        CellCoord::new(1, 0),
        "the south instruction must not run once the end is reached",
    );
    assert_eq!(execution.trace.len(), 1);
}

#[test]
fn reaching_the_end_stops_mid_instruction() {
    let maze = snake();
    let execution = execute(
        &maze,
        CellCoord::new(0, 0),
        CellCoord::new(1, 0),
        &[Instruction::new(Direction::East, 2)],
    );

    assert!(execution.reached_end);
    assert_eq!(execution.position, CellCoord::new(1, 0));
    assert!(!execution.trace[0].blocked);
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomised depth-first maze carving and per-level seed derivation.

use hidden_maze_core::{CellCoord, Direction, Maze};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

const LEVEL_STREAM_LABEL: &str = "level";

/// Carves a perfect maze of `columns` × `rows` cells.
///
/// Starting from the top-left cell, the carver walks to a uniformly chosen
/// unvisited neighbour, removing the wall between them, and backtracks along
/// its stack whenever the current cell has no unvisited neighbours left. Each
/// cell is entered through exactly one carve, so the passages form a spanning
/// tree. Zero dimensions are clamped to one.
pub fn generate<R>(columns: u32, rows: u32, rng: &mut R) -> Maze
where
    R: Rng + ?Sized,
{
    let mut maze = Maze::sealed(columns, rows);
    let width = usize::try_from(maze.columns()).unwrap_or(0);
    let height = usize::try_from(maze.rows()).unwrap_or(0);
    let mut visited = vec![false; width * height];
    let mut stack = Vec::with_capacity(visited.len());

    let origin = CellCoord::new(0, 0);
    mark(&mut visited, width, origin);
    stack.push(origin);

    let mut candidates: Vec<(Direction, CellCoord)> = Vec::with_capacity(Direction::ALL.len());
    while let Some(&current) = stack.last() {
        candidates.clear();
        candidates.extend(Direction::ALL.into_iter().filter_map(|direction| {
            maze.neighbor(current, direction)
                .filter(|neighbor| !is_visited(&visited, width, *neighbor))
                .map(|neighbor| (direction, neighbor))
        }));

        let Some(&(direction, _)) = candidates.choose(rng) else {
            let _ = stack.pop();
            continue;
        };

        if let Some(next) = maze.carve(current, direction) {
            mark(&mut visited, width, next);
            stack.push(next);
        }
    }

    log::debug!("carved {}x{} maze", maze.columns(), maze.rows());
    maze
}

/// Random source dedicated to a single level of a run.
///
/// The seed is derived by hashing the run seed together with the level
/// number, so every level of a run is reproducible on its own.
#[must_use]
pub fn level_rng(run_seed: u64, level: u32) -> ChaCha8Rng {
    let mut hasher = Sha256::new();
    hasher.update(run_seed.to_le_bytes());
    hasher.update(LEVEL_STREAM_LABEL.as_bytes());
    hasher.update(level.to_le_bytes());
    let digest = hasher.finalize();
    let mut seed = <ChaCha8Rng as SeedableRng>::Seed::default();
    let len = seed.len();
    seed.copy_from_slice(&digest[..len]);
    ChaCha8Rng::from_seed(seed)
}

fn index(width: usize, cell: CellCoord) -> Option<usize> {
    let column = usize::try_from(cell.column()).ok()?;
    let row = usize::try_from(cell.row()).ok()?;
    row.checked_mul(width)?.checked_add(column)
}

fn is_visited(visited: &[bool], width: usize, cell: CellCoord) -> bool {
    index(width, cell)
        .and_then(|offset| visited.get(offset).copied())
        .unwrap_or(true)
}

fn mark(visited: &mut [bool], width: usize, cell: CellCoord) {
    if let Some(slot) = index(width, cell).and_then(|offset| visited.get_mut(offset)) {
        *slot = true;
    }
}

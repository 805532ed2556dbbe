#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Budgets for the two hint resources available during a run.

use hidden_maze_core::{CellCoord, Direction, HintKind, Maze, Signal};
use hidden_maze_system_movement::is_passable;

/// Remaining directional and reveal hints.
///
/// Budgets only shrink when a hint is used and only grow through pickups.
/// Using a hint with an empty budget is declined without changing anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HintLedger {
    directional: u32,
    reveal: u32,
}

impl HintLedger {
    /// Creates a ledger with the provided starting budgets.
    #[must_use]
    pub const fn new(directional: u32, reveal: u32) -> Self {
        Self {
            directional,
            reveal,
        }
    }

    /// Hints left of the provided kind.
    #[must_use]
    pub const fn remaining(&self, kind: HintKind) -> u32 {
        match kind {
            HintKind::Directional => self.directional,
            HintKind::Reveal => self.reveal,
        }
    }

    /// Spends a directional hint to test the side of `cell` facing `direction`.
    ///
    /// Returns `None` without spending anything when the budget is empty.
    pub fn probe(&mut self, maze: &Maze, cell: CellCoord, direction: Direction) -> Option<Signal> {
        if self.directional == 0 {
            log::warn!("out of directional hints");
            return None;
        }
        self.directional -= 1;

        let signal = if is_passable(maze, cell, direction) {
            Signal::Clear
        } else {
            Signal::Blocked
        };
        log::debug!("probe {direction:?} from {cell:?}: {signal:?}");
        Some(signal)
    }

    /// Spends a reveal hint. Returns whether one was available.
    pub fn spend_reveal(&mut self) -> bool {
        if self.reveal == 0 {
            log::warn!("out of reveal hints");
            return false;
        }
        self.reveal -= 1;
        true
    }

    /// Credits one hint of the provided kind.
    pub fn grant(&mut self, kind: HintKind) {
        match kind {
            HintKind::Directional => self.directional = self.directional.saturating_add(1),
            HintKind::Reveal => self.reveal = self.reveal.saturating_add(1),
        }
    }
}

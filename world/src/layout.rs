//! Placement of the start, end, and pickup cells of a level.

use hidden_maze_core::{CellCoord, Pickup, Rules};
use rand::Rng;

/// Marker positions chosen when a level is generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelLayout {
    start: CellCoord,
    end: CellCoord,
    red: Option<CellCoord>,
    green: Option<CellCoord>,
}

impl LevelLayout {
    /// Creates a layout from explicit positions.
    #[must_use]
    pub const fn new(
        start: CellCoord,
        end: CellCoord,
        red: Option<CellCoord>,
        green: Option<CellCoord>,
    ) -> Self {
        Self {
            start,
            end,
            red,
            green,
        }
    }

    /// Cell the player starts the level on.
    #[must_use]
    pub const fn start(&self) -> CellCoord {
        self.start
    }

    /// Cell that wins the level.
    #[must_use]
    pub const fn end(&self) -> CellCoord {
        self.end
    }

    /// Position of the pickup, if it was placed on this level.
    #[must_use]
    pub const fn pickup(&self, pickup: Pickup) -> Option<CellCoord> {
        match pickup {
            Pickup::Red => self.red,
            Pickup::Green => self.green,
        }
    }

    /// Rolls a layout for a `columns` × `rows` maze.
    ///
    /// The end is placed first, then each pickup with its configured chance,
    /// then the start. Every marker is re-drawn until it lands on a cell no
    /// earlier marker occupies. Callers guarantee at least four cells.
    pub(crate) fn roll<R>(columns: u32, rows: u32, rules: &Rules, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let end = random_cell(columns, rows, rng);
        let red = rng
            .gen_ratio(1, rules.red_pickup_odds.max(1))
            .then(|| distinct_cell(columns, rows, &[Some(end)], rng));
        let green = rng
            .gen_ratio(1, rules.green_pickup_odds.max(1))
            .then(|| distinct_cell(columns, rows, &[Some(end), red], rng));
        let start = distinct_cell(columns, rows, &[Some(end), red, green], rng);

        Self {
            start,
            end,
            red,
            green,
        }
    }

    /// Removes the pickup placed at `cell`, returning which one it was.
    pub(crate) fn take_pickup_at(&mut self, cell: CellCoord) -> Option<Pickup> {
        if self.green == Some(cell) {
            self.green = None;
            return Some(Pickup::Green);
        }
        if self.red == Some(cell) {
            self.red = None;
            return Some(Pickup::Red);
        }
        None
    }
}

fn random_cell<R>(columns: u32, rows: u32, rng: &mut R) -> CellCoord
where
    R: Rng + ?Sized,
{
    CellCoord::new(rng.gen_range(0..columns.max(1)), rng.gen_range(0..rows.max(1)))
}

fn distinct_cell<R>(columns: u32, rows: u32, taken: &[Option<CellCoord>], rng: &mut R) -> CellCoord
where
    R: Rng + ?Sized,
{
    loop {
        let candidate = random_cell(columns, rows, rng);
        if !taken.contains(&Some(candidate)) {
            return candidate;
        }
    }
}

//! Board geometry: coordinates and the fixed terrain of every cell.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OutOfBounds;
use crate::game::Color;

/// Rows on the standard board.
pub const STANDARD_ROWS: u8 = 9;
/// Columns on the standard board.
pub const STANDARD_COLS: u8 = 7;

/// A cell on the board, 0-indexed from the top-left (Red's side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row, 0 at Red's home edge.
    pub row: u8,
    /// Column, 0 at the left edge.
    pub col: u8,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// The neighboring coordinate in `dir`, or `None` if it would underflow.
    ///
    /// Does not check the upper board bounds; see [`Geometry::neighbor`].
    #[must_use]
    pub fn step(self, dir: Direction) -> Option<Self> {
        let (dr, dc) = dir.delta();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        Some(Self::new(row, col))
    }

    /// Manhattan distance between two cells.
    #[must_use]
    pub const fn distance(self, other: Self) -> u8 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True if `other` is one orthogonal step away.
    #[must_use]
    pub const fn is_adjacent(self, other: Self) -> bool {
        self.distance(other) == 1
    }

    /// Direction and step count to `other` if both lie on one row or column.
    #[must_use]
    pub fn line_to(self, other: Self) -> Option<(Direction, u8)> {
        if self == other {
            return None;
        }
        if self.row == other.row {
            let dir = if other.col > self.col {
                Direction::Right
            } else {
                Direction::Left
            };
            return Some((dir, self.col.abs_diff(other.col)));
        }
        if self.col == other.col {
            let dir = if other.row > self.row {
                Direction::Down
            } else {
                Direction::Up
            };
            return Some((dir, self.row.abs_diff(other.row)));
        }
        None
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// One of the four orthogonal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row and column delta.
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Terrain of a cell. Fixed for the life of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    /// Plain land.
    Normal,
    /// Water; only swimmers may enter, leapers may jump across.
    River,
    /// Nullifies the rank of opposing pieces standing on it.
    Trap(Color),
    /// Home cell of its owner; the opponent wins by entering it.
    Den(Color),
}

impl Terrain {
    /// True for River cells.
    #[must_use]
    pub const fn is_river(self) -> bool {
        matches!(self, Terrain::River)
    }

    /// True if this is a trap owned by the opponent of `color`.
    #[must_use]
    pub fn is_trap_against(self, color: Color) -> bool {
        matches!(self, Terrain::Trap(owner) if owner != color)
    }

    /// Single-character glyph used by the text renderer.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Terrain::Normal => '.',
            Terrain::River => '~',
            Terrain::Trap(_) => '#',
            Terrain::Den(_) => '@',
        }
    }
}

/// The board grid and its terrain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    rows: u8,
    cols: u8,
    /// Terrain stored in row-major order.
    terrain: Vec<Terrain>,
    /// Den cells indexed by `Color::index`.
    dens: [Coord; 2],
}

impl Geometry {
    /// The traditional 9x7 board.
    ///
    /// ```text
    ///   0 1 2 3 4 5 6
    /// 0 . . # @ # . .     Red den and traps
    /// 1 . . . # . . .
    /// 2 . . . . . . .
    /// 3 . ~ ~ . ~ ~ .
    /// 4 . ~ ~ . ~ ~ .
    /// 5 . ~ ~ . ~ ~ .
    /// 6 . . . . . . .
    /// 7 . . . # . . .
    /// 8 . . # @ # . .     Blue den and traps
    /// ```
    #[must_use]
    pub fn standard() -> Self {
        let rows = STANDARD_ROWS;
        let cols = STANDARD_COLS;
        let mut terrain = vec![Terrain::Normal; usize::from(rows) * usize::from(cols)];

        let mut set = |row: u8, col: u8, t: Terrain| {
            terrain[usize::from(row) * usize::from(cols) + usize::from(col)] = t;
        };

        for row in 3..=5 {
            for col in [1, 2, 4, 5] {
                set(row, col, Terrain::River);
            }
        }

        set(0, 2, Terrain::Trap(Color::Red));
        set(0, 4, Terrain::Trap(Color::Red));
        set(1, 3, Terrain::Trap(Color::Red));
        set(0, 3, Terrain::Den(Color::Red));

        set(8, 2, Terrain::Trap(Color::Blue));
        set(8, 4, Terrain::Trap(Color::Blue));
        set(7, 3, Terrain::Trap(Color::Blue));
        set(8, 3, Terrain::Den(Color::Blue));

        Self {
            rows,
            cols,
            terrain,
            dens: [Coord::new(8, 3), Coord::new(0, 3)],
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> u8 {
        self.cols
    }

    /// Check if a coordinate is within the board.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.in_bounds(coord)
            .then(|| usize::from(coord.row) * usize::from(self.cols) + usize::from(coord.col))
    }

    /// Terrain at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if the coordinate is not on the board.
    pub fn terrain(&self, coord: Coord) -> Result<Terrain, OutOfBounds> {
        self.index(coord)
            .map(|idx| self.terrain[idx])
            .ok_or(OutOfBounds(coord))
    }

    /// The den owned by `color`.
    #[must_use]
    pub const fn den_of(&self, color: Color) -> Coord {
        self.dens[color.index()]
    }

    /// The neighbor of `coord` in `dir`, if it is on the board.
    #[must_use]
    pub fn neighbor(&self, coord: Coord, dir: Direction) -> Option<Coord> {
        coord.step(dir).filter(|&c| self.in_bounds(c))
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Coord::new(row, col)))
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::standard()
    }
}

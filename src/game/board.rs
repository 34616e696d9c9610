//! Board state: which piece occupies which cell.
//!
//! The board does bookkeeping only. Legality is the rules engine's job; the
//! errors returned here guard structural invariants (one piece per cell,
//! accurate per-color counts).

use crate::error::BoardError;
use crate::game::{Color, Coord, Geometry, Piece, Species};

/// Traditional starting positions, Red pieces first.
pub const STARTING_LAYOUT: [(Species, Color, Coord); 16] = [
    (Species::Lion, Color::Red, Coord::new(0, 0)),
    (Species::Tiger, Color::Red, Coord::new(0, 6)),
    (Species::Dog, Color::Red, Coord::new(1, 1)),
    (Species::Cat, Color::Red, Coord::new(1, 5)),
    (Species::Rat, Color::Red, Coord::new(2, 0)),
    (Species::Leopard, Color::Red, Coord::new(2, 2)),
    (Species::Wolf, Color::Red, Coord::new(2, 4)),
    (Species::Elephant, Color::Red, Coord::new(2, 6)),
    (Species::Lion, Color::Blue, Coord::new(8, 6)),
    (Species::Tiger, Color::Blue, Coord::new(8, 0)),
    (Species::Dog, Color::Blue, Coord::new(7, 5)),
    (Species::Cat, Color::Blue, Coord::new(7, 1)),
    (Species::Rat, Color::Blue, Coord::new(6, 6)),
    (Species::Leopard, Color::Blue, Coord::new(6, 4)),
    (Species::Wolf, Color::Blue, Coord::new(6, 2)),
    (Species::Elephant, Color::Blue, Coord::new(6, 0)),
];

/// Mapping from every cell to at most one piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: u8,
    cols: u8,
    /// Cells stored in row-major order.
    cells: Vec<Option<Piece>>,
    /// Live piece counts indexed by `Color::index`.
    counts: [usize; 2],
}

impl Board {
    /// An empty board with the same dimensions as `geometry`.
    #[must_use]
    pub fn empty(geometry: &Geometry) -> Self {
        let size = usize::from(geometry.rows()) * usize::from(geometry.cols());
        Self {
            rows: geometry.rows(),
            cols: geometry.cols(),
            cells: vec![None; size],
            counts: [0; 2],
        }
    }

    /// A board with both sides in their starting positions.
    #[must_use]
    pub fn standard(geometry: &Geometry) -> Self {
        let mut board = Self::empty(geometry);
        for (species, color, coord) in STARTING_LAYOUT {
            let placed = board.place(coord, Piece::new(species, color));
            debug_assert!(placed.is_ok(), "starting layout does not fit {coord}");
        }
        board
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

    fn index(&self, coord: Coord) -> Result<usize, BoardError> {
        if coord.row < self.rows && coord.col < self.cols {
            Ok(usize::from(coord.row) * usize::from(self.cols) + usize::from(coord.col))
        } else {
            Err(BoardError::CoordinateOutOfRange(coord))
        }
    }

    /// The piece at `coord`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::CoordinateOutOfRange`] for coordinates off the board.
    pub fn get(&self, coord: Coord) -> Result<Option<Piece>, BoardError> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// The piece at `coord`; `None` for empty or off-board cells.
    #[must_use]
    #[inline]
    pub fn piece_at(&self, coord: Coord) -> Option<Piece> {
        self.get(coord).ok().flatten()
    }

    /// Mutable access to the piece at `coord`.
    #[must_use]
    pub fn piece_mut(&mut self, coord: Coord) -> Option<&mut Piece> {
        let idx = self.index(coord).ok()?;
        self.cells[idx].as_mut()
    }

    /// True if a piece occupies `coord`.
    #[must_use]
    #[inline]
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.piece_at(coord).is_some()
    }

    /// Put a piece on an empty cell.
    ///
    /// # Errors
    ///
    /// Fails if the coordinate is off the board or the cell is occupied.
    pub fn place(&mut self, coord: Coord, piece: Piece) -> Result<(), BoardError> {
        let idx = self.index(coord)?;
        if self.cells[idx].is_some() {
            return Err(BoardError::OccupiedDestination(coord));
        }
        self.cells[idx] = Some(piece);
        self.counts[piece.color().index()] += 1;
        Ok(())
    }

    /// Take the piece off `coord` and return it.
    ///
    /// # Errors
    ///
    /// Fails if the coordinate is off the board or the cell is empty.
    pub fn remove(&mut self, coord: Coord) -> Result<Piece, BoardError> {
        let idx = self.index(coord)?;
        let piece = self.cells[idx]
            .take()
            .ok_or(BoardError::EmptySquare(coord))?;
        self.counts[piece.color().index()] -= 1;
        Ok(piece)
    }

    /// Move the piece at `from` onto the empty cell `to`.
    ///
    /// # Errors
    ///
    /// Fails if either coordinate is off the board, `from` is empty or `to`
    /// is occupied. The board is unchanged on failure.
    pub fn relocate(&mut self, from: Coord, to: Coord) -> Result<(), BoardError> {
        let src = self.index(from)?;
        let dst = self.index(to)?;
        if self.cells[src].is_none() {
            return Err(BoardError::EmptySquare(from));
        }
        if self.cells[dst].is_some() {
            return Err(BoardError::OccupiedDestination(to));
        }
        self.cells[dst] = self.cells[src].take();
        Ok(())
    }

    /// Number of live pieces of `color`.
    #[must_use]
    pub const fn count(&self, color: Color) -> usize {
        self.counts[color.index()]
    }

    /// Iterate over every occupied cell.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        let cols = usize::from(self.cols);
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            #[allow(clippy::cast_possible_truncation)]
            let coord = Coord::new((idx / cols) as u8, (idx % cols) as u8);
            cell.map(|piece| (coord, piece))
        })
    }

    /// Iterate over the pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.iter().filter(move |(_, piece)| piece.color() == color)
    }
}

//! Piece catalog: colors, species, ranks and movement capabilities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Effective rank of a piece standing on an opposing trap.
///
/// Lower than every base rank, so a trapped piece can be taken by anything.
pub const TRAPPED_RANK: u8 = 0;

/// Maximum number of pieces a color starts with.
pub const PIECES_PER_COLOR: usize = Species::ALL.len();

/// One of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Starts at the bottom edge (row 8) and moves first by default.
    Blue,
    /// Starts at the top edge (row 0).
    Red,
}

impl Color {
    /// Both colors, Blue first.
    pub const ALL: [Color; 2] = [Color::Blue, Color::Red];

    /// The opposing color.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Color::Blue => Color::Red,
            Color::Red => Color::Blue,
        }
    }

    /// Dense index for per-color tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Color::Blue => 0,
            Color::Red => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Blue => write!(f, "Blue"),
            Color::Red => write!(f, "Red"),
        }
    }
}

/// The eight animals, declared in ascending rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    /// Rank 1. Swims, and may capture the Elephant.
    Rat,
    /// Rank 2.
    Cat,
    /// Rank 3.
    Dog,
    /// Rank 4.
    Wolf,
    /// Rank 5.
    Leopard,
    /// Rank 6. Leaps over the river.
    Tiger,
    /// Rank 7. Leaps over the river.
    Lion,
    /// Rank 8. May not capture the Rat.
    Elephant,
}

impl Species {
    /// All species in ascending rank order.
    pub const ALL: [Species; 8] = [
        Species::Rat,
        Species::Cat,
        Species::Dog,
        Species::Wolf,
        Species::Leopard,
        Species::Tiger,
        Species::Lion,
        Species::Elephant,
    ];

    /// Base rank, from 1 (Rat) to 8 (Elephant).
    #[must_use]
    pub const fn base_rank(self) -> u8 {
        match self {
            Species::Rat => 1,
            Species::Cat => 2,
            Species::Dog => 3,
            Species::Wolf => 4,
            Species::Leopard => 5,
            Species::Tiger => 6,
            Species::Lion => 7,
            Species::Elephant => 8,
        }
    }

    /// Whether the species may enter and move through River cells.
    #[must_use]
    pub const fn can_swim(self) -> bool {
        matches!(self, Species::Rat)
    }

    /// Whether the species may leap across the river in a straight line.
    #[must_use]
    pub const fn can_leap(self) -> bool {
        matches!(self, Species::Tiger | Species::Lion)
    }

    /// Single-letter symbol used by the text renderer.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Species::Rat => 'R',
            Species::Cat => 'C',
            Species::Dog => 'D',
            Species::Wolf => 'W',
            Species::Leopard => 'P',
            Species::Tiger => 'T',
            Species::Lion => 'L',
            Species::Elephant => 'E',
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A live piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    species: Species,
    color: Color,
    /// Base rank, or `TRAPPED_RANK` while on an opposing trap.
    rank: u8,
}

impl Piece {
    /// Create a piece at its base rank.
    #[must_use]
    pub const fn new(species: Species, color: Color) -> Self {
        Self {
            species,
            color,
            rank: species.base_rank(),
        }
    }

    /// The piece's species.
    #[must_use]
    pub const fn species(&self) -> Species {
        self.species
    }

    /// The owning color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Rank used for capture comparisons.
    #[must_use]
    pub const fn effective_rank(&self) -> u8 {
        self.rank
    }

    /// True while the piece's rank is nullified by a trap.
    #[must_use]
    pub const fn is_trapped(&self) -> bool {
        self.rank == TRAPPED_RANK
    }

    /// Nullify or restore the effective rank.
    pub fn set_trapped(&mut self, trapped: bool) {
        self.rank = if trapped {
            TRAPPED_RANK
        } else {
            self.species.base_rank()
        };
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.species)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_strictly_ascending() {
        for pair in Species::ALL.windows(2) {
            assert!(pair[0].base_rank() < pair[1].base_rank());
            assert!(pair[0] < pair[1]);
        }
        assert!(Species::ALL.iter().all(|s| s.base_rank() > TRAPPED_RANK));
    }

    #[test]
    fn test_capabilities() {
        let swimmers: Vec<_> = Species::ALL.iter().filter(|s| s.can_swim()).collect();
        assert_eq!(swimmers, vec![&Species::Rat]);

        let leapers: Vec<_> = Species::ALL.iter().filter(|s| s.can_leap()).collect();
        assert_eq!(leapers, vec![&Species::Tiger, &Species::Lion]);
    }

    #[test]
    fn test_color_other() {
        assert_eq!(Color::Blue.other(), Color::Red);
        assert_eq!(Color::Red.other(), Color::Blue);
        assert_ne!(Color::Blue.index(), Color::Red.index());
    }

    #[test]
    fn test_trap_toggle_restores_base_rank() {
        let mut lion = Piece::new(Species::Lion, Color::Red);
        assert_eq!(lion.effective_rank(), 7);
        assert!(!lion.is_trapped());

        lion.set_trapped(true);
        assert_eq!(lion.effective_rank(), TRAPPED_RANK);
        assert!(lion.is_trapped());

        lion.set_trapped(false);
        assert_eq!(lion.effective_rank(), 7);
    }

    #[test]
    fn test_symbols_unique() {
        let mut symbols: Vec<char> = Species::ALL.iter().map(|s| s.symbol()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), Species::ALL.len());
    }

    #[test]
    fn test_serialized_piece_reports_live_rank() {
        // Pieces are only built by `new` and adjusted by terrain, so the
        // serialized rank is always the base rank or the trapped rank.
        let mut cat = Piece::new(Species::Cat, Color::Blue);
        assert_eq!(
            serde_json::to_string(&cat).unwrap(),
            r#"{"species":"Cat","color":"Blue","rank":2}"#
        );
        cat.set_trapped(true);
        assert_eq!(
            serde_json::to_value(cat).unwrap()["rank"],
            serde_json::json!(TRAPPED_RANK)
        );
    }
}

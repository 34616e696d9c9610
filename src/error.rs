//! Error types for the rules engine.
//!
//! Rule violations (`InvalidMove`, `InvalidCapture`, `GameAlreadyOver`) are
//! expected outcomes of user input. `BoardError` means the low-level board API
//! was misused and should be unreachable through a validated session.

use std::fmt;

use crate::game::{Coord, InvariantViolation};

/// A coordinate lookup fell outside the board geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds(pub Coord);

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "coordinate {} is outside the board", self.0)
    }
}

impl std::error::Error for OutOfBounds {}

/// Structural misuse of the board's placement API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// The coordinate does not address a cell of this board.
    CoordinateOutOfRange(Coord),
    /// A piece was placed or relocated onto an occupied cell.
    OccupiedDestination(Coord),
    /// A piece was removed or relocated from an empty cell.
    EmptySquare(Coord),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoordinateOutOfRange(c) => write!(f, "coordinate {c} is out of range"),
            Self::OccupiedDestination(c) => write!(f, "destination {c} is already occupied"),
            Self::EmptySquare(c) => write!(f, "no piece at {c}"),
        }
    }
}

impl std::error::Error for BoardError {}

/// Why a submitted action was rejected.
///
/// The session is left unchanged whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    /// Source or destination is outside the board.
    OutOfBounds(Coord),
    /// The move breaks a movement rule.
    InvalidMove {
        /// Source cell.
        from: Coord,
        /// Destination cell.
        to: Coord,
    },
    /// The capture breaks a movement or rank rule.
    InvalidCapture {
        /// Attacker cell.
        from: Coord,
        /// Defender cell.
        to: Coord,
    },
    /// The game has a winner; call `restart` first.
    GameAlreadyOver {
        /// The color that won.
        winner: crate::game::Color,
    },
    /// A validated action failed structurally. Indicates a bug.
    Board(BoardError),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(c) => write!(f, "coordinate {c} is outside the board"),
            Self::InvalidMove { from, to } => write!(f, "invalid move {from}-{to}"),
            Self::InvalidCapture { from, to } => write!(f, "invalid capture {from}x{to}"),
            Self::GameAlreadyOver { winner } => {
                write!(f, "game is already over ({winner} won)")
            }
            Self::Board(e) => write!(f, "board error: {e}"),
        }
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Board(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BoardError> for ActionError {
    fn from(e: BoardError) -> Self {
        Self::Board(e)
    }
}

impl From<OutOfBounds> for ActionError {
    fn from(e: OutOfBounds) -> Self {
        Self::OutOfBounds(e.0)
    }
}

/// Why an engineered position was refused as a session's starting point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// Terrain could not be applied to a piece.
    Board(BoardError),
    /// The position breaks one or more board invariants.
    Invariants(Vec<InvariantViolation>),
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board(e) => write!(f, "invalid position: {e}"),
            Self::Invariants(violations) => {
                write!(f, "invalid position:")?;
                for v in violations {
                    write!(f, "\n  - {v}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for PositionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Board(e) => Some(e),
            Self::Invariants(_) => None,
        }
    }
}

impl From<BoardError> for PositionError {
    fn from(e: BoardError) -> Self {
        Self::Board(e)
    }
}

/// Result type for session actions.
pub type ActionResult<T> = Result<T, ActionError>;

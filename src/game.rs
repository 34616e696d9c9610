//! Game layer for Jungle.
//!
//! Implements the rules of Dou Shou Qi:
//! - Board geometry with river, traps and dens
//! - Pieces, ranks and terrain effects
//! - Move, leap and capture legality
//! - Turn order and win detection in a session

mod action;
mod board;
mod geometry;
mod invariants;
mod piece;
mod rules;
mod session;

pub use action::{Action, ActionKind, ParseActionError};
pub use board::{Board, STARTING_LAYOUT};
pub use geometry::{Coord, Direction, Geometry, STANDARD_COLS, STANDARD_ROWS, Terrain};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants, check_position};
pub use piece::{Color, PIECES_PER_COLOR, Piece, Species, TRAPPED_RANK};
pub use rules::{RuleOptions, Rules, apply_terrain_effects};
pub use session::{Applied, GameSession, GameStatus};

// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Jungle: a deterministic rules engine for Dou Shou Qi (animal chess).
//!
//! The crate models one two-player game on the traditional 9x7 board:
//! - Static geometry: river, traps and dens
//! - Eight ranked species per side with swim and leap abilities
//! - Move and capture validation with terrain effects
//! - A session that enforces turn order and detects the winner
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Driver binary (script replay)     │
//! ├─────────────────────────────────────┤
//! │   GameSession (turns, outcome)      │
//! ├─────────────────────────────────────┤
//! │   Rules (pure legality queries)     │
//! ├─────────────────────────────────────┤
//! │   Geometry + Board (state)          │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use jungle::{Coord, GameSession, GameStatus};
//!
//! let mut session = GameSession::default();
//! session.submit_move(Coord::new(6, 6), Coord::new(5, 6)).unwrap();
//! assert!(matches!(session.status(), GameStatus::InProgress(_)));
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod render;

pub use config::{ConfigError, SessionConfig};
pub use error::{ActionError, ActionResult, BoardError, OutOfBounds, PositionError};

// Re-export key game types at crate root for convenience
pub use game::{
    Action, ActionKind, Applied, Board, Color, Coord, GameSession, GameStatus, Geometry, Piece,
    RuleOptions, Rules, Species, Terrain,
};

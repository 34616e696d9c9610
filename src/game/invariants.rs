//! Game invariants: structural facts about a Jungle position.
//!
//! Sessions check them when adopting an engineered position and after every
//! applied action. A session driven only through `submit_*` and `restart`
//! never violates them; if one triggers there, the engine has a bug.

use std::fmt;

use crate::game::{Board, Color, GameSession, Geometry, PIECES_PER_COLOR, Terrain};

/// One broken invariant, described for humans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// What is wrong with the position.
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants of a session.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(session: &GameSession) -> Vec<InvariantViolation> {
    check_position(session.geometry(), session.board(), session.status().is_over())
}

/// Check a position before a session takes it over.
///
/// `game_over` relaxes the rule that nobody stands on an opposing den.
#[must_use]
pub fn check_position(
    geometry: &Geometry,
    board: &Board,
    game_over: bool,
) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if board.rows() != geometry.rows() || board.cols() != geometry.cols() {
        violations.push(InvariantViolation {
            message: format!(
                "board is {}x{} but the geometry is {}x{}",
                board.rows(),
                board.cols(),
                geometry.rows(),
                geometry.cols()
            ),
        });
    }

    let mut tallies = [0usize; 2];

    for (coord, piece) in board.iter() {
        tallies[piece.color().index()] += 1;

        let terrain = match geometry.terrain(coord) {
            Ok(t) => t,
            Err(e) => {
                violations.push(InvariantViolation {
                    message: format!("{piece} stands off the board: {e}"),
                });
                continue;
            }
        };

        if terrain.is_river() && !piece.species().can_swim() {
            violations.push(InvariantViolation {
                message: format!("{piece} at {coord} is in the river but cannot swim"),
            });
        }

        if terrain == Terrain::Den(piece.color()) {
            violations.push(InvariantViolation {
                message: format!("{piece} at {coord} occupies its own den"),
            });
        }

        let should_be_trapped = terrain.is_trap_against(piece.color());
        if piece.is_trapped() != should_be_trapped {
            violations.push(InvariantViolation {
                message: format!(
                    "{piece} at {coord} has rank {} on {terrain:?}",
                    piece.effective_rank()
                ),
            });
        }
    }

    for color in Color::ALL {
        let counted = tallies[color.index()];
        if counted != board.count(color) {
            violations.push(InvariantViolation {
                message: format!(
                    "{color} count is {} but {counted} pieces are on the board",
                    board.count(color)
                ),
            });
        }
        if counted > PIECES_PER_COLOR {
            violations.push(InvariantViolation {
                message: format!("{color} has {counted} pieces > {PIECES_PER_COLOR}"),
            });
        }
    }

    // A den occupation must have ended the game.
    if !game_over {
        for color in Color::ALL {
            let den = geometry.den_of(color.other());
            if board.piece_at(den).is_some_and(|p| p.color() == color) {
                violations.push(InvariantViolation {
                    message: format!("{color} occupies the opposing den but the game is running"),
                });
            }
        }
    }

    violations
}

/// Check a session after it applied an action.
///
/// A violation here means an accepted move or capture left the board in a
/// state the rules cannot produce: a stacked or lost piece, a non-swimmer in
/// the river, a stale trap rank, or a den entry that did not end the game.
/// Debug builds panic with every violation listed. Release builds skip the
/// check.
///
/// # Panics
///
/// Panics in debug builds if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(session: &GameSession) {
    let violations = check_invariants(session);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!(
            "session left an impossible position after {} half-moves:\n  - {}",
            session.half_moves(),
            messages.join("\n  - ")
        );
    }
}

/// Release builds trust the rules engine.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_session: &GameSession) {}

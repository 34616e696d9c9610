//! Rules engine: move and capture legality, terrain effects, win conditions.
//!
//! All queries are pure reads over a [`Board`] and its [`Geometry`]. The only
//! mutation here is [`apply_terrain_effects`], which the session calls after a
//! piece has landed.

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::game::{Action, Board, Color, Coord, Direction, Geometry, Piece, Species, Terrain};

/// Tunable rule variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    /// Whether a Rat standing on an opposing trap keeps its right to capture
    /// the Elephant. Off by default: a trapped piece captures nothing.
    pub trapped_rat_captures_elephant: bool,
}

/// How a piece reaches its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reach {
    Step,
    Leap,
}

/// Read-only rule queries over one position.
#[derive(Debug, Clone, Copy)]
pub struct Rules<'a> {
    geometry: &'a Geometry,
    board: &'a Board,
    options: RuleOptions,
}

impl<'a> Rules<'a> {
    /// Bind the rules to a position.
    #[must_use]
    pub const fn new(geometry: &'a Geometry, board: &'a Board, options: RuleOptions) -> Self {
        Self {
            geometry,
            board,
            options,
        }
    }

    /// Terrain lookup that treats off-board cells as absent.
    fn terrain(&self, coord: Coord) -> Option<Terrain> {
        self.geometry.terrain(coord).ok()
    }

    /// Whether `piece` standing on `from` can get to `to`, ignoring what
    /// occupies `to`.
    ///
    /// Checks distance, leap paths, river access and the mover's own den.
    fn reach(&self, piece: Piece, from: Coord, to: Coord) -> Option<Reach> {
        let dest = self.terrain(to)?;
        self.terrain(from)?;

        if dest == Terrain::Den(piece.color()) {
            return None;
        }
        if dest.is_river() && !piece.species().can_swim() {
            return None;
        }

        if from.is_adjacent(to) {
            return Some(Reach::Step);
        }
        if piece.species().can_leap() && self.is_clear_leap(from, to) {
            return Some(Reach::Leap);
        }
        None
    }

    /// A straight line that crosses only empty River cells and ends on the
    /// first land cell beyond them.
    fn is_clear_leap(&self, from: Coord, to: Coord) -> bool {
        let Some((dir, steps)) = from.line_to(to) else {
            return false;
        };
        if steps < 2 {
            return false;
        }

        let mut cursor = from;
        for _ in 1..steps {
            let Some(next) = self.geometry.neighbor(cursor, dir) else {
                return false;
            };
            if !self.terrain(next).is_some_and(Terrain::is_river) {
                return false;
            }
            if self.board.is_occupied(next) {
                return false;
            }
            cursor = next;
        }

        self.terrain(to).is_some_and(|t| !t.is_river())
    }

    /// True iff `mover` may move the piece on `from` onto the empty cell `to`.
    ///
    /// Entering the opponent's den is legal and wins the game.
    #[must_use]
    pub fn is_valid_move(&self, mover: Color, from: Coord, to: Coord) -> bool {
        if from == to {
            return false;
        }
        let Some(piece) = self.board.piece_at(from) else {
            return false;
        };
        if piece.color() != mover || self.board.is_occupied(to) {
            return false;
        }
        self.reach(piece, from, to).is_some()
    }

    /// True iff `mover` may capture the opposing piece on `to` with the
    /// piece on `from`.
    #[must_use]
    pub fn is_valid_capture(&self, mover: Color, from: Coord, to: Coord) -> bool {
        if from == to {
            return false;
        }
        let (Some(attacker), Some(defender)) =
            (self.board.piece_at(from), self.board.piece_at(to))
        else {
            return false;
        };
        if attacker.color() != mover || defender.color() == mover {
            return false;
        }
        let Some(reach) = self.reach(attacker, from, to) else {
            return false;
        };
        self.outranks(attacker, from, defender, to, reach)
    }

    /// Rank comparison with terrain and the Rat/Elephant exception applied.
    ///
    /// The Rat only takes the Elephant with a direct step.
    fn outranks(
        &self,
        attacker: Piece,
        from: Coord,
        defender: Piece,
        to: Coord,
        reach: Reach,
    ) -> bool {
        let (Some(src), Some(dst)) = (self.terrain(from), self.terrain(to)) else {
            return false;
        };
        // Nothing captures across the river bank.
        if src.is_river() != dst.is_river() {
            return false;
        }

        let rat_on_elephant = reach == Reach::Step
            && attacker.species() == Species::Rat
            && defender.species() == Species::Elephant;

        if attacker.is_trapped() {
            return rat_on_elephant && self.options.trapped_rat_captures_elephant;
        }
        if rat_on_elephant {
            return true;
        }
        if attacker.species() == Species::Elephant
            && defender.species() == Species::Rat
            && !defender.is_trapped()
        {
            return false;
        }
        attacker.effective_rank() >= defender.effective_rank()
    }

    /// Every legal move and capture available to `color`.
    #[must_use]
    pub fn legal_actions(&self, color: Color) -> Vec<Action> {
        let mut out = Vec::new();
        for (from, _) in self.board.pieces_of(color) {
            for to in self.candidate_targets(from) {
                if self.is_valid_move(color, from, to) {
                    out.push(Action::new_move(from, to));
                } else if self.is_valid_capture(color, from, to) {
                    out.push(Action::new_capture(from, to));
                }
            }
        }
        out
    }

    /// True if `color` has at least one legal move or capture.
    #[must_use]
    pub fn has_legal_action(&self, color: Color) -> bool {
        self.board.pieces_of(color).any(|(from, _)| {
            self.candidate_targets(from).any(|to| {
                self.is_valid_move(color, from, to) || self.is_valid_capture(color, from, to)
            })
        })
    }

    /// Adjacent cells plus the far bank in each direction (for leapers).
    fn candidate_targets(&self, from: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::ALL.into_iter().flat_map(move |dir| {
            let step = self.geometry.neighbor(from, dir);
            let mut far = step;
            while let Some(c) = far {
                if !self.terrain(c).is_some_and(Terrain::is_river) {
                    break;
                }
                far = self.geometry.neighbor(c, dir);
            }
            let far = far.filter(|&c| Some(c) != step);
            step.into_iter().chain(far)
        })
    }

    /// True if a piece of `color` stands on the opponent's den.
    #[must_use]
    pub fn occupies_opponent_den(&self, color: Color) -> bool {
        let den = self.geometry.den_of(color.other());
        self.board
            .piece_at(den)
            .is_some_and(|piece| piece.color() == color)
    }

    /// True iff `color` has won: the opponent has no pieces, the opponent
    /// cannot act, or `color` occupies the opponent's den.
    #[must_use]
    pub fn evaluate_win_condition(&self, color: Color) -> bool {
        let opponent = color.other();
        self.board.count(opponent) == 0
            || !self.has_legal_action(opponent)
            || self.occupies_opponent_den(color)
    }
}

/// Recompute the effective rank of the piece on `coord` from its terrain.
///
/// Call after a piece lands. Empty cells are left alone.
///
/// # Errors
///
/// Returns [`BoardError::CoordinateOutOfRange`] if `coord` is off the board.
pub fn apply_terrain_effects(
    board: &mut Board,
    geometry: &Geometry,
    coord: Coord,
) -> Result<(), BoardError> {
    let terrain = geometry
        .terrain(coord)
        .map_err(|_| BoardError::CoordinateOutOfRange(coord))?;
    if let Some(piece) = board.piece_mut(coord) {
        let trapped = terrain.is_trap_against(piece.color());
        piece.set_trapped(trapped);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(pieces: &[(Species, Color, Coord)]) -> (Geometry, Board) {
        let geometry = Geometry::standard();
        let mut board = Board::empty(&geometry);
        for &(species, color, coord) in pieces {
            board.place(coord, Piece::new(species, color)).unwrap();
            apply_terrain_effects(&mut board, &geometry, coord).unwrap();
        }
        (geometry, board)
    }

    #[test]
    fn test_simple_step() {
        let (geo, board) = setup(&[(Species::Dog, Color::Blue, Coord::new(7, 5))]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());

        assert!(rules.is_valid_move(Color::Blue, Coord::new(7, 5), Coord::new(6, 5)));
        assert!(rules.is_valid_move(Color::Blue, Coord::new(7, 5), Coord::new(7, 4)));
        // Two cells, diagonal, null move, wrong color.
        assert!(!rules.is_valid_move(Color::Blue, Coord::new(7, 5), Coord::new(5, 5)));
        assert!(!rules.is_valid_move(Color::Blue, Coord::new(7, 5), Coord::new(6, 4)));
        assert!(!rules.is_valid_move(Color::Blue, Coord::new(7, 5), Coord::new(7, 5)));
        assert!(!rules.is_valid_move(Color::Red, Coord::new(7, 5), Coord::new(6, 5)));
    }

    #[test]
    fn test_own_den_forbidden() {
        let (geo, board) = setup(&[
            (Species::Cat, Color::Blue, Coord::new(7, 3)),
            (Species::Cat, Color::Red, Coord::new(1, 3)),
        ]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());
        assert!(!rules.is_valid_move(Color::Blue, Coord::new(7, 3), Coord::new(8, 3)));
        assert!(!rules.is_valid_move(Color::Red, Coord::new(1, 3), Coord::new(0, 3)));
    }

    #[test]
    fn test_only_rat_swims() {
        let (geo, board) = setup(&[
            (Species::Rat, Color::Blue, Coord::new(6, 1)),
            (Species::Elephant, Color::Blue, Coord::new(6, 2)),
        ]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());
        assert!(rules.is_valid_move(Color::Blue, Coord::new(6, 1), Coord::new(5, 1)));
        assert!(!rules.is_valid_move(Color::Blue, Coord::new(6, 2), Coord::new(5, 2)));
    }

    #[test]
    fn test_vertical_and_horizontal_leaps() {
        let (geo, board) = setup(&[
            (Species::Lion, Color::Blue, Coord::new(6, 1)),
            (Species::Tiger, Color::Blue, Coord::new(4, 0)),
            (Species::Leopard, Color::Blue, Coord::new(6, 5)),
        ]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());

        assert!(rules.is_valid_move(Color::Blue, Coord::new(6, 1), Coord::new(2, 1)));
        assert!(rules.is_valid_move(Color::Blue, Coord::new(4, 0), Coord::new(4, 3)));
        // Landing in the middle of the river, or leaping with a non-leaper.
        assert!(!rules.is_valid_move(Color::Blue, Coord::new(6, 1), Coord::new(4, 1)));
        assert!(!rules.is_valid_move(Color::Blue, Coord::new(6, 5), Coord::new(2, 5)));
        // Overshooting the far bank.
        assert!(!rules.is_valid_move(Color::Blue, Coord::new(6, 1), Coord::new(1, 1)));
    }

    #[test]
    fn test_leap_blocked_by_swimmer() {
        let (geo, board) = setup(&[
            (Species::Tiger, Color::Blue, Coord::new(3, 3)),
            (Species::Rat, Color::Red, Coord::new(3, 5)),
        ]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());
        assert!(!rules.is_valid_move(Color::Blue, Coord::new(3, 3), Coord::new(3, 6)));
        assert!(rules.is_valid_move(Color::Blue, Coord::new(3, 3), Coord::new(3, 0)));
    }

    #[test]
    fn test_rank_capture() {
        let (geo, board) = setup(&[
            (Species::Wolf, Color::Blue, Coord::new(4, 3)),
            (Species::Dog, Color::Red, Coord::new(3, 3)),
            (Species::Wolf, Color::Red, Coord::new(4, 0)),
            (Species::Leopard, Color::Red, Coord::new(5, 3)),
        ]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());
        let wolf = Coord::new(4, 3);
        assert!(rules.is_valid_capture(Color::Blue, wolf, Coord::new(3, 3)));
        assert!(!rules.is_valid_capture(Color::Blue, wolf, Coord::new(5, 3)));
        // Equal ranks trade.
        let (geo, board) = setup(&[
            (Species::Wolf, Color::Blue, Coord::new(4, 3)),
            (Species::Wolf, Color::Red, Coord::new(3, 3)),
        ]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());
        assert!(rules.is_valid_capture(Color::Blue, wolf, Coord::new(3, 3)));
    }

    #[test]
    fn test_capture_requires_opponent_piece() {
        let (geo, board) = setup(&[
            (Species::Lion, Color::Blue, Coord::new(4, 3)),
            (Species::Cat, Color::Blue, Coord::new(3, 3)),
        ]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());
        assert!(!rules.is_valid_capture(Color::Blue, Coord::new(4, 3), Coord::new(3, 3)));
        assert!(!rules.is_valid_capture(Color::Blue, Coord::new(4, 3), Coord::new(4, 4)));
    }

    #[test]
    fn test_rat_elephant_direction() {
        let (geo, board) = setup(&[
            (Species::Rat, Color::Blue, Coord::new(2, 3)),
            (Species::Elephant, Color::Red, Coord::new(2, 4)),
        ]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());
        assert!(rules.is_valid_capture(Color::Blue, Coord::new(2, 3), Coord::new(2, 4)));
        assert!(!rules.is_valid_capture(Color::Red, Coord::new(2, 4), Coord::new(2, 3)));
    }

    #[test]
    fn test_river_bank_blocks_capture() {
        let (geo, board) = setup(&[
            (Species::Rat, Color::Blue, Coord::new(3, 1)),
            (Species::Elephant, Color::Red, Coord::new(2, 1)),
            (Species::Rat, Color::Red, Coord::new(4, 1)),
            (Species::Cat, Color::Red, Coord::new(3, 0)),
        ]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());
        let rat = Coord::new(3, 1);
        assert!(!rules.is_valid_capture(Color::Blue, rat, Coord::new(2, 1)));
        assert!(!rules.is_valid_capture(Color::Blue, rat, Coord::new(3, 0)));
        assert!(!rules.is_valid_capture(Color::Red, Coord::new(3, 0), rat));
        // Rat against rat inside the river.
        assert!(rules.is_valid_capture(Color::Blue, rat, Coord::new(4, 1)));
    }

    #[test]
    fn test_trapped_piece_captures_nothing() {
        // Blue lion on a Red trap.
        let (geo, board) = setup(&[
            (Species::Lion, Color::Blue, Coord::new(1, 3)),
            (Species::Cat, Color::Red, Coord::new(1, 2)),
        ]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());
        assert!(board.piece_at(Coord::new(1, 3)).unwrap().is_trapped());
        assert!(!rules.is_valid_capture(Color::Blue, Coord::new(1, 3), Coord::new(1, 2)));
        assert!(rules.is_valid_capture(Color::Red, Coord::new(1, 2), Coord::new(1, 3)));
    }

    #[test]
    fn test_own_trap_does_not_weaken() {
        let (geo, board) = setup(&[
            (Species::Lion, Color::Blue, Coord::new(7, 3)),
            (Species::Cat, Color::Red, Coord::new(6, 3)),
        ]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());
        assert!(!board.piece_at(Coord::new(7, 3)).unwrap().is_trapped());
        assert!(!rules.is_valid_capture(Color::Red, Coord::new(6, 3), Coord::new(7, 3)));
    }

    #[test]
    fn test_trapped_rat_option() {
        let (geo, board) = setup(&[
            (Species::Rat, Color::Blue, Coord::new(0, 2)),
            (Species::Elephant, Color::Red, Coord::new(0, 1)),
        ]);
        let rat = Coord::new(0, 2);
        let elephant = Coord::new(0, 1);

        let strict = Rules::new(&geo, &board, RuleOptions::default());
        assert!(!strict.is_valid_capture(Color::Blue, rat, elephant));

        let lenient = Rules::new(
            &geo,
            &board,
            RuleOptions {
                trapped_rat_captures_elephant: true,
            },
        );
        assert!(lenient.is_valid_capture(Color::Blue, rat, elephant));
        // Either way the trapped rat is fair game for the elephant.
        assert!(strict.is_valid_capture(Color::Red, elephant, rat));
        assert!(lenient.is_valid_capture(Color::Red, elephant, rat));
    }

    #[test]
    fn test_terrain_effects_restore() {
        let geometry = Geometry::standard();
        let mut board = Board::empty(&geometry);
        let trap = Coord::new(8, 2);
        board.place(trap, Piece::new(Species::Tiger, Color::Red)).unwrap();

        apply_terrain_effects(&mut board, &geometry, trap).unwrap();
        assert_eq!(board.piece_at(trap).unwrap().effective_rank(), crate::game::TRAPPED_RANK);

        board.relocate(trap, Coord::new(8, 1)).unwrap();
        apply_terrain_effects(&mut board, &geometry, Coord::new(8, 1)).unwrap();
        assert_eq!(board.piece_at(Coord::new(8, 1)).unwrap().effective_rank(), 6);

        assert_eq!(
            apply_terrain_effects(&mut board, &geometry, Coord::new(9, 9)),
            Err(BoardError::CoordinateOutOfRange(Coord::new(9, 9)))
        );
    }

    #[test]
    fn test_legal_actions_opening() {
        let geometry = Geometry::standard();
        let board = Board::standard(&geometry);
        let rules = Rules::new(&geometry, &board, RuleOptions::default());

        let actions = rules.legal_actions(Color::Blue);
        assert!(!actions.is_empty());
        assert!(actions.iter().all(|a| a.kind == crate::game::ActionKind::Move));
        assert!(actions.contains(&Action::new_move(Coord::new(6, 6), Coord::new(5, 6))));
        // Wolf cannot step into the river.
        assert!(!actions.contains(&Action::new_move(Coord::new(6, 2), Coord::new(5, 2))));
        assert!(rules.has_legal_action(Color::Red));
    }

    #[test]
    fn test_legal_actions_include_leap() {
        let (geo, board) = setup(&[(Species::Lion, Color::Blue, Coord::new(6, 1))]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());
        let actions = rules.legal_actions(Color::Blue);
        assert!(actions.contains(&Action::new_move(Coord::new(6, 1), Coord::new(2, 1))));
    }

    #[test]
    fn test_win_conditions() {
        let (geo, board) = setup(&[
            (Species::Cat, Color::Blue, Coord::new(0, 3)),
            (Species::Dog, Color::Red, Coord::new(4, 3)),
        ]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());
        assert!(rules.occupies_opponent_den(Color::Blue));
        assert!(rules.evaluate_win_condition(Color::Blue));
        assert!(!rules.evaluate_win_condition(Color::Red));

        let (geo, board) = setup(&[(Species::Cat, Color::Blue, Coord::new(4, 3))]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());
        assert!(rules.evaluate_win_condition(Color::Blue));
    }

    #[test]
    fn test_rat_exception_needs_a_step() {
        let (geo, board) = setup(&[
            (Species::Rat, Color::Blue, Coord::new(2, 3)),
            (Species::Elephant, Color::Red, Coord::new(2, 4)),
        ]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());
        let rat = board.piece_at(Coord::new(2, 3)).unwrap();
        let elephant = board.piece_at(Coord::new(2, 4)).unwrap();
        let (from, to) = (Coord::new(2, 3), Coord::new(2, 4));

        assert_eq!(rules.reach(rat, from, to), Some(Reach::Step));
        assert!(rules.outranks(rat, from, elephant, to, Reach::Step));
        assert!(!rules.outranks(rat, from, elephant, to, Reach::Leap));
    }

    #[test]
    fn test_leap_capture() {
        let (geo, board) = setup(&[
            (Species::Lion, Color::Blue, Coord::new(6, 1)),
            (Species::Tiger, Color::Red, Coord::new(2, 1)),
            (Species::Tiger, Color::Blue, Coord::new(3, 0)),
            (Species::Lion, Color::Red, Coord::new(3, 3)),
        ]);
        let rules = Rules::new(&geo, &board, RuleOptions::default());
        let lion = board.piece_at(Coord::new(6, 1)).unwrap();

        assert_eq!(
            rules.reach(lion, Coord::new(6, 1), Coord::new(2, 1)),
            Some(Reach::Leap)
        );
        assert!(rules.is_valid_capture(Color::Blue, Coord::new(6, 1), Coord::new(2, 1)));
        // Tiger leaping onto a Lion is outranked.
        assert!(!rules.is_valid_capture(Color::Blue, Coord::new(3, 0), Coord::new(3, 3)));
        // The Lion leaping back the other way may take the Tiger.
        assert!(rules.is_valid_capture(Color::Red, Coord::new(3, 3), Coord::new(3, 0)));
        assert!(
            rules
                .legal_actions(Color::Blue)
                .contains(&Action::new_capture(Coord::new(6, 1), Coord::new(2, 1)))
        );
    }
}

//! Game session: turn order, applying validated actions, and outcome.

use log::{debug, info, trace};
use serde::Serialize;

use crate::config::SessionConfig;
use crate::error::{ActionError, ActionResult, BoardError, PositionError};
use crate::game::{
    Action, ActionKind, Board, Color, Coord, Geometry, Piece, Rules, apply_terrain_effects,
    assert_invariants, check_position,
};

/// Whether the game is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    /// Waiting for the given color to act.
    InProgress(Color),
    /// The given color has won. Terminal until restart.
    Won(Color),
}

impl GameStatus {
    /// The winner, if the game is over.
    #[must_use]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::InProgress(_) => None,
            GameStatus::Won(color) => Some(color),
        }
    }

    /// True once a winner is decided.
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, GameStatus::Won(_))
    }
}

/// Report of an accepted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Applied {
    /// The action that was applied.
    pub action: Action,
    /// The piece that acted, after terrain effects on its new cell.
    pub piece: Piece,
    /// The piece removed by a capture.
    pub captured: Option<Piece>,
    /// Half-moves played so far, including this one.
    pub half_moves: u32,
    /// Set when this action ended the game.
    pub winner: Option<Color>,
}

impl Applied {
    /// True if this action ended the game.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }
}

/// One game of Jungle: the board, whose turn it is, and the outcome.
#[derive(Debug, Clone)]
pub struct GameSession {
    geometry: Geometry,
    board: Board,
    config: SessionConfig,
    /// Color to act next, or the winner once the game is over.
    to_move: Color,
    half_moves: u32,
    status: GameStatus,
}

impl GameSession {
    /// A session with the standard board in its starting position.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let geometry = Geometry::standard();
        let board = Board::standard(&geometry);
        Self {
            geometry,
            board,
            config,
            to_move: config.first_player,
            half_moves: 0,
            status: GameStatus::InProgress(config.first_player),
        }
    }

    /// A session over an arbitrary position with `to_move` to act.
    ///
    /// Terrain effects are applied to every piece. If the position is already
    /// won for the side that just moved, the session starts finished.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError::Invariants`] if the board could not arise in
    /// play: a non-swimmer in the river, a piece on its own den, more than
    /// eight pieces of a color, a board sized differently from `geometry`, or
    /// a den occupied while nobody has won.
    pub fn from_position(
        geometry: Geometry,
        mut board: Board,
        to_move: Color,
        config: SessionConfig,
    ) -> Result<Self, PositionError> {
        let occupied: Vec<Coord> = board.iter().map(|(coord, _)| coord).collect();
        for coord in occupied {
            apply_terrain_effects(&mut board, &geometry, coord)?;
        }

        let last_mover = to_move.other();
        let won = Rules::new(&geometry, &board, config.rules).evaluate_win_condition(last_mover);

        let violations = check_position(&geometry, &board, won);
        if !violations.is_empty() {
            debug!("refused position with {} violations", violations.len());
            return Err(PositionError::Invariants(violations));
        }

        let (to_move, status) = if won {
            (last_mover, GameStatus::Won(last_mover))
        } else {
            (to_move, GameStatus::InProgress(to_move))
        };

        Ok(Self {
            geometry,
            board,
            config,
            to_move,
            half_moves: 0,
            status,
        })
    }

    /// Reset to the starting position with the configured first player.
    pub fn restart(&mut self) {
        self.board = Board::standard(&self.geometry);
        self.to_move = self.config.first_player;
        self.half_moves = 0;
        self.status = GameStatus::InProgress(self.to_move);
        debug!("restart: {} to move", self.to_move);
    }

    /// Color whose turn it is (the winner, once the game is over).
    #[must_use]
    pub const fn current_turn_color(&self) -> Color {
        self.to_move
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Half-moves applied since the last restart.
    #[must_use]
    pub const fn half_moves(&self) -> u32 {
        self.half_moves
    }

    /// The 1-based round number; a round is one action by each color.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.half_moves / 2 + 1
    }

    /// The live board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for tests that need an impossible position.
    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The board geometry.
    #[must_use]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Rule queries over the current position.
    #[must_use]
    pub const fn rules(&self) -> Rules<'_> {
        Rules::new(&self.geometry, &self.board, self.config.rules)
    }

    /// Legal actions for the side to move; empty once the game is over.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.status.is_over() {
            return Vec::new();
        }
        self.rules().legal_actions(self.to_move)
    }

    /// Move the current player's piece from `from` to the empty cell `to`.
    ///
    /// # Errors
    ///
    /// Returns `GameAlreadyOver`, `OutOfBounds` or `InvalidMove`. The session
    /// is unchanged on error.
    pub fn submit_move(&mut self, from: Coord, to: Coord) -> ActionResult<Applied> {
        self.submit(Action::new_move(from, to))
    }

    /// Capture the opposing piece on `to` with the current player's piece on
    /// `from`.
    ///
    /// # Errors
    ///
    /// Returns `GameAlreadyOver`, `OutOfBounds` or `InvalidCapture`. The
    /// session is unchanged on error.
    pub fn submit_capture(&mut self, from: Coord, to: Coord) -> ActionResult<Applied> {
        self.submit(Action::new_capture(from, to))
    }

    /// Validate and apply an action for the side to move.
    ///
    /// # Errors
    ///
    /// See [`GameSession::submit_move`] and [`GameSession::submit_capture`].
    pub fn submit(&mut self, action: Action) -> ActionResult<Applied> {
        if let GameStatus::Won(winner) = self.status {
            trace!("rejected {action}: game already won by {winner}");
            return Err(ActionError::GameAlreadyOver { winner });
        }
        for coord in [action.from, action.to] {
            self.geometry.terrain(coord)?;
        }

        let mover = self.to_move;
        let rules = self.rules();
        let legal = match action.kind {
            ActionKind::Move => rules.is_valid_move(mover, action.from, action.to),
            ActionKind::Capture => rules.is_valid_capture(mover, action.from, action.to),
        };
        if !legal {
            trace!("rejected {action} for {mover}");
            let (from, to) = (action.from, action.to);
            return Err(match action.kind {
                ActionKind::Move => ActionError::InvalidMove { from, to },
                ActionKind::Capture => ActionError::InvalidCapture { from, to },
            });
        }

        self.apply(mover, action)
    }

    /// Mutate the board for an action the rules have accepted.
    fn apply(&mut self, mover: Color, action: Action) -> ActionResult<Applied> {
        let captured = match action.kind {
            ActionKind::Capture => Some(self.board.remove(action.to)?),
            ActionKind::Move => None,
        };
        if let Err(e) = self.board.relocate(action.from, action.to) {
            if let Some(piece) = captured {
                self.board.place(action.to, piece)?;
            }
            return Err(e.into());
        }
        apply_terrain_effects(&mut self.board, &self.geometry, action.to)?;
        self.half_moves += 1;

        let piece = self
            .board
            .piece_at(action.to)
            .ok_or(BoardError::EmptySquare(action.to))?;
        let ply = self.half_moves;
        match captured {
            Some(taken) => debug!("{mover} #{ply}: {piece} {action} takes {taken}"),
            None => debug!("{mover} #{ply}: {piece} {action}"),
        }

        let winner = self.rules().evaluate_win_condition(mover).then_some(mover);
        if let Some(winner) = winner {
            self.status = GameStatus::Won(winner);
            info!("{winner} wins after {} half-moves", self.half_moves);
        } else {
            self.to_move = mover.other();
            self.status = GameStatus::InProgress(self.to_move);
        }

        assert_invariants(self);

        Ok(Applied {
            action,
            piece,
            captured,
            half_moves: self.half_moves,
            winner,
        })
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

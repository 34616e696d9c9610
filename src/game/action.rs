//! Actions and their text notation.
//!
//! Moves are written `row,col-row,col` and captures `row,colxrow,col`,
//! e.g. `6,6-5,6` or `3,0x2,0`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::game::Coord;

/// Whether an action lands on an empty cell or takes a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActionKind {
    /// Move onto an empty cell.
    Move,
    /// Capture the opposing piece on the destination.
    Capture,
}

/// A proposed move or capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Action {
    /// Move or capture.
    pub kind: ActionKind,
    /// Cell of the acting piece.
    pub from: Coord,
    /// Target cell.
    pub to: Coord,
}

impl Action {
    /// A move from `from` to the empty cell `to`.
    #[must_use]
    pub const fn new_move(from: Coord, to: Coord) -> Self {
        Self {
            kind: ActionKind::Move,
            from,
            to,
        }
    }

    /// A capture of the piece on `to` by the piece on `from`.
    #[must_use]
    pub const fn new_capture(from: Coord, to: Coord) -> Self {
        Self {
            kind: ActionKind::Capture,
            from,
            to,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = match self.kind {
            ActionKind::Move => '-',
            ActionKind::Capture => 'x',
        };
        write!(f, "{}{sep}{}", self.from, self.to)
    }
}

/// Error returned when action notation cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseActionError {
    input: String,
}

impl fmt::Display for ParseActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot parse action {:?} (expected `r,c-r,c` or `r,cxr,c`)",
            self.input
        )
    }
}

impl std::error::Error for ParseActionError {}

fn parse_coord(s: &str) -> Option<Coord> {
    let (row, col) = s.trim().split_once(',')?;
    Some(Coord::new(row.trim().parse().ok()?, col.trim().parse().ok()?))
}

impl FromStr for Action {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseActionError {
            input: s.to_string(),
        };
        let s = s.trim();
        let (kind, (from, to)) = if let Some(parts) = s.split_once('-') {
            (ActionKind::Move, parts)
        } else if let Some(parts) = s.split_once(['x', 'X']) {
            (ActionKind::Capture, parts)
        } else {
            return Err(err());
        };
        let from = parse_coord(from).ok_or_else(err)?;
        let to = parse_coord(to).ok_or_else(err)?;
        Ok(Self { kind, from, to })
    }
}

//! Output formatting utilities for CLI.

use jungle::{ActionError, Applied, Color, GameSession, GameStatus};
use serde::Serialize;

/// Outcome of one scripted action.
#[derive(Debug)]
pub(super) struct Step {
    /// 1-based line number in the script.
    pub(super) line: usize,
    /// Action text as written in the script, normalized.
    pub(super) action: String,
    /// What the session said.
    pub(super) outcome: Result<Applied, ActionError>,
}

/// JSON-serializable step.
#[derive(Debug, Serialize)]
pub(super) struct JsonStep {
    /// Script line.
    pub(super) line: usize,
    /// Action notation.
    pub(super) action: String,
    /// Whether the session accepted it.
    pub(super) accepted: bool,
    /// Details of an accepted action.
    pub(super) applied: Option<Applied>,
    /// Rejection reason.
    pub(super) error: Option<String>,
}

/// JSON-serializable final report.
#[derive(Debug, Serialize)]
pub(super) struct JsonReport {
    /// Every scripted action in order.
    pub(super) steps: Vec<JsonStep>,
    /// Final status.
    pub(super) status: GameStatus,
    /// Winner, if any.
    pub(super) winner: Option<Color>,
    /// Half-moves applied.
    pub(super) half_moves: u32,
    /// Live Blue pieces.
    pub(super) blue_pieces: usize,
    /// Live Red pieces.
    pub(super) red_pieces: usize,
    /// Legal actions of the side to move, when requested.
    pub(super) legal: Option<Vec<String>>,
}

impl JsonReport {
    /// Build from the script results and the final session.
    pub(super) fn new(steps: &[Step], session: &GameSession, legal: bool) -> Self {
        Self {
            steps: steps
                .iter()
                .map(|step| JsonStep {
                    line: step.line,
                    action: step.action.clone(),
                    accepted: step.outcome.is_ok(),
                    applied: step.outcome.as_ref().ok().copied(),
                    error: step.outcome.as_ref().err().map(ToString::to_string),
                })
                .collect(),
            status: session.status(),
            winner: session.status().winner(),
            half_moves: session.half_moves(),
            blue_pieces: session.board().count(Color::Blue),
            red_pieces: session.board().count(Color::Red),
            legal: legal.then(|| legal_notation(session)),
        }
    }
}

/// Legal actions of the side to move in script notation.
pub(super) fn legal_notation(session: &GameSession) -> Vec<String> {
    session
        .legal_actions()
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Format one step as a human-readable line.
pub(super) fn format_step(step: &Step) -> String {
    match &step.outcome {
        Ok(applied) => {
            let mut line = format!(
                "{:>4}: {:<8} {} ({})",
                step.line, step.action, applied.piece, applied.half_moves
            );
            if let Some(taken) = applied.captured {
                line.push_str(&format!(" takes {taken}"));
            }
            if let Some(winner) = applied.winner {
                line.push_str(&format!(" - {winner} wins"));
            }
            line
        }
        Err(e) => format!("{:>4}: {:<8} rejected: {e}", step.line, step.action),
    }
}

/// Format the final status line.
pub(super) fn format_status(session: &GameSession) -> String {
    let blue = session.board().count(Color::Blue);
    let red = session.board().count(Color::Red);
    match session.status() {
        GameStatus::InProgress(color) => format!(
            "Round {}: {color} to move  [Blue: {blue}] [Red: {red}]",
            session.round()
        ),
        GameStatus::Won(color) => format!(
            "{color} won after {} half-moves  [Blue: {blue}] [Red: {red}]",
            session.half_moves()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jungle::Coord;

    #[test]
    fn test_format_accepted_step() {
        let mut session = GameSession::default();
        let outcome = session.submit_move(Coord::new(6, 6), Coord::new(5, 6));
        let step = Step {
            line: 3,
            action: "6,6-5,6".to_string(),
            outcome,
        };
        let text = format_step(&step);
        assert!(text.contains("Blue Rat"));
        assert!(text.starts_with("   3: 6,6-5,6"));
    }

    #[test]
    fn test_format_rejected_step() {
        let mut session = GameSession::default();
        let outcome = session.submit_move(Coord::new(0, 0), Coord::new(1, 0));
        let step = Step {
            line: 1,
            action: "0,0-1,0".to_string(),
            outcome,
        };
        assert!(format_step(&step).contains("rejected: invalid move 0,0-1,0"));
    }

    #[test]
    fn test_json_report() {
        let session = GameSession::default();
        let report = JsonReport::new(&[], &session, true);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"half_moves\":0"));
        assert!(json.contains("\"winner\":null"));
        assert!(json.contains("6,6-5,6"));
        assert!(format_status(&session).starts_with("Round 1: Blue to move"));
    }
}

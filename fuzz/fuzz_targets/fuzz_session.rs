#![no_main]

//! Game session fuzzer.
//!
//! Feeds arbitrary move and capture requests, interleaved with restarts,
//! into one session and checks that:
//! 1. Nothing panics, including the debug invariant assertions
//! 2. Rejected actions leave the board untouched
//! 3. Piece counts never grow between restarts

use arbitrary::Arbitrary;
use jungle::game::check_invariants;
use jungle::{Action, Color, Coord, GameSession, RuleOptions, SessionConfig};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated request.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzRequest {
    /// Move from one cell to another.
    Move { from: (u8, u8), to: (u8, u8) },
    /// Capture from one cell onto another.
    Capture { from: (u8, u8), to: (u8, u8) },
    /// Pick a legal action by index.
    Legal(u16),
    /// Start over.
    Restart,
}

/// Structured input for session fuzzing.
#[derive(Arbitrary, Debug)]
struct SessionInput {
    red_first: bool,
    trapped_rat_captures_elephant: bool,
    requests: Vec<FuzzRequest>,
}

fn coord((row, col): (u8, u8)) -> Coord {
    Coord::new(row % 12, col % 10)
}

fuzz_target!(|input: SessionInput| {
    let config = SessionConfig {
        first_player: if input.red_first { Color::Red } else { Color::Blue },
        rules: RuleOptions {
            trapped_rat_captures_elephant: input.trapped_rat_captures_elephant,
        },
    };
    let mut session = GameSession::new(config);
    let mut counts = [8usize, 8];

    for request in input.requests.into_iter().take(500) {
        let action = match request {
            FuzzRequest::Move { from, to } => Action::new_move(coord(from), coord(to)),
            FuzzRequest::Capture { from, to } => Action::new_capture(coord(from), coord(to)),
            FuzzRequest::Legal(idx) => {
                let legal = session.legal_actions();
                if legal.is_empty() {
                    continue;
                }
                legal[usize::from(idx) % legal.len()]
            }
            FuzzRequest::Restart => {
                session.restart();
                counts = [8, 8];
                continue;
            }
        };

        let before = session.board().clone();
        if session.submit(action).is_err() {
            assert_eq!(session.board(), &before, "rejected {action} mutated the board");
        }

        let violations = check_invariants(&session);
        assert!(violations.is_empty(), "after {action}: {violations:?}");

        for color in Color::ALL {
            let now = session.board().count(color);
            assert!(now <= counts[color.index()], "{color} gained a piece");
            counts[color.index()] = now;
        }
    }
});

//! ASCII renderer for terminal viewing with optional ANSI colors.

use crate::game::{Board, Color, Coord, Geometry, Terrain};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const YELLOW: &str = "\x1b[33m";
const GRAY: &str = "\x1b[90m";

/// ANSI color for a side's pieces.
const fn side_color(color: Color) -> &'static str {
    match color {
        Color::Blue => BLUE,
        Color::Red => RED,
    }
}

/// ANSI color for an empty cell of the given terrain.
const fn terrain_color(terrain: Terrain) -> &'static str {
    match terrain {
        Terrain::Normal => GRAY,
        Terrain::River => CYAN,
        Terrain::Trap(_) => YELLOW,
        Terrain::Den(_) => BOLD,
    }
}

/// Render a board as text.
///
/// Output format (Red at the top, uppercase Blue, lowercase Red):
/// ```text
///    0 1 2 3 4 5 6
///  0 l . # @ # . t
///  1 . d . # . c .
///  2 r . p . w . e
///  3 . ~ ~ . ~ ~ .
///  ...
/// ```
#[must_use]
pub fn render_ascii(board: &Board, geometry: &Geometry, color: bool) -> String {
    let mut output = String::new();

    output.push_str("  ");
    for col in 0..geometry.cols() {
        output.push(' ');
        output.push_str(&col.to_string());
    }
    output.push('\n');

    for row in 0..geometry.rows() {
        output.push_str(&format!("{row:>2}"));
        for col in 0..geometry.cols() {
            let coord = Coord::new(row, col);
            output.push(' ');
            render_cell(&mut output, board, geometry, coord, color);
        }
        output.push('\n');
    }

    output
}

fn render_cell(output: &mut String, board: &Board, geometry: &Geometry, coord: Coord, color: bool) {
    let (glyph, ansi) = match board.piece_at(coord) {
        Some(piece) => {
            let letter = piece.species().symbol();
            let glyph = match piece.color() {
                Color::Blue => letter,
                Color::Red => letter.to_ascii_lowercase(),
            };
            (glyph, side_color(piece.color()))
        }
        None => {
            let terrain = geometry.terrain(coord).unwrap_or(Terrain::Normal);
            (terrain.glyph(), terrain_color(terrain))
        }
    };

    if color {
        output.push_str(ansi);
        output.push(glyph);
        output.push_str(RESET);
    } else {
        output.push(glyph);
    }
}

/// Legend line matching [`render_ascii`] output.
#[must_use]
pub fn legend() -> &'static str {
    "Legend: .=Land ~=River #=Trap @=Den  E L T P W D C R  UPPER=Blue lower=Red"
}

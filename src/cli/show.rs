//! Show command implementation.

use super::CliError;
use jungle::render::{legend, render_ascii};
use jungle::{Board, Geometry};

/// Execute the show command.
///
/// # Errors
///
/// Never fails; the signature matches the other commands.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn execute(color: bool) -> Result<(), CliError> {
    let geometry = Geometry::standard();
    let board = Board::standard(&geometry);

    print!("{}", render_ascii(&board, &geometry, color));
    println!();
    println!("{}", legend());

    Ok(())
}

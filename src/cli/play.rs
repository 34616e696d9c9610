//! Play command implementation.

use super::output::{JsonReport, Step, format_status, format_step, legal_notation};
use super::{CliError, OutputFormat};
use jungle::render::render_ascii;
use jungle::{Action, GameSession, SessionConfig};
use log::info;
use std::fs;
use std::path::Path;

/// Parse a script: one action per line, `#` starts a comment.
///
/// # Errors
///
/// Returns an error naming the first line that is not a valid action.
pub(crate) fn parse_script(text: &str) -> Result<Vec<(usize, Action)>, CliError> {
    let mut actions = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let action = line
            .parse::<Action>()
            .map_err(|e| CliError::new(format!("line {}: {e}", idx + 1)))?;
        actions.push((idx + 1, action));
    }
    Ok(actions)
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the script or config cannot be read or parsed.
pub(crate) fn execute(
    script: &Path,
    config: Option<&Path>,
    format: OutputFormat,
    legal: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let config = match config {
        Some(path) => SessionConfig::from_json_file(path)?,
        None => SessionConfig::default(),
    };

    let text = fs::read_to_string(script)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", script.display())))?;
    let actions = parse_script(&text)?;
    info!("{}: {} actions", script.display(), actions.len());

    let mut session = GameSession::new(config);
    let steps: Vec<Step> = actions
        .into_iter()
        .map(|(line, action)| Step {
            line,
            action: action.to_string(),
            outcome: session.submit(action),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            if !quiet {
                for step in &steps {
                    println!("{}", format_step(step));
                }
                println!();
            }
            print!("{}", render_ascii(session.board(), session.geometry(), false));
            println!();
            println!("{}", format_status(&session));
            if legal {
                println!("Legal: {}", legal_notation(&session).join(" "));
            }
        }
        OutputFormat::Json => {
            let report = JsonReport::new(&steps, &session, legal);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

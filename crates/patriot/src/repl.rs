//! Interactive read-eval-print loop.
//!
//! Reads one query per line from stdin, runs it through the
//! orchestrator, and prints the final answer. A failed query is
//! reported and the session continues.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

use crate::orchestrator::Orchestrator;

/// Spinner shown while a query is in flight
fn create_thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.red} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("patriot (thinking)...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

fn is_exit_command(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "exit" | "quit")
}

/// Run the interactive session until EOF or an exit command
pub async fn run(orchestrator: &Orchestrator) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{} ", ">".red().bold());
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let query = line.trim();

        if query.is_empty() {
            continue;
        }
        if is_exit_command(query) {
            println!("Goodbye.");
            break;
        }

        let spinner = create_thinking_spinner();
        let outcome = orchestrator.process_query(query).await;
        spinner.finish_and_clear();

        match outcome {
            Ok(result) => {
                println!("{}", result.answer);
                println!();
            }
            Err(err) => {
                eprintln!("{} {:#}", "error:".red().bold(), err);
                eprintln!("The session is still open; try rephrasing or check that Ollama is running.");
                println!();
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_commands() {
        assert!(is_exit_command("exit"));
        assert!(is_exit_command("quit"));
        assert!(is_exit_command("EXIT"));
        assert!(is_exit_command("Quit"));
        assert!(!is_exit_command("exit now"));
        assert!(!is_exit_command("help"));
    }
}

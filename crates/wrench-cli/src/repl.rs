//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::commands::{self, WrenchPipeline};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Run the interactive REPL.
///
/// One question per line; a failed run prints its message and the session
/// continues. `quit` / `exit` (case-insensitive) or Ctrl-D ends the session.
pub async fn run_repl(pipeline: &WrenchPipeline, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("PyAnsys troubleshooting assistant. Ask a question, or 'exit' to quit.")
    );
    println!();

    let mut editor = DefaultEditor::new().map_err(|e| {
        CliError::Io(std::io::Error::other(format!(
            "Failed to initialize editor: {}",
            e
        )))
    })?;

    let history_path = Config::history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("wrench> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                if is_exit_command(line) {
                    println!("{}", formatter.info("Goodbye!"));
                    break;
                }

                if let Err(e) = commands::execute_ask(line, pipeline, formatter).await {
                    eprintln!("{}", formatter.error(&e.to_string()));
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// Whether a line asks to leave the REPL.
fn is_exit_command(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "exit" | "quit" | "q")
}

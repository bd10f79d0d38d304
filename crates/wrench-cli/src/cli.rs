//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Wrench - Web-searching troubleshooting assistant for PyAnsys.
#[derive(Debug, Parser)]
#[command(name = "wrench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Ollama model identifier (overrides config)
    #[arg(short, long, global = true, env = "WRENCH_MODEL")]
    pub model: Option<String>,

    /// Ollama endpoint URL (overrides config)
    #[arg(long, global = true, env = "WRENCH_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Maximum search results to consider (overrides config)
    #[arg(long, global = true)]
    pub max_results: Option<usize>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Answer a single question and exit
    Ask(AskArgs),

    /// Enter interactive REPL mode (default)
    Repl,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// The question, as one or more words
    #[arg(required = true)]
    pub question: Vec<String>,
}

impl AskArgs {
    /// The question words joined back into one line.
    pub fn question_text(&self) -> String {
        self.question.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_repl() {
        let cli = Cli::parse_from(["wrench"]);
        assert!(cli.command.is_none());
        assert!(!cli.no_color);
    }

    #[test]
    fn test_ask_collects_question_words() {
        let cli = Cli::parse_from(["wrench", "ask", "PyMAPDL", "license", "timeout"]);
        match cli.command {
            Some(Command::Ask(args)) => {
                assert_eq!(args.question_text(), "PyMAPDL license timeout");
            }
            _ => panic!("Expected Ask command"),
        }
    }

    #[test]
    fn test_global_overrides() {
        let cli = Cli::parse_from([
            "wrench",
            "--model",
            "llama3:8b",
            "--max-results",
            "3",
            "--no-color",
            "repl",
        ]);
        assert_eq!(cli.model.as_deref(), Some("llama3:8b"));
        assert_eq!(cli.max_results, Some(3));
        assert!(cli.no_color);
    }
}

//! Output formatting for the CLI.

use colored::*;
use wrench_domain::traits::ProgressSink;
use wrench_domain::{ErrorKind, Origin, PipelineError, SourceDocument, Stage};

/// Output formatter.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a progress line for one stage transition.
    ///
    /// Terminal stages produce no progress line; the answer or failure
    /// message covers them.
    pub fn stage_line(&self, stage: Stage) -> Option<String> {
        let text = match stage {
            Stage::Searching => "Searching the web...",
            Stage::Extracting => "Reading source pages...",
            Stage::Assembling => "Assembling context...",
            Stage::Generating => "Generating answer...",
            Stage::Start | Stage::Done | Stage::Declined | Stage::Error => return None,
        };
        Some(self.colorize(text, "cyan"))
    }

    /// Format the final answer for display.
    pub fn answer(&self, text: &str) -> String {
        if self.color_enabled {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    /// Format the numbered source list printed after an answer.
    ///
    /// Sources that degraded to their search snippet are marked, so the
    /// reader knows which citations carry full-page content.
    pub fn sources(&self, documents: &[SourceDocument]) -> String {
        if documents.is_empty() {
            return self.colorize("Sources: none", "yellow");
        }
        let mut out = String::from("Sources:");
        for (i, doc) in documents.iter().enumerate() {
            let title = if doc.title.trim().is_empty() {
                "(untitled)"
            } else {
                doc.title.trim()
            };
            let marker = match doc.origin {
                Origin::Extracted => "",
                Origin::SnippetFallback => " (snippet)",
            };
            out.push_str(&format!("\n{}. {} - {}{}", i + 1, title, doc.url, marker));
        }
        self.colorize(&out, "yellow")
    }

    /// Format a run-terminating failure as a user-facing message.
    pub fn run_failure(&self, error: &PipelineError) -> String {
        let message = match error.kind {
            ErrorKind::OutOfDomain => {
                "I can only help with PyAnsys error troubleshooting questions.".to_string()
            }
            ErrorKind::NoResults => {
                "The web search returned no results. Try rephrasing the question.".to_string()
            }
            ErrorKind::NoUsableContent => {
                "No usable content was found in any search result.".to_string()
            }
            ErrorKind::GenerationFailure => format!(
                "The model could not produce an answer ({}). Is Ollama running?",
                error.message
            ),
            ErrorKind::Cancelled => "Cancelled.".to_string(),
        };
        self.error(&message)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Progress sink that prints a line per non-terminal stage.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleProgress {
    formatter: Formatter,
}

impl ConsoleProgress {
    /// Create a console progress sink.
    pub fn new(formatter: Formatter) -> Self {
        Self { formatter }
    }
}

impl ProgressSink for ConsoleProgress {
    fn on_stage(&self, stage: Stage) {
        if let Some(line) = self.formatter.stage_line(stage) {
            println!("{}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.error("test"), "✗ test");
    }

    #[test]
    fn test_stage_lines() {
        let formatter = Formatter::new(false);
        assert_eq!(
            formatter.stage_line(Stage::Searching).unwrap(),
            "Searching the web..."
        );
        assert!(formatter.stage_line(Stage::Done).is_none());
        assert!(formatter.stage_line(Stage::Start).is_none());
    }

    #[test]
    fn test_sources_numbered_with_fallback_marker() {
        let formatter = Formatter::new(false);
        let docs = vec![
            SourceDocument {
                title: "Licensing guide".into(),
                url: "https://docs.pyansys.com/licensing".into(),
                text: "full text".into(),
                origin: Origin::Extracted,
            },
            SourceDocument {
                title: "".into(),
                url: "https://discuss.ansys.com/t/timeout".into(),
                text: "snippet".into(),
                origin: Origin::SnippetFallback,
            },
        ];
        let out = formatter.sources(&docs);
        assert!(out.contains("1. Licensing guide - https://docs.pyansys.com/licensing"));
        assert!(out.contains("2. (untitled) - https://discuss.ansys.com/t/timeout (snippet)"));
    }

    #[test]
    fn test_sources_empty() {
        let formatter = Formatter::new(false);
        assert_eq!(formatter.sources(&[]), "Sources: none");
    }

    #[test]
    fn test_failure_messages_distinct_per_kind() {
        let formatter = Formatter::new(false);
        let kinds = [
            ErrorKind::OutOfDomain,
            ErrorKind::NoResults,
            ErrorKind::NoUsableContent,
            ErrorKind::GenerationFailure,
            ErrorKind::Cancelled,
        ];
        let messages: Vec<String> = kinds
            .iter()
            .map(|&kind| formatter.run_failure(&PipelineError::new(kind, "detail")))
            .collect();
        for (i, a) in messages.iter().enumerate() {
            for b in messages.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_generation_failure_includes_detail() {
        let formatter = Formatter::new(false);
        let msg = formatter.run_failure(&PipelineError::new(
            ErrorKind::GenerationFailure,
            "model call timed out",
        ));
        assert!(msg.contains("model call timed out"));
    }
}

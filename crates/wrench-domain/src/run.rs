//! Pipeline run state, stages, and the error taxonomy.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::context::AssembledContext;
use crate::query::Query;
use crate::source::{SearchResult, SourceDocument};

/// Stages of the pipeline state machine.
///
/// `Start` is initial; `Done`, `Declined`, and `Error` are terminal. The
/// transition table lives in the pipeline crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fresh run, nothing attempted yet.
    Start,
    /// Issuing the web search.
    Searching,
    /// Fetching and extracting source pages.
    Extracting,
    /// Merging documents into a bounded context.
    Assembling,
    /// Calling the model for the answer.
    Generating,
    /// Terminal: answer produced.
    Done,
    /// Terminal: out-of-domain question declined before search.
    Declined,
    /// Terminal: a whole stage failed.
    Error,
}

impl Stage {
    /// Whether the run stops at this stage.
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Declined | Stage::Error)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::Searching => "searching",
            Stage::Extracting => "extracting",
            Stage::Assembling => "assembling",
            Stage::Generating => "generating",
            Stage::Done => "done",
            Stage::Declined => "declined",
            Stage::Error => "error",
        };
        f.write_str(name)
    }
}

/// Classification of run-terminating failures.
///
/// Per-document extraction failures are recovered via snippet fallback and
/// never appear here; only whole-stage failures do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Query declined before search: outside the troubleshooting domain.
    OutOfDomain,
    /// Search returned zero results.
    NoResults,
    /// Every document degraded or was empty; assembly produced nothing.
    NoUsableContent,
    /// The model call failed, timed out, or returned unusable output.
    GenerationFailure,
    /// The run was aborted between stages.
    Cancelled,
}

/// A run-terminating failure with a human-readable detail message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind:?}: {message}")]
pub struct PipelineError {
    /// What class of failure this is.
    pub kind: ErrorKind,
    /// Detail for logs and the user-facing message.
    pub message: String,
}

impl PipelineError {
    /// Build an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The record threaded through the state machine for one run.
///
/// Owned exclusively by the state machine for the duration of a run;
/// allocated fresh per query and discarded on completion. At termination
/// exactly one of `answer` / `error` is populated.
#[derive(Debug, Clone)]
pub struct RunState {
    /// The question being answered.
    pub query: Query,
    /// Ranked hits from the search stage.
    pub search_results: Vec<SearchResult>,
    /// Per-result documents from the extract stage.
    pub documents: Vec<SourceDocument>,
    /// Bounded context from the assemble stage.
    pub context: AssembledContext,
    /// Final answer text, completion-marker terminated.
    pub answer: Option<String>,
    /// Run-terminating failure, if any.
    pub error: Option<PipelineError>,
    /// Stage the run currently sits at (terminal stage after `run`).
    pub stage: Stage,
}

impl RunState {
    /// Fresh state for a new run.
    pub fn new(query: Query) -> Self {
        Self {
            query,
            search_results: Vec::new(),
            documents: Vec::new(),
            context: AssembledContext::default(),
            answer: None,
            error: None,
            stage: Stage::Start,
        }
    }

    /// Whether the run ended with an answer.
    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }
}

/// Cooperative abort signal, checked only between stages.
///
/// Individual stage calls are atomic from the state machine's viewpoint; a
/// set token takes effect at the next stage boundary.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// A token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

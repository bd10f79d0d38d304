//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its
//! infrastructure. Implementations live in other crates: the search
//! provider in `wrench-search`, the extractor in `wrench-extract`, and the
//! model client in `wrench-llm`.

#![allow(async_fn_in_trait)]

use crate::run::Stage;
use crate::source::{SearchResult, SourceDocument};

/// A web search backend.
///
/// Infallible at this seam: provider-side empty responses and transient
/// errors come back as an empty list, which the state machine interprets as
/// `NoResults`. Single attempt per call; retry policy, if any, belongs to
/// the caller.
pub trait SearchProvider {
    /// Issue a domain-scoped search, returning up to `max_results` ranked
    /// hits.
    async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult>;
}

/// Turns a search result into a source document.
///
/// Infallible: any fetch or extraction failure degrades to the result's
/// snippet (`Origin::SnippetFallback`) rather than failing the call.
pub trait SourceExtractor {
    /// Fetch and extract the page behind `result`.
    async fn extract(&self, result: &SearchResult) -> SourceDocument;
}

/// A text-generation model.
pub trait AnswerModel {
    /// Error type for model operations.
    type Error: std::fmt::Display;

    /// Generate a completion for a system + user prompt pair.
    async fn generate(&self, system: &str, user: &str) -> Result<String, Self::Error>;
}

/// Consumer of stage-transition notifications.
///
/// Notifications are display-only; they never alter control flow.
pub trait ProgressSink {
    /// Called when the state machine enters `stage`.
    fn on_stage(&self, stage: Stage);
}

/// A sink that discards all notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn on_stage(&self, _stage: Stage) {}
}

//! Wrench Domain Model
//!
//! Core types and trait seams for the PyAnsys troubleshooting pipeline.
//!
//! # Architecture
//!
//! This crate has no knowledge of HTTP, HTML, or any model backend. It
//! defines the data that flows through one pipeline run (`Query` →
//! `SearchResult` → `SourceDocument` → `AssembledContext` → `RunState`) and
//! the traits the infrastructure crates implement (`SearchProvider`,
//! `SourceExtractor`, `AnswerModel`).

#![warn(missing_docs)]

pub mod context;
pub mod query;
pub mod run;
pub mod source;
pub mod traits;

pub use context::AssembledContext;
pub use query::{Query, QueryError};
pub use run::{CancelToken, ErrorKind, PipelineError, RunState, Stage};
pub use source::{Origin, SearchResult, SourceDocument};

/// Fixed literal appended to every generated answer.
///
/// Downstream consumers (the REPL, or anything reading a buffered answer
/// channel) detect end-of-answer by this marker.
pub const COMPLETION_MARKER: &str = "This is the fix.";

//! The user's question, validated once at the pipeline boundary.

use thiserror::Error;

/// Errors raised when constructing a [`Query`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The input was empty (or whitespace-only) after trimming.
    #[error("query is empty")]
    Empty,
}

/// A validated, trimmed user question.
///
/// Invariant: the inner string is non-empty after trimming. Constructed once
/// per REPL turn and consumed by the search stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Validate and trim raw user input into a `Query`.
    pub fn new(raw: impl Into<String>) -> Result<Self, QueryError> {
        let trimmed = raw.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Self(trimmed))
    }

    /// The question text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

//! Answer synthesis: prompt construction + model call.

use tracing::debug;

use wrench_domain::traits::AnswerModel;
use wrench_domain::{
    AssembledContext, ErrorKind, PipelineError, Query, COMPLETION_MARKER,
};

/// Domain-scoping instructions sent as the system message. Restates the
/// domain restriction for questions the keyword gate let through.
const SYSTEM_PROMPT: &str = "You are a PyAnsys troubleshooting assistant. \
Only answer PyAnsys error troubleshooting and problem-solving questions. \
If the question is general or unrelated, say you can only help with PyAnsys issues. \
Use the provided sources to craft a concise, accurate solution, and cite the \
source URLs you relied on. \
If information is missing, say what is unknown and suggest safe next steps.";

/// Builds prompts and turns model completions into marker-terminated
/// answers.
pub struct Synthesizer;

impl Synthesizer {
    /// The system message for every generation call.
    pub fn system_prompt() -> &'static str {
        SYSTEM_PROMPT
    }

    /// Build the user message: question plus URL-tagged source blocks.
    pub fn user_prompt(query: &Query, context: &AssembledContext) -> String {
        format!(
            "Question: {}\n\nSources:\n{}\nAnswer:",
            query.as_str(),
            context.render()
        )
    }

    /// Generate an answer for the query grounded in the context.
    ///
    /// All failure modes (transport error, timeout, empty completion) map
    /// to `GenerationFailure`. No internal retries; the user resubmits to
    /// retry. The returned text always ends with the completion marker.
    pub async fn synthesize<M: AnswerModel>(
        model: &M,
        query: &Query,
        context: &AssembledContext,
    ) -> Result<String, PipelineError> {
        let user = Self::user_prompt(query, context);
        debug!(prompt_chars = user.chars().count(), "requesting completion");

        let completion = model.generate(SYSTEM_PROMPT, &user).await.map_err(|e| {
            PipelineError::new(ErrorKind::GenerationFailure, e.to_string())
        })?;

        let trimmed = completion.trim();
        if trimmed.is_empty() {
            return Err(PipelineError::new(
                ErrorKind::GenerationFailure,
                "model returned an empty completion",
            ));
        }

        Ok(format!("{trimmed}\n\n{COMPLETION_MARKER}"))
    }
}

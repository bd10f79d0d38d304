//! The pipeline state machine.
//!
//! States: START, SEARCHING, EXTRACTING, ASSEMBLING, GENERATING, DONE,
//! DECLINED, ERROR. The transition function is a `match` over `Stage`;
//! `run` drives it to a terminal stage, emitting a progress notification at
//! every transition. One `RunState` is allocated per run and never shared.

use tracing::{debug, info, warn};

use wrench_domain::traits::{AnswerModel, ProgressSink, SearchProvider, SourceExtractor};
use wrench_domain::{
    AssembledContext, CancelToken, ErrorKind, PipelineError, Query, RunState, Stage,
};

use crate::config::PipelineConfig;
use crate::gate::DomainGate;
use crate::synthesizer::Synthesizer;

/// The answering pipeline, generic over its three external collaborators.
pub struct Pipeline<S, E, M> {
    search: S,
    extractor: E,
    model: M,
    gate: DomainGate,
    config: PipelineConfig,
}

impl<S, E, M> Pipeline<S, E, M>
where
    S: SearchProvider,
    E: SourceExtractor,
    M: AnswerModel,
{
    /// Wire a pipeline from its collaborators and settings.
    pub fn new(search: S, extractor: E, model: M, config: PipelineConfig) -> Self {
        let gate = DomainGate::new(config.gate.clone());
        Self {
            search,
            extractor,
            model,
            gate,
            config,
        }
    }

    /// Run one query to a terminal stage.
    ///
    /// Synchronous from the caller's viewpoint: the future completes only
    /// when the run is terminal. Idempotent given identical inputs and
    /// identical external responses. `progress` receives a notification at
    /// each transition; `cancel` is checked between stages only, since
    /// individual stage calls are atomic here.
    pub async fn run<P: ProgressSink>(
        &self,
        query: Query,
        progress: &P,
        cancel: &CancelToken,
    ) -> RunState {
        let mut state = RunState::new(query);
        let mut stage = Stage::Start;
        info!(query = %state.query, "pipeline run started");

        while !stage.is_terminal() {
            if cancel.is_cancelled() {
                state.error = Some(PipelineError::new(
                    ErrorKind::Cancelled,
                    format!("run aborted before {stage}"),
                ));
                stage = Stage::Error;
                state.stage = stage;
                progress.on_stage(stage);
                break;
            }

            let (next, next_state) = self.step(stage, state).await;
            state = next_state;
            stage = next;
            state.stage = stage;
            debug!(stage = %stage, "transition");
            progress.on_stage(stage);
        }

        match (&state.answer, &state.error) {
            (Some(_), None) => info!(stage = %stage, "pipeline run answered"),
            (None, Some(e)) => warn!(stage = %stage, kind = ?e.kind, "pipeline run terminated"),
            // Unreachable by construction; logged rather than asserted.
            _ => warn!(stage = %stage, "pipeline run in inconsistent terminal state"),
        }
        state
    }

    /// One transition of the state machine.
    ///
    /// Terminal stages map to themselves, so the function is total over
    /// `Stage`.
    async fn step(&self, stage: Stage, mut state: RunState) -> (Stage, RunState) {
        match stage {
            Stage::Start => {
                if self.gate.is_in_domain(&state.query) {
                    (Stage::Searching, state)
                } else {
                    state.error = Some(PipelineError::new(
                        ErrorKind::OutOfDomain,
                        format!("'{}' is outside the troubleshooting domain", state.query),
                    ));
                    (Stage::Declined, state)
                }
            }

            Stage::Searching => {
                let results = self
                    .search
                    .search(state.query.as_str(), self.config.max_results)
                    .await;
                if results.is_empty() {
                    state.error = Some(PipelineError::new(
                        ErrorKind::NoResults,
                        "search returned no results",
                    ));
                    (Stage::Error, state)
                } else {
                    state.search_results = results;
                    (Stage::Extracting, state)
                }
            }

            Stage::Extracting => {
                // Sequential fetches: ranking order is preserved
                // structurally. Per-document failures degrade to the
                // snippet inside the extractor and never abort the run.
                let mut documents = Vec::with_capacity(state.search_results.len());
                for result in &state.search_results {
                    documents.push(self.extractor.extract(result).await);
                }
                state.documents = documents;
                (Stage::Assembling, state)
            }

            Stage::Assembling => {
                let context = AssembledContext::assemble(
                    &state.documents,
                    self.config.per_doc_cap,
                    self.config.global_cap,
                );
                if context.is_empty() {
                    state.error = Some(PipelineError::new(
                        ErrorKind::NoUsableContent,
                        "no usable content in any source",
                    ));
                    (Stage::Error, state)
                } else {
                    state.context = context;
                    (Stage::Generating, state)
                }
            }

            Stage::Generating => {
                match Synthesizer::synthesize(&self.model, &state.query, &state.context).await {
                    Ok(answer) => {
                        state.answer = Some(answer);
                        (Stage::Done, state)
                    }
                    Err(error) => {
                        state.error = Some(error);
                        (Stage::Error, state)
                    }
                }
            }

            terminal @ (Stage::Done | Stage::Declined | Stage::Error) => (terminal, state),
        }
    }
}

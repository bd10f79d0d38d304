//! Command execution: pipeline wiring and the single-question flow.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{ConsoleProgress, Formatter};
use wrench_domain::{CancelToken, Query};
use wrench_extract::Extractor;
use wrench_llm::OllamaClient;
use wrench_pipeline::Pipeline;
use wrench_search::DuckDuckGo;

/// The production pipeline: DuckDuckGo search, HTML extraction, Ollama.
pub type WrenchPipeline = Pipeline<DuckDuckGo, Extractor, OllamaClient>;

/// Wire the concrete pipeline from configuration.
pub fn build_pipeline(config: &Config) -> Result<WrenchPipeline> {
    let search = DuckDuckGo::new(config.search.clone())
        .map_err(|e| CliError::Provider(format!("search client: {}", e)))?;
    let extractor = Extractor::new(&config.extract)
        .map_err(|e| CliError::Provider(format!("fetch client: {}", e)))?;
    let model = OllamaClient::new(&config.ollama)
        .map_err(|e| CliError::Provider(e.to_string()))?;
    Ok(Pipeline::new(
        search,
        extractor,
        model,
        config.pipeline.clone(),
    ))
}

/// Answer one question, printing progress and the outcome.
///
/// Ctrl-C during the run cancels it at the next stage boundary instead of
/// killing the process; the caller (REPL or one-shot) keeps control.
pub async fn execute_ask(
    question: &str,
    pipeline: &WrenchPipeline,
    formatter: &Formatter,
) -> Result<()> {
    let query = Query::new(question).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let cancel = CancelToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let progress = ConsoleProgress::new(*formatter);
    let state = pipeline.run(query, &progress, &cancel).await;
    watcher.abort();

    match (&state.answer, &state.error) {
        (Some(answer), _) => {
            println!("\n{}\n", formatter.answer(answer));
            println!("{}\n", formatter.sources(&state.documents));
        }
        (None, Some(error)) => println!("\n{}\n", formatter.run_failure(error)),
        (None, None) => println!("{}", formatter.error("Run ended without an answer")),
    }

    Ok(())
}

//! Pipeline settings.

use serde::{Deserialize, Serialize};

use crate::gate::GateConfig;

/// Default number of search results to consider.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Default per-document context cap (characters).
pub const DEFAULT_PER_DOC_CAP: usize = 4_000;

/// Default global context cap (characters).
pub const DEFAULT_GLOBAL_CAP: usize = 12_000;

/// Settings for one pipeline instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Search result count cap.
    pub max_results: usize,
    /// Per-document context budget, in characters.
    pub per_doc_cap: usize,
    /// Whole-context budget, in characters.
    pub global_cap: usize,
    /// Domain gate keyword lists.
    #[serde(default)]
    pub gate: GateConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            per_doc_cap: DEFAULT_PER_DOC_CAP,
            global_cap: DEFAULT_GLOBAL_CAP,
            gate: GateConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_results, DEFAULT_MAX_RESULTS);
        assert!(config.per_doc_cap < config.global_cap);
        assert!(!config.gate.domain_keywords.is_empty());
    }
}

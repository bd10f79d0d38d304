//! Deterministic domain gate.
//!
//! Out-of-domain questions are declined before any network or model call.
//! The synthesizer's system prompt repeats the domain restriction, but the
//! short-circuit itself never depends on model compliance.

use serde::{Deserialize, Serialize};

use wrench_domain::Query;

/// Keyword lists driving the gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateConfig {
    /// Product/ecosystem markers (lowercase) that place a query in domain.
    pub domain_keywords: Vec<String>,
    /// Generic troubleshooting markers (lowercase). A query mentioning one
    /// of these is accepted even without a product marker; the search
    /// adapter then prefixes the primary domain keyword.
    pub troubleshooting_terms: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            domain_keywords: [
                "pyansys", "ansys", "mapdl", "pymapdl", "fluent", "pyfluent", "aedt", "pyaedt",
                "dpf", "mechanical",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            troubleshooting_terms: [
                "error", "errors", "fail", "fails", "failed", "failure", "crash", "crashes",
                "timeout", "exception", "traceback", "license", "licensing", "install",
                "installation", "hang", "hangs", "not working", "broken",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Decides whether a query belongs to the troubleshooting domain.
#[derive(Debug, Clone)]
pub struct DomainGate {
    config: GateConfig,
}

impl DomainGate {
    /// Build a gate from keyword lists.
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// Whether the query should enter the pipeline.
    ///
    /// Matching is case-insensitive substring containment over both
    /// keyword lists.
    pub fn is_in_domain(&self, query: &Query) -> bool {
        let lower = query.as_str().to_lowercase();
        self.config
            .domain_keywords
            .iter()
            .chain(self.config.troubleshooting_terms.iter())
            .any(|kw| lower.contains(kw.as_str()))
    }
}

impl Default for DomainGate {
    fn default() -> Self {
        Self::new(GateConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(text: &str) -> Query {
        Query::new(text).unwrap()
    }

    #[test]
    fn test_domain_keyword_accepted() {
        let gate = DomainGate::default();
        assert!(gate.is_in_domain(&query("PyAnsys license error timeout")));
        assert!(gate.is_in_domain(&query("MAPDL refuses to start")));
    }

    #[test]
    fn test_troubleshooting_term_accepted_without_product_marker() {
        let gate = DomainGate::default();
        assert!(gate.is_in_domain(&query("import error in my simulation script")));
    }

    #[test]
    fn test_general_knowledge_declined() {
        let gate = DomainGate::default();
        assert!(!gate.is_in_domain(&query("What is the capital of France")));
        assert!(!gate.is_in_domain(&query("best pizza recipe")));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let gate = DomainGate::default();
        assert!(gate.is_in_domain(&query("ANSYS FLUENT diverges")));
    }
}

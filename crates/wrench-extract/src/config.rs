//! Extraction settings.

use serde::{Deserialize, Serialize};

/// Default per-fetch timeout (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Minimum extracted length before falling back to the snippet.
pub const DEFAULT_MIN_EXTRACT_LEN: usize = 200;

/// Settings for page fetching and content extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Per-fetch timeout in seconds. A timed-out fetch is treated the same
    /// as any other extraction failure.
    pub timeout_secs: u64,

    /// Accept invalid TLS certificates on fetches.
    ///
    /// Troubleshooting-community sites are routinely misconfigured; this
    /// flag is scoped to the fetch client only and does not affect any
    /// other HTTP client in the system.
    pub accept_invalid_certs: bool,

    /// Extractions shorter than this many characters are discarded in
    /// favor of the search snippet.
    pub min_extract_len: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            accept_invalid_certs: true,
            min_extract_len: DEFAULT_MIN_EXTRACT_LEN,
        }
    }
}

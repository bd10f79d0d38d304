//! Wrench Pipeline
//!
//! The retrieval-augmented answering pipeline, wired as an explicit state
//! machine: domain gate → search → extract (with snippet fallback) →
//! assemble → generate. The stage graph is fixed and small, so transitions
//! are a `match` over `Stage` rather than any dynamic graph machinery, and
//! can be tested exhaustively with the mock providers from the sibling
//! crates.

#![warn(missing_docs)]

pub mod config;
pub mod gate;
pub mod pipeline;
pub mod synthesizer;

pub use config::PipelineConfig;
pub use gate::{DomainGate, GateConfig};
pub use pipeline::Pipeline;
pub use synthesizer::Synthesizer;

//! Wrench CLI library.
//!
//! Argument parsing, configuration, output formatting, and the REPL for the
//! PyAnsys troubleshooting assistant.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;

//! Configuration management for the CLI.
//!
//! One TOML file at `~/.wrench/config.toml` with a section per layer. Every
//! field has a default, so a missing or partial file works.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use wrench_extract::ExtractConfig;
use wrench_llm::OllamaConfig;
use wrench_pipeline::PipelineConfig;
use wrench_search::SearchConfig;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Pipeline settings (result count, context caps, domain gate)
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Search adapter settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Page fetch and extraction settings
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Ollama settings
    #[serde(default)]
    pub ollama: OllamaConfig,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".wrench").join("config.toml"))
    }

    /// Get the history file path.
    pub fn history_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        let dir = home.join(".wrench");
        fs::create_dir_all(&dir)?;
        Ok(dir.join("history.txt"))
    }

    /// Load configuration from the default path, or defaults when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from an explicit path, or defaults when absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Fold command-line flags over the loaded file.
    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(model) = &cli.model {
            self.ollama.model = model.clone();
        }
        if let Some(endpoint) = &cli.endpoint {
            self.ollama.endpoint = endpoint.clone();
        }
        if let Some(max_results) = cli.max_results {
            self.pipeline.max_results = max_results;
        }
        if cli.no_color {
            self.settings.color = false;
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            history_size: 1000,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_history_size() -> usize {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.ollama.model, "gemma2:2b");
        assert_eq!(config.pipeline.max_results, 5);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.extract.min_extract_len, 200);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[ollama]\nmodel = \"llama3:8b\"\nendpoint = \"http://gpu-box:11434\"\ntimeout_secs = 60\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.ollama.model, "llama3:8b");
        // Untouched sections keep their defaults.
        assert_eq!(config.pipeline.max_results, 5);
        assert!(config.settings.color);
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.pipeline.max_results = 7;
        config.settings.color = false;
        let contents = toml::to_string_pretty(&config).unwrap();
        fs::write(&path, contents).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.pipeline.max_results, 7);
        assert!(!loaded.settings.color);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = crate::cli::Cli::parse_from([
            "wrench",
            "--model",
            "llama3:8b",
            "--max-results",
            "2",
            "--no-color",
        ]);
        let mut config = Config::default();
        config.apply_overrides(&cli);
        assert_eq!(config.ollama.model, "llama3:8b");
        assert_eq!(config.pipeline.max_results, 2);
        assert!(!config.settings.color);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not [valid toml").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}

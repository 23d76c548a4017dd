//! Configuration loading from TOML files.
//!
//! Config file is selected via:
//! 1. `--config <path>` command line argument
//! 2. `QUEUE_DESK_CONFIG` environment variable
//! 3. Built-in defaults (no file)

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::balancer::BalanceStrategy;
use crate::warehouse::WarehouseLayout;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "QUEUE_DESK_CONFIG";

#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Print `<<< ` prompts and greetings
    #[serde(default = "default_prompts")]
    pub prompts: bool,
}

fn default_prompts() -> bool {
    true
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompts: default_prompts(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct QueueConfig {
    /// Least-loaded window search ("linear" or "heap")
    #[serde(default)]
    pub strategy: BalanceStrategy,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub warehouse: WarehouseLayout,
}

/// Main configuration struct used by the binary
#[derive(Debug, Clone)]
pub struct Config {
    prompts: bool,
    strategy: BalanceStrategy,
    warehouse: WarehouseLayout,
    config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), None)
    }
}

impl Config {
    fn from_toml(toml_config: TomlConfig, config_file: Option<PathBuf>) -> Self {
        Self {
            prompts: toml_config.console.prompts,
            strategy: toml_config.queue.strategy,
            warehouse: toml_config.warehouse,
            config_file,
        }
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let toml_config: TomlConfig =
            toml::from_str(content).context("Failed to parse configuration")?;
        let config = Self::from_toml(toml_config, None);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        let config = Self::from_toml(toml_config, Some(path.to_path_buf()));
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Resolve the config source (CLI path, then environment) and load it.
    ///
    /// With neither set, built-in defaults are used. A named file that
    /// cannot be read or parsed is an error.
    pub fn load(cli_path: Option<&Path>) -> anyhow::Result<Self> {
        match Self::resolve_path(cli_path) {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    fn resolve_path(cli_path: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = cli_path {
            return Some(path.to_path_buf());
        }
        env::var_os(CONFIG_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn validate(&self) -> anyhow::Result<()> {
        self.warehouse.validate()?;
        Ok(())
    }

    /// Overrides the prompt setting (e.g. from `--no-prompt`).
    pub fn with_prompts(mut self, prompts: bool) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn prompts(&self) -> bool {
        self.prompts
    }

    pub fn strategy(&self) -> BalanceStrategy {
        self.strategy
    }

    pub fn warehouse(&self) -> &WarehouseLayout {
        &self.warehouse
    }

    /// Path of the file the config was read from, if any.
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }
}

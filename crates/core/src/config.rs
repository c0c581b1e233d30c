use crate::models::ConsoleOptions;
use crate::origin::OriginStrategy;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Configuration for stats extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Number of threads for multi-target results (0 = auto, 1 = sequential)
    pub threads: usize,
    /// How to resolve the importer of an external
    pub origin: OriginStrategy,
    /// Console options forwarded to the bundler's report rendering
    pub console: ConsoleOptions,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            origin: OriginStrategy::default(),
            console: ConsoleOptions::default(),
        }
    }
}

impl ExtractConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_origin(mut self, origin: OriginStrategy) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_console(mut self, console: ConsoleOptions) -> Self {
        self.console = console;
        self
    }

    /// Build a config from a `bundlestats.toml` file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Ok(FileConfig::load(path)?.into_extract_config())
    }
}

/// Contents of a `bundlestats.toml` file; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub threads: Option<usize>,
    pub origin: Option<OriginStrategy>,
    /// Console preset name, e.g. `"minimal"`
    pub console: Option<String>,
    /// Default output format name
    pub format: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn into_extract_config(self) -> ExtractConfig {
        let mut config = ExtractConfig::default();
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        if let Some(origin) = self.origin {
            config = config.with_origin(origin);
        }
        if let Some(console) = self.console {
            config = config.with_console(ConsoleOptions::preset(console));
        }
        config
    }
}

use crate::models::{Compilation, ConsoleOptions, StatsReport};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid stats JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// One bundle target's compilation result, the shape the extractor reads
pub trait CompilationStats {
    /// The in-memory compilation (chunks and compiler)
    fn compilation(&self) -> &Compilation;

    /// Machine-readable report (`stats.toJson(options)`)
    fn to_json(&self, options: &ConsoleOptions) -> StatsReport;

    /// Human-readable report (`stats.toString(options)`)
    fn to_string(&self, options: &ConsoleOptions) -> String;
}

impl<T: CompilationStats + ?Sized> CompilationStats for &T {
    fn compilation(&self) -> &Compilation {
        (**self).compilation()
    }

    fn to_json(&self, options: &ConsoleOptions) -> StatsReport {
        (**self).to_json(options)
    }

    fn to_string(&self, options: &ConsoleOptions) -> String {
        (**self).to_string(options)
    }
}

/// Result of a bundler run: one target, or one per configured target
#[derive(Debug, Clone, PartialEq)]
pub enum CompilationResult<S> {
    Single(S),
    Multi(Vec<S>),
}

impl<S> CompilationResult<S> {
    /// Targets in bundler order
    pub fn targets(&self) -> Vec<&S> {
        match self {
            CompilationResult::Single(stats) => vec![stats],
            CompilationResult::Multi(stats) => stats.iter().collect(),
        }
    }

    pub fn into_targets(self) -> Vec<S> {
        match self {
            CompilationResult::Single(stats) => vec![stats],
            CompilationResult::Multi(stats) => stats,
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, CompilationResult::Multi(_))
    }
}

/// Stats of one target as dumped to JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedStats {
    pub compilation: Compilation,
    #[serde(default)]
    pub report: StatsReport,
    #[serde(default)]
    pub cli_output: String,
}

impl CompilationStats for RecordedStats {
    fn compilation(&self) -> &Compilation {
        &self.compilation
    }

    fn to_json(&self, options: &ConsoleOptions) -> StatsReport {
        log::trace!("Rendering recorded report with options {}", options.as_value());
        self.report.clone()
    }

    fn to_string(&self, options: &ConsoleOptions) -> String {
        log::trace!("Rendering recorded output with options {}", options.as_value());
        self.cli_output.clone()
    }
}

/// On-disk shape: `{ "stats": [...] }` for multi-target runs, else a single target
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum StatsInput {
    Multi { stats: Vec<RecordedStats> },
    Single(RecordedStats),
}

impl From<StatsInput> for CompilationResult<RecordedStats> {
    fn from(input: StatsInput) -> Self {
        match input {
            StatsInput::Multi { stats } => CompilationResult::Multi(stats),
            StatsInput::Single(stats) => CompilationResult::Single(stats),
        }
    }
}

/// Parse a stats dump
pub fn parse_stats(content: &str) -> Result<CompilationResult<RecordedStats>, StatsError> {
    let input: StatsInput = serde_json::from_str(content)?;
    Ok(input.into())
}

/// Read and parse a stats dump from disk
pub fn load_stats(path: &Path) -> Result<CompilationResult<RecordedStats>, StatsError> {
    let content = fs::read_to_string(path)?;
    let result = parse_stats(&content)?;
    log::debug!(
        "Loaded {} target(s) from {}",
        result.targets().len(),
        path.display()
    );
    Ok(result)
}

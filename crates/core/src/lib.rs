//! MTA Rust BundleStats Core Library
//!
//! This library reads the compilation result of a JavaScript bundler run and
//! lists the third-party packages that were left external, so a packaging
//! step can ship only the dependencies the bundle actually needs.
//!
//! # Features
//!
//! - Classify webpack module identifiers (`external "<request>"`) as external
//! - Reduce import requests to installable package names (`@scope/name`, `name`)
//! - Deduplicate externals per bundle target, keeping walk order
//! - Handle single and multi-target compilation results
//! - Invoke a bundler through the injectable [`Bundler`] trait
//! - Output results in JSON, YAML or a plain summary
//!
//! # Example
//!
//! ```no_run
//! use mta_rust_bundlestats_core::{
//!     format_output, load_stats, ExtractConfig, ExtractionReport, OutputFormat, StatsExtractor,
//! };
//! use std::path::Path;
//! use std::time::Instant;
//!
//! let start = Instant::now();
//! let result = load_stats(Path::new("stats.json")).unwrap();
//! let extractor = StatsExtractor::new(ExtractConfig::default());
//! let report = ExtractionReport::new(extractor.extract_default(&result), start.elapsed());
//!
//! println!("{}", format_output(&report, OutputFormat::Json).unwrap());
//! ```

pub mod compiler;
pub mod config;
pub mod extractor;
pub mod identifier;
pub mod models;
pub mod origin;
pub mod output;
pub mod stats;

// Re-exports for convenience
pub use compiler::{compile, Bundler, CommandBundler, CommandConfig, CompileError, Compiler, CONSOLE_ENV};
pub use config::{ConfigError, ExtractConfig, FileConfig};
pub use extractor::{extract_external_modules, StatsExtractor};
pub use models::*;
pub use origin::{IssuerOrigin, NoOrigin, OriginResolver, OriginStrategy};
pub use output::{format_output, format_package_list, format_summary, FormatError, OutputFormat};
pub use stats::{load_stats, parse_stats, CompilationResult, CompilationStats, RecordedStats, StatsError};

mod json;
mod yaml;

pub use json::to_json;
pub use yaml::to_yaml;

use crate::models::ExtractionReport;
use std::str::FromStr;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Summary,
    /// One external package name per line
    Names,
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "summary" => Ok(OutputFormat::Summary),
            "names" => Ok(OutputFormat::Names),
            other => Err(FormatError::UnknownFormat(other.to_string())),
        }
    }
}

/// Format an ExtractionReport according to the specified format
pub fn format_output(report: &ExtractionReport, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Yaml => to_yaml(report),
        OutputFormat::Summary => Ok(format_summary(report)),
        OutputFormat::Names => Ok(format_package_list(report)),
    }
}

/// External package names across all targets, one per line
pub fn format_package_list(report: &ExtractionReport) -> String {
    let mut output = String::new();
    for name in report.extraction.external_names() {
        output.push_str(&name);
        output.push('\n');
    }
    output
}

/// Generate a human-readable summary
pub fn format_summary(report: &ExtractionReport) -> String {
    let mut output = String::new();

    output.push_str(
        "External Module Summary\n\
         =======================\n",
    );

    let summaries = report.extraction.summaries();
    for (index, summary) in summaries.iter().enumerate() {
        output.push_str(&format!(
            "\nTarget {} of {}\n\
             Output Path: {}\n\
             Errors: {}\n",
            index + 1,
            summaries.len(),
            summary.output_path,
            summary.errors.len()
        ));

        if summary.external_modules.is_empty() {
            output.push_str("External Modules: none\n");
            continue;
        }

        output.push_str(&format!(
            "External Modules ({}):\n",
            summary.external_modules.len()
        ));
        for entry in &summary.external_modules {
            match entry.origin {
                Some(ref origin) => {
                    output.push_str(&format!("  {} (via {})\n", entry.external, origin))
                }
                None => output.push_str(&format!("  {}\n", entry.external)),
            }
        }
    }

    output.push_str(&format!(
        "\nDuration: {}ms\n\
         Timestamp: {}\n\
         Tool Version: {}\n",
        report.metadata.duration_ms, report.metadata.timestamp, report.metadata.tool_version
    ));

    output
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("Unknown output format: {0}")]
    UnknownFormat(String),
}

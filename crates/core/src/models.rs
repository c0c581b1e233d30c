use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One bundled or external module as seen by the bundler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRecord {
    /// Bundler-internal identifier, either `"<path>"` or `external "<request>"`
    pub identifier: String,
    /// Identifier or resolved path of the module that imported this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

impl ModuleRecord {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            issuer: None,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }
}

/// One emitted output unit of a compilation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    /// Modern accessor (`chunk.modulesIterable`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules_iterable: Option<Vec<ModuleRecord>>,
    /// Legacy accessor (`chunk.modules`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<ModuleRecord>>,
}

impl Chunk {
    /// Chunk exposing its modules through the modern accessor
    pub fn iterable(modules: Vec<ModuleRecord>) -> Self {
        Self {
            modules_iterable: Some(modules),
            modules: None,
        }
    }

    /// Chunk exposing its modules only through the legacy accessor
    pub fn legacy(modules: Vec<ModuleRecord>) -> Self {
        Self {
            modules_iterable: None,
            modules: Some(modules),
        }
    }

    /// The chunk's modules, preferring the modern accessor.
    ///
    /// A chunk without either accessor has no modules.
    pub fn module_records(&self) -> &[ModuleRecord] {
        self.modules_iterable
            .as_deref()
            .or(self.modules.as_deref())
            .unwrap_or(&[])
    }
}

/// The compiler instance that produced a compilation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerInfo {
    #[serde(default)]
    pub output_path: String,
}

/// The in-memory compilation of a single bundle target
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compilation {
    #[serde(default)]
    pub chunks: Vec<Chunk>,
    #[serde(default)]
    pub compiler: CompilerInfo,
}

/// Machine-readable report rendered by the bundler (`stats.toJson()`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    /// Reported compilation errors, kept exactly as the bundler emitted them
    #[serde(default)]
    pub errors: Vec<Value>,
    #[serde(default)]
    pub warnings: Vec<Value>,
    /// Output path as seen by the report; informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
}

/// Console verbosity options forwarded verbatim to report rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsoleOptions(pub Value);

impl ConsoleOptions {
    /// A named preset such as `"minimal"` or `"errors-only"`
    pub fn preset(name: impl Into<String>) -> Self {
        Self(Value::String(name.into()))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Default for ConsoleOptions {
    fn default() -> Self {
        Self::preset("minimal")
    }
}

/// An external dependency the bundle expects to find at runtime
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalModuleEntry {
    /// Installable package name (`name` or `@scope/name`)
    pub external: String,
    /// Package that imported the external, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

impl ExternalModuleEntry {
    pub fn new(external: impl Into<String>, origin: Option<String>) -> Self {
        Self {
            external: external.into(),
            origin,
        }
    }
}

/// Structured result of processing one bundle target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// Human-readable build output
    pub cli_output: String,
    /// Output directory of the compiler instance
    pub output_path: String,
    /// Compilation errors from the report, untouched
    pub errors: Vec<Value>,
    pub external_modules: Vec<ExternalModuleEntry>,
}

impl StatsSummary {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Extraction output, mirroring the shape of the compilation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extraction {
    Single(StatsSummary),
    Multi(Vec<StatsSummary>),
}

impl Extraction {
    /// All summaries in target order
    pub fn summaries(&self) -> Vec<&StatsSummary> {
        match self {
            Extraction::Single(summary) => vec![summary],
            Extraction::Multi(summaries) => summaries.iter().collect(),
        }
    }

    /// External package names across every target, first occurrence wins
    pub fn external_names(&self) -> Vec<String> {
        let mut names = indexmap::IndexSet::new();
        for summary in self.summaries() {
            for entry in &summary.external_modules {
                names.insert(entry.external.clone());
            }
        }
        names.into_iter().collect()
    }
}

/// Metadata about an extraction run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunMetadata {
    pub duration_ms: u64,
    pub targets: usize,
    pub timestamp: String,
    pub tool_version: String,
}

/// Extraction plus run metadata, as written by the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub extraction: Extraction,
    pub metadata: RunMetadata,
}

impl ExtractionReport {
    pub fn new(extraction: Extraction, duration: std::time::Duration) -> Self {
        let targets = extraction.summaries().len();
        Self {
            extraction,
            metadata: RunMetadata {
                duration_ms: duration.as_millis() as u64,
                targets,
                timestamp: chrono::Utc::now().to_rfc3339(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_records_prefers_iterable() {
        let chunk = Chunk {
            modules_iterable: Some(vec![ModuleRecord::new("external \"a\"")]),
            modules: Some(vec![ModuleRecord::new("external \"b\"")]),
        };
        assert_eq!(chunk.module_records()[0].identifier, "external \"a\"");
    }

    #[test]
    fn test_module_records_falls_back_to_legacy() {
        let chunk = Chunk::legacy(vec![ModuleRecord::new("\"crypto\"")]);
        assert_eq!(chunk.module_records().len(), 1);
    }

    #[test]
    fn test_module_records_empty_chunk() {
        assert!(Chunk::default().module_records().is_empty());
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = StatsSummary {
            cli_output: "out".to_string(),
            output_path: "/out".to_string(),
            errors: vec![],
            external_modules: vec![ExternalModuleEntry::new("uuid", None)],
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["cliOutput"], "out");
        assert_eq!(json["outputPath"], "/out");
        assert_eq!(json["externalModules"][0]["external"], "uuid");
        assert!(json["externalModules"][0].get("origin").is_none());
    }

    #[test]
    fn test_external_names_across_targets() {
        let summary = |names: &[&str]| StatsSummary {
            cli_output: String::new(),
            output_path: String::new(),
            errors: vec![],
            external_modules: names
                .iter()
                .map(|n| ExternalModuleEntry::new(*n, None))
                .collect(),
        };
        let extraction = Extraction::Multi(vec![
            summary(&["uuid", "bluebird"]),
            summary(&["bluebird", "@scoped/vendor"]),
        ]);

        assert_eq!(
            extraction.external_names(),
            vec!["uuid", "bluebird", "@scoped/vendor"]
        );
    }
}

use crate::config::ExtractConfig;
use crate::identifier::{package_name_of, parse_module_identifier, ModuleIdentifier};
use crate::models::{Compilation, ConsoleOptions, ExternalModuleEntry, Extraction, StatsSummary};
use crate::origin::OriginResolver;
use crate::stats::{CompilationResult, CompilationStats};
use indexmap::IndexMap;
use rayon::prelude::*;

/// Turns compilation results into [`StatsSummary`] values
pub struct StatsExtractor {
    config: ExtractConfig,
    resolver: Box<dyn OriginResolver>,
}

impl StatsExtractor {
    pub fn new(config: ExtractConfig) -> Self {
        let resolver = config.origin.resolver();
        Self { config, resolver }
    }

    /// Use a custom origin resolver instead of the configured strategy
    pub fn with_resolver(mut self, resolver: Box<dyn OriginResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extract using the configured console options
    pub fn extract_default<S>(&self, result: &CompilationResult<S>) -> Extraction
    where
        S: CompilationStats + Sync,
    {
        self.extract(result, &self.config.console)
    }

    /// Extract one summary per target, keeping the input's shape
    pub fn extract<S>(&self, result: &CompilationResult<S>, console: &ConsoleOptions) -> Extraction
    where
        S: CompilationStats + Sync,
    {
        match result {
            CompilationResult::Single(stats) => Extraction::Single(self.extract_target(stats, console)),
            CompilationResult::Multi(targets) => {
                Extraction::Multi(self.extract_targets(targets, console))
            }
        }
    }

    fn extract_targets<S>(&self, targets: &[S], console: &ConsoleOptions) -> Vec<StatsSummary>
    where
        S: CompilationStats + Sync,
    {
        if self.config.threads == 1 || targets.len() < 2 {
            return targets
                .iter()
                .map(|stats| self.extract_target(stats, console))
                .collect();
        }

        let pool = if self.config.threads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.threads)
                .build()
                .ok()
        } else {
            None
        };

        let run = || -> Vec<StatsSummary> {
            targets
                .par_iter()
                .map(|stats| self.extract_target(stats, console))
                .collect()
        };

        match pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }

    /// Build the summary of a single target
    pub fn extract_target<S>(&self, stats: &S, console: &ConsoleOptions) -> StatsSummary
    where
        S: CompilationStats + ?Sized,
    {
        let report = stats.to_json(console);
        let cli_output = stats.to_string(console);
        let compilation = stats.compilation();

        let external_modules = extract_external_modules(compilation, self.resolver.as_ref());
        log::debug!(
            "Found {} external module(s) in {} chunk(s) for {}",
            external_modules.len(),
            compilation.chunks.len(),
            compilation.compiler.output_path
        );

        StatsSummary {
            cli_output,
            output_path: compilation.compiler.output_path.clone(),
            errors: report.errors,
            external_modules,
        }
    }
}

impl Default for StatsExtractor {
    fn default() -> Self {
        Self::new(ExtractConfig::default())
    }
}

/// Walk every chunk and module, keeping externals in first-seen order.
///
/// An entry keeps its first origin; a later origin only fills a missing one.
pub fn extract_external_modules(
    compilation: &Compilation,
    resolver: &dyn OriginResolver,
) -> Vec<ExternalModuleEntry> {
    let mut externals: IndexMap<String, Option<String>> = IndexMap::new();

    for module in compilation.chunks.iter().flat_map(|chunk| chunk.module_records()) {
        let ModuleIdentifier::External { request } = parse_module_identifier(&module.identifier)
        else {
            continue;
        };

        let Some(name) = package_name_of(request) else {
            log::trace!("Skipping external with no package name: {}", module.identifier);
            continue;
        };

        log::trace!("External {request} -> {name}");
        let origin = resolver.resolve(module);
        let entry = externals.entry(name.to_string()).or_insert(None);
        if entry.is_none() {
            *entry = origin;
        }
    }

    externals
        .into_iter()
        .map(|(external, origin)| ExternalModuleEntry { external, origin })
        .collect()
}

use crate::models::ConsoleOptions;
use crate::stats::{parse_stats, CompilationResult, CompilationStats, RecordedStats, StatsError};
use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Invalid bundler configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to start bundler `{program}`: {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Bundler produced unreadable stats: {0}")]
    StatsError(#[from] StatsError),
    #[error("Bundler failed: {0}")]
    BundlerError(String),
}

/// Creates a compiler from a build configuration (`webpack(config)`)
pub trait Bundler {
    type Config;
    type Compiler: Compiler;

    fn create(&self, config: &Self::Config) -> Result<Self::Compiler, CompileError>;
}

/// A configured compiler, consumed by a single run (`compiler.run(cb)`)
pub trait Compiler {
    type Stats: CompilationStats;

    /// Run once; `console` is handed to the bundler's own reporting
    fn run(self, console: &ConsoleOptions) -> Result<CompilationResult<Self::Stats>, CompileError>;
}

/// Environment variable carrying the console options (as JSON) to a command bundler
pub const CONSOLE_ENV: &str = "BUNDLESTATS_CONSOLE";

/// Run the bundler once with the given configuration.
///
/// Compilation errors reported inside the result are left for the caller;
/// only failures to create or run the compiler are returned as errors.
pub fn compile<B: Bundler>(
    bundler: &B,
    config: &B::Config,
    console: &ConsoleOptions,
) -> Result<CompilationResult<<B::Compiler as Compiler>::Stats>, CompileError> {
    log::debug!("Compiling with console options {}", console.as_value());
    let compiler = bundler.create(config)?;
    let result = compiler.run(console)?;
    log::info!("Compilation finished with {} target(s)", result.targets().len());
    Ok(result)
}

/// Command that writes a stats dump to stdout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandConfig {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl CommandConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_cwd(mut self, cwd: PathBuf) -> Self {
        self.cwd = Some(cwd);
        self
    }
}

/// Bundler driven through an external command
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandBundler;

impl Bundler for CommandBundler {
    type Config = CommandConfig;
    type Compiler = CommandCompiler;

    fn create(&self, config: &CommandConfig) -> Result<CommandCompiler, CompileError> {
        if config.program.trim().is_empty() {
            return Err(CompileError::InvalidConfig(
                "no bundler command given".to_string(),
            ));
        }
        if let Some(ref cwd) = config.cwd {
            if !cwd.is_dir() {
                return Err(CompileError::InvalidConfig(format!(
                    "working directory {} does not exist",
                    cwd.display()
                )));
            }
        }
        Ok(CommandCompiler {
            config: config.clone(),
        })
    }
}

pub struct CommandCompiler {
    config: CommandConfig,
}

impl Compiler for CommandCompiler {
    type Stats = RecordedStats;

    fn run(self, console: &ConsoleOptions) -> Result<CompilationResult<RecordedStats>, CompileError> {
        let CommandConfig { program, args, cwd } = self.config;

        let mut command = Command::new(&program);
        command.args(&args).env(CONSOLE_ENV, console.as_value().to_string());
        if let Some(cwd) = cwd {
            command.current_dir(cwd);
        }

        log::debug!("Running {} {}", program, args.join(" "));
        let output = command
            .output()
            .map_err(|source| CompileError::SpawnError {
                program: program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let result = match parse_stats(&stdout) {
            Ok(result) => result,
            Err(_) if !output.status.success() => {
                return Err(CompileError::BundlerError(format!(
                    "`{}` exited with {}: {}",
                    program,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if !output.status.success() {
            log::warn!(
                "`{}` exited with {}; stats were still produced",
                program,
                output.status
            );
        }

        Ok(result)
    }
}

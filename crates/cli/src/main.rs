use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use mta_rust_bundlestats_core::{
    compile, format_output, load_stats, CommandBundler, CommandConfig, ConsoleOptions,
    ExtractConfig, ExtractionReport, FileConfig, OriginStrategy, OutputFormat, StatsExtractor,
};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "bundlestats")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "List the external modules a JavaScript bundle needs at runtime")]
#[command(long_about = "A Rust-based tool that reads bundler compilation stats and reports \
    which third-party packages were left external rather than inlined. Scoped packages and \
    sub-path imports are reduced to installable package names, and results are deduplicated \
    per bundle target.\n\n\
    Use `extract` on a stats dump, or `compile` to run a command that prints one.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub options: CommonArgs,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract external modules from a stats JSON dump
    Extract {
        /// Stats file (`{"compilation": ...}` or `{"stats": [...]}`)
        stats: PathBuf,
    },
    /// Run a bundler command that prints stats JSON, then extract
    Compile {
        /// Working directory for the command
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Program and arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        argv: Vec<String>,
    },
}

#[derive(Args)]
pub struct CommonArgs {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormatArg>,

    /// Output file (defaults to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Config file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Parallel threads for multi-target stats (0 = auto)
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// How to resolve the package that imported an external
    #[arg(long, value_enum, global = true)]
    pub origin: Option<OriginArg>,

    /// Console preset forwarded to report rendering
    #[arg(long, global = true)]
    pub console: Option<String>,

    /// Show verbose progress
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Summary,
    /// Package names only, one per line
    Names,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Summary => OutputFormat::Summary,
            OutputFormatArg::Names => OutputFormat::Names,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OriginArg {
    Issuer,
    None,
}

impl From<OriginArg> for OriginStrategy {
    fn from(arg: OriginArg) -> Self {
        match arg {
            OriginArg::Issuer => OriginStrategy::Issuer,
            OriginArg::None => OriginStrategy::None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let args = &cli.options;

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    // Config file first, flags override
    let file_config = match args.config {
        Some(ref path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let format: OutputFormat = match (args.format, file_config.format.as_deref()) {
        (Some(format), _) => format.into(),
        (None, Some(name)) => name.parse()?,
        (None, None) => OutputFormat::Json,
    };

    let mut config: ExtractConfig = file_config.into_extract_config();
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if let Some(origin) = args.origin {
        config = config.with_origin(origin.into());
    }
    if let Some(ref console) = args.console {
        config = config.with_console(ConsoleOptions::preset(console.clone()));
    }

    let start = Instant::now();
    let result = match cli.command {
        Command::Extract { ref stats } => load_stats(stats)?,
        Command::Compile { ref cwd, ref argv } => {
            let (program, rest) = argv
                .split_first()
                .ok_or_else(|| anyhow::anyhow!("no bundler command given"))?;
            let mut command_config = CommandConfig::new(program.clone()).with_args(rest.to_vec());
            if let Some(cwd) = cwd {
                command_config = command_config.with_cwd(cwd.clone());
            }

            let spinner = if args.verbose {
                let pb = ProgressBar::new_spinner();
                pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
                pb.enable_steady_tick(Duration::from_millis(100));
                pb.set_message(format!("Running {}...", program));
                Some(pb)
            } else {
                None
            };

            let result = compile(&CommandBundler, &command_config, &config.console)?;

            if let Some(ref pb) = spinner {
                pb.finish_with_message(format!(
                    "Compiled {} target(s) in {}ms",
                    result.targets().len(),
                    start.elapsed().as_millis()
                ));
            }
            result
        }
    };

    let extractor = StatsExtractor::new(config);
    let extraction = extractor.extract_default(&result);
    let report = ExtractionReport::new(extraction, start.elapsed());

    for (index, summary) in report.extraction.summaries().iter().enumerate() {
        if summary.has_errors() {
            log::warn!(
                "Target {} ({}) reported {} compilation error(s)",
                index + 1,
                summary.output_path,
                summary.errors.len()
            );
        }
    }

    let output = format_output(&report, format)?;

    // Write output
    if let Some(ref path) = args.output {
        fs::write(path, &output)?;
        if args.verbose {
            eprintln!("Output written to: {}", path.display());
        }
    } else {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}

// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use pausewise::app_config::{Config, LlmProvider, LogLevel};
use pausewise::app_controller::{AnalysisMode, Controller, FileOutcome};

/// CLI Wrapper for LlmProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliProvider {
    Ollama,
    #[value(name = "openai")]
    OpenAI,
    Anthropic,
    #[value(name = "lmstudio")]
    LMStudio,
}

impl From<CliProvider> for LlmProvider {
    fn from(cli_provider: CliProvider) -> Self {
        match cli_provider {
            CliProvider::Ollama => LlmProvider::Ollama,
            CliProvider::OpenAI => LlmProvider::OpenAI,
            CliProvider::Anthropic => LlmProvider::Anthropic,
            CliProvider::LMStudio => LlmProvider::LMStudio,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyse pace and pauses
    Analyze(AnalyzeArgs),

    /// Analyse speaking pace only
    Pace(AnalyzeArgs),

    /// Analyse pauses only
    Pauses(AnalyzeArgs),

    /// Generate shell completions for pausewise
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Transcript JSON file or directory of transcripts
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Force overwrite of existing reports
    #[arg(short, long)]
    force: bool,

    /// Print the report of a single file to stdout instead of writing it
    #[arg(long)]
    stdout: bool,

    /// Text-generation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliProvider>,

    /// Model name to use for text generation
    #[arg(short, long)]
    model: Option<String>,

    /// Skip text generation and use the deterministic analysis only
    #[arg(long)]
    offline: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// pausewise - speech pacing and pause analysis
///
/// Scores the speaking pace and the pause placement of word-timestamped
/// transcripts, with optional LLM coaching.
#[derive(Parser, Debug)]
#[command(name = "pausewise")]
#[command(version)]
#[command(about = "Speech pacing and pause analysis")]
#[command(long_about = "pausewise scores the pace and the pauses of word-timestamped transcripts.

EXAMPLES:
    pausewise analyze answer.json               # Write answer.analysis.json
    pausewise analyze --stdout answer.json      # Print the report instead
    pausewise pace answer.json                  # Pace pipeline only
    pausewise pauses --offline answer.json      # Pauses without an LLM
    pausewise analyze -p openai -m gpt-4o-mini recordings/
    pausewise completions bash > pausewise.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file
    doesn't exist, a default one will be created automatically.

SUPPORTED PROVIDERS:
    ollama    - Local Ollama server (default: llama3.2:3b)
    openai    - OpenAI API (requires API key)
    anthropic - Anthropic Claude API (requires API key)
    lmstudio  - LM Studio local server (OpenAI-compatible on http://localhost:1234/v1)")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Marker and ANSI colour for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("✖", "1;31"),
            Level::Warn => ("!", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("·", "1;36"),
            Level::Trace => ("»", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (marker, colour) = Self::style_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                colour,
                now,
                marker,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Installed at the most verbose level; the effective level is set through
    // log::set_max_level once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "pausewise", &mut std::io::stdout());
            Ok(())
        }
        Commands::Analyze(args) => run_analysis(args, AnalysisMode::Full).await,
        Commands::Pace(args) => run_analysis(args, AnalysisMode::Pace).await,
        Commands::Pauses(args) => run_analysis(args, AnalysisMode::Pauses).await,
    }
}

fn load_config(options: &AnalyzeArgs) -> Result<Config> {
    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(provider) = &options.provider {
        config.generation.provider = provider.clone().into();
    }
    if let Some(model) = &options.model {
        config.generation.active_provider_config_mut().model = model.clone();
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if options.offline {
        config.analysis.enable_llm = false;
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

async fn run_analysis(options: AnalyzeArgs, mode: AnalysisMode) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?.mode(mode);
    let input_path = options.input_path;

    if input_path.is_file() {
        if options.stdout {
            let report = controller.analyze_file(&input_path).await?;
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
            return Ok(());
        }

        match controller.run(input_path, options.force).await? {
            FileOutcome::Written(path) => info!("Report written to {}", path.display()),
            FileOutcome::Skipped(path) => info!("Kept existing report {}", path.display()),
        }
    } else if input_path.is_dir() {
        if options.stdout {
            return Err(anyhow!("--stdout needs a single transcript file, got a directory"));
        }
        controller.run_folder(input_path, options.force).await?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}

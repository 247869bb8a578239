// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, error, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use trsmerge::app_config::{Config, LogLevel, TextEncoding};
use trsmerge::app_controller::{is_rejected, Controller};
use trsmerge::reconcile::{ConsoleDecider, HeadlessDecider};

/// CLI Wrapper for TextEncoding to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliEncoding {
    #[value(name = "utf-8")]
    Utf8,
    Cp1252,
}

impl From<CliEncoding> for TextEncoding {
    fn from(cli_encoding: CliEncoding) -> Self {
        match cli_encoding {
            CliEncoding::Utf8 => TextEncoding::Utf8,
            CliEncoding::Cp1252 => TextEncoding::Cp1252,
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
    /// Generate shell completions for trsmerge
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// trsmerge - Validate and merge translation files
///
/// Brings an outdated translation file up to date with a newer template while
/// keeping the translations that were already entered.
#[derive(Parser, Debug)]
#[command(name = "trsmerge")]
#[command(version)]
#[command(about = "Validate and merge translation files")]
#[command(long_about = "trsmerge validates an outdated translation file against a newer template and merges both.

EXAMPLES:
    trsmerge old.trs --template new.trs                  # Validate and merge into merged.trs
    trsmerge old.trs --template new.trs -o out.trs       # Choose the output file
    trsmerge old.trs --template new.trs --non-interactive
    trsmerge old.trs                                     # Only add missing prefixes to translations
    trsmerge completions bash > trsmerge.bash            # Generate bash completions

Without --encoding, files that are valid UTF-8 are read as UTF-8 and all others as cp1252.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Location of the old file with the translation data
    #[arg(value_name = "TRANSLATION")]
    translation: Option<PathBuf>,

    /// Location of the template file, preferably without any translated lines
    #[arg(long)]
    template: Option<PathBuf>,

    /// Location of the output file
    #[arg(short, long)]
    output: Option<String>,

    /// The encoding of the input and output files
    #[arg(short, long, value_enum)]
    encoding: Option<CliEncoding>,

    /// Report divergent lines instead of asking how to resolve them
    #[arg(long)]
    non_interactive: bool,

    /// Configuration file path, created with defaults if missing
    #[arg(short, long = "config")]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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
        // The logger itself lets everything through, log::max_level does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> ExitCode {
    // Initialize the logger once with info level by default
    // The level is updated after loading the config
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "trsmerge", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Rejected validations have already been reported in detail
            if !is_rejected(&e) {
                error!("{:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(options: CommandLineOptions) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let translation = options
        .translation
        .ok_or_else(|| anyhow!("TRANSLATION is required when no subcommand is specified"))?;

    // Load or create configuration
    let mut config = match &options.config_path {
        Some(config_path) => Config::load_or_create(config_path)?,
        None => Config::default(),
    };

    // Override config with CLI options if provided
    if let Some(output) = options.output {
        config.output_file = output;
    }
    if let Some(encoding) = options.encoding {
        config.encoding = Some(encoding.into());
    }
    if options.non_interactive {
        config.interactive = false;
    }
    match options.log_level {
        Some(log_level) => config.log_level = log_level.into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    debug!("Running with {:?}", config);
    let controller = Controller::with_config(config)?;
    let template = options.template.as_deref();

    if controller.config().interactive {
        controller.run(&translation, template, ConsoleDecider::stdio())?;
    } else {
        controller.run(&translation, template, HeadlessDecider)?;
    }

    Ok(())
}

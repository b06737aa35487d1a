//! The jtran translator CLI.
//!
//! Provides the `jtranc` command with the following subcommands:
//!
//! - `jtranc lower <unit.json>` - Lower the enums of a JSON compilation unit
//!   (`--emit-native` writes the native blocks, `--stats` the pass counts)
//! - `jtranc native --name <T> --count <N>` - Print the native support of one enum
//!
//! Options:
//! - `--config` - Path to a `jtran.toml` (default: `./jtran.toml` if present)
//! - `--swift-friendly` - Emit the `toNSEnum` conversion
//! - `--memory rc|arc` - Memory management idiom of the generated code
//! - `--log-level`, `--log-format` - Override `JTRAN_LOG_LEVEL` / `JTRAN_LOG_FORMAT`

mod driver;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use jtran_common::logging::{self, LogFormat, LogLevel, LogOptions};

use driver::{DriverError, LowerArgs, OptionOverrides};

#[derive(Parser)]
#[command(name = "jtranc", version, about = "The jtran enum lowering driver")]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long = "log-level", global = true, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    /// Log output format (text, json)
    #[arg(long = "log-format", global = true, value_parser = parse_log_format)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower the enums of a JSON compilation unit
    Lower {
        /// Compilation unit to read (JSON)
        input: PathBuf,

        /// Where to write the rewritten unit (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the generated native blocks as text
        #[arg(long = "emit-native")]
        emit_native: Option<PathBuf>,

        /// Write pass statistics as JSON
        #[arg(long)]
        stats: Option<PathBuf>,

        #[command(flatten)]
        translate: TranslateFlags,
    },
    /// Print the native support code generated for one enum
    Native {
        /// Output name of the enum type, e.g. ComExampleColor
        #[arg(long)]
        name: String,

        /// Number of constants the enum declares
        #[arg(long, default_value = "0")]
        count: usize,

        #[command(flatten)]
        translate: TranslateFlags,
    },
}

#[derive(Args)]
struct TranslateFlags {
    /// Path to a jtran.toml config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit the ordinal-to-native-enum conversion for Swift callers
    #[arg(long = "swift-friendly")]
    swift_friendly: bool,

    /// Memory management of the generated code (rc, arc)
    #[arg(long)]
    memory: Option<String>,
}

impl TranslateFlags {
    fn into_overrides(self) -> OptionOverrides {
        OptionOverrides {
            config: self.config,
            swift_friendly: self.swift_friendly,
            memory: self.memory,
        }
    }
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::parse(value).ok_or_else(|| format!("unknown log level '{}'", value))
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    LogFormat::parse(value).ok_or_else(|| format!("unknown log format '{}'", value))
}

fn main() {
    let cli = Cli::parse();

    let log_options = LogOptions::from_env().with_overrides(cli.log_format, cli.log_level);
    logging::init(&log_options);

    if let Err(e) = run(cli.command) {
        eprintln!("{}", e);
        process::exit(e.exit_code());
    }
}

fn run(command: Commands) -> Result<(), DriverError> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Failed to determine working directory: {}", e))?;

    match command {
        Commands::Lower {
            input,
            output,
            emit_native,
            stats,
            translate,
        } => {
            let options = driver::resolve_options(&translate.into_overrides(), &cwd)?;
            let args = LowerArgs {
                input: &input,
                output: output.as_deref(),
                emit_native: emit_native.as_deref(),
                stats: stats.as_deref(),
            };
            driver::lower(&args, &options)?;
        }
        Commands::Native {
            name,
            count,
            translate,
        } => {
            let options = driver::resolve_options(&translate.into_overrides(), &cwd)?;
            print!("{}", driver::native_text(&name, count, &options));
        }
    }
    Ok(())
}

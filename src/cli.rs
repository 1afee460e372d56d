// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `framediff`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "framediff",
    version,
    about = "Print the per-frame scene-change score of a video, as computed by ffmpeg.",
    long_about = None
)]
pub struct CliArgs {
    /// Video file path or URL (anything ffmpeg accepts after `-i`).
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Path to the config file (TOML).
    ///
    /// Default: `Framediff.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Name or path of the ffmpeg executable.
    #[arg(long, value_name = "NAME")]
    pub ffmpeg: Option<String>,

    /// Kill ffmpeg if the extraction takes longer than this many seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Do not forward ffmpeg's progress output to stderr.
    #[arg(long, short)]
    pub quiet: bool,

    /// Directory for the temporary metadata file.
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Output format for the frame records.
    #[arg(long, value_enum, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FRAMEDIFF_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// How frame records are printed on stdout.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Csv,
    Json,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

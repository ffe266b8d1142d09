use std::path::PathBuf;
use std::sync::OnceLock;

use adts::process::engine::SampleFormat;
use clap::{Parser as ClapParser, ValueEnum};

/// Version, git describe, library version and build time for `--version`.
fn long_version() -> &'static str {
    static LONG_VERSION: OnceLock<String> = OnceLock::new();
    LONG_VERSION.get_or_init(|| {
        format!(
            "{}\ngit {}\nadts {}\nbuilt {}",
            env!("CARGO_PKG_VERSION"),
            option_env!("VERGEN_GIT_DESCRIBE").unwrap_or("unknown"),
            env!("ADTS_VERSION"),
            env!("BUILD_TIMESTAMP"),
        )
    })
}

#[derive(Debug, ClapParser)]
#[command(
    name         = env!("CARGO_PKG_NAME"),
    version      = env!("CARGO_PKG_VERSION"),
    long_version = long_version(),
    about        = "Dump ADTS headers and decoded PCM frame by frame",
    long_about   = None,
)]
pub struct Cli {
    /// Input ADTS stream (use "-" for stdin).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory for per-frame artifacts and info.json; created if missing.
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Stop after this many frames. Zero or negative dumps nothing.
    #[arg(value_name = "MAX_FRAMES", allow_negative_numbers = true)]
    pub max_frames: Option<i64>,

    /// Sample format requested from the decoder.
    #[arg(long, value_enum, default_value_t = SampleFormatArg::Int16)]
    pub sample_format: SampleFormatArg,

    /// Set the log level
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub loglevel: LogLevel,

    /// Treat warnings as fatal errors (fail on first invalid frame).
    #[arg(long, global = true)]
    pub strict: bool,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Show a progress bar while dumping.
    #[arg(long, global = true)]
    pub progress: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    /// Disable logging output.
    Off,
    /// No output except errors.
    Error,
    /// Show warnings and errors.
    Warn,
    /// Show info, warnings and errors (default).
    Info,
    /// Show debug, info, warnings and errors.
    Debug,
    /// Show all log messages including trace.
    Trace,
}

impl LogLevel {
    /// Convert LogLevel to log::LevelFilter
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Colorized human-readable text.
    Plain,
    /// Structured JSON per log record.
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum SampleFormatArg {
    /// 16-bit signed integer.
    Int16,
    /// 24-bit signed integer in a 32-bit container.
    Int24,
    /// 32-bit signed integer.
    Int32,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
}

impl From<SampleFormatArg> for SampleFormat {
    fn from(arg: SampleFormatArg) -> Self {
        match arg {
            SampleFormatArg::Int16 => SampleFormat::Int16,
            SampleFormatArg::Int24 => SampleFormat::Int24,
            SampleFormatArg::Int32 => SampleFormat::Int32,
            SampleFormatArg::Float32 => SampleFormat::Float,
            SampleFormatArg::Float64 => SampleFormat::Double,
        }
    }
}

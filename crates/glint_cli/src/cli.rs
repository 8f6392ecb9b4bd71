use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Render a JSON scene file to an image.
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "Offline ray tracer for sphere scenes")]
pub struct Args {
    /// Scene description (JSON)
    pub scene: PathBuf,

    /// Output image; the format follows the extension
    #[arg(short, long, default_value = "result.png")]
    pub output: PathBuf,

    /// Logging level, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// Samples per pixel, overriding the scene's render section
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Worker threads for bucket rendering (defaults to all cores)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Render on the calling thread only
    #[arg(long)]
    pub sequential: bool,
}

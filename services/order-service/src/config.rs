//! Runtime configuration
//!
//! Settings are built once from command-line arguments and handed to the
//! pieces that need them; nothing reads configuration from global state.

use clap::ValueEnum;
use std::path::PathBuf;
use tracing::Level;

/// Log verbosity, mapped onto tracing levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_level(self) -> Level {
        match self {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Resolved settings for one batch run
///
/// Logging selection never affects engine semantics; the same input
/// produces the same documents at any level or format.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Input command document
    pub input: PathBuf,
    /// Final order book document destination
    pub book_output: PathBuf,
    /// Trades document destination
    pub trades_output: PathBuf,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

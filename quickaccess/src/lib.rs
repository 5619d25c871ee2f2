//! Shared library for Quick Access - settings and common helpers.

pub mod config;

pub use config::Settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;

/// Project name constant.
pub const PROJECT_NAME: &str = "quickaccess";

/// Display name used for the tray tooltip and window branding.
pub const APP_NAME: &str = "Quick Access";

/// Log level for the tray application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert to a `tracing` level filter.
    #[must_use]
    pub const fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error => LevelFilter::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Get the directory where log files are written.
///
/// Logs go to `~/logs/quickaccess/`.
pub fn get_log_directory() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().context("Failed to resolve home directory")?;
    Ok(home_dir.join("logs").join(PROJECT_NAME))
}

/// Truncate a string in the middle so it fits in `max_chars` characters.
///
/// Keeps the head and tail of the string and inserts a single ellipsis
/// character between them. Strings that already fit are returned unchanged.
/// Useful for rendering long folder paths on a single line.
#[must_use]
pub fn truncate_middle(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    if max_chars == 1 {
        return "…".to_string();
    }

    // One character is reserved for the ellipsis itself.
    let keep = max_chars - 1;
    let head_len = keep.div_ceil(2);
    let tail_len = keep / 2;

    let head: String = text.chars().take(head_len).collect();
    let tail: String = text.chars().skip(char_count - tail_len).collect();

    format!("{head}…{tail}")
}

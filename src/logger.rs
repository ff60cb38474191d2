//! File-based logging using simplelog
//!
//! The terminal belongs to the game screen, so log records go to a file and
//! only when one is asked for on the command line.

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::Path;

/// Map a `RUST_LOG` style value to a level, defaulting to debug
fn level_from_env(value: Option<&str>) -> LevelFilter {
    match value.map(str::to_lowercase).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") | None => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some(_) => LevelFilter::Info,
    }
}

/// Initialize file-based logging at `path`
pub fn init(path: &Path) -> Result<()> {
    let level = level_from_env(std::env::var("RUST_LOG").ok().as_deref());

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c) // Fallback if local time offset fails
        .build();

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    WriteLogger::init(level, config, file).context("Failed to initialize logger")?;
    log::info!("Logging to {} at {:?}", path.display(), level);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_env() {
        assert_eq!(level_from_env(None), LevelFilter::Debug);
        assert_eq!(level_from_env(Some("WARN")), LevelFilter::Warn);
        assert_eq!(level_from_env(Some("trace")), LevelFilter::Trace);
        assert_eq!(level_from_env(Some("off")), LevelFilter::Off);
        assert_eq!(level_from_env(Some("chatty")), LevelFilter::Info);
    }
}

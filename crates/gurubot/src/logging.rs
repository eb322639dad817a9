//! Logging initialization and configuration checking
//!
//! This module provides:
//! - Logger initialization (stderr + optional file)
//! - Startup diagnostics for the bot configuration

use std::fs::File;

use anyhow::Result;
use gurucore::core::config::vars;
use gurucore::Config;
use simplelog::*;

/// Initialize logger for stderr and, when configured, a log file
///
/// Replies go to stdout, so the terminal logger writes to stderr.
pub fn init_logger(config: &Config, verbose: bool) -> Result<()> {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = &config.log_file {
        let log_file = File::create(path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;
        loggers.push(WriteLogger::new(level, simplelog::Config::default(), log_file));
    }

    CombinedLogger::init(loggers).map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the resolved configuration at startup
///
/// A missing Last.fm token is reported but does not stop the bot; `!np`
/// will answer with the API's error message instead.
pub fn log_configuration(config: &Config) {
    match &config.lastfm_token {
        Some(_) => log::info!("✅ {}: set", vars::LASTFM_TOKEN),
        None => log::error!("❌ Missing API token for Last.FM ({} not set)", vars::LASTFM_TOKEN),
    }

    log::info!("Profile store: {}", config.store.describe());
    log::info!("Last.fm API: {}", config.lastfm_url);
    log::info!("Affiliation API: {}", config.affiliation_url);
    log::info!("HTTP timeout: {}s", config.http_timeout.as_secs());

    if let Some(path) = &config.log_file {
        log::info!("Log file: {}", path.display());
    }
}

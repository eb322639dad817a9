//! gurucore - chat bot scripts for the shared space
//!
//! Everything the bot does that does not depend on a particular chat
//! network: Last.fm handle storage and now-playing lookups, coffee status,
//! and the script registry the adapters feed messages into.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, shared HTTP client
//! - `storage`: user profile store (redis, in-memory)
//! - `lastfm`: Last.fm client and response formatter
//! - `coffee`: affiliation client and coffee status
//! - `scripts`: chat command handlers and registry

pub mod coffee;
pub mod core;
pub mod i18n;
pub mod lastfm;
pub mod message;
pub mod relative_time;
pub mod scripts;
pub mod storage;

use std::sync::Arc;

// Re-export commonly used types for convenience
pub use crate::core::{AppError, AppResult, Config, FetchError, StoreError};
pub use message::{IncomingMessage, Outgoing};
pub use scripts::{CoffeeScript, LastFmScript, Script, ScriptRegistry};
pub use storage::{open_store, MemoryProfileStore, ProfileStore, RedisProfileStore, UserProfile};

/// Wires both scripts from configuration.
///
/// Opens the configured profile store and builds one HTTP client shared by
/// the Last.fm and affiliation lookups.
pub async fn build_registry(config: &Config) -> AppResult<ScriptRegistry> {
    let http = crate::core::http::build_http_client(config.http_timeout)?;
    let store = open_store(&config.store)?;
    log::info!("Profile store: {} ({})", store.name(), config.store.describe());

    let lastfm = lastfm::LastFmClient::new(http.clone(), &config.lastfm_url, config.lastfm_token.clone())?;
    let affiliation = coffee::AffiliationClient::new(http, &config.affiliation_url)?;

    let mut registry = ScriptRegistry::new();
    registry.register(Arc::new(CoffeeScript::new(Arc::new(affiliation))));
    registry.register(Arc::new(LastFmScript::new(store, Arc::new(lastfm))));
    Ok(registry)
}

//! `!np`: what is this user listening to on Last.fm.

use std::sync::Arc;

use async_trait::async_trait;
use lazy_regex::regex;

use crate::core::config::lastfm::PROFILE_FIELD;
use crate::lastfm::{format_recent_tracks, RecentTracksSource};
use crate::message::{IncomingMessage, Outgoing};
use crate::scripts::Script;
use crate::storage::ProfileStore;

/// Handles Last.fm registration and now-playing lookups.
///
/// Both collaborators are injected so tests can swap in an in-memory store
/// and a canned payload source.
pub struct LastFmScript {
    store: Arc<dyn ProfileStore>,
    tracks: Arc<dyn RecentTracksSource>,
}

impl LastFmScript {
    pub fn new(store: Arc<dyn ProfileStore>, tracks: Arc<dyn RecentTracksSource>) -> Self {
        Self { store, tracks }
    }

    /// Stores `handle` as the Last.fm handle of `identity` and confirms it.
    ///
    /// Store failures are reported back to the user.
    pub async fn register(&self, identity: &str, handle: &str) -> Outgoing {
        if let Err(e) = self.store.upsert(identity, PROFILE_FIELD, handle).await {
            log::error!("Last.fm: failed to store handle for '{}': {}", identity, e);
            return Outgoing::Reply(format!("Something went wrong: {}", e));
        }

        // Confirm with what the store actually holds now.
        match self.store.get(identity).await {
            Ok(Some(profile)) => match profile.lastfm() {
                Some(stored) => {
                    log::info!("Last.fm: '{}' registered as '{}'", identity, stored);
                    Outgoing::Reply(format!("Done! {} is now stored as your Last.fm handle.", stored))
                }
                None => Outgoing::Reply(format!(
                    "Something went wrong: no Last.fm handle stored for {}",
                    identity
                )),
            },
            Ok(None) => Outgoing::Reply(format!("Something went wrong: no profile stored for {}", identity)),
            Err(e) => {
                log::error!("Last.fm: failed to re-read profile for '{}': {}", identity, e);
                Outgoing::Reply(format!("Something went wrong: {}", e))
            }
        }
    }

    /// Now-playing / last-played line for `identity`.
    ///
    /// Returns `None` (and logs) when the user is not registered or any
    /// lookup fails; the chat gets no answer in that case.
    pub async fn now_playing(&self, identity: &str) -> Option<Outgoing> {
        let profile = match self.store.get(identity).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                log::debug!("Last.fm: no profile for '{}'", identity);
                return None;
            }
            Err(e) => {
                log::error!("Last.fm: profile lookup for '{}' failed: {}", identity, e);
                return None;
            }
        };

        let Some(handle) = profile.lastfm() else {
            log::debug!("Last.fm: '{}' has a profile but no Last.fm handle", identity);
            return None;
        };

        match self.tracks.recent_tracks(handle).await {
            Ok(payload) => Some(format_recent_tracks(&payload, identity)),
            Err(e) => {
                log::error!("Last.fm: fetching recent tracks for '{}' failed: {}", handle, e);
                None
            }
        }
    }
}

#[async_trait]
impl Script for LastFmScript {
    fn name(&self) -> &str {
        "lastfm"
    }

    fn help(&self) -> Vec<&'static str> {
        vec![
            "!np - show what you are playing on Last.fm",
            "!np reg <handle> - remember your Last.fm handle",
        ]
    }

    async fn hear(&self, message: &IncomingMessage) -> Option<Outgoing> {
        let text = message.text.as_str();

        if let Some(caps) = regex!(r"^!np\sreg(?:ister)?\s(\S+)\s*$"i).captures(text) {
            let handle = caps.get(1)?.as_str();
            return Some(self.register(&message.identity(), handle).await);
        }

        if regex!(r"^!np(|\s)$"i).is_match(text) {
            return self.now_playing(&message.identity()).await;
        }

        None
    }
}

//! Last.fm API client.
//!
//! Issues `user.getrecenttracks` for a handle and returns the decoded JSON
//! untouched; interpretation happens in [`format`].

pub mod format;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::core::error::FetchError;
use crate::core::http::read_json_body;

pub use format::{format_recent_tracks, RecentTracksOutcome, TrackEvent};

/// Source of recent-track payloads for an external handle.
#[async_trait]
pub trait RecentTracksSource: Send + Sync {
    /// One request, no retry, no cache.
    async fn recent_tracks(&self, handle: &str) -> Result<Value, FetchError>;
}

/// Client for the Last.fm 2.0 web service.
#[derive(Debug, Clone)]
pub struct LastFmClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl LastFmClient {
    /// `base_url` is the service root; `/2.0/` is appended.
    ///
    /// A missing API key is allowed: Last.fm answers with an error payload
    /// that the formatter turns into a chat message.
    pub fn new(http: reqwest::Client, base_url: &str, api_key: Option<String>) -> Result<Self, FetchError> {
        let endpoint = Url::parse(base_url)?.join("2.0/")?;
        Ok(Self {
            http,
            endpoint,
            api_key: api_key.unwrap_or_default(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RecentTracksSource for LastFmClient {
    async fn recent_tracks(&self, handle: &str) -> Result<Value, FetchError> {
        log::debug!("Last.fm: user.getrecenttracks for '{}'", handle);

        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&[
                ("method", "user.getrecenttracks"),
                ("user", handle),
                ("api_key", self.api_key.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        read_json_body(response).await
    }
}

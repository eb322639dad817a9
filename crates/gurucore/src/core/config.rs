//! Runtime configuration.
//!
//! Values are read once from the environment (after the binary has loaded
//! `.env`) into a [`Config`] that is passed down to constructors. Nothing in
//! the scripts reads the environment on its own.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable names
pub mod vars {
    pub const LASTFM_TOKEN: &str = "SLACKGURU_LASTFM_TOKEN";
    pub const REDIS_HOST: &str = "SLACKGURU_REDIS_HOST";
    pub const USERS_FIXTURE: &str = "SLACKGURU_USERS_FIXTURE";
    pub const LASTFM_URL: &str = "SLACKGURU_LASTFM_URL";
    pub const AFFILIATION_URL: &str = "SLACKGURU_AFFILIATION_URL";
    pub const HTTP_TIMEOUT_SECS: &str = "SLACKGURU_HTTP_TIMEOUT_SECS";
    pub const LOG_FILE_PATH: &str = "LOG_FILE_PATH";
}

/// Last.fm API configuration
pub mod lastfm {
    /// Base URL of the Last.fm web service (path `/2.0/` is appended)
    pub const API_URL: &str = "https://ws.audioscrobbler.com";

    /// Profile field that holds the Last.fm handle
    pub const PROFILE_FIELD: &str = "lastfm";

    /// Service name used in user-facing messages
    pub const SERVICE_NAME: &str = "Last.FM";
}

/// Coffee affiliation API configuration
pub mod coffee {
    pub const AFFILIATION_URL: &str = "https://passoa.online.ntnu.no/api/affiliation/online";
}

/// Key-value store configuration
pub mod store {
    /// Redis hash holding every user profile
    pub const USERS_KEY: &str = "users";

    /// Host used when SLACKGURU_REDIS_HOST is not set
    pub const DEFAULT_REDIS_HOST: &str = "127.0.0.1";

    /// Connection attempts before a store call gives up
    pub const CONNECT_RETRIES: usize = 1;
}

/// Network configuration
pub mod network {
    use std::time::Duration;

    /// Request timeout for outbound HTTP requests (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;

    pub const USER_AGENT: &str = concat!("slackguru/", env!("CARGO_PKG_VERSION"));

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Where user profiles live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Redis hash, addressed by connection URL
    Redis { url: String },
    /// In-memory map seeded from a `users_map.json` fixture
    Fixture { path: PathBuf },
}

impl StoreBackend {
    /// Human-readable summary for startup logs (no credentials).
    pub fn describe(&self) -> String {
        match self {
            StoreBackend::Redis { url } => match url::Url::parse(url) {
                Ok(parsed) => format!("redis at {}", parsed.host_str().unwrap_or("?")),
                Err(_) => "redis (unparseable url)".to_string(),
            },
            StoreBackend::Fixture { path } => format!("fixture {}", path.display()),
        }
    }
}

/// Resolved bot configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Last.fm API key. `None` keeps the bot running; requests will fail upstream.
    pub lastfm_token: Option<String>,
    pub lastfm_url: String,
    pub affiliation_url: String,
    pub store: StoreBackend,
    pub http_timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let store = match non_empty(vars::USERS_FIXTURE) {
            Some(path) => StoreBackend::Fixture { path: PathBuf::from(path) },
            None => {
                let host = non_empty(vars::REDIS_HOST).unwrap_or_else(|| store::DEFAULT_REDIS_HOST.to_string());
                StoreBackend::Redis {
                    url: redis_url(&host),
                }
            }
        };

        let http_timeout = non_empty(vars::HTTP_TIMEOUT_SECS)
            .and_then(|v| match v.parse::<u64>() {
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    log::warn!("Ignoring invalid {}={:?}", vars::HTTP_TIMEOUT_SECS, v);
                    None
                }
            })
            .unwrap_or_else(network::timeout);

        Self {
            lastfm_token: non_empty(vars::LASTFM_TOKEN),
            lastfm_url: non_empty(vars::LASTFM_URL).unwrap_or_else(|| lastfm::API_URL.to_string()),
            affiliation_url: non_empty(vars::AFFILIATION_URL).unwrap_or_else(|| coffee::AFFILIATION_URL.to_string()),
            store,
            http_timeout,
            log_file: non_empty(vars::LOG_FILE_PATH).map(PathBuf::from),
        }
    }
}

/// Accepts either a bare host (`cache.internal`) or a full `redis://` URL.
fn redis_url(host: &str) -> String {
    if host.contains("://") {
        host.to_string()
    } else {
        format!("redis://{}/", host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.lastfm_token, None);
        assert_eq!(config.lastfm_url, lastfm::API_URL);
        assert_eq!(config.affiliation_url, coffee::AFFILIATION_URL);
        assert_eq!(
            config.store,
            StoreBackend::Redis {
                url: "redis://127.0.0.1/".to_string()
            }
        );
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_redis_host_and_full_url() {
        let config = config_with(&[(vars::REDIS_HOST, "cache.internal")]);
        assert_eq!(
            config.store,
            StoreBackend::Redis {
                url: "redis://cache.internal/".to_string()
            }
        );

        let config = config_with(&[(vars::REDIS_HOST, "redis://:secret@cache.internal:6380/2")]);
        assert_eq!(
            config.store,
            StoreBackend::Redis {
                url: "redis://:secret@cache.internal:6380/2".to_string()
            }
        );
        assert_eq!(config.store.describe(), "redis at cache.internal");
    }

    #[test]
    fn test_fixture_takes_priority_over_redis() {
        let config = config_with(&[
            (vars::REDIS_HOST, "cache.internal"),
            (vars::USERS_FIXTURE, "tests/users_map.json"),
        ]);
        assert_eq!(
            config.store,
            StoreBackend::Fixture {
                path: PathBuf::from("tests/users_map.json")
            }
        );
    }

    #[test]
    fn test_blank_token_is_missing() {
        let config = config_with(&[(vars::LASTFM_TOKEN, "   ")]);
        assert_eq!(config.lastfm_token, None);

        let config = config_with(&[(vars::LASTFM_TOKEN, "key")]);
        assert_eq!(config.lastfm_token.as_deref(), Some("key"));
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = config_with(&[(vars::HTTP_TIMEOUT_SECS, "soon")]);
        assert_eq!(config.http_timeout, network::timeout());

        let config = config_with(&[(vars::HTTP_TIMEOUT_SECS, "3")]);
        assert_eq!(config.http_timeout, Duration::from_secs(3));
    }
}

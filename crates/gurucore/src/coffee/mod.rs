//! Coffee status from the member-affiliation API.
//!
//! The affiliation endpoint reports the last brew under `coffee.date`; we
//! turn that into "Kaffen ble laget for 3 timer siden" in the asker's
//! language.

use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use fluent_templates::fluent_bundle::FluentArgs;
use serde_json::Value;
use unic_langid::LanguageIdentifier;
use url::Url;

use crate::core::error::FetchError;
use crate::core::http::read_json_body;
use crate::i18n;
use crate::relative_time::relative_phrase;

/// Source of affiliation payloads.
#[async_trait]
pub trait AffiliationSource: Send + Sync {
    async fn affiliation(&self) -> Result<Value, FetchError>;
}

/// HTTP client for the affiliation endpoint.
#[derive(Debug, Clone)]
pub struct AffiliationClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl AffiliationClient {
    pub fn new(http: reqwest::Client, endpoint: &str) -> Result<Self, FetchError> {
        Ok(Self {
            http,
            endpoint: Url::parse(endpoint)?,
        })
    }
}

#[async_trait]
impl AffiliationSource for AffiliationClient {
    async fn affiliation(&self) -> Result<Value, FetchError> {
        let response = self.http.get(self.endpoint.clone()).send().await?;
        read_json_body(response).await
    }
}

/// Last brew time, if the payload has a usable one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoffeeStatus {
    pub brewed_at: Option<DateTime<Utc>>,
}

impl CoffeeStatus {
    pub fn from_payload(payload: &Value) -> Self {
        let brewed_at = payload["coffee"]["date"].as_str().and_then(|raw| {
            let parsed = parse_brew_date(raw);
            if parsed.is_none() {
                log::warn!("Coffee: unparseable date {:?}", raw);
            }
            parsed
        });
        Self { brewed_at }
    }

    /// Localized status line relative to `now`.
    pub fn describe(&self, lang: &LanguageIdentifier, now: &DateTime<Utc>) -> String {
        match self.brewed_at {
            Some(brewed_at) => {
                let mut args = FluentArgs::new();
                args.set("since", relative_phrase(lang, &brewed_at, now));
                i18n::t_args(lang, "coffee-ready", &args)
            }
            None => i18n::t(lang, "coffee-not-made"),
        }
    }
}

/// Parses RFC 3339 first, then naive timestamps read as server-local time.
pub fn parse_brew_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|local| local.with_timezone(&Utc))
}

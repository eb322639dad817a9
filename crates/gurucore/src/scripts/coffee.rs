//! `!kaffe` and `!kaffi`: when the coffee was last made.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use lazy_regex::regex;
use unic_langid::LanguageIdentifier;

use crate::coffee::{AffiliationSource, CoffeeStatus};
use crate::i18n::lang_from_code;
use crate::message::{IncomingMessage, Outgoing};
use crate::scripts::Script;

pub struct CoffeeScript {
    source: Arc<dyn AffiliationSource>,
}

impl CoffeeScript {
    pub fn new(source: Arc<dyn AffiliationSource>) -> Self {
        Self { source }
    }

    /// Coffee status in `lang`, or `None` if the affiliation API failed.
    pub async fn status(&self, lang: &LanguageIdentifier) -> Option<Outgoing> {
        match self.source.affiliation().await {
            Ok(payload) => {
                let status = CoffeeStatus::from_payload(&payload);
                Some(Outgoing::Send(status.describe(lang, &Utc::now())))
            }
            Err(e) => {
                log::error!("Coffee: affiliation lookup failed: {}", e);
                None
            }
        }
    }
}

/// Language code asked for by the trigger word, if any.
fn requested_language(text: &str) -> Option<&'static str> {
    if regex!(r"^!kaffe(\s|$)"i).is_match(text) {
        Some("nb")
    } else if regex!(r"^!kaffi(\s|$)"i).is_match(text) {
        Some("nn")
    } else {
        None
    }
}

#[async_trait]
impl Script for CoffeeScript {
    fn name(&self) -> &str {
        "coffee"
    }

    fn help(&self) -> Vec<&'static str> {
        vec![
            "!kaffe - når ble kaffen laget (bokmål)",
            "!kaffi - når vart kaffien laga (nynorsk)",
        ]
    }

    async fn hear(&self, message: &IncomingMessage) -> Option<Outgoing> {
        let code = requested_language(&message.text)?;
        log::debug!("Coffee: {} asked ({})", message.sender, code);
        self.status(&lang_from_code(code)).await
    }
}

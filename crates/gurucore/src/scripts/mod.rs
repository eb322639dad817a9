//! Chat scripts and the registry that feeds them.
//!
//! A script owns its trigger patterns and answers at most once per message.
//! The chat network adapter hands every message to [`ScriptRegistry::hear`]
//! and posts whatever comes back.
//!
//! Built-in scripts:
//! - `LastFmScript`: `!np`, `!np reg <handle>`
//! - `CoffeeScript`: `!kaffe`, `!kaffi`

pub mod coffee;
pub mod lastfm;

use std::sync::Arc;

use async_trait::async_trait;

use crate::message::{IncomingMessage, Outgoing};

pub use coffee::CoffeeScript;
pub use lastfm::LastFmScript;

/// A chat command handler.
#[async_trait]
pub trait Script: Send + Sync {
    /// Short name for logs (e.g. "lastfm").
    fn name(&self) -> &str;

    /// Usage lines, one per command.
    fn help(&self) -> Vec<&'static str>;

    /// Handles a message. `None` when the message is not for this script or
    /// the interaction was dropped after an error.
    async fn hear(&self, message: &IncomingMessage) -> Option<Outgoing>;
}

/// Ordered set of scripts. Every script sees every message.
#[derive(Default)]
pub struct ScriptRegistry {
    scripts: Vec<Arc<dyn Script>>,
}

impl ScriptRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a script. Scripts answer in registration order.
    pub fn register(&mut self, script: Arc<dyn Script>) {
        log::info!("Registered script: {}", script.name());
        self.scripts.push(script);
    }

    /// Names of all registered scripts, in order.
    pub fn names(&self) -> Vec<&str> {
        self.scripts.iter().map(|s| s.name()).collect()
    }

    /// Usage lines of every registered script.
    pub fn help(&self) -> Vec<&'static str> {
        self.scripts.iter().flat_map(|s| s.help()).collect()
    }

    /// Offers `message` to each script and collects the answers.
    pub async fn hear(&self, message: &IncomingMessage) -> Vec<Outgoing> {
        let mut replies = Vec::new();
        for script in &self.scripts {
            if let Some(reply) = script.hear(message).await {
                log::debug!("{} answered {}", script.name(), message.sender);
                replies.push(reply);
            }
        }
        replies
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

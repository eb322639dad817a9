//! Common test utilities
//!
//! Shared across the integration tests in this crate.

#![allow(dead_code)]

use std::path::PathBuf;

/// Directory holding recorded API payloads and the users map.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Reads a fixture file as a string.
pub fn fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {}: {}", path.display(), e))
}

/// Renders replies the way the console adapter prints them.
pub fn rendered(replies: &[gurucore::Outgoing], sender: &str) -> Vec<String> {
    replies.iter().map(|r| r.render(sender)).collect()
}

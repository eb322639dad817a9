use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::config::lastfm;
use crate::core::error::StoreError;

/// Per-user profile record, stored as one JSON object per chat identity.
///
/// Only `lastfm` is interpreted today. Other fields are kept as-is so a
/// re-registration never drops data written by someone else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile {
    fields: Map<String, Value>,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a stored value. Anything but a JSON object is malformed.
    pub fn decode(identity: &str, raw: &str) -> Result<Self, StoreError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| StoreError::Malformed {
            identity: identity.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_value(identity, value)
    }

    /// Wraps an already-parsed JSON value.
    pub fn from_value(identity: &str, value: Value) -> Result<Self, StoreError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(StoreError::Malformed {
                identity: identity.to_string(),
                reason: format!("expected object, found {}", json_kind(&other)),
            }),
        }
    }

    pub fn encode(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(&self.fields)?)
    }

    /// String value of a field. `None` if absent or not a string.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn set(&mut self, field: &str, value: &str) {
        self.fields.insert(field.to_string(), Value::String(value.to_string()));
    }

    /// The user's Last.fm handle, if registered.
    pub fn lastfm(&self) -> Option<&str> {
        self.get(lastfm::PROFILE_FIELD)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_object() {
        let profile = UserProfile::decode("bob", r#"{"lastfm":"Bob"}"#).unwrap();
        assert_eq!(profile.lastfm(), Some("Bob"));
    }

    #[test]
    fn test_decode_rejects_scalars() {
        for raw in [r#""Bob""#, "42", "null", r#"["Bob"]"#] {
            let err = UserProfile::decode("bob", raw).unwrap_err();
            assert!(matches!(err, StoreError::Malformed { .. }), "{raw} should be malformed");
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let err = UserProfile::decode("bob", "{not json").unwrap_err();
        assert!(matches!(err, StoreError::Malformed { ref identity, .. } if identity == "bob"));
    }

    #[test]
    fn test_absent_is_not_empty() {
        let empty = UserProfile::decode("bob", r#"{"lastfm":""}"#).unwrap();
        assert!(empty.contains("lastfm"));
        assert_eq!(empty.lastfm(), Some(""));

        let absent = UserProfile::new();
        assert!(!absent.contains("lastfm"));
        assert_eq!(absent.lastfm(), None);
    }

    #[test]
    fn test_set_preserves_unknown_fields() {
        let mut profile = UserProfile::decode("bob", r#"{"steam":{"id":7},"lastfm":"old"}"#).unwrap();
        profile.set("lastfm", "new");

        let reparsed: Value = serde_json::from_str(&profile.encode().unwrap()).unwrap();
        assert_eq!(reparsed, serde_json::json!({"steam": {"id": 7}, "lastfm": "new"}));
    }
}

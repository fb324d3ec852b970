//! Encounter identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Groups the events of one encounter. A fresh id is issued on every
/// `new-encounter` notification; subscribers treat it as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncounterId(String);

impl EncounterId {
    /// Time-ordered UUIDv7, so ids of later encounters sort after earlier ones
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn from_string(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EncounterId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for EncounterId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for EncounterId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_differ_and_parse_as_uuid() {
        let first = EncounterId::new();
        let second = EncounterId::new();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_str()).is_ok());
        assert_eq!(first.to_string(), first.as_str());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = EncounterId::from("enc-1".to_string());
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""enc-1""#);

        let back: EncounterId = serde_json::from_str(r#""enc-1""#).unwrap();
        assert_eq!(back, id);
    }
}

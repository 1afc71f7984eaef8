//! Build catalog: hash → candidate message records for one protocol build.
//!
//! The catalog is produced by an external analyzer that disassembles a
//! protocol build and emits, per message, its numeric id and the content
//! hash of its implementation. msgident never computes or validates those
//! hashes — they are opaque, comparatively stable strings.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

/// One message record extracted from a protocol build by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CandidateMessage {
    /// Content hash of the message's implementation.
    pub hash: String,
    /// Numeric id assigned to the message in this build.
    pub id: u16,
}

/// Lookup from content hash to candidate records for the current build.
///
/// The identifier table depends only on "given a hash, how many candidates,
/// and the id of the unique candidate when exactly one."
pub trait BuildIndex {
    /// Candidate records for a hash, in the analyzer's order.
    /// Empty when the hash is unknown to this build.
    fn candidates(&self, hash: &str) -> &[CandidateMessage];
}

/// The analyzer's JSON dump, deserialized. A hash maps to more than one
/// candidate when distinct messages in the build share an implementation.
#[derive(Debug, Default, Deserialize)]
pub struct MessageCatalog {
    /// Content hash → candidate records, as extracted from the build.
    messages: HashMap<String, Vec<CandidateMessage>>,
}

impl MessageCatalog {
    /// Build a catalog directly from in-memory records.
    pub fn from_messages(messages: HashMap<String, Vec<CandidateMessage>>) -> Self {
        return Self { messages };
    }

    /// Number of distinct hashes the build exposes.
    pub fn hash_count(&self) -> usize {
        return self.messages.len();
    }

    /// Parse a catalog from the analyzer's JSON dump.
    ///
    /// # Errors
    ///
    /// Returns `Error::JsonDe` if the content is not a valid dump.
    pub fn parse(content: &str) -> Result<Self, Error> {
        return Ok(serde_json::from_str(content)?);
    }

    /// Read and parse a catalog from disk.
    ///
    /// # Errors
    ///
    /// Returns `Error::CatalogNotFound` if the file doesn't exist,
    /// `Error::Io` for other read failures,
    /// or `Error::JsonDe` if the content is invalid JSON.
    pub fn read(path: &Path) -> Result<Self, Error> {
        let content = match std::fs::read_to_string(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::CatalogNotFound { path: path.to_path_buf() });
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };
        return Self::parse(&content);
    }
}

impl BuildIndex for MessageCatalog {
    fn candidates(&self, hash: &str) -> &[CandidateMessage] {
        return self.messages.get(hash).map_or(&[], Vec::as_slice);
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "test assertions")]
mod tests {
    use super::*;

    const DUMP: &str = r#"{
        "messages": {
            "abc123": [{ "id": 10, "hash": "abc123" }],
            "def456": [
                { "id": 20, "hash": "def456" },
                { "id": 21, "hash": "def456" }
            ]
        }
    }"#;

    #[test]
    fn parses_analyzer_dump() {
        let catalog = MessageCatalog::parse(DUMP).unwrap();
        assert_eq!(catalog.hash_count(), 2);
        assert_eq!(catalog.candidates("abc123").len(), 1);
        assert_eq!(catalog.candidates("def456").len(), 2);
    }

    #[test]
    fn unknown_hash_has_no_candidates() {
        let catalog = MessageCatalog::parse(DUMP).unwrap();
        assert!(catalog.candidates("not-a-hash").is_empty());
    }

    #[test]
    fn id_out_of_range_is_rejected() {
        let dump = r#"{ "messages": { "h": [{ "id": 70000, "hash": "h" }] } }"#;
        assert!(matches!(MessageCatalog::parse(dump), Err(Error::JsonDe(_))));
    }

    #[test]
    fn read_missing_file_is_catalog_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = MessageCatalog::read(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::CatalogNotFound { .. }));
    }
}

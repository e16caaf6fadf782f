//! Vocabulary list documents.
//!
//! A list document names a collection of vocabularies:
//!
//! ```json
//! {
//!   "schema:name": "Tourism vocabularies",
//!   "schema:hasPart": [
//!     { "@id": "https://example.org/hotel.jsonld", "schema:name": "Hotels" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{errors::Missing, vocabulary::VocabularyReference, Error, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyListEntry {
    #[serde(rename = "@id")]
    pub location: String,
    #[serde(rename = "schema:name", default)]
    pub name: Option<String>,
    #[serde(rename = "schema:author", default)]
    pub author: Option<String>,
    #[serde(rename = "schema:description", default)]
    pub description: Option<String>,
}

impl VocabularyListEntry {
    #[must_use]
    pub fn reference(&self) -> VocabularyReference {
        VocabularyReference::from_source(self.location.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyListDocument {
    #[serde(rename = "schema:name", default)]
    pub name: String,
    #[serde(rename = "schema:hasPart", default)]
    pub parts: Vec<VocabularyListEntry>,
}

impl VocabularyListDocument {
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| Error::parse("vocabulary list document", err))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Entry addressed by the 1-based `voc` index.
    pub fn entry(&self, index: usize) -> Result<&VocabularyListEntry> {
        index
            .checked_sub(1)
            .and_then(|position| self.parts.get(position))
            .ok_or_else(|| {
                Error::NotFound(Missing::VocabularyIndex {
                    index: index.to_string(),
                    available: self.parts.len(),
                })
            })
    }

    /// Location of the n-th (1-based) vocabulary.
    pub fn location(&self, index: usize) -> Result<VocabularyReference> {
        self.entry(index).map(VocabularyListEntry::reference)
    }
}

/// Holds the list document once it has been loaded. It is never replaced.
#[derive(Debug, Default)]
pub struct ListStore {
    document: Option<VocabularyListDocument>,
}

impl ListStore {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    #[must_use]
    pub fn document(&self) -> Option<&VocabularyListDocument> {
        self.document.as_ref()
    }

    /// Stores `document` unless one is already present and returns the stored one.
    pub fn store(&mut self, document: VocabularyListDocument) -> &VocabularyListDocument {
        self.document.get_or_insert(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIST: &str = r#"{
        "schema:name": "Demo list",
        "schema:hasPart": [
            { "@id": "https://example.org/a.jsonld", "schema:name": "A", "schema:author": "Ada" },
            { "@id": "https://example.org/b.jsonld" },
            { "@id": "https://example.org/c.jsonld", "schema:description": "Third" }
        ]
    }"#;

    #[test]
    fn parses_parts_in_order() {
        let list = VocabularyListDocument::parse(LIST).expect("valid list");
        assert_eq!(list.name, "Demo list");
        assert_eq!(list.len(), 3);
        assert_eq!(list.parts[0].author.as_deref(), Some("Ada"));
        assert_eq!(list.parts[1].name, None);
        assert_eq!(
            list.location(2).expect("second part"),
            VocabularyReference::from_source("https://example.org/b.jsonld")
        );
    }

    #[test]
    fn out_of_range_indexes_are_not_found() {
        let list = VocabularyListDocument::parse(LIST).expect("valid list");
        for index in [0, 4] {
            let err = list.location(index).expect_err("out of range");
            assert!(matches!(
                err,
                Error::NotFound(Missing::VocabularyIndex { available: 3, .. })
            ));
        }
    }

    #[test]
    fn invalid_json_is_a_parse_failure() {
        let err = VocabularyListDocument::parse("[1, 2").expect_err("invalid json");
        assert!(matches!(err, Error::ParseFailure { .. }));
    }

    #[test]
    fn store_keeps_first_document() {
        let mut store = ListStore::default();
        assert!(!store.is_loaded());
        store.store(VocabularyListDocument::parse(LIST).expect("valid list"));
        let replacement = VocabularyListDocument {
            name: "Other".to_string(),
            parts: vec![],
        };
        assert_eq!(store.store(replacement).name, "Demo list");
    }
}

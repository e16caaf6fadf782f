use std::{collections::BTreeMap, fmt, sync::Arc};

use async_trait::async_trait;
use url::Url;

use super::{
    entities::{Term, TermKind},
    value_objects::TermId,
};
use crate::Result;

/// Where a vocabulary document comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VocabularyReference {
    /// A fetchable document location.
    Location(Url),
    /// The document itself, passed by value.
    Inline(String),
}

impl VocabularyReference {
    /// Interprets a construction value: anything that parses as an absolute
    /// URL is a location, everything else is an inline document.
    #[must_use]
    pub fn from_source(value: impl Into<String>) -> Self {
        let value = value.into();
        match Url::parse(value.trim()) {
            Ok(url) if url.has_host() || url.scheme() == "file" => Self::Location(url),
            _ => Self::Inline(value),
        }
    }

    /// Stable key identifying this reference inside a provider.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Location(url) => url.as_str(),
            Self::Inline(document) => document,
        }
    }
}

impl fmt::Display for VocabularyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location(url) => f.write_str(url.as_str()),
            Self::Inline(document) => write!(f, "inline document ({} bytes)", document.len()),
        }
    }
}

/// Restricts term listings to a set of vocabulary names (namespace prefixes).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TermFilter {
    pub from_vocabulary: Vec<String>,
}

impl TermFilter {
    #[must_use]
    pub fn from_vocabulary<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            from_vocabulary: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `id` passes the filter. An empty filter admits every term.
    #[must_use]
    pub fn admits(&self, id: &TermId) -> bool {
        self.from_vocabulary.is_empty()
            || self
                .from_vocabulary
                .iter()
                .any(|name| name == id.vocabulary())
    }
}

/// Contract of the semantic-vocabulary data provider.
///
/// Only loading is asynchronous; once documents are added, every structural
/// query is answered from memory. Listings are returned in the order the
/// provider holds the terms and callers must not re-sort them.
#[async_trait]
pub trait VocabularyProvider: Send + Sync {
    /// Fetches (when needed) and parses the referenced documents, merging
    /// their terms into the provider.
    async fn add_vocabularies(&self, references: &[VocabularyReference]) -> Result<()>;

    /// Vocabulary names declared by the referenced document, mapped to their
    /// namespace IRI.
    fn vocabularies(&self, reference: &VocabularyReference) -> Result<BTreeMap<String, String>>;

    fn list_of_classes(&self, filter: &TermFilter) -> Result<Vec<TermId>>;

    fn list_of_properties(&self, filter: &TermFilter) -> Result<Vec<TermId>>;

    fn list_of_enumerations(&self, filter: &TermFilter) -> Result<Vec<TermId>>;

    fn list_of_enumeration_members(&self, filter: &TermFilter) -> Result<Vec<TermId>>;

    fn list_of_data_types(&self, filter: &TermFilter) -> Result<Vec<TermId>>;

    /// Kind of the term, without resolving its relations.
    fn term_kind(&self, id: &TermId) -> Result<TermKind>;

    /// Resolves a term with all of its kind-specific relations.
    ///
    /// Implementors must return [`crate::Error::NotFound`] for unknown ids and
    /// [`crate::Error::UnsupportedTermKind`] for terms of no known kind.
    fn term(&self, id: &TermId) -> Result<Term>;
}

/// Type alias simplifying provider trait object usage.
pub type ProviderHandle = dyn VocabularyProvider + 'static;

/// Creates a fresh, empty provider for every session load.
pub trait ProviderFactory: Send + Sync {
    fn create(&self) -> Arc<ProviderHandle>;
}

impl<F> ProviderFactory for F
where
    F: Fn() -> Arc<ProviderHandle> + Send + Sync,
{
    fn create(&self) -> Arc<ProviderHandle> {
        self()
    }
}

//! In-memory [`VocabularyProvider`] adapter.
//!
//! Documents are JSON-LD objects in the shape schema.org publishes, with a
//! prefix map under `@context` and term records under `@graph`:
//!
//! ```json
//! {
//!   "@context": { "ex": "https://example.org/vocab/" },
//!   "@graph": [
//!     { "@id": "ex:Car", "@type": "rdfs:Class", "rdfs:subClassOf": { "@id": "schema:Vehicle" } },
//!     { "@id": "ex:Colour", "@type": "rdfs:Class", "rdfs:subClassOf": { "@id": "schema:Enumeration" } },
//!     { "@id": "ex:Red", "@type": "ex:Colour", "rdfs:label": { "@language": "en", "@value": "Red" } }
//!   ]
//! }
//! ```
//!
//! References may be bare compact IRIs or `{"@id": ...}` objects. A class
//! below `schema:Enumeration` is an enumeration and a class below a data type
//! is a data type. A record typed with an enumeration is a member of that
//! enumeration. Anything else is reported as [`Error::UnsupportedTermKind`]
//! when resolved.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;
use serde::Deserialize;

use super::{
    entities::{
        ClassTerm, DataTypeTerm, EnumerationMemberTerm, EnumerationTerm, PropertyTerm, Term,
        TermHeader, TermKind,
    },
    provider::{
        ProviderFactory, ProviderHandle, TermFilter, VocabularyProvider, VocabularyReference,
    },
    value_objects::{Iri, TermId},
};
use crate::{errors::Missing, fetch::DocumentFetcher, Error, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

/// A node reference: a bare compact IRI or a `{"@id": ...}` object.
#[derive(Deserialize)]
#[serde(untagged)]
enum NodeRef {
    Id(String),
    Node {
        #[serde(rename = "@id")]
        id: String,
    },
}

impl NodeRef {
    fn into_id(self) -> String {
        match self {
            Self::Id(id) | Self::Node { id } => id,
        }
    }
}

/// A text value: a plain string or a `{"@value": ...}` object.
#[derive(Deserialize)]
#[serde(untagged)]
enum Literal {
    Plain(String),
    Value {
        #[serde(rename = "@value")]
        value: String,
        #[serde(rename = "@language", default)]
        language: Option<String>,
    },
}

impl Literal {
    fn is_english(&self) -> bool {
        match self {
            Self::Plain(_) | Self::Value { language: None, .. } => true,
            Self::Value {
                language: Some(language),
                ..
            } => language == "en" || language.starts_with("en-"),
        }
    }

    fn into_text(self) -> String {
        match self {
            Self::Plain(value) | Self::Value { value, .. } => value,
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(OneOrMany::<String>::deserialize(deserializer)?.into_vec())
}

fn one_or_many_ids<'de, D>(deserializer: D) -> std::result::Result<Vec<TermId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    OneOrMany::<NodeRef>::deserialize(deserializer)?
        .into_vec()
        .into_iter()
        .map(|node| TermId::new(node.into_id()).map_err(serde::de::Error::custom))
        .collect()
}

/// Picks the English (or untagged) text, falling back to the first value.
fn text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let mut values = OneOrMany::<Literal>::deserialize(deserializer)?.into_vec();
    let position = values.iter().position(Literal::is_english).unwrap_or(0);
    Ok((position < values.len()).then(|| values.swap_remove(position).into_text()))
}

/// Keeps the `prefix: namespace` entries of a context. Keywords, expanded
/// term definitions and remote contexts are skipped.
fn prefixes<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Context {
        Map(BTreeMap<String, serde_json::Value>),
        Other(serde_json::Value),
    }

    Ok(match Context::deserialize(deserializer)? {
        Context::Map(entries) => entries
            .into_iter()
            .filter(|(prefix, _)| !prefix.starts_with('@'))
            .filter_map(|(prefix, value)| match value {
                serde_json::Value::String(namespace) => Some((prefix, namespace)),
                _ => None,
            })
            .collect(),
        Context::Other(_) => BTreeMap::new(),
    })
}

/// A single term declaration inside a [`VocabularyDocument`].
#[derive(Clone, Debug, Deserialize)]
pub struct TermRecord {
    #[serde(rename = "@id")]
    pub id: TermId,
    #[serde(rename = "@type", default, deserialize_with = "one_or_many")]
    pub types: Vec<String>,
    #[serde(rename = "rdfs:label", default, deserialize_with = "text")]
    pub label: Option<String>,
    #[serde(rename = "rdfs:comment", default, deserialize_with = "text")]
    pub comment: Option<String>,
    #[serde(rename = "rdfs:subClassOf", default, deserialize_with = "one_or_many_ids")]
    pub sub_class_of: Vec<TermId>,
    #[serde(
        rename = "rdfs:subPropertyOf",
        default,
        deserialize_with = "one_or_many_ids"
    )]
    pub sub_property_of: Vec<TermId>,
    #[serde(
        rename = "schema:domainIncludes",
        default,
        deserialize_with = "one_or_many_ids"
    )]
    pub domain_includes: Vec<TermId>,
    #[serde(
        rename = "schema:rangeIncludes",
        default,
        deserialize_with = "one_or_many_ids"
    )]
    pub range_includes: Vec<TermId>,
}

/// A parsed vocabulary document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct VocabularyDocument {
    #[serde(rename = "@context", default, deserialize_with = "prefixes")]
    pub context: BTreeMap<String, String>,
    #[serde(rename = "@graph", default)]
    pub graph: Vec<TermRecord>,
}

impl VocabularyDocument {
    /// Parses a document from its JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| Error::parse("vocabulary document", err))
    }
}

/// Kind declared by the record's own `@type`, most specific tag first.
fn declared_kind(record: &TermRecord) -> Option<TermKind> {
    [
        TermKind::DataType,
        TermKind::Enumeration,
        TermKind::Property,
        TermKind::Class,
    ]
    .into_iter()
    .find(|kind| record.types.iter().any(|tag| tag == kind.tag()))
}

#[derive(Default)]
struct Graph {
    /// Added documents by reference key, in add order.
    documents: Vec<(String, BTreeMap<String, String>)>,
    namespaces: BTreeMap<String, String>,
    records: Vec<TermRecord>,
    index: HashMap<TermId, usize>,
    /// Kind of every record, by position. Recomputed after each merge since
    /// ancestors may come from another document.
    kinds: Vec<Option<TermKind>>,
}

impl Graph {
    fn contains_document(&self, key: &str) -> bool {
        self.documents.iter().any(|(known, _)| known == key)
    }

    fn merge(&mut self, key: String, document: VocabularyDocument) {
        for (prefix, namespace) in &document.context {
            self.namespaces
                .entry(prefix.clone())
                .or_insert_with(|| namespace.clone());
        }
        for record in document.graph {
            if let Some(position) = self.index.get(&record.id) {
                self.records[*position] = record;
            } else {
                self.index.insert(record.id.clone(), self.records.len());
                self.records.push(record);
            }
        }
        self.documents.push((key, document.context));
        self.kinds = self.records.iter().map(|record| self.classify(record)).collect();
    }

    fn record(&self, id: &TermId) -> Option<&TermRecord> {
        self.index.get(id).map(|position| &self.records[*position])
    }

    /// Kind of a type record. A class below `schema:Enumeration` is an
    /// enumeration, a class below a data type is a data type.
    fn type_kind(&self, record: &TermRecord) -> Option<TermKind> {
        let declared = declared_kind(record)?;
        if declared != TermKind::Class {
            return Some(declared);
        }
        let mut seen = HashSet::new();
        let mut pending: Vec<&TermId> = record.sub_class_of.iter().collect();
        while let Some(ancestor) = pending.pop() {
            if !seen.insert(ancestor) {
                continue;
            }
            if ancestor.as_str() == TermKind::Enumeration.tag() {
                return Some(TermKind::Enumeration);
            }
            if let Some(parent) = self.record(ancestor) {
                if declared_kind(parent) == Some(TermKind::DataType) {
                    return Some(TermKind::DataType);
                }
                pending.extend(&parent.sub_class_of);
            }
        }
        Some(TermKind::Class)
    }

    fn is_enumeration(&self, tag: &str) -> bool {
        TermId::new(tag)
            .ok()
            .and_then(|id| self.record(&id))
            .and_then(|record| self.type_kind(record))
            == Some(TermKind::Enumeration)
    }

    fn classify(&self, record: &TermRecord) -> Option<TermKind> {
        self.type_kind(record).or_else(|| {
            (!record.types.is_empty() && record.types.iter().all(|tag| self.is_enumeration(tag)))
                .then_some(TermKind::EnumerationMember)
        })
    }

    fn kind_of(&self, record: &TermRecord) -> Result<TermKind> {
        self.index
            .get(&record.id)
            .and_then(|position| self.kinds.get(*position).copied().flatten())
            .ok_or_else(|| Error::UnsupportedTermKind {
                term: record.id.to_string(),
                kind: record.types.join(", "),
            })
    }

    fn iri_of(&self, id: &TermId) -> Result<Iri> {
        match self.namespaces.get(id.vocabulary()) {
            Some(namespace) => Ok(Iri::new(format!("{namespace}{}", id.local_name()))?),
            None => Ok(Iri::new(id.as_str())?),
        }
    }

    fn list(&self, kind: TermKind, filter: &TermFilter) -> Vec<TermId> {
        self.records
            .iter()
            .filter(|record| filter.admits(&record.id))
            .filter(|record| matches!(self.kind_of(record), Ok(found) if found == kind))
            .map(|record| record.id.clone())
            .collect()
    }

    /// Ids of records matching `predicate`, in declaration order.
    fn referencing(&self, predicate: impl Fn(&TermRecord) -> bool) -> Vec<TermId> {
        self.records
            .iter()
            .filter(|record| predicate(record))
            .map(|record| record.id.clone())
            .collect()
    }

    fn resolve(&self, id: &TermId) -> Result<Term> {
        let record = self
            .record(id)
            .ok_or_else(|| Error::term_not_found(id.as_str()))?;
        let kind = self.kind_of(record)?;

        let mut header = TermHeader::new(record.id.clone(), self.iri_of(&record.id)?);
        if let Some(label) = &record.label {
            header = header.with_label(label.as_str());
        }
        if let Some(comment) = &record.comment {
            header = header.with_description(comment.as_str());
        }

        let is_property = |candidate: &TermRecord| {
            matches!(self.kind_of(candidate), Ok(TermKind::Property))
        };
        let properties = self
            .referencing(|candidate| is_property(candidate) && candidate.domain_includes.contains(id));
        let range_of = self
            .referencing(|candidate| is_property(candidate) && candidate.range_includes.contains(id));
        let sub_types = self.referencing(|candidate| {
            !is_property(candidate) && candidate.sub_class_of.contains(id)
        });

        Ok(match kind {
            TermKind::Class => Term::Class(ClassTerm {
                header,
                super_classes: record.sub_class_of.clone(),
                sub_classes: sub_types,
                properties,
                range_of,
            }),
            TermKind::Enumeration => Term::Enumeration(EnumerationTerm {
                header,
                super_classes: record.sub_class_of.clone(),
                sub_classes: sub_types,
                properties,
                members: self.referencing(|candidate| {
                    candidate.types.iter().any(|tag| tag == id.as_str())
                }),
                range_of,
            }),
            TermKind::Property => Term::Property(PropertyTerm {
                header,
                super_properties: record.sub_property_of.clone(),
                sub_properties: self
                    .referencing(|candidate| candidate.sub_property_of.contains(id)),
                domains: record.domain_includes.clone(),
                ranges: record.range_includes.clone(),
            }),
            TermKind::EnumerationMember => Term::EnumerationMember(EnumerationMemberTerm {
                header,
                domain_enumerations: record
                    .types
                    .iter()
                    .filter_map(|tag| TermId::new(tag.as_str()).ok())
                    .collect(),
            }),
            TermKind::DataType => Term::DataType(DataTypeTerm {
                header,
                super_data_types: record.sub_class_of.clone(),
                sub_data_types: sub_types,
                range_of,
            }),
        })
    }
}

/// Provider keeping every merged document in memory.
pub struct InMemoryVocabularyProvider {
    fetcher: Arc<dyn DocumentFetcher>,
    graph: RwLock<Graph>,
}

impl InMemoryVocabularyProvider {
    /// Creates an empty provider resolving document locations through `fetcher`.
    pub fn new(fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self {
            fetcher,
            graph: RwLock::new(Graph::default()),
        }
    }

    /// Factory handing out a fresh, empty provider per session load. All
    /// providers share `fetcher`.
    pub fn factory(fetcher: Arc<dyn DocumentFetcher>) -> impl ProviderFactory {
        move || -> Arc<ProviderHandle> { Arc::new(Self::new(Arc::clone(&fetcher))) }
    }

    fn read(&self) -> RwLockReadGuard<'_, Graph> {
        self.graph.read().expect("in-memory vocabulary graph poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Graph> {
        self.graph
            .write()
            .expect("in-memory vocabulary graph poisoned")
    }
}

#[async_trait]
impl VocabularyProvider for InMemoryVocabularyProvider {
    async fn add_vocabularies(&self, references: &[VocabularyReference]) -> Result<()> {
        for reference in references {
            if self.read().contains_document(reference.key()) {
                continue;
            }
            let text = match reference {
                VocabularyReference::Location(url) => self.fetcher.fetch(url).await?,
                VocabularyReference::Inline(document) => document.clone(),
            };
            let document = VocabularyDocument::parse(&text)?;
            tracing::debug!(
                source = %reference,
                terms = document.graph.len(),
                "vocabulary_document_added"
            );
            self.write().merge(reference.key().to_string(), document);
        }
        Ok(())
    }

    fn vocabularies(&self, reference: &VocabularyReference) -> Result<BTreeMap<String, String>> {
        self.read()
            .documents
            .iter()
            .find(|(key, _)| key == reference.key())
            .map(|(_, context)| context.clone())
            .ok_or_else(|| Error::NotFound(Missing::Vocabulary(reference.to_string())))
    }

    fn list_of_classes(&self, filter: &TermFilter) -> Result<Vec<TermId>> {
        Ok(self.read().list(TermKind::Class, filter))
    }

    fn list_of_properties(&self, filter: &TermFilter) -> Result<Vec<TermId>> {
        Ok(self.read().list(TermKind::Property, filter))
    }

    fn list_of_enumerations(&self, filter: &TermFilter) -> Result<Vec<TermId>> {
        Ok(self.read().list(TermKind::Enumeration, filter))
    }

    fn list_of_enumeration_members(&self, filter: &TermFilter) -> Result<Vec<TermId>> {
        Ok(self.read().list(TermKind::EnumerationMember, filter))
    }

    fn list_of_data_types(&self, filter: &TermFilter) -> Result<Vec<TermId>> {
        Ok(self.read().list(TermKind::DataType, filter))
    }

    fn term_kind(&self, id: &TermId) -> Result<TermKind> {
        let graph = self.read();
        let record = graph
            .record(id)
            .ok_or_else(|| Error::term_not_found(id.as_str()))?;
        graph.kind_of(record)
    }

    fn term(&self, id: &TermId) -> Result<Term> {
        self.read().resolve(id)
    }
}

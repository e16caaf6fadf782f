//! Vocabulary session lifecycle.
//!
//! A session is the loaded state of one vocabulary: which vocabulary names it
//! declares and the five term partitions listed on the overview page. It is
//! built in one go by [`load_session`] and never changes afterwards; moving to
//! another vocabulary builds a new session.

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use crate::{
    config::BaselineSettings,
    vocabulary::{
        ProviderHandle, Term, TermFilter, TermId, TermKind, VocabularyReference,
    },
    Result,
};

/// Which construction input a session was loaded for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionOrigin {
    /// The vocabulary given to a single-vocabulary browser.
    Single,
    /// The 1-based entry of the vocabulary list.
    ListIndex(usize),
}

impl SessionOrigin {
    #[must_use]
    pub fn list_index(self) -> Option<usize> {
        match self {
            Self::Single => None,
            Self::ListIndex(index) => Some(index),
        }
    }
}

/// Loaded state of the vocabulary currently being browsed.
pub struct VocabularySession {
    origin: SessionOrigin,
    provider: Arc<ProviderHandle>,
    namespaces: BTreeMap<String, String>,
    vocabulary_names: BTreeSet<String>,
    classes: Vec<TermId>,
    properties: Vec<TermId>,
    enumerations: Vec<TermId>,
    enumeration_members: Vec<TermId>,
    data_types: Vec<TermId>,
}

impl std::fmt::Debug for VocabularySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VocabularySession")
            .field("origin", &self.origin)
            .field("vocabulary_names", &self.vocabulary_names)
            .field("classes", &self.classes.len())
            .field("properties", &self.properties.len())
            .field("enumerations", &self.enumerations.len())
            .field("enumeration_members", &self.enumeration_members.len())
            .field("data_types", &self.data_types.len())
            .finish_non_exhaustive()
    }
}

impl VocabularySession {
    #[must_use]
    pub fn origin(&self) -> SessionOrigin {
        self.origin
    }

    /// Vocabulary names (namespace prefixes) with their namespace IRIs,
    /// baseline excluded.
    #[must_use]
    pub fn namespaces(&self) -> &BTreeMap<String, String> {
        &self.namespaces
    }

    #[must_use]
    pub fn vocabulary_names(&self) -> &BTreeSet<String> {
        &self.vocabulary_names
    }

    #[must_use]
    pub fn classes(&self) -> &[TermId] {
        &self.classes
    }

    #[must_use]
    pub fn properties(&self) -> &[TermId] {
        &self.properties
    }

    #[must_use]
    pub fn enumerations(&self) -> &[TermId] {
        &self.enumerations
    }

    #[must_use]
    pub fn enumeration_members(&self) -> &[TermId] {
        &self.enumeration_members
    }

    #[must_use]
    pub fn data_types(&self) -> &[TermId] {
        &self.data_types
    }

    /// Partition holding terms of `kind`.
    #[must_use]
    pub fn partition(&self, kind: TermKind) -> &[TermId] {
        match kind {
            TermKind::Class => &self.classes,
            TermKind::Property => &self.properties,
            TermKind::Enumeration => &self.enumerations,
            TermKind::EnumerationMember => &self.enumeration_members,
            TermKind::DataType => &self.data_types,
        }
    }

    /// Whether `id` belongs to the loaded vocabulary rather than to the
    /// baseline or some other namespace.
    #[must_use]
    pub fn is_own_term(&self, id: &TermId) -> bool {
        TermKind::ALL
            .into_iter()
            .any(|kind| self.partition(kind).contains(id))
    }

    /// Resolves any term known to the session's provider, baseline included.
    pub fn term(&self, id: &TermId) -> Result<Term> {
        self.provider.term(id)
    }

    #[must_use]
    pub fn provider(&self) -> &Arc<ProviderHandle> {
        &self.provider
    }
}

/// Loads `reference` together with the baseline vocabulary and partitions
/// the terms declared in the vocabulary's own namespaces.
///
/// `provider` must be fresh: every session owns the provider it was loaded
/// with.
pub async fn load_session(
    provider: Arc<ProviderHandle>,
    baseline: &BaselineSettings,
    reference: &VocabularyReference,
    origin: SessionOrigin,
) -> Result<VocabularySession> {
    tracing::info!(source = %reference, ?origin, "session_loading");

    let baseline_reference = VocabularyReference::from_source(baseline.location.clone());
    provider
        .add_vocabularies(&[baseline_reference, reference.clone()])
        .await?;

    let mut namespaces = provider.vocabularies(reference)?;
    namespaces.remove(&baseline.prefix);
    let vocabulary_names: BTreeSet<String> = namespaces.keys().cloned().collect();

    let filter = TermFilter::from_vocabulary(vocabulary_names.iter().cloned());
    let session = VocabularySession {
        origin,
        namespaces,
        classes: provider.list_of_classes(&filter)?,
        properties: provider.list_of_properties(&filter)?,
        enumerations: provider.list_of_enumerations(&filter)?,
        enumeration_members: provider.list_of_enumeration_members(&filter)?,
        data_types: provider.list_of_data_types(&filter)?,
        vocabulary_names,
        provider,
    };

    tracing::info!(
        vocabularies = ?session.vocabulary_names,
        classes = session.classes.len(),
        properties = session.properties.len(),
        enumerations = session.enumerations.len(),
        enumeration_members = session.enumeration_members.len(),
        data_types = session.data_types.len(),
        "session_loaded"
    );
    Ok(session)
}

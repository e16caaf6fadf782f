//! Vocabulary domain primitives and the data provider contract.
//!
//! The provider itself is an external collaborator: the browser only depends
//! on [`VocabularyProvider`]. [`InMemoryVocabularyProvider`] is the adapter
//! used for headless rendering and tests.

pub mod entities;
pub mod in_memory;
pub mod provider;
pub mod value_objects;

pub use entities::{
    ClassTerm, DataTypeTerm, EnumerationMemberTerm, EnumerationTerm, PropertyTerm, Term,
    TermHeader, TermKind,
};
pub use in_memory::{InMemoryVocabularyProvider, TermRecord, VocabularyDocument};
pub use provider::{
    ProviderFactory, ProviderHandle, TermFilter, VocabularyProvider, VocabularyReference,
};
pub use value_objects::{Iri, IriError, TermId, TermIdError};

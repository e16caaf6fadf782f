//! Crate-wide error type.
//!
//! Errors fall into two groups. `FetchFailure` and `ParseFailure` are
//! propagated to whoever drives the component. `NotFound` and
//! `UnsupportedTermKind` halt the current render cycle and leave the
//! previously rendered view in place.

use crate::vocabulary::value_objects::{IriError, TermIdError};

/// Describes what a [`Error::NotFound`] could not locate.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Missing {
    /// The `voc` query parameter does not address an entry of the list.
    #[error("vocabulary index `{index}` (list has {available} entries)")]
    VocabularyIndex { index: String, available: usize },
    /// The `term` query parameter names a term the provider does not know.
    #[error("term `{0}`")]
    Term(String),
    /// A vocabulary reference was never added to the provider.
    #[error("vocabulary `{0}`")]
    Vocabulary(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to fetch `{location}`: {reason}")]
    FetchFailure { location: String, reason: String },

    #[error("failed to parse {what}: {reason}")]
    ParseFailure { what: String, reason: String },

    #[error("not found: {0}")]
    NotFound(Missing),

    #[error("term `{term}` has unsupported kind `{kind}`")]
    UnsupportedTermKind { term: String, kind: String },

    #[error(transparent)]
    InvalidTermId(#[from] TermIdError),

    #[error(transparent)]
    Iri(#[from] IriError),

    #[error(transparent)]
    Template(#[from] tera::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("{0}")]
    Message(String),
}

impl Error {
    pub fn fetch(location: impl Into<String>, reason: impl ToString) -> Self {
        Self::FetchFailure {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(what: impl Into<String>, reason: impl ToString) -> Self {
        Self::ParseFailure {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn term_not_found(term: impl Into<String>) -> Self {
        Self::NotFound(Missing::Term(term.into()))
    }

    /// Whether the error belongs to the class that halts a render cycle while
    /// the prior view stays displayed.
    #[must_use]
    pub fn halts_render_cycle(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::UnsupportedTermKind { .. })
    }
}

use std::{fmt, num::NonZeroUsize};

use serde::Serialize;
use url::form_urlencoded;

use crate::vocabulary::TermId;

pub const VOC_PARAM: &str = "voc";
pub const TERM_PARAM: &str = "term";

/// Value of the `voc` query parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum VocSelector {
    /// A valid 1-based list index.
    Index(NonZeroUsize),
    /// Present but not a positive integer. It never matches a loaded session.
    Malformed(String),
}

impl VocSelector {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        value
            .trim()
            .parse::<NonZeroUsize>()
            .map_or_else(|_| Self::Malformed(value.to_string()), Self::Index)
    }

    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(index.get()),
            Self::Malformed(_) => None,
        }
    }
}

impl fmt::Display for VocSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Malformed(value) => f.write_str(value),
        }
    }
}

/// Something a rendered link navigates to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum LinkTarget {
    /// Show a term of the loaded vocabulary.
    Term(TermId),
    /// Open the 1-based entry of the vocabulary list.
    Vocabulary(NonZeroUsize),
}

/// The navigation-relevant view of a page URL's query string.
///
/// Parameters other than `voc` and `term` are carried along untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationQuery {
    voc: Option<VocSelector>,
    term: Option<String>,
    others: Vec<(String, String)>,
}

impl NavigationQuery {
    /// Parses a query string, with or without the leading `?`. Empty values
    /// count as absent.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                VOC_PARAM if !value.is_empty() => parsed.voc = Some(VocSelector::parse(&value)),
                TERM_PARAM if !value.is_empty() => parsed.term = Some(value.into_owned()),
                VOC_PARAM | TERM_PARAM => {}
                _ => parsed.others.push((key.to_string(), value.into_owned())),
            }
        }
        parsed
    }

    #[must_use]
    pub fn voc(&self) -> Option<&VocSelector> {
        self.voc.as_ref()
    }

    #[must_use]
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    #[must_use]
    pub fn with_voc(mut self, index: NonZeroUsize) -> Self {
        self.voc = Some(VocSelector::Index(index));
        self
    }

    #[must_use]
    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    #[must_use]
    pub fn without_term(mut self) -> Self {
        self.term = None;
        self
    }

    /// Query reached by activating `target` from this query. Selecting a term
    /// keeps the current vocabulary; selecting a vocabulary drops the term.
    #[must_use]
    pub fn follow(&self, target: &LinkTarget) -> Self {
        match target {
            LinkTarget::Term(term) => self.clone().with_term(term.as_str()),
            LinkTarget::Vocabulary(index) => self.clone().without_term().with_voc(*index),
        }
    }

    /// Serialises back to a query string without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(voc) = &self.voc {
            serializer.append_pair(VOC_PARAM, &voc.to_string());
        }
        if let Some(term) = &self.term {
            serializer.append_pair(TERM_PARAM, term);
        }
        for (key, value) in &self.others {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl fmt::Display for NavigationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

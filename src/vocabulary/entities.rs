use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use super::value_objects::{Iri, TermId};

/// The five kinds of vocabulary terms the browser knows how to display.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TermKind {
    Class,
    Property,
    Enumeration,
    EnumerationMember,
    DataType,
}

impl TermKind {
    pub const ALL: [Self; 5] = [
        Self::Class,
        Self::Property,
        Self::Enumeration,
        Self::EnumerationMember,
        Self::DataType,
    ];

    /// The `@type` tag used for the kind in vocabulary documents.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Class => "rdfs:Class",
            Self::Property => "rdf:Property",
            Self::Enumeration => "schema:Enumeration",
            Self::EnumerationMember => "soa:EnumerationMember",
            Self::DataType => "schema:DataType",
        }
    }

    /// Maps a document tag back to a kind. Unknown tags yield `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Property => "Property",
            Self::Enumeration => "Enumeration",
            Self::EnumerationMember => "Enumeration Member",
            Self::DataType => "Data Type",
        }
    }

    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Class => "Classes",
            Self::Property => "Properties",
            Self::Enumeration => "Enumerations",
            Self::EnumerationMember => "Enumeration Members",
            Self::DataType => "Data Types",
        }
    }

    /// Renders `count` with the singular or plural label, e.g. `1 Class`, `3 Classes`.
    #[must_use]
    pub fn count_label(self, count: usize) -> String {
        let label = if count == 1 {
            self.singular()
        } else {
            self.plural()
        };
        format!("{count} {label}")
    }
}

impl Display for TermKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Attributes shared by every term kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermHeader {
    pub id: TermId,
    pub iri: Iri,
    pub label: Option<String>,
    pub description: Option<String>,
}

impl TermHeader {
    #[must_use]
    pub fn new(id: TermId, iri: Iri) -> Self {
        Self {
            id,
            iri,
            label: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassTerm {
    pub header: TermHeader,
    pub super_classes: Vec<TermId>,
    pub sub_classes: Vec<TermId>,
    /// Properties whose domain includes this class.
    pub properties: Vec<TermId>,
    /// Properties whose range includes this class.
    pub range_of: Vec<TermId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyTerm {
    pub header: TermHeader,
    pub super_properties: Vec<TermId>,
    pub sub_properties: Vec<TermId>,
    pub domains: Vec<TermId>,
    pub ranges: Vec<TermId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumerationTerm {
    pub header: TermHeader,
    pub super_classes: Vec<TermId>,
    pub sub_classes: Vec<TermId>,
    pub properties: Vec<TermId>,
    pub members: Vec<TermId>,
    pub range_of: Vec<TermId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumerationMemberTerm {
    pub header: TermHeader,
    /// Enumerations this member is a value of.
    pub domain_enumerations: Vec<TermId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataTypeTerm {
    pub header: TermHeader,
    pub super_data_types: Vec<TermId>,
    pub sub_data_types: Vec<TermId>,
    pub range_of: Vec<TermId>,
}

/// A resolved vocabulary term. Each variant only carries the relations that
/// make sense for its kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    Class(ClassTerm),
    Property(PropertyTerm),
    Enumeration(EnumerationTerm),
    EnumerationMember(EnumerationMemberTerm),
    DataType(DataTypeTerm),
}

impl Term {
    #[must_use]
    pub fn header(&self) -> &TermHeader {
        match self {
            Self::Class(term) => &term.header,
            Self::Property(term) => &term.header,
            Self::Enumeration(term) => &term.header,
            Self::EnumerationMember(term) => &term.header,
            Self::DataType(term) => &term.header,
        }
    }

    #[must_use]
    pub fn id(&self) -> &TermId {
        &self.header().id
    }

    #[must_use]
    pub fn iri(&self) -> &Iri {
        &self.header().iri
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.header().label.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.header().description.as_deref()
    }

    #[must_use]
    pub fn kind(&self) -> TermKind {
        match self {
            Self::Class(_) => TermKind::Class,
            Self::Property(_) => TermKind::Property,
            Self::Enumeration(_) => TermKind::Enumeration,
            Self::EnumerationMember(_) => TermKind::EnumerationMember,
            Self::DataType(_) => TermKind::DataType,
        }
    }

    /// Direct super-types along the relation that breadcrumbs follow for this kind.
    #[must_use]
    pub fn direct_ancestors(&self) -> &[TermId] {
        match self {
            Self::Class(term) => &term.super_classes,
            Self::Enumeration(term) => &term.super_classes,
            Self::Property(term) => &term.super_properties,
            Self::DataType(term) => &term.super_data_types,
            Self::EnumerationMember(term) => &term.domain_enumerations,
        }
    }

    /// RDF property relating this term to its direct ancestors.
    #[must_use]
    pub fn ancestor_property(&self) -> &'static str {
        match self {
            Self::Class(_) | Self::Enumeration(_) | Self::DataType(_) => "rdfs:subClassOf",
            Self::Property(_) => "rdfs:subPropertyOf",
            Self::EnumerationMember(_) => "rdf:type",
        }
    }
}

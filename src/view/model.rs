//! Serialisable view model handed to the templates.

use serde::Serialize;

use crate::navigation::ActiveView;

/// A rendered reference to a term.
///
/// Terms of the loaded vocabulary navigate inside the component (`href` is a
/// query string); all other terms link out to their IRI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TermRef {
    pub id: String,
    pub href: String,
    pub internal: bool,
}

/// One step of a breadcrumb.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BreadcrumbStep {
    pub term: TermRef,
    /// Relation linking the queried term to this step. Only the direct
    /// super-type carries it.
    pub relation: Option<&'static str>,
}

/// One super-type chain, rendered root first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub ancestors: Vec<BreadcrumbStep>,
    pub term: TermRef,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListRow {
    /// 1-based position, the `voc` value selecting this entry.
    pub index: usize,
    pub label: String,
    pub href: String,
    pub location: String,
    pub author: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub name: String,
    pub rows: Vec<ListRow>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TermRow {
    pub term: TermRef,
    pub kind_tag: &'static str,
    pub description: Option<String>,
}

/// Table of one non-empty partition on the vocabulary overview.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VocabularySection {
    pub singular: &'static str,
    pub plural: &'static str,
    pub rows: Vec<TermRow>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VocabularyView {
    /// `prefix:namespace`, one per vocabulary name.
    pub headings: Vec<String>,
    /// Pluralised counts of the non-empty partitions, e.g. `2 Classes`.
    pub content: Vec<String>,
    pub sections: Vec<VocabularySection>,
}

/// A property together with the types it relates to in the current table:
/// its ranges in a property table, its domains in an incoming-reference
/// table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PropertyRow {
    pub property: TermRef,
    pub types: Vec<TermRef>,
    pub description: Option<String>,
}

/// "Properties from X" block of a class page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PropertyGroup {
    pub source: TermRef,
    pub rows: Vec<PropertyRow>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TermDetails {
    Class {
        property_groups: Vec<PropertyGroup>,
        range_of: Vec<PropertyRow>,
    },
    Enumeration {
        property_groups: Vec<PropertyGroup>,
        members: Vec<TermRow>,
        range_of: Vec<PropertyRow>,
    },
    Property {
        ranges: Vec<TermRef>,
        domains: Vec<TermRef>,
        super_properties: Vec<TermRef>,
        sub_properties: Vec<TermRef>,
    },
    EnumerationMember {
        enumerations: Vec<TermRef>,
    },
    DataType {
        range_of: Vec<PropertyRow>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TermView {
    pub id: String,
    /// The term's `rdfs:label`, or its id when it has none.
    pub title: String,
    pub iri: String,
    pub kind_tag: &'static str,
    pub kind_label: &'static str,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub description: Option<String>,
    pub details: TermDetails,
}

/// The composed content of one view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum ViewFragment {
    List(ListView),
    Vocabulary(VocabularyView),
    Term(TermView),
}

impl ViewFragment {
    #[must_use]
    pub fn active_view(&self) -> ActiveView {
        match self {
            Self::List(_) => ActiveView::List,
            Self::Vocabulary(_) => ActiveView::Vocabulary,
            Self::Term(_) => ActiveView::Term,
        }
    }
}

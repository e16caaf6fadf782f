//! Builds the view model of the active view from loaded state.
//!
//! Composition is pure: it reads the navigation query, the list document and
//! the session, and never fetches. Whether a term reference navigates inside
//! the component is decided in one place, [`Linker::term_ref`], through
//! [`VocabularySession::is_own_term`].

use std::num::NonZeroUsize;

use super::model::{
    Breadcrumb, BreadcrumbStep, ListRow, ListView, PropertyGroup, PropertyRow, TermDetails,
    TermRef, TermRow, TermView, ViewFragment, VocabularySection, VocabularyView,
};
use crate::{
    hierarchy::{self, TypeChainSet},
    list::VocabularyListDocument,
    navigation::{ActiveView, LinkTarget, NavigationQuery},
    session::VocabularySession,
    vocabulary::{Term, TermId, TermKind},
    Error, Result,
};

/// Loaded state a view is composed from.
#[derive(Clone, Copy)]
pub struct ViewData<'a> {
    pub query: &'a NavigationQuery,
    pub list: Option<&'a VocabularyListDocument>,
    pub session: Option<&'a VocabularySession>,
}

/// Composes `view` from `data`.
///
/// # Errors
///
/// [`Error::NotFound`] when the requested term is unknown (or not a valid
/// term id), [`Error::UnsupportedTermKind`] when it has no displayable kind.
pub fn compose(view: ActiveView, data: &ViewData<'_>) -> Result<ViewFragment> {
    match view {
        ActiveView::List => {
            let list = data
                .list
                .ok_or_else(|| Error::Message("list view composed without a list".to_string()))?;
            Ok(ViewFragment::List(compose_list(data.query, list)))
        }
        ActiveView::Vocabulary => {
            let linker = Linker::new(data)?;
            Ok(ViewFragment::Vocabulary(compose_vocabulary(&linker)?))
        }
        ActiveView::Term => {
            let linker = Linker::new(data)?;
            let requested = data
                .query
                .term()
                .ok_or_else(|| Error::Message("term view composed without a term".to_string()))?;
            Ok(ViewFragment::Term(compose_term(&linker, requested)?))
        }
    }
}

struct Linker<'a> {
    query: &'a NavigationQuery,
    session: &'a VocabularySession,
}

impl<'a> Linker<'a> {
    fn new(data: &ViewData<'a>) -> Result<Self> {
        let session = data
            .session
            .ok_or_else(|| Error::Message("view composed without a session".to_string()))?;
        Ok(Self {
            query: data.query,
            session,
        })
    }

    fn term(&self, id: &TermId) -> Result<Term> {
        self.session.term(id)
    }

    fn term_ref(&self, id: &TermId) -> TermRef {
        if self.session.is_own_term(id) {
            let next = self.query.follow(&LinkTarget::Term(id.clone()));
            return TermRef {
                id: id.to_string(),
                href: format!("?{next}"),
                internal: true,
            };
        }
        // Terms the provider cannot resolve link to their compact id.
        let href = self
            .term(id)
            .map_or_else(|_| id.to_string(), |term| term.iri().to_string());
        TermRef {
            id: id.to_string(),
            href,
            internal: false,
        }
    }

    fn term_refs(&self, ids: &[TermId]) -> Vec<TermRef> {
        ids.iter().map(|id| self.term_ref(id)).collect()
    }

    fn term_row(&self, id: &TermId) -> Result<TermRow> {
        let term = self.term(id)?;
        Ok(TermRow {
            term: self.term_ref(id),
            kind_tag: term.kind().tag(),
            description: term.description().map(str::to_owned),
        })
    }

    fn term_rows(&self, ids: &[TermId]) -> Result<Vec<TermRow>> {
        ids.iter().map(|id| self.term_row(id)).collect()
    }

    fn property_rows(&self, ids: &[TermId], side: PropertySide) -> Result<Vec<PropertyRow>> {
        ids.iter()
            .map(|id| {
                let property = self.term(id)?;
                let types = match (&property, side) {
                    (Term::Property(property), PropertySide::Ranges) => property.ranges.as_slice(),
                    (Term::Property(property), PropertySide::Domains) => {
                        property.domains.as_slice()
                    }
                    _ => &[],
                };
                Ok(PropertyRow {
                    property: self.term_ref(id),
                    types: self.term_refs(types),
                    description: property.description().map(str::to_owned),
                })
            })
            .collect()
    }
}

#[derive(Copy, Clone)]
enum PropertySide {
    Ranges,
    Domains,
}

fn compose_list(query: &NavigationQuery, list: &VocabularyListDocument) -> ListView {
    let rows = list
        .parts
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let index = NonZeroUsize::MIN.saturating_add(position);
            let next = query.follow(&LinkTarget::Vocabulary(index));
            ListRow {
                index: index.get(),
                label: entry.name.clone().unwrap_or_else(|| entry.location.clone()),
                href: format!("?{next}"),
                location: entry.location.clone(),
                author: entry.author.clone(),
                description: entry.description.clone(),
            }
        })
        .collect();
    ListView {
        name: list.name.clone(),
        rows,
    }
}

fn compose_vocabulary(linker: &Linker<'_>) -> Result<VocabularyView> {
    let session = linker.session;
    let headings = session
        .namespaces()
        .iter()
        .map(|(prefix, namespace)| format!("{prefix}:{namespace}"))
        .collect();

    let mut content = Vec::new();
    let mut sections = Vec::new();
    for kind in TermKind::ALL {
        let partition = session.partition(kind);
        if partition.is_empty() {
            continue;
        }
        content.push(kind.count_label(partition.len()));
        sections.push(VocabularySection {
            singular: kind.singular(),
            plural: kind.plural(),
            rows: linker.term_rows(partition)?,
        });
    }

    Ok(VocabularyView {
        headings,
        content,
        sections,
    })
}

fn compose_term(linker: &Linker<'_>, requested: &str) -> Result<TermView> {
    let id = TermId::new(requested).map_err(|_| Error::term_not_found(requested))?;
    let term = linker.term(&id)?;
    let chains = hierarchy::term_chains(&term, |ancestor| linker.term(ancestor))?;

    let details = match &term {
        Term::Class(class) => TermDetails::Class {
            property_groups: property_groups(linker, &term, &chains)?,
            range_of: linker.property_rows(&class.range_of, PropertySide::Domains)?,
        },
        Term::Enumeration(enumeration) => TermDetails::Enumeration {
            property_groups: property_groups(linker, &term, &chains)?,
            members: linker.term_rows(&enumeration.members)?,
            range_of: linker.property_rows(&enumeration.range_of, PropertySide::Domains)?,
        },
        Term::Property(property) => TermDetails::Property {
            ranges: linker.term_refs(&property.ranges),
            domains: linker.term_refs(&property.domains),
            super_properties: linker.term_refs(&property.super_properties),
            sub_properties: linker.term_refs(&property.sub_properties),
        },
        Term::EnumerationMember(member) => TermDetails::EnumerationMember {
            enumerations: linker.term_refs(&member.domain_enumerations),
        },
        Term::DataType(data_type) => TermDetails::DataType {
            range_of: linker.property_rows(&data_type.range_of, PropertySide::Domains)?,
        },
    };

    Ok(TermView {
        id: id.to_string(),
        title: term.label().unwrap_or(id.as_str()).to_string(),
        iri: term.iri().to_string(),
        kind_tag: term.kind().tag(),
        kind_label: term.kind().singular(),
        breadcrumbs: breadcrumbs(linker, &term, &chains),
        description: term.description().map(str::to_owned),
        details,
    })
}

fn breadcrumbs(linker: &Linker<'_>, term: &Term, chains: &TypeChainSet) -> Vec<Breadcrumb> {
    chains
        .iter()
        .map(|chain| {
            let ancestors = chain.as_slice().split_last().map_or(&[][..], |(_, rest)| rest);
            let direct = ancestors.len().checked_sub(1);
            Breadcrumb {
                ancestors: ancestors
                    .iter()
                    .enumerate()
                    .map(|(position, ancestor)| BreadcrumbStep {
                        term: linker.term_ref(ancestor),
                        relation: (Some(position) == direct).then(|| term.ancestor_property()),
                    })
                    .collect(),
                term: linker.term_ref(term.id()),
            }
        })
        .collect()
}

/// "Properties from X" blocks for the term and its ancestors, nearest first.
/// Ancestors without properties, or unknown to the provider, are skipped.
fn property_groups(
    linker: &Linker<'_>,
    term: &Term,
    chains: &TypeChainSet,
) -> Result<Vec<PropertyGroup>> {
    let mut groups = Vec::new();
    for source in chains.nearest_first() {
        let resolved;
        let source_term = if source == term.id() {
            term
        } else {
            match linker.term(source) {
                Ok(found) => {
                    resolved = found;
                    &resolved
                }
                Err(Error::NotFound(_)) => continue,
                Err(err) => return Err(err),
            }
        };
        let properties = match source_term {
            Term::Class(class) => class.properties.as_slice(),
            Term::Enumeration(enumeration) => enumeration.properties.as_slice(),
            _ => &[],
        };
        if properties.is_empty() {
            continue;
        }
        groups.push(PropertyGroup {
            source: linker.term_ref(source),
            rows: linker.property_rows(properties, PropertySide::Ranges)?,
        });
    }
    Ok(groups)
}

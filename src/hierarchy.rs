//! Super-type chains of a term in a multiple-inheritance hierarchy.
//!
//! Every chain runs from a root (a term without ancestors) down to the queried
//! term. A term with several direct ancestors yields the chains of the first
//! ancestor, then those of the second, and so on.

use serde::Serialize;

use crate::{
    vocabulary::{Term, TermId},
    Error, Result,
};

/// One ancestor path, most general term first and the queried term last.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TypeChain(Vec<TermId>);

impl TypeChain {
    #[must_use]
    pub fn as_slice(&self) -> &[TermId] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The term this chain ends in.
    #[must_use]
    pub fn last(&self) -> Option<&TermId> {
        self.0.last()
    }

    /// The direct super-type of the chain's term, if the chain has one.
    #[must_use]
    pub fn direct_ancestor(&self) -> Option<&TermId> {
        self.0.len().checked_sub(2).map(|position| &self.0[position])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TermId> {
        self.0.iter()
    }
}

impl From<Vec<TermId>> for TypeChain {
    fn from(ids: Vec<TermId>) -> Self {
        Self(ids)
    }
}

impl<'a> IntoIterator for &'a TypeChain {
    type Item = &'a TermId;
    type IntoIter = std::slice::Iter<'a, TermId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Ordered collection of chains, one per distinct ancestor path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeChainSet(Vec<TypeChain>);

impl TypeChainSet {
    #[must_use]
    pub fn chains(&self) -> &[TypeChain] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TypeChain> {
        self.0.iter()
    }

    /// Every term of the chains, walking each chain from the queried term
    /// upwards. Terms reached through several chains appear once, at their
    /// first occurrence.
    #[must_use]
    pub fn nearest_first(&self) -> Vec<&TermId> {
        let mut seen = Vec::new();
        for id in self.0.iter().flat_map(|chain| chain.0.iter().rev()) {
            if !seen.contains(&id) {
                seen.push(id);
            }
        }
        seen
    }
}

impl<'a> IntoIterator for &'a TypeChainSet {
    type Item = &'a TypeChain;
    type IntoIter = std::slice::Iter<'a, TypeChain>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Enumerates every ancestor chain ending in `term`.
///
/// `ancestors` returns the direct super-types of a term in the provider's
/// order. The relation must be acyclic.
pub fn enumerate_paths<F>(term: &TermId, mut ancestors: F) -> Result<TypeChainSet>
where
    F: FnMut(&TermId) -> Result<Vec<TermId>>,
{
    Ok(TypeChainSet(chains_of(term, &mut ancestors)?))
}

fn chains_of<F>(term: &TermId, ancestors: &mut F) -> Result<Vec<TypeChain>>
where
    F: FnMut(&TermId) -> Result<Vec<TermId>>,
{
    let direct = ancestors(term)?;
    if direct.is_empty() {
        return Ok(vec![TypeChain(vec![term.clone()])]);
    }

    let mut chains = Vec::new();
    for ancestor in &direct {
        for TypeChain(mut path) in chains_of(ancestor, ancestors)? {
            path.push(term.clone());
            chains.push(TypeChain(path));
        }
    }
    Ok(chains)
}

/// Chains of a resolved term, looking ancestors up through `lookup`.
///
/// Ancestors follow [`Term::direct_ancestors`] for the kind of each term met
/// on the way up, so an enumeration member climbs through its enumeration's
/// super-classes. An ancestor `lookup` reports as [`Error::NotFound`] ends
/// its chain.
pub fn term_chains<L>(term: &Term, mut lookup: L) -> Result<TypeChainSet>
where
    L: FnMut(&TermId) -> Result<Term>,
{
    let queried = term.id().clone();
    enumerate_paths(&queried, |id| {
        if *id == queried {
            return Ok(term.direct_ancestors().to_vec());
        }
        match lookup(id) {
            Ok(ancestor) => Ok(ancestor.direct_ancestors().to_vec()),
            Err(Error::NotFound(_)) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    })
}

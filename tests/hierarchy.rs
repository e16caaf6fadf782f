use std::collections::HashMap;

use vocab_browser::{
    hierarchy::{enumerate_paths, TypeChainSet},
    vocabulary::TermId,
};

fn id(value: &str) -> TermId {
    TermId::new(value).expect("valid term id")
}

fn enumerate(term: &str, edges: &[(&str, &[&str])]) -> TypeChainSet {
    let relation: HashMap<TermId, Vec<TermId>> = edges
        .iter()
        .map(|(child, parents)| (id(child), parents.iter().map(|parent| id(parent)).collect()))
        .collect();
    enumerate_paths(&id(term), |current| {
        Ok(relation.get(current).cloned().unwrap_or_default())
    })
    .expect("enumerated")
}

fn as_strings(set: &TypeChainSet) -> Vec<Vec<String>> {
    set.iter()
        .map(|chain| chain.iter().map(ToString::to_string).collect())
        .collect()
}

#[test]
fn term_without_ancestors_yields_only_itself() {
    let set = enumerate("ex:Root", &[]);
    assert_eq!(as_strings(&set), vec![vec!["ex:Root".to_string()]]);
}

#[test]
fn chains_are_concatenated_in_ancestor_order() {
    // A has one chain, B has two (through B1 and B2).
    let set = enumerate(
        "ex:C",
        &[
            ("ex:C", &["ex:A", "ex:B"]),
            ("ex:A", &["ex:Top"]),
            ("ex:B", &["ex:B1", "ex:B2"]),
            ("ex:B1", &["ex:Top"]),
            ("ex:B2", &["ex:Top"]),
        ],
    );

    assert_eq!(set.len(), 3);
    assert_eq!(
        as_strings(&set),
        vec![
            vec!["ex:Top", "ex:A", "ex:C"],
            vec!["ex:Top", "ex:B1", "ex:B", "ex:C"],
            vec!["ex:Top", "ex:B2", "ex:B", "ex:C"],
        ]
    );
    for chain in &set {
        assert_eq!(chain.last(), Some(&id("ex:C")));
    }
}

#[test]
fn chain_count_is_the_sum_over_ancestors() {
    let edges: &[(&str, &[&str])] = &[
        ("ex:T", &["ex:P1", "ex:P2", "ex:P3"]),
        ("ex:P1", &["ex:R1", "ex:R2"]),
        ("ex:P2", &[]),
        ("ex:P3", &["ex:R1", "ex:R2", "ex:R3"]),
    ];
    let set = enumerate("ex:T", edges);

    assert_eq!(set.len(), 2 + 1 + 3);
    assert!(set.iter().all(|chain| chain.last() == Some(&id("ex:T"))));
    assert_eq!(set.chains()[2].direct_ancestor(), Some(&id("ex:P2")));
}

#[test]
fn sibling_chains_do_not_share_prefixes() {
    let set = enumerate(
        "ex:Leaf",
        &[("ex:Leaf", &["ex:Mid"]), ("ex:Mid", &["ex:Left", "ex:Right"])],
    );
    let first = set.chains()[0].as_slice();
    let second = set.chains()[1].as_slice();

    assert_eq!(first, &[id("ex:Left"), id("ex:Mid"), id("ex:Leaf")]);
    assert_eq!(second, &[id("ex:Right"), id("ex:Mid"), id("ex:Leaf")]);
    assert_ne!(first.as_ptr(), second.as_ptr());
}

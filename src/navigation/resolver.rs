//! Decides, for one render request, which view is active and what has to be
//! loaded first.
//!
//! The resolver is a pure function of the URL query and of what is already
//! loaded; it holds no state of its own and is re-run on every navigation
//! event.

use serde::{Deserialize, Serialize};

use super::query::{NavigationQuery, VocSelector};

/// How the component was constructed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrowserMode {
    /// Browse one vocabulary supplied at construction.
    SingleVocabulary,
    /// Offer a list of vocabularies and browse the one selected by `voc`.
    List,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActiveView {
    List,
    Vocabulary,
    Term,
}

/// Everything the resolver looks at.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NavigationInput<'a> {
    pub mode: BrowserMode,
    pub has_list: bool,
    pub has_session: bool,
    pub url_voc: Option<&'a VocSelector>,
    /// List index backing the current session, if it came from the list.
    pub loaded_voc: Option<usize>,
    pub term: Option<&'a str>,
}

impl<'a> NavigationInput<'a> {
    #[must_use]
    pub fn from_query(query: &'a NavigationQuery, mode: BrowserMode) -> Self {
        Self {
            mode,
            has_list: false,
            has_session: false,
            url_voc: query.voc(),
            loaded_voc: None,
            term: query.term(),
        }
    }

    #[must_use]
    pub fn with_list(mut self, has_list: bool) -> Self {
        self.has_list = has_list;
        self
    }

    #[must_use]
    pub fn with_session(mut self, has_session: bool, loaded_voc: Option<usize>) -> Self {
        self.has_session = has_session;
        self.loaded_voc = loaded_voc;
        self
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Resolution {
    pub needs_list_load: bool,
    pub needs_session_load: bool,
    /// `None` only while a requested term waits for its session.
    pub active_view: Option<ActiveView>,
}

impl Resolution {
    #[must_use]
    pub fn needs_load(&self) -> bool {
        self.needs_list_load || self.needs_session_load
    }
}

/// The three view conditions, evaluated independently of each other.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct ViewPredicates {
    list: bool,
    vocabulary: bool,
    term: bool,
}

impl ViewPredicates {
    fn evaluate(input: &NavigationInput<'_>) -> Self {
        let list = input.mode == BrowserMode::List && input.url_voc.is_none();
        let vocabulary = input.term.is_none()
            && match input.mode {
                BrowserMode::List => input.url_voc.is_some(),
                BrowserMode::SingleVocabulary => true,
            };
        // A stray `term` on the list page does not compete with the list.
        let term = input.term.is_some() && input.has_session && !list;
        Self {
            list,
            vocabulary,
            term,
        }
    }

    fn count(self) -> usize {
        [self.list, self.vocabulary, self.term]
            .into_iter()
            .filter(|flag| *flag)
            .count()
    }
}

#[must_use]
pub fn resolve(input: &NavigationInput<'_>) -> Resolution {
    let is_list_mode = input.mode == BrowserMode::List;

    let needs_list_load = is_list_mode && !input.has_list;

    let needs_session_load = match input.mode {
        BrowserMode::List => input
            .url_voc
            .is_some_and(|voc| voc.index() != input.loaded_voc || !input.has_session),
        BrowserMode::SingleVocabulary => !input.has_session,
    };

    let views = ViewPredicates::evaluate(input);
    let active_view = if views.list {
        Some(ActiveView::List)
    } else if views.vocabulary {
        Some(ActiveView::Vocabulary)
    } else if views.term {
        Some(ActiveView::Term)
    } else {
        None
    };

    Resolution {
        needs_list_load,
        needs_session_load,
        active_view,
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;

    fn selectors() -> Vec<Option<VocSelector>> {
        vec![
            None,
            Some(VocSelector::Index(NonZeroUsize::MIN)),
            Some(VocSelector::Index(NonZeroUsize::new(2).expect("non-zero"))),
            Some(VocSelector::Malformed("x".to_string())),
        ]
    }

    /// Every combination of inputs the resolver can be called with.
    fn grid(mut check: impl FnMut(&NavigationInput<'_>)) {
        let selectors = selectors();
        for mode in [BrowserMode::SingleVocabulary, BrowserMode::List] {
            for has_list in [false, true] {
                for has_session in [false, true] {
                    for url_voc in &selectors {
                        for loaded_voc in [None, Some(1), Some(2)] {
                            for term in [None, Some("ex:Car")] {
                                check(&NavigationInput {
                                    mode,
                                    has_list,
                                    has_session,
                                    url_voc: url_voc.as_ref(),
                                    loaded_voc,
                                    term,
                                });
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn view_predicates_never_overlap() {
        grid(|input| {
            let views = ViewPredicates::evaluate(input);
            assert!(views.count() <= 1, "overlapping views {views:?} for {input:?}");
        });
    }

    #[test]
    fn exactly_one_view_once_loads_are_done() {
        grid(|input| {
            let first = resolve(input);
            // Apply the loads the first pass asked for.
            let loaded = NavigationInput {
                has_list: input.has_list || first.needs_list_load,
                has_session: input.has_session || first.needs_session_load,
                loaded_voc: if first.needs_session_load {
                    input.url_voc.and_then(VocSelector::index)
                } else {
                    input.loaded_voc
                },
                ..*input
            };
            let views = ViewPredicates::evaluate(&loaded);
            assert_eq!(views.count(), 1, "views {views:?} for {loaded:?}");
            assert!(resolve(&loaded).active_view.is_some());
            assert!(!resolve(&loaded).needs_list_load, "list reload for {loaded:?}");
        });
    }

    #[test]
    fn resolution_is_idempotent() {
        grid(|input| assert_eq!(resolve(input), resolve(input)));
    }

    #[test]
    fn list_never_reloads() {
        grid(|input| {
            if input.has_list {
                assert!(!resolve(input).needs_list_load);
            }
        });
    }

    #[test]
    fn changed_voc_forces_session_reload() {
        let two = VocSelector::parse("2");
        let input = NavigationInput {
            mode: BrowserMode::List,
            has_list: true,
            has_session: true,
            url_voc: Some(&two),
            loaded_voc: Some(1),
            term: None,
        };
        assert!(resolve(&input).needs_session_load);

        let same = NavigationInput {
            loaded_voc: Some(2),
            ..input
        };
        assert!(!resolve(&same).needs_session_load);
    }

    #[test]
    fn stray_term_on_list_page_shows_the_list() {
        let input = NavigationInput {
            mode: BrowserMode::List,
            has_list: true,
            has_session: true,
            url_voc: None,
            loaded_voc: Some(1),
            term: Some("ex:Car"),
        };
        let resolution = resolve(&input);
        assert_eq!(resolution.active_view, Some(ActiveView::List));
        assert!(!resolution.needs_session_load);
    }
}

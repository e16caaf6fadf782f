use rstest::rstest;
use vocab_browser::navigation::{
    resolve, ActiveView, BrowserMode, NavigationInput, NavigationQuery, Resolution,
};

fn resolve_query(
    query: &str,
    mode: BrowserMode,
    has_list: bool,
    loaded_voc: Option<usize>,
    has_session: bool,
) -> Resolution {
    let query = NavigationQuery::parse(query);
    resolve(
        &NavigationInput::from_query(&query, mode)
            .with_list(has_list)
            .with_session(has_session, loaded_voc),
    )
}

#[rstest]
#[case::fresh_list_page("", false, None, false, true, false, Some(ActiveView::List))]
#[case::loaded_list_page("", true, None, false, false, false, Some(ActiveView::List))]
#[case::first_vocabulary("voc=2", true, None, false, false, true, Some(ActiveView::Vocabulary))]
#[case::same_vocabulary("voc=2", true, Some(2), true, false, false, Some(ActiveView::Vocabulary))]
#[case::other_vocabulary("voc=1", true, Some(2), true, false, true, Some(ActiveView::Vocabulary))]
#[case::term_waits_for_session("voc=1&term=ex:A", true, None, false, false, true, None)]
#[case::term_of_loaded_vocabulary("voc=1&term=ex:A", true, Some(1), true, false, false, Some(ActiveView::Term))]
#[case::stray_term_on_list_page("term=ex:A", true, Some(1), true, false, false, Some(ActiveView::List))]
#[case::malformed_voc("voc=abc", true, Some(1), true, false, true, Some(ActiveView::Vocabulary))]
fn list_mode(
    #[case] query: &str,
    #[case] has_list: bool,
    #[case] loaded_voc: Option<usize>,
    #[case] has_session: bool,
    #[case] needs_list_load: bool,
    #[case] needs_session_load: bool,
    #[case] active_view: Option<ActiveView>,
) {
    let resolution = resolve_query(query, BrowserMode::List, has_list, loaded_voc, has_session);
    assert_eq!(
        resolution,
        Resolution {
            needs_list_load,
            needs_session_load,
            active_view,
        }
    );
}

#[rstest]
#[case::first_render("", false, true, Some(ActiveView::Vocabulary))]
#[case::overview("", true, false, Some(ActiveView::Vocabulary))]
#[case::term_before_load("term=ex:A", false, true, None)]
#[case::term("term=ex:A", true, false, Some(ActiveView::Term))]
#[case::voc_is_ignored("voc=3&term=ex:A", true, false, Some(ActiveView::Term))]
fn single_vocabulary_mode(
    #[case] query: &str,
    #[case] has_session: bool,
    #[case] needs_session_load: bool,
    #[case] active_view: Option<ActiveView>,
) {
    let resolution = resolve_query(
        query,
        BrowserMode::SingleVocabulary,
        false,
        None,
        has_session,
    );
    assert!(!resolution.needs_list_load);
    assert_eq!(resolution.needs_session_load, needs_session_load);
    assert_eq!(resolution.active_view, active_view);
}

#[rstest]
#[case("voc=2&term=ex%3ACar&lang=en")]
#[case("?lang=en&term=ex:Car&voc=2")]
fn queries_keep_unrelated_parameters(#[case] raw: &str) {
    let query = NavigationQuery::parse(raw);
    assert_eq!(query.term(), Some("ex:Car"));
    assert_eq!(query.voc().and_then(|voc| voc.index()), Some(2));
    assert_eq!(query.to_query_string(), "voc=2&term=ex%3ACar&lang=en");
}

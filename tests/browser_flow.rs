use std::{num::NonZeroUsize, sync::Arc};

use vocab_browser::{
    browser::command_channel,
    errors::Missing,
    fetch::StaticFetcher,
    navigation::{MemoryHistory, NavigationContext},
    session::SessionOrigin,
    vocabulary::{InMemoryVocabularyProvider, TermId},
    ActiveView, BrowserCommand, BrowserSettings, Error, LinkTarget, MemoryHost, VocabBrowser,
};

const BASELINE_URL: &str = "https://schema.org/version/latest/schemaorg-all-https.jsonld";
const LIST_URL: &str = "https://example.org/list.json";

const BASELINE: &str = r#"{
    "@context": { "schema": "https://schema.org/" },
    "@graph": [
        { "@id": "schema:Thing", "@type": "rdfs:Class", "rdfs:comment": "The most generic type of item." },
        { "@id": "schema:name", "@type": "rdf:Property", "schema:domainIncludes": "schema:Thing", "schema:rangeIncludes": "schema:Text" },
        { "@id": "schema:Text", "@type": "schema:DataType" }
    ]
}"#;

const LIST: &str = r#"{
    "schema:name": "Transport vocabularies",
    "schema:hasPart": [
        { "@id": "https://example.org/cars.jsonld", "schema:name": "Cars", "schema:author": "Ada" },
        { "@id": "https://example.org/boats.jsonld", "schema:name": "Boats" },
        { "@id": "https://example.org/unreachable.jsonld" }
    ]
}"#;

const CARS: &str = r#"{
    "@context": { "car": "https://example.org/cars/", "schema": "https://schema.org/" },
    "@graph": [
        { "@id": "car:Vehicle", "@type": "rdfs:Class", "rdfs:subClassOf": "schema:Thing" },
        { "@id": "car:Car", "@type": "rdfs:Class", "rdfs:subClassOf": "car:Vehicle", "rdfs:comment": "A road vehicle." },
        { "@id": "car:wheels", "@type": "rdf:Property", "schema:domainIncludes": "car:Vehicle", "schema:rangeIncludes": "schema:Text" },
        { "@id": "car:Odd", "@type": "owl:Thing" }
    ]
}"#;

const BOATS: &str = r#"{
    "@context": { "boat": "https://example.org/boats/" },
    "@graph": [
        { "@id": "boat:Boat", "@type": "rdfs:Class", "rdfs:subClassOf": "schema:Thing" }
    ]
}"#;

struct Fixture {
    browser: VocabBrowser,
    host: Arc<MemoryHost>,
    history: Arc<MemoryHistory>,
    fetcher: Arc<StaticFetcher>,
}

fn list_browser(query: &str) -> Fixture {
    let fetcher = StaticFetcher::new()
        .with_document(BASELINE_URL, BASELINE)
        .with_document(LIST_URL, LIST)
        .with_document("https://example.org/cars.jsonld", CARS)
        .with_document("https://example.org/boats.jsonld", BOATS)
        .into_shared();
    let host = Arc::new(MemoryHost::new());
    let history = Arc::new(MemoryHistory::from_query_string(query));
    let browser = VocabBrowser::builder(
        host.clone(),
        history.clone(),
        Arc::new(InMemoryVocabularyProvider::factory(fetcher.clone())),
        fetcher.clone(),
    )
    .list(LIST_URL)
    .settings(BrowserSettings::default())
    .build()
    .expect("browser builds");
    Fixture {
        browser,
        host,
        history,
        fetcher,
    }
}

fn term(value: &str) -> LinkTarget {
    LinkTarget::Term(TermId::new(value).expect("valid term id"))
}

fn vocabulary(index: usize) -> LinkTarget {
    LinkTarget::Vocabulary(NonZeroUsize::new(index).expect("non-zero index"))
}

fn list_fetches(fetcher: &StaticFetcher) -> usize {
    fetcher
        .requests()
        .iter()
        .filter(|location| location.as_str() == LIST_URL)
        .count()
}

#[tokio::test]
async fn list_page_shows_one_row_per_part() {
    let mut fixture = list_browser("");

    let view = fixture.browser.render().await.expect("rendered");

    assert_eq!(view, ActiveView::List);
    let html = fixture.host.html().expect("content");
    assert!(html.contains("<h1>Transport vocabularies</h1>"));
    assert_eq!(html.matches("data-nav-voc=").count(), 3);
    assert!(html.contains(r#"data-nav-voc="3""#));
    assert!(html.contains(">https://example.org/unreachable.jsonld</a>"));
    assert!(fixture.browser.session().is_none());
}

#[tokio::test]
async fn voc_selects_the_list_part_by_position() {
    let mut fixture = list_browser("voc=2");

    let view = fixture.browser.render().await.expect("rendered");

    assert_eq!(view, ActiveView::Vocabulary);
    let session = fixture.browser.session().expect("session loaded");
    assert_eq!(session.origin(), SessionOrigin::ListIndex(2));
    assert_eq!(
        session.vocabulary_names().iter().collect::<Vec<_>>(),
        vec!["boat"]
    );
    assert_eq!(session.classes(), &[TermId::new("boat:Boat").expect("valid")]);
    assert!(fixture.host.html().expect("content").contains("1 Class"));
}

#[tokio::test]
async fn list_loads_once_across_renders() {
    let mut fixture = list_browser("");

    fixture.browser.render().await.expect("list");
    fixture
        .browser
        .handle_link_activated(&vocabulary(1))
        .await
        .expect("vocabulary");
    fixture
        .browser
        .handle_link_activated(&term("car:Car"))
        .await
        .expect("term");
    fixture.history.back();
    fixture.history.back();
    fixture
        .browser
        .handle_popped_navigation()
        .await
        .expect("list again");

    assert_eq!(list_fetches(&fixture.fetcher), 1);
    assert_eq!(fixture.history.current_query().to_query_string(), "");
}

#[tokio::test]
async fn unknown_term_keeps_the_previous_view() {
    let mut fixture = list_browser("voc=1");
    fixture.browser.render().await.expect("vocabulary");
    let before = fixture.host.content().expect("content");

    let err = fixture
        .browser
        .handle_link_activated(&term("car:UnknownTerm"))
        .await
        .expect_err("unknown term");

    assert!(matches!(err, Error::NotFound(Missing::Term(ref id)) if id == "car:UnknownTerm"));
    assert_eq!(fixture.host.content(), Some(before));
    assert_eq!(fixture.host.replacements(), 1);
}

#[tokio::test]
async fn term_that_is_not_a_compact_iri_is_not_found() {
    let mut fixture = list_browser("voc=1&term=UnknownTerm");

    let err = fixture.browser.render().await.expect_err("not found");

    assert!(err.halts_render_cycle());
    assert!(fixture.host.content().is_none());
}

#[tokio::test]
async fn unsupported_term_kind_halts_the_render() {
    let mut fixture = list_browser("voc=1");
    fixture.browser.render().await.expect("vocabulary");

    let err = fixture
        .browser
        .handle_link_activated(&term("car:Odd"))
        .await
        .expect_err("unsupported kind");

    assert!(matches!(err, Error::UnsupportedTermKind { ref kind, .. } if kind == "owl:Thing"));
    assert_eq!(fixture.host.replacements(), 1);
    assert_eq!(fixture.host.content().map(|c| c.view), Some(ActiveView::Vocabulary));
}

#[tokio::test]
async fn out_of_range_and_malformed_voc_are_not_found() {
    for query in ["voc=9", "voc=0", "voc=two"] {
        let mut fixture = list_browser(query);
        let err = fixture.browser.render().await.expect_err("not found");
        assert!(
            matches!(err, Error::NotFound(Missing::VocabularyIndex { available: 3, .. })),
            "{query}: {err}"
        );
        assert!(fixture.host.content().is_none());
    }
}

#[tokio::test]
async fn switching_vocabulary_replaces_the_whole_session() {
    let mut fixture = list_browser("voc=1");
    fixture.browser.render().await.expect("cars");
    let cars = fixture.browser.session().expect("session");
    assert_eq!(cars.classes().len(), 2);

    fixture
        .browser
        .handle_link_activated(&vocabulary(2))
        .await
        .expect("boats");

    let boats = fixture.browser.session().expect("session");
    assert_eq!(boats.origin(), SessionOrigin::ListIndex(2));
    assert_eq!(boats.classes(), &[TermId::new("boat:Boat").expect("valid")]);
    assert!(boats.properties().is_empty());
    // Fresh provider: terms of the previous vocabulary are gone.
    let car = TermId::new("car:Car").expect("valid");
    assert!(!boats.is_own_term(&car));
    assert!(matches!(boats.term(&car), Err(Error::NotFound(_))));
}

#[tokio::test]
async fn failed_load_keeps_the_current_session() {
    let mut fixture = list_browser("voc=1");
    fixture.browser.render().await.expect("cars");

    let err = fixture
        .browser
        .handle_link_activated(&vocabulary(3))
        .await
        .expect_err("unreachable");

    assert!(matches!(err, Error::FetchFailure { .. }));
    assert!(!err.halts_render_cycle());
    let session = fixture.browser.session().expect("session");
    assert_eq!(session.origin(), SessionOrigin::ListIndex(1));
    assert_eq!(fixture.host.content().map(|c| c.view), Some(ActiveView::Vocabulary));
}

#[tokio::test]
async fn only_term_views_reset_scroll() {
    let mut fixture = list_browser("");
    fixture.browser.render().await.expect("list");
    fixture
        .browser
        .handle_link_activated(&vocabulary(1))
        .await
        .expect("vocabulary");
    assert_eq!(fixture.host.scroll_resets(), 0);

    fixture
        .browser
        .handle_link_activated(&term("car:Car"))
        .await
        .expect("term");
    assert_eq!(fixture.host.scroll_resets(), 1);

    let html = fixture.host.html().expect("content");
    assert!(html.contains(r#"<h1 property="rdfs:label" class="page-title">car:Car</h1>"#));
    assert!(html.contains(r#"<link property="rdfs:subClassOf" href="?voc=1&amp;term=car%3AVehicle">"#));
    assert!(html.contains(r#"<a href="https://schema.org/Thing" target="_blank""#));
    assert!(html.contains("Properties from"));
}

#[tokio::test]
async fn queued_commands_coalesce_into_one_render() {
    let mut fixture = list_browser("");
    fixture.browser.render().await.expect("list");

    let (sender, receiver) = fixture.browser.command_channel();
    assert!(sender.link_activated(vocabulary(2)));
    assert!(sender.link_activated(vocabulary(1)));
    assert!(sender.link_activated(term("car:Car")));
    drop(sender);

    fixture.browser.run(receiver).await;

    assert_eq!(fixture.history.len(), 4);
    assert_eq!(
        fixture.history.current_query().to_query_string(),
        "voc=1&term=car%3ACar"
    );
    assert_eq!(fixture.host.replacements(), 2);
    assert_eq!(fixture.host.content().map(|c| c.view), Some(ActiveView::Term));
    // The superseded `voc=2` target never loaded.
    assert!(!fixture
        .fetcher
        .requests()
        .iter()
        .any(|location| location == "https://example.org/boats.jsonld"));
}

#[tokio::test]
async fn back_press_after_a_queued_click_lands_on_the_clicked_from_page() {
    let mut fixture = list_browser("");
    fixture.browser.render().await.expect("list");
    fixture
        .browser
        .handle_link_activated(&vocabulary(1))
        .await
        .expect("vocabulary");

    let (sender, receiver) = fixture.browser.command_channel();
    assert!(sender.link_activated(term("car:Car")));
    assert_eq!(fixture.history.len(), 3);
    assert!(fixture.history.back());
    assert!(sender.popped());
    drop(sender);

    fixture.browser.run(receiver).await;

    assert_eq!(fixture.history.current_query().to_query_string(), "voc=1");
    assert_eq!(fixture.history.len(), 3);
    assert_eq!(fixture.host.replacements(), 3);
    assert_eq!(fixture.host.content().map(|c| c.view), Some(ActiveView::Vocabulary));
    assert_eq!(fixture.host.scroll_resets(), 0);

    assert!(fixture.history.forward());
    assert_eq!(
        fixture.history.current_query().to_query_string(),
        "voc=1&term=car%3ACar"
    );
}

#[tokio::test]
async fn history_pops_are_forwarded_to_the_queue() {
    let mut fixture = list_browser("");
    fixture.browser.render().await.expect("list");
    fixture
        .browser
        .handle_link_activated(&vocabulary(1))
        .await
        .expect("vocabulary");

    let (sender, mut receiver) = command_channel(fixture.history.clone());
    sender.listen_for_pops();
    assert!(receiver.try_recv().is_err());

    assert!(fixture.history.back());
    assert_eq!(receiver.try_recv().ok(), Some(BrowserCommand::Popped));

    let view = fixture
        .browser
        .handle_popped_navigation()
        .await
        .expect("list again");
    assert_eq!(view, ActiveView::List);
    assert_eq!(fixture.history.len(), 2);
}

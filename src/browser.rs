//! The browser component and its render cycle.
//!
//! Every render reads the current query from the [`NavigationContext`],
//! resolves the active view, performs the loads the resolution asks for,
//! composes the view and hands the HTML to the [`HostElement`]. Render entry
//! points take `&mut self`, so one component never runs two cycles at once.
//! Hosts that cannot await each event feed a [`CommandSender`] and let
//! [`VocabBrowser::run`] drain the queue.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::{
    config::BrowserSettings,
    errors::Missing,
    fetch::DocumentFetcher,
    list::{ListStore, VocabularyListDocument},
    navigation::{
        resolve, ActiveView, BrowserMode, LinkTarget, NavigationContext, NavigationInput,
        NavigationQuery,
    },
    session::{self, SessionOrigin, VocabularySession},
    view::{compose, DocumentFragment, ViewData, ViewRenderer},
    vocabulary::{ProviderFactory, VocabularyReference},
    Error, Result,
};

/// The element the browser renders into.
pub trait HostElement: Send + Sync {
    /// Replaces the displayed content with `fragment`.
    fn replace_content(&self, fragment: &DocumentFragment);

    fn scroll_to_top(&self);
}

/// [`HostElement`] keeping the displayed fragment in memory.
#[derive(Default)]
pub struct MemoryHost {
    state: Mutex<HostState>,
}

#[derive(Default)]
struct HostState {
    content: Option<DocumentFragment>,
    replacements: usize,
    scroll_resets: usize,
}

impl MemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently displayed fragment.
    pub fn content(&self) -> Option<DocumentFragment> {
        self.state.lock().expect("host state poisoned").content.clone()
    }

    pub fn html(&self) -> Option<String> {
        self.content().map(|fragment| fragment.html)
    }

    /// How many times the content was replaced.
    pub fn replacements(&self) -> usize {
        self.state.lock().expect("host state poisoned").replacements
    }

    pub fn scroll_resets(&self) -> usize {
        self.state.lock().expect("host state poisoned").scroll_resets
    }
}

impl HostElement for MemoryHost {
    fn replace_content(&self, fragment: &DocumentFragment) {
        let mut state = self.state.lock().expect("host state poisoned");
        state.content = Some(fragment.clone());
        state.replacements += 1;
    }

    fn scroll_to_top(&self) {
        self.state.lock().expect("host state poisoned").scroll_resets += 1;
    }
}

/// Events forwarded by the host's delegated handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BrowserCommand {
    /// A navigational element was activated.
    LinkActivated(LinkTarget),
    /// The user moved back or forward in history.
    Popped,
}

/// Sending half of the browser's command queue.
///
/// A link activation pushes its history entry as soon as it is sent, so the
/// entry follows from the URL the user clicked on. Only the render waits for
/// [`VocabBrowser::run`].
#[derive(Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<BrowserCommand>,
    context: Arc<dyn NavigationContext>,
}

impl CommandSender {
    /// Queues `command`. Returns `false` once the browser stopped listening.
    pub fn send(&self, command: BrowserCommand) -> bool {
        if let BrowserCommand::LinkActivated(target) = &command {
            push_link(self.context.as_ref(), target);
        }
        self.tx.send(command).is_ok()
    }

    pub fn link_activated(&self, target: LinkTarget) -> bool {
        self.send(BrowserCommand::LinkActivated(target))
    }

    pub fn popped(&self) -> bool {
        self.send(BrowserCommand::Popped)
    }

    /// Forwards the context's back/forward notifications to the queue. The
    /// queue then stays open for as long as the context lives.
    pub fn listen_for_pops(&self) {
        let tx = self.tx.clone();
        self.context.on_popped(Box::new(move || {
            tx.send(BrowserCommand::Popped).ok();
        }));
    }
}

impl std::fmt::Debug for CommandSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSender")
            .field("closed", &self.tx.is_closed())
            .finish_non_exhaustive()
    }
}

/// Creates a command queue for [`VocabBrowser::run`] over `context`, the
/// same navigation context the browser reads.
#[must_use]
pub fn command_channel(
    context: Arc<dyn NavigationContext>,
) -> (CommandSender, mpsc::UnboundedReceiver<BrowserCommand>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CommandSender { tx, context }, rx)
}

/// Pushes the entry `target` leads to from the current query.
fn push_link(context: &dyn NavigationContext, target: &LinkTarget) {
    let next = context.current_query().follow(target);
    context.push_entry(&next);
}

/// Embeddable browser for one vocabulary or a list of vocabularies.
pub struct VocabBrowser {
    host: Arc<dyn HostElement>,
    context: Arc<dyn NavigationContext>,
    providers: Arc<dyn ProviderFactory>,
    fetcher: Arc<dyn DocumentFetcher>,
    source: VocabularyReference,
    mode: BrowserMode,
    settings: BrowserSettings,
    renderer: ViewRenderer,
    list: ListStore,
    session: Option<Arc<VocabularySession>>,
}

impl VocabBrowser {
    /// Creates a browser over `source`, a vocabulary or a vocabulary list
    /// depending on `mode`. Nothing is loaded until the first render.
    ///
    /// # Errors
    ///
    /// Fails when the built-in templates cannot be compiled.
    pub fn new(
        host: Arc<dyn HostElement>,
        context: Arc<dyn NavigationContext>,
        providers: Arc<dyn ProviderFactory>,
        fetcher: Arc<dyn DocumentFetcher>,
        source: VocabularyReference,
        mode: BrowserMode,
        settings: BrowserSettings,
    ) -> Result<Self> {
        Ok(Self {
            host,
            context,
            providers,
            fetcher,
            source,
            mode,
            settings,
            renderer: ViewRenderer::new()?,
            list: ListStore::default(),
            session: None,
        })
    }

    #[must_use]
    pub fn builder(
        host: Arc<dyn HostElement>,
        context: Arc<dyn NavigationContext>,
        providers: Arc<dyn ProviderFactory>,
        fetcher: Arc<dyn DocumentFetcher>,
    ) -> VocabBrowserBuilder {
        VocabBrowserBuilder {
            host,
            context,
            providers,
            fetcher,
            source: None,
            settings: BrowserSettings::default(),
        }
    }

    /// Creates a command queue over this browser's navigation context.
    #[must_use]
    pub fn command_channel(&self) -> (CommandSender, mpsc::UnboundedReceiver<BrowserCommand>) {
        command_channel(Arc::clone(&self.context))
    }

    #[must_use]
    pub fn mode(&self) -> BrowserMode {
        self.mode
    }

    #[must_use]
    pub fn list(&self) -> Option<&VocabularyListDocument> {
        self.list.document()
    }

    #[must_use]
    pub fn session(&self) -> Option<&VocabularySession> {
        self.session.as_deref()
    }

    /// Runs one render cycle against the current URL.
    ///
    /// On error nothing is shown: the host keeps the previously rendered
    /// view and, apart from a successfully completed load, loaded state is
    /// unchanged.
    pub async fn render(&mut self) -> Result<ActiveView> {
        match self.render_cycle().await {
            Ok(view) => Ok(view),
            Err(err) => {
                if err.halts_render_cycle() {
                    tracing::warn!(err.msg = %err, "render_halted");
                } else {
                    tracing::error!(err.msg = %err, err.detail = ?err, "render_failed");
                }
                Err(err)
            }
        }
    }

    /// Navigates to `target`: pushes a history entry, then renders.
    pub async fn handle_link_activated(&mut self, target: &LinkTarget) -> Result<ActiveView> {
        push_link(self.context.as_ref(), target);
        self.render().await
    }

    /// Re-renders after a back/forward move. History is left as it is.
    pub async fn handle_popped_navigation(&mut self) -> Result<ActiveView> {
        self.render().await
    }

    /// Drains `commands` until every sender is dropped.
    ///
    /// History was already updated when each command was sent. Commands
    /// queued while a render is running are coalesced into a single render
    /// against the final URL.
    pub async fn run(&mut self, mut commands: mpsc::UnboundedReceiver<BrowserCommand>) {
        while commands.recv().await.is_some() {
            let mut coalesced = 1;
            while commands.try_recv().is_ok() {
                coalesced += 1;
            }
            if coalesced > 1 {
                tracing::debug!(commands = coalesced, "commands_coalesced");
            }
            // `render` logs failures and the prior view stays in place.
            self.render().await.ok();
        }
    }

    fn navigation_input<'q>(&self, query: &'q NavigationQuery) -> NavigationInput<'q> {
        let loaded_voc = self
            .session
            .as_ref()
            .and_then(|session| session.origin().list_index());
        NavigationInput::from_query(query, self.mode)
            .with_list(self.list.is_loaded())
            .with_session(self.session.is_some(), loaded_voc)
    }

    async fn render_cycle(&mut self) -> Result<ActiveView> {
        let query = self.context.current_query();
        let mut resolution = resolve(&self.navigation_input(&query));
        if resolution.needs_list_load {
            self.load_list().await?;
        }
        if resolution.needs_session_load {
            self.load_session(&query).await?;
        }
        if resolution.needs_load() {
            resolution = resolve(&self.navigation_input(&query));
        }
        tracing::debug!(query = %query, ?resolution, "navigation_resolved");

        let view = resolution.active_view.ok_or_else(|| {
            Error::Message(format!("no view is active for query `{query}`"))
        })?;
        let fragment = compose(
            view,
            &ViewData {
                query: &query,
                list: self.list.document(),
                session: self.session.as_deref(),
            },
        )?;
        let document = self.renderer.render(&fragment)?;

        self.host.replace_content(&document);
        if view == ActiveView::Term {
            self.host.scroll_to_top();
        }
        tracing::info!(view = ?view, query = %query, "render_completed");
        Ok(view)
    }

    async fn load_list(&mut self) -> Result<()> {
        let text = match &self.source {
            VocabularyReference::Location(url) => self.fetcher.fetch(url).await?,
            VocabularyReference::Inline(document) => document.clone(),
        };
        let document = VocabularyListDocument::parse(&text)?;
        let stored = self.list.store(document);
        tracing::info!(name = %stored.name, entries = stored.len(), "list_loaded");
        Ok(())
    }

    async fn load_session(&mut self, query: &NavigationQuery) -> Result<()> {
        let (reference, origin) = match self.mode {
            BrowserMode::SingleVocabulary => (self.source.clone(), SessionOrigin::Single),
            BrowserMode::List => {
                let list = self
                    .list
                    .document()
                    .ok_or_else(|| Error::Message("vocabulary list is not loaded".to_string()))?;
                let selector = query
                    .voc()
                    .ok_or_else(|| Error::Message("no vocabulary is selected".to_string()))?;
                let index = selector.index().ok_or_else(|| {
                    Error::NotFound(Missing::VocabularyIndex {
                        index: selector.to_string(),
                        available: list.len(),
                    })
                })?;
                (list.location(index)?, SessionOrigin::ListIndex(index))
            }
        };

        let loaded = session::load_session(
            self.providers.create(),
            &self.settings.baseline,
            &reference,
            origin,
        )
        .await?;
        self.session = Some(Arc::new(loaded));
        Ok(())
    }
}

/// Builder for [`VocabBrowser`].
pub struct VocabBrowserBuilder {
    host: Arc<dyn HostElement>,
    context: Arc<dyn NavigationContext>,
    providers: Arc<dyn ProviderFactory>,
    fetcher: Arc<dyn DocumentFetcher>,
    source: Option<(VocabularyReference, BrowserMode)>,
    settings: BrowserSettings,
}

impl VocabBrowserBuilder {
    /// Browse a single vocabulary given as a URL or an inline document.
    #[must_use]
    pub fn single_vocabulary(mut self, source: impl Into<String>) -> Self {
        self.source = Some((
            VocabularyReference::from_source(source),
            BrowserMode::SingleVocabulary,
        ));
        self
    }

    /// Browse a vocabulary list given as a URL or an inline document.
    #[must_use]
    pub fn list(mut self, source: impl Into<String>) -> Self {
        self.source = Some((VocabularyReference::from_source(source), BrowserMode::List));
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: BrowserSettings) -> Self {
        self.settings = settings;
        self
    }

    /// # Errors
    ///
    /// Fails when no source was given or the templates cannot be compiled.
    pub fn build(self) -> Result<VocabBrowser> {
        let (source, mode) = self
            .source
            .ok_or_else(|| Error::Message("browser needs a vocabulary or a list".to_string()))?;
        VocabBrowser::new(
            self.host,
            self.context,
            self.providers,
            self.fetcher,
            source,
            mode,
            self.settings,
        )
    }
}

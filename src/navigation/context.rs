use super::query::NavigationQuery;

/// Callback invoked when the user moves through history (back/forward).
pub type PoppedListener = Box<dyn Fn() + Send + Sync + 'static>;

/// Access to the page location and browsing history.
///
/// The browser never talks to a global location or history object; it goes
/// through this capability so that navigation can be driven by a host page or
/// by [`super::MemoryHistory`] in tests.
pub trait NavigationContext: Send + Sync {
    /// Query string of the current location.
    fn current_query(&self) -> NavigationQuery;

    /// Pushes a new history entry and makes it current. Does not notify
    /// popped listeners.
    fn push_entry(&self, query: &NavigationQuery);

    /// Registers a listener for back/forward navigation.
    fn on_popped(&self, listener: PoppedListener);
}

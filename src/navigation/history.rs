use std::sync::{Mutex, MutexGuard};

use super::{
    context::{NavigationContext, PoppedListener},
    query::NavigationQuery,
};

#[derive(Debug)]
struct Entries {
    stack: Vec<NavigationQuery>,
    cursor: usize,
}

/// In-memory browsing history with back/forward support.
pub struct MemoryHistory {
    entries: Mutex<Entries>,
    listeners: Mutex<Vec<PoppedListener>>,
}

impl MemoryHistory {
    /// Starts a history whose only entry is `initial`.
    #[must_use]
    pub fn new(initial: NavigationQuery) -> Self {
        Self {
            entries: Mutex::new(Entries {
                stack: vec![initial],
                cursor: 0,
            }),
            listeners: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        Self::new(NavigationQuery::parse(query))
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().expect("history entries poisoned")
    }

    /// Number of entries currently in the history. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.entries().stack.len()
    }

    /// Moves one entry back. Returns `false` at the start of history.
    pub fn back(&self) -> bool {
        let moved = {
            let mut entries = self.entries();
            if entries.cursor == 0 {
                false
            } else {
                entries.cursor -= 1;
                true
            }
        };
        if moved {
            self.notify();
        }
        moved
    }

    /// Moves one entry forward. Returns `false` at the end of history.
    pub fn forward(&self) -> bool {
        let moved = {
            let mut entries = self.entries();
            if entries.cursor + 1 >= entries.stack.len() {
                false
            } else {
                entries.cursor += 1;
                true
            }
        };
        if moved {
            self.notify();
        }
        moved
    }

    fn notify(&self) {
        let listeners = self.listeners.lock().expect("history listeners poisoned");
        for listener in listeners.iter() {
            listener();
        }
    }
}

impl NavigationContext for MemoryHistory {
    fn current_query(&self) -> NavigationQuery {
        let entries = self.entries();
        entries.stack[entries.cursor].clone()
    }

    fn push_entry(&self, query: &NavigationQuery) {
        let mut entries = self.entries();
        let keep = entries.cursor + 1;
        entries.stack.truncate(keep);
        entries.stack.push(query.clone());
        entries.cursor = keep;
    }

    fn on_popped(&self, listener: PoppedListener) {
        self.listeners
            .lock()
            .expect("history listeners poisoned")
            .push(listener);
    }
}

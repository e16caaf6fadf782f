//! URL-driven navigation: query parsing, the view resolver and the injected
//! location/history capability.

pub mod context;
pub mod history;
pub mod query;
pub mod resolver;

pub use context::{NavigationContext, PoppedListener};
pub use history::MemoryHistory;
pub use query::{LinkTarget, NavigationQuery, VocSelector};
pub use resolver::{resolve, ActiveView, BrowserMode, NavigationInput, Resolution};

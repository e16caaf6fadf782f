//! # vocab-browser
//!
//! An embeddable browser for semantic vocabularies. It renders the classes,
//! properties, enumerations, enumeration members and data types of a
//! vocabulary, or a selector over a list of vocabularies, and navigates
//! between them through the `voc` and `term` query parameters of the page URL.
//!
//! The vocabulary data provider, document fetching, the page location and
//! the host element are collaborators behind traits; in-memory adapters for
//! all of them ship with the crate.
//!
//! ```ignore
//! let mut browser = VocabBrowser::builder(host, history, factory, fetcher)
//!     .single_vocabulary(document)
//!     .build()?;
//! browser.render().await?;
//! ```

pub mod browser;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod errors;
pub mod fetch;
pub mod hierarchy;
pub mod list;
pub mod logger;
pub mod navigation;
pub mod session;
pub mod view;
pub mod vocabulary;

pub use self::errors::Error;

pub use browser::{
    BrowserCommand, CommandSender, HostElement, MemoryHost, VocabBrowser, VocabBrowserBuilder,
};
pub use config::BrowserSettings;
pub use navigation::{ActiveView, BrowserMode, LinkTarget, NavigationQuery};

/// Application results options list
pub type Result<T, E = Error> = std::result::Result<T, E>;

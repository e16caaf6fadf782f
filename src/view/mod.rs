//! View composition and rendering.
//!
//! [`compose`] turns loaded state into a [`ViewFragment`]; [`ViewRenderer`]
//! turns the fragment into the HTML placed in the host element.

pub mod compose;
pub mod model;
pub mod render;

pub use compose::{compose, ViewData};
pub use model::{TermRef, ViewFragment};
pub use render::{DocumentFragment, ViewRenderer};

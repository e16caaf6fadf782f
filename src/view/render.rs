//! HTML rendering of composed views with `tera`.

use serde::Serialize;
use tera::{Context, Tera};

use super::model::ViewFragment;
use crate::{navigation::ActiveView, Result};

const TEMPLATES: [(&str, &str); 4] = [
    ("macros.html", include_str!("templates/macros.html")),
    ("list.html", include_str!("templates/list.html")),
    ("vocabulary.html", include_str!("templates/vocabulary.html")),
    ("term.html", include_str!("templates/term.html")),
];

/// Rendered content for the host element, along with the view it shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentFragment {
    pub view: ActiveView,
    pub html: String,
}

/// Escapes markup characters. Unlike the tera default, `/` is kept so IRIs
/// stay readable in attributes.
fn escape_markup(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(c),
        }
    }
    output
}

pub struct ViewRenderer {
    tera: Tera,
}

impl ViewRenderer {
    /// Builds a renderer with the built-in templates. Auto-escaping is on for
    /// every template.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        tera.autoescape_on(vec![".html"]);
        tera.set_escape_fn(escape_markup);
        Ok(Self { tera })
    }

    pub fn render(&self, fragment: &ViewFragment) -> Result<DocumentFragment> {
        let (template, context) = match fragment {
            ViewFragment::List(view) => ("list.html", Context::from_serialize(view)?),
            ViewFragment::Vocabulary(view) => ("vocabulary.html", Context::from_serialize(view)?),
            ViewFragment::Term(view) => ("term.html", Context::from_serialize(view)?),
        };
        let html = self.tera.render(template, &context)?;
        Ok(DocumentFragment {
            view: fragment.active_view(),
            html,
        })
    }
}

//! Markup query capability used by the extractor.
//!
//! Extraction rules only talk to [`FieldLocator`], so the parsing backend can
//! change without touching them. [`HtmlDocument`] is the `scraper`-backed
//! implementation.

use scraper::{ElementRef, Html, Selector};

/// Queries a parsed page by marker (a CSS selector).
///
/// A marker that matches nothing behaves exactly like an absent element.
pub trait FieldLocator {
    /// Whether any element matches `marker`.
    fn exists(&self, marker: &str) -> bool;

    /// Value of `attribute` on the first element matching `marker`.
    fn attribute(&self, marker: &str, attribute: &str) -> Option<String>;

    /// Concatenated text of every `marker` match inside every `container`
    /// match, in document order, trimmed.
    ///
    /// Returns `None` when the container is absent and `Some("")` when the
    /// container exists but holds no matching text.
    fn text_within(&self, container: &str, marker: &str) -> Option<String>;
}

/// A parsed HTML page.
///
/// Not `Send`: build it, query it and drop it without crossing an `.await`.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    #[must_use]
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    fn first(&self, marker: &str) -> Option<ElementRef<'_>> {
        let selector = selector(marker)?;
        self.html.select(&selector).next()
    }
}

impl FieldLocator for HtmlDocument {
    fn exists(&self, marker: &str) -> bool {
        self.first(marker).is_some()
    }

    fn attribute(&self, marker: &str, attribute: &str) -> Option<String> {
        self.first(marker)
            .and_then(|el| el.value().attr(attribute))
            .map(str::to_owned)
    }

    fn text_within(&self, container: &str, marker: &str) -> Option<String> {
        let outer = selector(container)?;
        let mut containers = self.html.select(&outer).peekable();
        containers.peek()?;
        let Some(inner) = selector(marker) else {
            return Some(String::new());
        };
        let text: String = containers
            .flat_map(|c| c.select(&inner))
            .flat_map(|el| el.text())
            .collect();
        Some(text.trim().to_owned())
    }
}

/// Checks that `marker` is a selector this backend accepts.
///
/// # Errors
///
/// Returns the parser's description of the problem.
pub fn check_marker(marker: &str) -> Result<(), String> {
    Selector::parse(marker).map(|_| ()).map_err(|e| e.to_string())
}

fn selector(marker: &str) -> Option<Selector> {
    match Selector::parse(marker) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::warn!(marker, error = %e, "ignoring unparseable marker");
            None
        }
    }
}

//! Structured-markup parser for widget-style providers.
//!
//! The upstream wraps rendered HTML in a JSON envelope `{html, css, js}`.
//! This module peels the envelope and exposes the tree queries the adapter
//! needs: find-all-by-class, find-by-attribute, attribute-prefix scans and
//! text content. Markup varies between scheduled and completed row layouts,
//! so every query degrades to `None`/empty instead of failing.

use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("invalid widget envelope: {0}")]
    Envelope(String),
}

/// Wire shape of the widget endpoint responses.
#[derive(Debug, Deserialize)]
pub struct WidgetEnvelope {
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: Vec<String>,
    #[serde(default)]
    pub js: Vec<String>,
}

/// A parsed HTML fragment plus the query operations over it.
pub struct MarkupDoc {
    doc: Html,
}

impl MarkupDoc {
    /// Parse a JSON widget envelope and the HTML fragment inside it.
    /// An unreadable envelope or an empty `html` field is a parse failure;
    /// missing *elements inside* the fragment are not.
    pub fn from_envelope(raw: &str) -> Result<Self, MarkupError> {
        let envelope: WidgetEnvelope =
            serde_json::from_str(raw).map_err(|e| MarkupError::Envelope(e.to_string()))?;
        if envelope.html.trim().is_empty() {
            return Err(MarkupError::Envelope("missing html field".into()));
        }
        Ok(Self::from_fragment(&envelope.html))
    }

    /// Parse a bare HTML fragment. html5ever recovers from malformed
    /// markup, so this cannot fail; field extraction tolerance lives in
    /// the query methods instead.
    pub fn from_fragment(html: &str) -> Self {
        Self { doc: Html::parse_fragment(html) }
    }

    /// All elements carrying `class`, in document order.
    pub fn all_with_class(&self, class: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(&format!(".{class}")) {
            Ok(sel) => self.doc.select(&sel).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// First element whose attribute `attr` equals `value`.
    pub fn find_by_attr(&self, attr: &str, value: &str) -> Option<ElementRef<'_>> {
        let sel = Selector::parse(&format!(r#"[{attr}="{value}"]"#)).ok()?;
        self.doc.select(&sel).next()
    }
}

/// Trimmed text of the first descendant of `scope` carrying `class`.
pub fn class_text(scope: ElementRef<'_>, class: &str) -> Option<String> {
    let sel = Selector::parse(&format!(".{class}")).ok()?;
    scope.select(&sel).next().map(text_content)
}

/// Whether the element's class list contains `token` exactly.
pub fn has_class(el: ElementRef<'_>, token: &str) -> bool {
    el.value().classes().any(|c| c == token)
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

/// All `(name, value)` attributes whose name starts with `prefix`, in
/// attribute order.
pub fn attrs_with_prefix(el: ElementRef<'_>, prefix: &str) -> Vec<(String, String)> {
    el.value()
        .attrs()
        .filter(|(name, _)| name.starts_with(prefix))
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .collect()
}

/// Concatenated, whitespace-trimmed text content.
pub fn text_content(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_owned()
}

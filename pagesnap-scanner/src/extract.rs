//! Tree walkers over a parsed HTML document.
//!
//! All walkers visit nodes in document pre-order (a node before its children,
//! the first child before its siblings) and never fail: a missing element just
//! produces `None` or an empty value.

use crate::result::CrawlResult;
use scraper::{ElementRef, Html, Node};
use tracing::debug;

/// Tags whose entire subtree is left out of the extracted text.
pub const EXCLUDED_TAGS: &[&str] = &[
    "script", "style", "noscript", "head", "meta", "link", "svg", "iframe", "footer", "nav",
];

pub fn is_excluded(tag: &str) -> bool {
    EXCLUDED_TAGS.contains(&tag)
}

/// Every element of the document in pre-order.
fn elements(document: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    document.tree.root().descendants().filter_map(ElementRef::wrap)
}

/// Text of the first `<title>` that has any content, trimmed.
///
/// Returns `None` when there is no such element or its text is blank.
pub fn find_title(document: &Html) -> Option<String> {
    let title = elements(document)
        .find(|element| element.value().name() == "title" && element.has_children())?;

    title
        .children()
        .find_map(|child| match child.value() {
            Node::Text(text) => Some(text.trim()),
            _ => None,
        })
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Rewrites a site-root-relative href (`/path`) by prefixing `base_url`.
///
/// Plain concatenation: `base_url` is used verbatim and no slashes are folded.
/// Every other form, including protocol-relative `//host/path`, is returned as is.
pub fn rewrite_href(href: &str, base_url: &str) -> String {
    if href.starts_with('/') && !href.starts_with("//") {
        format!("{base_url}{href}")
    } else {
        href.to_string()
    }
}

/// Every `href` of every `<a>` in the document, in document order.
pub fn extract_links(document: &Html, base_url: &str) -> Vec<String> {
    elements(document)
        .filter(|element| element.value().name() == "a")
        .flat_map(|anchor| {
            anchor
                .value()
                .attrs()
                .filter(|(name, _)| *name == "href")
                .map(move |(_, href)| rewrite_href(href, base_url))
        })
        .collect()
}

pub fn find_body(document: &Html) -> Option<ElementRef<'_>> {
    elements(document).find(|element| element.value().name() == "body")
}

/// Collapses every whitespace run to a single space and trims both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of `element` and its descendants.
///
/// Each element level joins its non-empty child texts with a space and then
/// re-normalizes, so the result never has doubled or edge whitespace.
pub fn extract_text(element: ElementRef<'_>) -> String {
    if is_excluded(element.value().name()) {
        return String::new();
    }

    let mut text = String::new();
    for child in element.children() {
        let child_text = match child.value() {
            Node::Text(t) => t.trim().to_string(),
            Node::Element(_) => ElementRef::wrap(child)
                .map(extract_text)
                .unwrap_or_default(),
            // comments, doctypes and processing instructions
            _ => String::new(),
        };
        if !child_text.is_empty() {
            text.push_str(&child_text);
            text.push(' ');
        }
    }
    normalize_whitespace(&text)
}

/// Visible text of the document body, or an empty string without a body.
pub fn body_text(document: &Html) -> String {
    find_body(document).map(extract_text).unwrap_or_default()
}

/// Parses `html` and runs every walker over it.
///
/// `url` is both recorded in the result and used as the base for link rewriting.
pub fn snapshot(url: &str, html: &str) -> CrawlResult {
    let document = Html::parse_document(html);

    let title = find_title(&document);
    let links = extract_links(&document, url);
    let text = body_text(&document);

    debug!(
        "Extracted from {}: title={:?}, {} links, {} chars of text",
        url,
        title,
        links.len(),
        text.len()
    );

    CrawlResult {
        url: url.to_string(),
        title,
        links,
        text,
    }
}

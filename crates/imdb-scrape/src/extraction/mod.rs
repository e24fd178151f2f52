// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! Field extractors over a parsed title page.
//!
//! Every extractor takes the parsed document as an argument and returns the
//! value or `None`; nothing is cached between calls.

pub mod labeled_links;
pub mod markup;
pub mod structured;

use scraper::{ElementRef, Html, Selector};

pub use labeled_links::LabeledLinks;
pub use structured::{extract_movie_jsonld, StructuredFields};

/// Parse raw page bytes into a document. Invalid UTF-8 is replaced.
pub fn parse_page(body: &[u8]) -> Html {
    Html::parse_document(&String::from_utf8_lossy(body))
}

pub(crate) fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(css).ok()?;
    document.select(&sel).next()
}

/// True when the element has no `class` attribute, or an empty one.
pub(crate) fn has_no_class(el: &ElementRef<'_>) -> bool {
    el.value()
        .attr("class")
        .map_or(true, |c| c.trim().is_empty())
}

/// Text of the element's only child, if that child is a text node.
pub(crate) fn sole_text_child(el: ElementRef<'_>) -> Option<String> {
    let mut children = el.children();
    let only = children.next()?;
    if children.next().is_some() {
        return None;
    }
    only.value().as_text().map(|t| t.trim().to_string())
}

/// Text of the element's first child node, trimmed.
///
/// A leading element child contributes all of its text.
pub(crate) fn first_child_text(el: ElementRef<'_>) -> Option<String> {
    let first = el.children().next()?;
    if let Some(text) = first.value().as_text() {
        return Some(text.trim().to_string());
    }
    ElementRef::wrap(first).map(|child| child.text().collect::<String>().trim().to_string())
}

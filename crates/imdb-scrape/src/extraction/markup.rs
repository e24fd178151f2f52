// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! Markup extractors for the older title layout.
//!
//! These read ad-hoc HTML directly, without the JSON-LD block. Each one
//! returns `None` when its element is missing or does not have the expected
//! shape; none of them fail.

use super::labeled_links::LabeledLinks;
use super::{first_child_text, has_no_class, select_first, sole_text_child};
use scraper::{ElementRef, Html, Selector};

const RATING_SELECTOR: &str = "div.ratingValue";
const REVIEW_BAR_SELECTOR: &str = "div.titleReviewBarItem";
const TITLE_WRAPPER_SELECTOR: &str = "div.title_wrapper";

/// IMDb user rating from the rating widget, e.g. `7.8`.
///
/// The widget's first `span` must hold exactly one text node. Anything else,
/// such as an icon next to the number, is treated as unrecognized markup.
pub fn imdb_rating(document: &Html) -> Option<f64> {
    let text = widget_text(document, RATING_SELECTOR)?;
    text.parse::<f64>().ok().filter(|r| r.is_finite())
}

/// Metascore on its native 0 to 100 scale.
pub fn raw_metascore(document: &Html) -> Option<u32> {
    let text = widget_text(document, REVIEW_BAR_SELECTOR)?;
    text.parse().ok()
}

/// Metascore divided by ten, so it is comparable with [`imdb_rating`].
pub fn normalized_metascore(document: &Html) -> Option<f64> {
    raw_metascore(document).map(|score| f64::from(score) / 10.0)
}

/// Title text from the first unclassed `h1`.
pub fn title(document: &Html) -> Option<String> {
    let sel = Selector::parse("h1").ok()?;
    let heading = document.select(&sel).find(has_no_class)?;
    first_child_text(heading).filter(|t| !t.is_empty())
}

/// Production year, genres and release date from the title wrapper links.
///
/// The wrapper is serialized and re-parsed as a standalone fragment, then its
/// unclassed anchors are decoded by position.
pub fn release_info(document: &Html) -> LabeledLinks {
    let Ok(wrapper_sel) = Selector::parse(TITLE_WRAPPER_SELECTOR) else {
        return LabeledLinks::default();
    };
    let serialized: String = document
        .select(&wrapper_sel)
        .map(|div| div.html())
        .collect();
    if serialized.is_empty() {
        return LabeledLinks::default();
    }

    let fragment = Html::parse_fragment(&serialized);
    LabeledLinks::decode(anchor_labels(&fragment))
}

fn anchor_labels(fragment: &Html) -> Vec<String> {
    let Ok(sel) = Selector::parse("a") else {
        return Vec::new();
    };
    fragment
        .select(&sel)
        .filter(has_no_class)
        .map(|a| first_child_text(a).unwrap_or_default())
        .collect()
}

/// Sole text of the first `span` inside the first element matching `css`.
fn widget_text(document: &Html, css: &str) -> Option<String> {
    let container = select_first(document, css)?;
    let span = first_span(container)?;
    sole_text_child(span)
}

fn first_span(container: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let sel = Selector::parse("span").ok()?;
    container.select(&sel).next()
}

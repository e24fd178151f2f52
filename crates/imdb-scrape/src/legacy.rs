// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! Markup-only scraping of the older title layout.
//!
//! Predates the JSON-LD path: rating, title, metascore and the year/genre/
//! release-date links are all read straight from the HTML.

use crate::acquisition::http_client::HttpClient;
use crate::extraction::{markup, parse_page};
use crate::types::LegacyMovieData;
use scraper::Html;

/// Extract the legacy field set from a parsed page.
pub fn movie_data_from_html(document: &Html) -> LegacyMovieData {
    let links = markup::release_info(document);

    LegacyMovieData {
        imdb_rating: markup::imdb_rating(document),
        title: markup::title(document),
        meta_score: markup::normalized_metascore(document),
        genres: links.genres,
        production_year: links.production_year,
        release_date: links.release_date,
    }
}

/// Fetch `url` and extract the legacy field set. `None` if the fetch fails.
pub async fn movie_data(client: &HttpClient, url: &str) -> Option<LegacyMovieData> {
    let body = client.fetch(url).await?;
    Some(movie_data_from_html(&parse_page(&body)))
}

/// Fetch `url` and read only its metascore on the 0 to 10 scale.
pub async fn metascore(client: &HttpClient, url: &str) -> Option<f64> {
    let body = client.fetch(url).await?;
    markup::normalized_metascore(&parse_page(&body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_data_from_legacy_layout() {
        let doc = Html::parse_document(
            r#"<html><body>
            <div class="ratingValue"><strong><span>9.3</span></strong></div>
            <div class="title_wrapper">
              <h1>The Shawshank Redemption&nbsp;<span id="titleYear">(<a href="/year/1994">1994</a>)</span></h1>
              <div class="subtext">
                <a href="/genre/drama">Drama</a> |
                <a href="/releaseinfo">14 October 1994 (USA)</a>
              </div>
            </div>
            <div class="titleReviewBarItem"><a><div class="metacriticScore"><span>80</span></div></a></div>
            </body></html>"#,
        );

        let data = movie_data_from_html(&doc);
        assert_eq!(data.imdb_rating, Some(9.3));
        assert_eq!(data.title.as_deref(), Some("The Shawshank Redemption"));
        assert_eq!(data.meta_score, Some(8.0));
        assert_eq!(data.genres, vec!["Drama"]);
        assert_eq!(data.production_year.as_deref(), Some("1994"));
        assert_eq!(data.release_date.as_deref(), Some("14 October 1994 (USA)"));
    }

    #[test]
    fn test_movie_data_on_empty_page() {
        let data = movie_data_from_html(&Html::parse_document("<html></html>"));
        assert_eq!(data, LegacyMovieData::default());
    }
}

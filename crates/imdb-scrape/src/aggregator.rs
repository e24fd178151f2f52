// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

//! Compose the extractors into one `MovieRecord` per title.

use crate::acquisition::http_client::HttpClient;
use crate::config::Config;
use crate::extraction::{extract_movie_jsonld, markup, parse_page};
use crate::types::{MetaScore, MovieRecord};
use scraper::Html;
use tracing::{debug, info};

/// Build a record from a parsed page.
///
/// JSON-LD supplies the descriptive fields; the review bar supplies the raw
/// metascore. When no metascore is found, `fallback_rating` (the caller's
/// rating for this title) takes its place on the 0 to 10 scale. No other
/// field has a fallback.
pub fn build_record(document: &Html, fallback_rating: Option<f64>) -> MovieRecord {
    let structured = extract_movie_jsonld(document);

    let mut record = MovieRecord {
        genres: structured.genres,
        image_url: structured.image_url,
        content_rating: structured.content_rating,
        num_votes: structured.num_votes,
        imdb_rating: structured.imdb_rating,
        meta_score: markup::raw_metascore(document).map(MetaScore::Percent),
        synopsis: structured.synopsis,
        production_year: structured.production_year,
        tags: structured.tags,
        ..Default::default()
    };

    apply_metascore_fallback(&mut record, fallback_rating);
    record
}

/// Substitute `fallback_rating` for an unknown metascore. A non-finite
/// rating is ignored.
pub fn apply_metascore_fallback(record: &mut MovieRecord, fallback_rating: Option<f64>) {
    if record.meta_score.is_none() {
        record.meta_score = fallback_rating
            .filter(|r| r.is_finite())
            .map(MetaScore::Scaled);
    }
}

/// Build a record from raw page bytes.
pub fn record_from_body(body: &[u8], fallback_rating: Option<f64>) -> MovieRecord {
    let document = parse_page(body);
    build_record(&document, fallback_rating)
}

/// Fetch `url` and build its record.
///
/// A page that cannot be fetched yields a record with every field unknown;
/// the metascore fallback only applies to pages that were fetched.
pub async fn scrape_url(
    client: &HttpClient,
    url: &str,
    fallback_rating: Option<f64>,
) -> MovieRecord {
    match client.fetch(url).await {
        Some(body) => {
            let record = record_from_body(&body, fallback_rating);
            debug!(
                url,
                imdb_rating = ?record.imdb_rating,
                meta_score = ?record.meta_score,
                "extracted record"
            );
            record
        }
        None => MovieRecord::default(),
    }
}

/// Fetch the title page for `id` under `config.base_url` and build its record.
pub async fn scrape_movie(
    client: &HttpClient,
    config: &Config,
    id: &str,
    fallback_rating: Option<f64>,
) -> MovieRecord {
    let url = config.url_for(id);
    info!(id, url = %url, "scraping title");
    scrape_url(client, &url, fallback_rating).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAWSHANK: &str = r#"<html><head>
        <script type="application/ld+json">{
          "@type": "Movie",
          "genre": ["Drama"],
          "image": "https://img.example/poster.jpg",
          "contentRating": "R",
          "description": "Two imprisoned men bond.",
          "datePublished": "1994-10-14",
          "aggregateRating": {"ratingCount": 2800000, "ratingValue": 9.3}
        }</script></head><body>
        <div class="titleReviewBarItem"><span>80</span></div>
        </body></html>"#;

    #[test]
    fn test_build_record_merges_jsonld_and_markup() {
        let record = build_record(&Html::parse_document(SHAWSHANK), Some(9.3));
        assert_eq!(record.genres, vec!["Drama"]);
        assert_eq!(record.imdb_rating, Some(9.3));
        assert_eq!(record.num_votes, Some(2_800_000));
        assert_eq!(record.meta_score, Some(MetaScore::Percent(80)));
        assert_eq!(record.production_year.as_deref(), Some("1994"));
        assert_eq!(record.content_rating.as_deref(), Some("R"));
        assert!(record.language.is_none());
        assert!(record.summary.is_none());
        assert!(record.tags.is_none());
    }

    #[test]
    fn test_metascore_fallback_uses_supplied_rating() {
        let doc = Html::parse_document(
            r#"<html><body><div class="ratingValue"><span>6.5</span></div></body></html>"#,
        );
        let record = build_record(&doc, Some(7.2));
        assert_eq!(record.meta_score, Some(MetaScore::Scaled(7.2)));
        assert!(record.imdb_rating.is_none());
    }

    #[test]
    fn test_no_fallback_leaves_metascore_unknown() {
        let doc = Html::parse_document("<html><body></body></html>");
        let record = build_record(&doc, None);
        assert!(record.is_unknown());
    }

    #[test]
    fn test_fallback_does_not_override_found_metascore() {
        let mut record = MovieRecord {
            meta_score: Some(MetaScore::Percent(55)),
            ..Default::default()
        };
        apply_metascore_fallback(&mut record, Some(9.9));
        assert_eq!(record.meta_score, Some(MetaScore::Percent(55)));
    }

    #[test]
    fn test_non_finite_fallback_is_ignored() {
        let doc = Html::parse_document("<html><body></body></html>");
        assert_eq!(build_record(&doc, Some(f64::NAN)).meta_score, None);
        assert_eq!(build_record(&doc, Some(f64::INFINITY)).meta_score, None);
    }

    #[test]
    fn test_record_from_body_with_broken_jsonld_keeps_markup() {
        let body = br#"<html><head><script type="application/ld+json">{oops</script></head>
            <body><div class="titleReviewBarItem"><span>71</span></div></body></html>"#;
        let record = record_from_body(body, None);
        assert_eq!(record.meta_score, Some(MetaScore::Percent(71)));
        assert!(record.genres.is_empty());
        assert!(record.imdb_rating.is_none());
    }
}

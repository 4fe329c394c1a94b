//! Detail page parser
//!
//! Parses a title's detail page into a [`DetailRecord`]. Each field is read
//! on its own; a field whose selector matches nothing is left empty.

use scraper::{ElementRef, Html};
use tracing::{debug, trace};

use crate::site::CompiledSite;
use crate::types::{CastMember, DetailRecord, EpisodeEntry, TvKind};

use super::listing::cards_in;
use super::{element_text, first_int, parse_rating, parse_year, select_image, select_text};

/// Parse a detail page.
///
/// # Arguments
/// * `html` - Raw HTML content of the detail page
/// * `url` - URL the page was fetched from; decides movie vs series
/// * `site` - Compiled site adapter
pub fn parse_detail(html: &str, url: &str, site: &CompiledSite) -> DetailRecord {
    let document = Html::parse_document(html);
    let root = document.root_element();
    let selectors = site.selectors();
    let adapter = site.adapter();

    let kind = adapter.classify(url);

    let title = select_text(&root, &selectors.detail_title).unwrap_or_default();
    let poster_url = select_image(&root, &selectors.detail_poster, adapter);
    let year = select_text(&root, &selectors.detail_year).and_then(|text| parse_year(&text));
    let duration_minutes = select_text(&root, &selectors.detail_duration).and_then(|text| first_int(&text));
    let synopsis = select_text(&root, &selectors.detail_synopsis);
    let rating = select_text(&root, &selectors.detail_rating).and_then(|text| parse_rating(&text));

    let tags = extract_tags(&root, site);
    let cast = extract_cast(&root, site);
    let recommendations = cards_in(&root, &selectors.recommendation_card, site);

    let episodes = match kind {
        TvKind::Series => Some(
            root.select(&selectors.episode_item)
                .filter_map(|el| parse_episode(&el, site))
                .collect::<Vec<_>>(),
        ),
        TvKind::Movie => None,
    };

    debug!(
        url,
        ?kind,
        tags = tags.len(),
        cast = cast.len(),
        recommendations = recommendations.len(),
        episodes = episodes.as_ref().map_or(0, Vec::len),
        "parsed detail page"
    );

    DetailRecord {
        url: url.to_string(),
        title,
        kind,
        poster_url,
        year,
        duration_minutes,
        synopsis,
        rating,
        tags,
        cast,
        recommendations,
        episodes,
    }
}

/// Parse a single episode node.
///
/// # Returns
/// `None` if the node has no link. The title falls back to the link text
/// and `episode_number` is the first number in the title.
pub fn parse_episode(element: &ElementRef, site: &CompiledSite) -> Option<EpisodeEntry> {
    let selectors = site.selectors();
    let adapter = site.adapter();

    let link = element.select(&selectors.episode_link).next()?;
    let Some(href) = link.value().attr("href").map(str::trim).filter(|h| !h.is_empty()) else {
        trace!("skipping episode without link");
        return None;
    };

    let title = select_text(element, &selectors.episode_title).unwrap_or_else(|| element_text(&link));
    let episode_number = first_int(&title);

    Some(EpisodeEntry {
        url: adapter.resolve_url(href),
        title,
        episode_number,
        poster_url: select_image(element, &selectors.episode_poster, adapter),
    })
}

/// Genre tags in document order, duplicates removed.
fn extract_tags(root: &ElementRef, site: &CompiledSite) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for el in root.select(&site.selectors().detail_tags) {
        let text = element_text(&el);
        if !text.is_empty() && !tags.contains(&text) {
            tags.push(text);
        }
    }
    tags
}

/// Cast members in document order; entries without a name are skipped.
fn extract_cast(root: &ElementRef, site: &CompiledSite) -> Vec<CastMember> {
    let selectors = site.selectors();
    root.select(&selectors.cast_item)
        .filter_map(|person| {
            let name = select_text(&person, &selectors.cast_name)?;
            let image_url = select_image(&person, &selectors.cast_image, site.adapter());
            Some(CastMember { name, image_url })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn site() -> CompiledSite {
        CompiledSite::faselhd().unwrap()
    }

    const MOVIE_PAGE: &str = r#"
        <html><body>
          <div class="title"><h1>Dune</h1></div>
          <div class="poster"><img src="https://img.example/dune-big.jpg"></div>
          <span class="year">2021</span>
          <span class="runtime">155 min</span>
          <span class="rating">8.0</span>
          <div class="description">
            Paul Atreides travels to   Arrakis.
          </div>
          <div class="genres"><a>Sci-Fi</a><a>Drama</a><a>Sci-Fi</a></div>
          <div class="cast">
            <div class="person"><img src="/cast/tc.jpg"><div class="name">Timothée Chalamet</div></div>
            <div class="person"><div class="name">Zendaya</div></div>
            <div class="person"><img src="/cast/nobody.jpg"></div>
          </div>
          <div class="related">
            <div class="poster"><a href="/movies/arrival"><div class="h1">Arrival</div></a></div>
            <div class="poster"><a href="/series/dark"><div class="h1">Dark</div></a></div>
            <div class="poster"><div class="h1">Broken</div></div>
          </div>
          <div class="servers-list"><li data-link="https://player.example/e/1">1080p</li></div>
        </body></html>
    "#;

    const SERIES_PAGE: &str = r#"
        <html><body>
          <div class="title"><h1>Dark</h1></div>
          <div class="episodes">
            <div class="episode"><a href="/episode/dark-1"><img src="/t/1.jpg"><h3>Episode 1: Secrets</h3></a></div>
            <div class="episode"><a href="/episode/dark-12"><h3>Episode 12: Finale</h3></a></div>
            <div class="episode"><a href="/episode/dark-special">Special</a></div>
            <div class="episode"><h3>Episode 13</h3></div>
          </div>
        </body></html>
    "#;

    #[test]
    fn test_parse_movie_detail() {
        let detail = parse_detail(MOVIE_PAGE, "https://www.faselhds.care/movies/dune-2021", &site());

        assert_eq!(detail.kind, TvKind::Movie);
        assert!(detail.episodes.is_none());
        assert_eq!(detail.title, "Dune");
        assert_eq!(detail.poster_url, "https://img.example/dune-big.jpg");
        assert_eq!(detail.year, Some(2021));
        assert_eq!(detail.duration_minutes, Some(155));
        assert_eq!(detail.rating, Some(8.0));
        assert_eq!(detail.synopsis.as_deref(), Some("Paul Atreides travels to Arrakis."));
        assert_eq!(detail.tags, vec!["Sci-Fi".to_string(), "Drama".to_string()]);
    }

    #[test]
    fn test_parse_cast() {
        let detail = parse_detail(MOVIE_PAGE, "https://www.faselhds.care/movies/dune-2021", &site());

        assert_eq!(detail.cast.len(), 2);
        assert_eq!(detail.cast[0].name, "Timothée Chalamet");
        assert_eq!(detail.cast[0].image_url, "https://www.faselhds.care/cast/tc.jpg");
        assert_eq!(detail.cast[1].name, "Zendaya");
        assert_eq!(detail.cast[1].image_url, "");
    }

    #[test]
    fn test_parse_recommendations() {
        let detail = parse_detail(MOVIE_PAGE, "https://www.faselhds.care/movies/dune-2021", &site());

        let titles: Vec<_> = detail.recommendations.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Arrival", "Dark"]);
        assert_eq!(detail.recommendations[1].kind, TvKind::Series);
    }

    #[test]
    fn test_parse_series_episodes() {
        let detail = parse_detail(SERIES_PAGE, "https://www.faselhds.care/series/dark", &site());

        assert_eq!(detail.kind, TvKind::Series);
        let episodes = detail.episodes.expect("series must have an episode list");
        assert_eq!(episodes.len(), 3);

        assert_eq!(episodes[0].url, "https://www.faselhds.care/episode/dark-1");
        assert_eq!(episodes[0].episode_number, Some(1));
        assert_eq!(episodes[0].poster_url, "https://www.faselhds.care/t/1.jpg");

        assert_eq!(episodes[1].title, "Episode 12: Finale");
        assert_eq!(episodes[1].episode_number, Some(12));
        assert_eq!(episodes[1].poster_url, "");

        assert_eq!(episodes[2].title, "Special");
        assert_eq!(episodes[2].episode_number, None);
    }

    #[test]
    fn test_episode_url_classifies_as_series() {
        let detail = parse_detail(SERIES_PAGE, "https://www.faselhds.care/episode/dark-1", &site());
        assert_eq!(detail.kind, TvKind::Series);
        assert!(detail.episodes.is_some());
    }

    #[test]
    fn test_movie_url_ignores_episode_nodes() {
        let detail = parse_detail(SERIES_PAGE, "https://www.faselhds.care/movies/dark", &site());
        assert_eq!(detail.kind, TvKind::Movie);
        assert!(detail.episodes.is_none());
    }

    #[test]
    fn test_parse_empty_detail() {
        let detail = parse_detail("<html><body></body></html>", "https://www.faselhds.care/series/x", &site());
        assert_eq!(detail.title, "");
        assert_eq!(detail.poster_url, "");
        assert_eq!(detail.year, None);
        assert_eq!(detail.duration_minutes, None);
        assert_eq!(detail.synopsis, None);
        assert_eq!(detail.rating, None);
        assert!(detail.tags.is_empty());
        assert!(detail.cast.is_empty());
        assert!(detail.recommendations.is_empty());
        assert_eq!(detail.episodes, Some(Vec::new()));
    }

    proptest! {
        #[test]
        fn prop_kind_follows_path_token(
            slug in "[a-z0-9-]{1,20}",
            prefix in prop_oneof![
                Just("movies"), Just("series"), Just("episode"), Just("anime")
            ],
        ) {
            let url = format!("https://www.faselhds.care/{}/{}", prefix, slug);
            let detail = parse_detail("<html></html>", &url, &site());
            let expected = if prefix == "series" || prefix == "episode" {
                TvKind::Series
            } else {
                TvKind::Movie
            };
            prop_assert_eq!(detail.kind, expected);
            prop_assert_eq!(detail.episodes.is_some(), expected == TvKind::Series);
        }
    }
}

use catalog_core::{CatalogScraper, TvKind};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("catalog_core=info")))
        .init();

    let query = std::env::args().nth(1).unwrap_or_else(|| "Dark".to_string());
    let scraper = CatalogScraper::new()?;

    println!("Searching for '{}'...\n", query);
    let results = scraper.search(&query).await?;

    println!("Found {} results:", results.len());
    for (i, item) in results.iter().enumerate() {
        let year = item.year.map(|y| y.to_string()).unwrap_or_else(|| "—".to_string());
        println!("  {}. {} ({}) [{:?}] {}", i + 1, item.title, year, item.kind, item.url);
    }

    let Some(first) = results.first() else {
        return Ok(());
    };

    println!("\nLoading detail: {}\n", first.url);
    let detail = scraper.load_detail(&first.url).await?;

    println!("Title: {}", detail.title);
    if let Some(year) = detail.year {
        println!("Year: {}", year);
    }
    if let Some(minutes) = detail.duration_minutes {
        println!("Duration: {} min", minutes);
    }
    if let Some(rating) = detail.rating {
        println!("Rating: {:.1}/10", rating);
    }
    println!("Tags: {}", detail.tags.join(", "));
    println!(
        "Cast: {}",
        detail.cast.iter().map(|c| c.name.as_str()).collect::<Vec<_>>().join(", ")
    );
    println!("Recommendations: {}", detail.recommendations.len());

    let links_url = match (&detail.kind, &detail.episodes) {
        (TvKind::Series, Some(episodes)) => {
            println!("\nEpisodes ({}):", episodes.len());
            for ep in episodes {
                let number = ep.episode_number.map(|n| n.to_string()).unwrap_or_else(|| "?".to_string());
                println!("  #{} {}", number, ep.title);
            }
            episodes.first().map(|ep| ep.url.clone())
        }
        _ => Some(detail.url.clone()),
    };

    if let Some(url) = links_url {
        println!("\nStream links for {}:", url);
        let found = scraper
            .extract_stream_links(&url, |_| {}, |link| {
                println!("  [{:?}] {}", link.quality, link.source_url);
            })
            .await?;
        println!("Page fetched: {}", found);
    }

    Ok(())
}

use catalog_core::CatalogScraper;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let scraper = CatalogScraper::new()?;

    for section in scraper.main_page() {
        println!("\n{}", "=".repeat(60));
        println!("{} ({})", section.label, section.url);
        println!("{}\n", "=".repeat(60));

        for page in 1..=2 {
            let listing = scraper.list_catalog(&section.url, page).await?;
            println!("Page {}: {} titles", listing.current_page, listing.items.len());
            for item in listing.items.iter().take(5) {
                let quality = item.quality.as_deref().unwrap_or("-");
                println!("  • {} [{:?}, {}]", item.title, item.kind, quality);
            }

            if !listing.has_next_page {
                break;
            }
        }
    }

    Ok(())
}

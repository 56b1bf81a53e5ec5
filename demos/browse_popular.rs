// demos/browse_popular.rs
use std::sync::Arc;

use anyhow::Context;
use cinelist::{PagedCollection, QueryMode, TmdbClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api_key = std::env::var("TMDB_API_KEY").context("TMDB_API_KEY is not set")?;
    let source = Arc::new(TmdbClient::new(api_key));
    let collection = PagedCollection::new(source);

    collection.reset_and_load(QueryMode::Browse).await;
    collection.advance_page().await;

    if let Some(err) = collection.error() {
        eprintln!("load failed: {err}");
        return Ok(());
    }

    println!(
        "Loaded {} of {:?} movies (page {} of {:?})",
        collection.len(),
        collection.total_count(),
        collection.current_page(),
        collection.total_pages()
    );
    for movie in collection.items() {
        let year = movie
            .release_date
            .map(|date| date.format("%Y").to_string())
            .unwrap_or_else(|| "????".to_string());
        println!("{} ({}) - rating {:?}", movie.title, year, movie.rating);
    }
    Ok(())
}

use crate::config::Config;
use crate::state::SharedState;

pub async fn cmd_search_movies(config: &Config, query: &str) -> anyhow::Result<()> {
    println!("Searching for: {query}");

    let state = SharedState::new(config.clone()).await?;
    let movies = state.movie_service.search_movies(query).await?;

    if movies.is_empty() {
        println!("No movies found for \"{query}\"");
        return Ok(());
    }

    println!();
    println!("Found {} movies:", movies.len());
    println!("{:-<60}", "");

    for movie in &movies {
        println!("• {} ({})", movie.title, movie.year);
        println!(
            "  ID: {} | Poster: {}",
            movie.imdb_id,
            movie.poster.as_deref().unwrap_or("none")
        );
    }

    println!();
    println!("To save one: screen-search favorites add <imdb_id> <title> <year>");

    Ok(())
}

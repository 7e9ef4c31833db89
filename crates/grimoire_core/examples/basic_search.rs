/*!
Basic usage example for the card worker.

Run with: `cargo run --example basic_search`
*/

use grimoire_core::{CardWorker, Restrictions, SortSpec};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    // Create a worker with default settings and load the corpus
    let worker = CardWorker::new()?;
    worker.initialize().await?;

    // Run a paginated search: free text goes through the fuzzy path,
    // operator queries through the parser
    let page = worker.paginated_unified_search(
        "t:creature c:g mv<=2",
        &Restrictions::default(),
        SortSpec::default(),
        0,
        10,
    )?;

    println!("{} matches ({:?} mode)", page.total_count, page.mode);
    for (i, card) in page.cards.iter().enumerate() {
        println!("{}. {} — {}", i + 1, card.name, card.type_line);
    }

    if let Some(error) = page.error {
        println!(
            "query error at {}..{}: {}",
            error.span.start, error.span.end, error.message
        );
    }

    Ok(())
}

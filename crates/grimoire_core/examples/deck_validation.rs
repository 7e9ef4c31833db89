/*!
Deck validation example: build a small deck from search results and run it
through the format rules.

Run with: `cargo run --example deck_validation`
*/

use grimoire_core::{
    CardWorker, Deck, DeckEntry, Restrictions, Section, SortSpec, SyntaxSearchResult,
    ValidateOptions,
};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let worker = CardWorker::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;
    worker.initialize().await?;

    // Pull a playset of burn spells
    let cards = match worker.syntax_search(r#"!"Lightning Bolt""#, 1, SortSpec::default())? {
        SyntaxSearchResult::Cards(cards) => cards,
        SyntaxSearchResult::ParseFailed(error) => {
            println!("bad query: {error}");
            return Ok(());
        }
    };

    let mut deck = Deck {
        name: "kitchen burn".to_string(),
        format: Some("modern".to_string()),
        cards: Vec::new(),
    };
    for card in &cards {
        deck.cards.push(DeckEntry {
            printing: card.id,
            oracle: card.oracle_id,
            section: Section::Mainboard,
            quantity: 4,
            tags: Vec::new(),
        });
    }

    let report = worker.validate_deck(&deck, &ValidateOptions::default())?;
    println!("valid: {}", report.valid);
    for violation in &report.violations {
        println!(
            "[{:?}/{:?}] {}",
            violation.category, violation.severity, violation.message
        );
    }

    // Restrictions narrow searches the same way deck rules do
    let legal_in_pauper = worker.search_cards(
        "lightning bolt",
        &Restrictions {
            format: Some("pauper".to_string()),
            color_identity: None,
        },
        5,
    )?;
    println!("{} pauper-legal name matches", legal_in_pauper.len());

    Ok(())
}

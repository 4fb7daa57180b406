use anyhow::Result;
use clap::{Parser, Subcommand};
use tarot_core::models::{Card, TarotCard, TarotRequest};
use tarot_core::{Config, db, reading};
use tracing::info;
use uuid::Uuid;

/// The 22 major arcana, in traditional order.
const MAJOR_ARCANA: &[&str] = &[
    "The Fool",
    "The Magician",
    "The High Priestess",
    "The Empress",
    "The Emperor",
    "The Hierophant",
    "The Lovers",
    "The Chariot",
    "Strength",
    "The Hermit",
    "Wheel of Fortune",
    "Justice",
    "The Hanged Man",
    "Death",
    "Temperance",
    "The Devil",
    "The Tower",
    "The Star",
    "The Moon",
    "The Sun",
    "Judgement",
    "The World",
];

#[derive(Parser)]
#[command(name = "tarot")]
#[command(about = "Tarot reading CLI backed by a chat completions API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question about a drawn spread
    Read {
        /// Free-text question
        question: String,

        /// Drawn cards, e.g. "Fool" "Tower:reversed"
        #[arg(required = true)]
        cards: Vec<String>,
    },

    /// Add a card to the deck store
    Add {
        /// Card name
        name: String,

        /// Upright meaning text
        #[arg(long)]
        upright: Option<String>,

        /// Reversed meaning text
        #[arg(long)]
        reversed: Option<String>,
    },

    /// Show a stored card by id
    Get {
        /// Card id
        id: Uuid,
    },

    /// Update a stored card
    Update {
        /// Card id
        id: Uuid,

        /// New card name
        #[arg(long)]
        name: Option<String>,

        /// New upright meaning text
        #[arg(long)]
        upright: Option<String>,

        /// New reversed meaning text
        #[arg(long)]
        reversed: Option<String>,
    },

    /// Delete a stored card by id
    Delete {
        /// Card id
        id: Uuid,
    },

    /// List stored cards
    List,

    /// Seed the store with the 22 major arcana
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    // Load .env
    dotenvy::dotenv().ok();

    // Initialize database
    let db_config = db::DbConfig::from_env();
    db::init_database(&db_config).await?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Read { question, cards } => {
            read_command(question, cards).await?;
        }
        Commands::Add {
            name,
            upright,
            reversed,
        } => {
            add_command(name, upright, reversed).await?;
        }
        Commands::Get { id } => {
            get_command(id).await?;
        }
        Commands::Update {
            id,
            name,
            upright,
            reversed,
        } => {
            update_command(id, name, upright, reversed).await?;
        }
        Commands::Delete { id } => {
            delete_command(id).await?;
        }
        Commands::List => {
            list_command().await?;
        }
        Commands::Seed => {
            seed_command().await?;
        }
    }

    Ok(())
}

/// Parse a card argument: "Tower" or "Tower:reversed".
fn parse_card(spec: &str) -> Card {
    match spec.strip_suffix(":reversed") {
        Some(name) => Card::new(name.trim(), true),
        None => Card::new(spec.trim(), false),
    }
}

async fn read_command(question: String, card_specs: Vec<String>) -> Result<()> {
    let config = Config::from_env()?;
    let cards = card_specs.iter().map(|spec| parse_card(spec)).collect();

    let request = TarotRequest {
        text: question,
        cards,
    };
    let response = reading::tarot_reading(request, &config).await?;

    println!("Spread:");
    for card in &response.cards {
        println!("  - {}", card.label());
    }
    println!();
    println!("{}", response.answer);

    Ok(())
}

async fn add_command(
    name: String,
    upright: Option<String>,
    reversed: Option<String>,
) -> Result<()> {
    let mut card = TarotCard::new(&name);
    card.upright_meaning = upright;
    card.reversed_meaning = reversed;

    db::insert_card(&card).await?;
    println!("Added card {} ({})", card.name, card.id);

    Ok(())
}

async fn get_command(id: Uuid) -> Result<()> {
    match db::get_card(id).await? {
        Some(card) => println!("{}", serde_json::to_string_pretty(&card)?),
        None => println!("Card not found: {id}"),
    }

    Ok(())
}

async fn update_command(
    id: Uuid,
    name: Option<String>,
    upright: Option<String>,
    reversed: Option<String>,
) -> Result<()> {
    let Some(mut card) = db::get_card(id).await? else {
        println!("Card not found: {id}");
        return Ok(());
    };

    if let Some(name) = name {
        card.name = name;
    }
    if upright.is_some() {
        card.upright_meaning = upright;
    }
    if reversed.is_some() {
        card.reversed_meaning = reversed;
    }

    db::update_card(&card).await?;
    println!("Updated card {} ({})", card.name, card.id);

    Ok(())
}

async fn delete_command(id: Uuid) -> Result<()> {
    if db::delete_card(id).await? {
        println!("Deleted card {id}");
    } else {
        println!("Card not found: {id}");
    }

    Ok(())
}

async fn list_command() -> Result<()> {
    let cards = db::list_cards().await?;

    if cards.is_empty() {
        println!("No cards stored. Run `tarot seed` to load the major arcana.");
        return Ok(());
    }

    println!("{} cards:", cards.len());
    for card in cards {
        println!("  {}  {}", card.id, card.name);
    }

    Ok(())
}

async fn seed_command() -> Result<()> {
    let existing: std::collections::HashSet<String> = db::list_cards()
        .await?
        .into_iter()
        .map(|card| card.name)
        .collect();

    let mut added = 0;
    for name in MAJOR_ARCANA {
        if existing.contains(*name) {
            continue;
        }
        db::insert_card(&TarotCard::new(name)).await?;
        added += 1;
    }

    info!("Seeded {} cards ({} already present)", added, existing.len());
    println!("Seeded {added} cards");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_card_handles_orientation_suffix() {
        assert_eq!(parse_card("Fool"), Card::new("Fool", false));
        assert_eq!(parse_card("Tower:reversed"), Card::new("Tower", true));
        assert_eq!(parse_card("  The Star  "), Card::new("The Star", false));
    }

    #[test]
    fn major_arcana_has_22_cards() {
        assert_eq!(MAJOR_ARCANA.len(), 22);
    }
}

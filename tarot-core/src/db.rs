//! Card store using Turso (embedded SQLite)
//!
//! This module provides:
//! - Database connection management
//! - CRUD operations over the `tarot_cards` table
//!
//! Card data is stored as a JSON column keyed by UUID; no custom queries
//! beyond the plain CRUD surface.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;
use turso::{Builder, Connection, Database};
use uuid::Uuid;

use crate::models::TarotCard;

/// Global database instance
static DATABASE: OnceCell<Arc<Database>> = OnceCell::const_new();

/// Database configuration
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to database file
    pub path: String,
}

impl DbConfig {
    /// Load config from environment variables
    ///
    /// - `DATABASE_PATH`: Path to the database file (default: "data/tarot.db")
    pub fn from_env() -> Self {
        let path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/tarot.db".to_string());

        Self { path }
    }
}

/// Initialize the database and create all tables
pub async fn init_database(config: &DbConfig) -> Result<()> {
    // Ensure directory exists
    if let Some(parent) = std::path::Path::new(&config.path).parent() {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }

    let db = Builder::new_local(&config.path)
        .build()
        .await
        .context("Failed to open database")?;

    let conn = db.connect().context("Failed to connect to database")?;

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS tarot_cards (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            card_data TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )
        "#,
        (),
    )
    .await
    .context("Failed to create tarot_cards table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tarot_cards_name ON tarot_cards(name)",
        (),
    )
    .await
    .context("Failed to create card name index")?;

    DATABASE
        .set(Arc::new(db))
        .map_err(|_| anyhow::anyhow!("Database already initialized"))?;

    info!("Database initialized at {}", config.path);
    Ok(())
}

/// Get a database connection
pub fn get_connection() -> Result<Connection> {
    let db = DATABASE
        .get()
        .ok_or_else(|| anyhow::anyhow!("Database not initialized. Call init_database first."))?;

    db.connect().context("Failed to get database connection")
}

/// Check if database is initialized
pub fn is_initialized() -> bool {
    DATABASE.get().is_some()
}

fn unix_now() -> Result<i64> {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .context("System time error")?
        .as_secs() as i64;
    Ok(now)
}

/// Insert a new card
///
/// Fails if a card with the same id already exists.
pub async fn insert_card(card: &TarotCard) -> Result<()> {
    let conn = get_connection()?;

    let now = unix_now()?;
    let id = card.id.to_string();
    let card_json = serde_json::to_string(card).context("Failed to serialize card")?;

    conn.execute(
        r#"
        INSERT INTO tarot_cards (id, name, card_data, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
        (
            id.as_str(),
            card.name.as_str(),
            card_json.as_str(),
            now,
            now,
        ),
    )
    .await
    .context("Failed to insert card")?;

    Ok(())
}

/// Get card by ID
pub async fn get_card(id: Uuid) -> Result<Option<TarotCard>> {
    let conn = get_connection()?;

    let id = id.to_string();
    let mut rows = conn
        .query("SELECT card_data FROM tarot_cards WHERE id = ?", [id.as_str()])
        .await
        .context("Failed to query card by ID")?;

    if let Some(row) = rows.next().await? {
        let card_json: String = row.get(0)?;
        let card: TarotCard =
            serde_json::from_str(&card_json).context("Failed to parse card JSON")?;
        Ok(Some(card))
    } else {
        Ok(None)
    }
}

/// Update an existing card
///
/// Returns false when no card with the given id exists.
pub async fn update_card(card: &TarotCard) -> Result<bool> {
    let conn = get_connection()?;

    let now = unix_now()?;
    let id = card.id.to_string();
    let card_json = serde_json::to_string(card).context("Failed to serialize card")?;

    let result = conn
        .execute(
            "UPDATE tarot_cards SET name = ?, card_data = ?, updated_at = ? WHERE id = ?",
            (card.name.as_str(), card_json.as_str(), now, id.as_str()),
        )
        .await
        .context("Failed to update card")?;

    Ok(result > 0)
}

/// Delete card by ID
pub async fn delete_card(id: Uuid) -> Result<bool> {
    let conn = get_connection()?;

    let id = id.to_string();
    let result = conn
        .execute("DELETE FROM tarot_cards WHERE id = ?", [id.as_str()])
        .await
        .context("Failed to delete card")?;

    Ok(result > 0)
}

/// List all cards, ordered by name
pub async fn list_cards() -> Result<Vec<TarotCard>> {
    let conn = get_connection()?;

    let mut rows = conn
        .query("SELECT card_data FROM tarot_cards ORDER BY name", ())
        .await
        .context("Failed to list cards")?;

    let mut cards = Vec::new();
    while let Some(row) = rows.next().await? {
        let card_json: String = row.get(0)?;
        let card: TarotCard =
            serde_json::from_str(&card_json).context("Failed to parse card JSON")?;
        cards.push(card);
    }

    Ok(cards)
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single drawn card in a spread: name plus orientation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    #[serde(default)]
    pub reversed: bool,
}

impl Card {
    #[must_use]
    pub fn new(name: impl Into<String>, reversed: bool) -> Self {
        Self {
            name: name.into(),
            reversed,
        }
    }

    /// Prompt form of the card: the name, with a "(reversed)" marker when
    /// the card is drawn upside down.
    #[must_use]
    pub fn label(&self) -> String {
        if self.reversed {
            format!("{} (reversed)", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// A reading request: free-text question plus the drawn cards, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TarotRequest {
    pub text: String,
    pub cards: Vec<Card>,
}

/// A completed reading: the original cards paired with the generated answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TarotResponse {
    pub cards: Vec<Card>,
    pub answer: String,
}

/// A deck card as stored in the database, keyed by UUID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TarotCard {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub upright_meaning: Option<String>,
    #[serde(default)]
    pub reversed_meaning: Option<String>,
}

impl TarotCard {
    /// Create a new card with a freshly generated id.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            upright_meaning: None,
            reversed_meaning: None,
        }
    }
}

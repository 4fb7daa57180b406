pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod openai;
pub mod reading;

// Re-export commonly used types
pub use config::Config;
pub use db::DbConfig;
pub use models::{Card, TarotCard, TarotRequest, TarotResponse};

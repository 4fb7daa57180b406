//! Shared HTTP client utilities
//!
//! A single lazily-initialized client is used for all API calls, which
//! allows connection pooling and keeps timeout behaviour in one place.

use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;

/// Default HTTP timeout for API requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Global HTTP client
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get or create the shared HTTP client
///
/// The client has a 60-second timeout, suitable for chat completions.
pub fn get_client() -> &'static Client {
    HTTP_CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent("tarot-rs/1.0")
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client - this should never fail")
    })
}

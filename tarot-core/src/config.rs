use anyhow::{Context, Result};
use regex::Regex;

/// Default chat completions endpoint
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model used when GPT_API_MODEL env var is not set
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const DEFAULT_AUTH_TYPE: &str = "Bearer";
const DEFAULT_MAX_TOKENS: &str = "1000";
const DEFAULT_TEMPERATURE: &str = "0.7";

/// Symbols some models decorate answers with; stripped from the output.
const DEFAULT_STRIP_PATTERN: &str = r#"["*#_`]"#;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub auth_type: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub strip_pattern: Regex,
}

impl Config {
    /// Load configuration from .env file and environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Missing .env is not an error

        let api_key = std::env::var("GPT_API_KEY").context("GPT_API_KEY not set")?;

        let api_url =
            std::env::var("GPT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let auth_type =
            std::env::var("GPT_API_AUTH_TYPE").unwrap_or_else(|_| DEFAULT_AUTH_TYPE.to_string());

        let model = std::env::var("GPT_API_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let max_tokens = std::env::var("GPT_API_MAX_TOKENS")
            .unwrap_or_else(|_| DEFAULT_MAX_TOKENS.to_string())
            .parse()
            .context("Invalid GPT_API_MAX_TOKENS")?;

        let temperature = std::env::var("GPT_API_TEMPERATURE")
            .unwrap_or_else(|_| DEFAULT_TEMPERATURE.to_string())
            .parse()
            .context("Invalid GPT_API_TEMPERATURE")?;

        let strip_pattern = std::env::var("GPT_STRIP_PATTERN")
            .unwrap_or_else(|_| DEFAULT_STRIP_PATTERN.to_string());
        let strip_pattern =
            Regex::new(&strip_pattern).context("Invalid GPT_STRIP_PATTERN")?;

        Ok(Self {
            api_url,
            auth_type,
            api_key,
            model,
            max_tokens,
            temperature,
            strip_pattern,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test touching process environment to avoid races between
    // parallel test threads.
    #[test]
    fn from_env_parses_and_rejects_non_numeric_values() {
        unsafe {
            std::env::set_var("GPT_API_KEY", "sk-test-123");
            std::env::set_var("GPT_API_MAX_TOKENS", "500");
            std::env::set_var("GPT_API_TEMPERATURE", "0.3");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_key, "sk-test-123");
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.auth_type, "Bearer");
        assert_eq!(config.model, DEFAULT_MODEL);

        unsafe {
            std::env::set_var("GPT_API_MAX_TOKENS", "lots");
        }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("GPT_API_MAX_TOKENS"));

        unsafe {
            std::env::set_var("GPT_API_MAX_TOKENS", "500");
            std::env::set_var("GPT_API_TEMPERATURE", "warm");
        }
        let err = Config::from_env().unwrap_err();
        assert!(err.to_string().contains("GPT_API_TEMPERATURE"));

        unsafe {
            std::env::remove_var("GPT_API_KEY");
            std::env::remove_var("GPT_API_MAX_TOKENS");
            std::env::remove_var("GPT_API_TEMPERATURE");
        }
    }

    #[test]
    fn default_strip_pattern_compiles() {
        let re = Regex::new(DEFAULT_STRIP_PATTERN).unwrap();
        assert_eq!(re.replace_all(r#"**"Fool"**"#, ""), "Fool");
    }
}

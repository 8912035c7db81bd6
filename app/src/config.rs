//! Configuration management for the tasklist client.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A `.env` file in the working directory is read first when present.

use std::env;
use tasklist_api::ApiConfig;

/// Default todo-list backend
pub const DEFAULT_BASE_URL: &str = "https://social-network.samuraijs.com/api/1.1";

/// Default films service
pub const DEFAULT_FILMS_BASE_URL: &str = "https://exams-frontend.kimitsu.it-incubator.io/api/";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Todo-list backend base URL (`TASKLIST_BASE_URL`)
    pub base_url: String,
    /// Bearer token (`TASKLIST_TOKEN`)
    pub token: Option<String>,
    /// `API-KEY` header value (`TASKLIST_API_KEY`)
    pub api_key: Option<String>,
    /// Films service base URL (`TASKLIST_FILMS_BASE_URL`)
    pub films_base_url: String,
    /// Tracing filter (`RUST_LOG`)
    pub log_filter: String,
    /// Install the Prometheus recorder and print metrics (`TASKLIST_METRICS`)
    pub metrics: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    /// Load configuration from the process environment, after `.env`.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup; unset or empty keys take
    /// their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            base_url: var("TASKLIST_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            token: var("TASKLIST_TOKEN"),
            api_key: var("TASKLIST_API_KEY"),
            films_base_url: var("TASKLIST_FILMS_BASE_URL")
                .unwrap_or_else(|| DEFAULT_FILMS_BASE_URL.to_string()),
            log_filter: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            metrics: var("TASKLIST_METRICS")
                .is_some_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes")),
        }
    }

    /// Transport config for the todo-list backend
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.base_url.clone())
            .with_token(self.token.clone())
            .with_api_key(self.api_key.clone())
    }

    /// Transport config for the films service (no credentials)
    #[must_use]
    pub fn films_api_config(&self) -> ApiConfig {
        ApiConfig::new(self.films_base_url.clone())
    }
}

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Every external credential is optional. A missing key switches the matching
/// feature to its mock or sample-data path instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub database_url: Option<String>,
    pub gemini_api_key: Option<String>,
    pub youtube_api_key: Option<String>,
    pub pexels_api_key: Option<String>,
    pub news_api_key: Option<String>,
    pub exchange_api_key: Option<String>,
    pub jsearch_api_key: Option<String>,
    pub jwt_secret: String,
    pub access_token_expire_minutes: i64,
    /// Debug bypass credential, only active when both halves are set.
    pub debug_login: Option<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8000,
            rust_log: "info".to_string(),
            database_url: None,
            gemini_api_key: None,
            youtube_api_key: None,
            pexels_api_key: None,
            news_api_key: None,
            exchange_api_key: None,
            jsearch_api_key: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            access_token_expire_minutes: 30,
            debug_login: None,
        }
    }
}

const DEV_JWT_SECRET: &str = "dev_secret_key";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let debug_login = match (optional_env("AUTH_DEBUG_USER"), optional_env("AUTH_DEBUG_PASSWORD")) {
            (Some(user), Some(password)) => Some((user, password)),
            _ => None,
        };

        Ok(Config {
            port: optional_env("PORT")
                .unwrap_or_else(|| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            database_url: optional_env("DATABASE_URL"),
            gemini_api_key: optional_env("GEMINI_API_KEY").or_else(|| optional_env("GOOGLE_API_KEY")),
            youtube_api_key: optional_env("YOUTUBE_API_KEY"),
            pexels_api_key: optional_env("PEXELS_API_KEY"),
            news_api_key: optional_env("NEWS_API_KEY"),
            exchange_api_key: optional_env("EXCHANGE_API_KEY"),
            jsearch_api_key: optional_env("JSEARCH_API_KEY"),
            jwt_secret: optional_env("JWT_SECRET").unwrap_or_else(|| DEV_JWT_SECRET.to_string()),
            access_token_expire_minutes: optional_env("ACCESS_TOKEN_EXPIRE_MINUTES")
                .unwrap_or_else(|| "30".to_string())
                .parse::<i64>()
                .context("ACCESS_TOKEN_EXPIRE_MINUTES must be an integer")?,
            debug_login,
        })
    }
}

/// Reads an environment variable, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

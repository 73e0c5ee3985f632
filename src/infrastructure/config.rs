use std::env;
use std::fmt;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Shared secret used to verify session tokens
    pub api_secret: String,
    /// Expected token audience; skipped when unset
    pub api_key: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    /// Reject non-numeric reward values instead of storing NaN
    pub strict_values: bool,
}

#[derive(Debug)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

fn flag(name: &str) -> bool {
    env::var(name)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://affiliate_rewards.db?mode=rwc".to_string());

        let api_secret = match env::var("SHOPIFY_API_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if cfg!(debug_assertions) => "secret".to_string(),
            _ => {
                return Err(ConfigError(
                    "SHOPIFY_API_SECRET environment variable must be set in production".into(),
                ));
            }
        };

        Ok(Self {
            database_url,
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            api_secret,
            api_key: env::var("SHOPIFY_API_KEY").ok().filter(|k| !k.is_empty()),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(Vec::new),
            strict_values: flag("REWARDS_STRICT_VALUES"),
        })
    }

    /// Configuration for tests and embedded use: in-memory database, debug secret
    pub fn for_testing() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            port: 0,
            api_secret: "secret".to_string(),
            api_key: None,
            cors_allowed_origins: Vec::new(),
            strict_values: false,
        }
    }
}

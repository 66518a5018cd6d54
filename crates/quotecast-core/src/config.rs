use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Top-level config (quotecast.toml + QUOTECAST_* env overrides).
///
/// The bot token is deliberately NOT part of the config file — it is the
/// single positional CLI argument, so a config file can be committed without
/// leaking credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotecastConfig {
    #[serde(default)]
    pub quotes: QuotesConfig,
}

impl Default for QuotecastConfig {
    fn default() -> Self {
        Self {
            quotes: QuotesConfig::default(),
        }
    }
}

/// Quote corpus configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotesConfig {
    /// Path to the JSON corpus file. Re-read on every quote request.
    #[serde(default = "default_quotes_path")]
    pub path: String,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            path: default_quotes_path(),
        }
    }
}

fn default_quotes_path() -> String {
    "quotes.json".to_string()
}

impl QuotecastConfig {
    /// Load config from a TOML file with QUOTECAST_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. QUOTECAST_CONFIG env var
    ///   3. ./quotecast.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .or_else(|| std::env::var("QUOTECAST_CONFIG").ok())
            .unwrap_or_else(|| "quotecast.toml".to_string());

        let config: QuotecastConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("QUOTECAST_").split("_"))
            .extract()
            .map_err(|e| crate::error::CoreError::Config(e.to_string()))?;

        Ok(config)
    }
}

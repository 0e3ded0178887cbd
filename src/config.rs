//! Process configuration loaded from environment variables

use thiserror::Error;

/// Configuration required to start the server
///
/// All values are read once at startup. Missing required variables abort
/// the process before any route is served.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API key for the LLM responses backend
    pub openai_api_key: String,
    /// API key for the Grid spreadsheet API
    pub grid_api_key: String,
    /// Optional Grid API base URL override (defaults to the public endpoint)
    pub grid_api_url: Option<String>,
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is absent or not valid unicode
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            openai_api_key: require("OPENAI_API_KEY")?,
            grid_api_key: require("GRID_API_KEY")?,
            grid_api_url: std::env::var("GRID_API_URL").ok(),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

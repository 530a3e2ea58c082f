use serde::Deserialize;

use crate::services::TitleMatch;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Path to the CSV movie dataset
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Number of recommendations returned when the caller does not ask
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,

    /// Upper bound applied to requested list sizes
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,

    /// Fall back to substring title matching when no exact match exists
    #[serde(default = "default_partial_title_match")]
    pub partial_title_match: bool,
}

fn default_dataset_path() -> String {
    "movie_dataset.csv".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_top_n() -> usize {
    20
}

fn default_max_top_n() -> usize {
    100
}

fn default_partial_title_match() -> bool {
    true
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        anyhow::ensure!(config.default_top_n > 0, "DEFAULT_TOP_N must be positive");
        anyhow::ensure!(
            config.max_top_n >= config.default_top_n,
            "MAX_TOP_N must be at least DEFAULT_TOP_N"
        );

        Ok(config)
    }

    pub fn title_match(&self) -> TitleMatch {
        if self.partial_title_match {
            TitleMatch::Partial
        } else {
            TitleMatch::Exact
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

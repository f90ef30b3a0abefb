use env_logger::{Builder, Env};
use log::info;
use std::env;
use thiserror::Error;

pub const DEFAULT_QUERY: &str = "data engineering";
pub const DEFAULT_MAX_RESULTS: u32 = 10;
pub const DEFAULT_OUTPUT_PATH: &str = "youtube_videos.csv";
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

// The search endpoint rejects anything above this.
pub const MAX_RESULTS_LIMIT: u32 = 50;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    MissingVar(&'static str),
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub query: String,
    pub max_results: u32,
    pub output_path: String,
    pub api_base_url: String,
}

impl Config {
    pub fn new(
        api_key: impl Into<String>,
        query: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Self {
        Config {
            api_key: api_key.into(),
            query: query.into(),
            max_results: DEFAULT_MAX_RESULTS,
            output_path: output_path.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source, falling back to the
    /// defaults for everything except the API key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("YOUTUBE_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingVar("YOUTUBE_API_KEY"))?;

        let max_results = match lookup("ETL_MAX_RESULTS") {
            Some(raw) => parse_max_results(&raw)?,
            None => DEFAULT_MAX_RESULTS,
        };

        Ok(Config {
            api_key,
            query: lookup("ETL_QUERY").unwrap_or_else(|| DEFAULT_QUERY.to_string()),
            max_results,
            output_path: lookup("ETL_OUTPUT_PATH")
                .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string()),
            api_base_url: lookup("YOUTUBE_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        })
    }
}

fn parse_max_results(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n <= MAX_RESULTS_LIMIT)
        .ok_or_else(|| ConfigError::InvalidValue {
            name: "ETL_MAX_RESULTS",
            value: raw.to_string(),
        })
}

pub fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("Starting YouTube ETL run...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

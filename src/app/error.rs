use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Scraper error: {0}")]
    Scraper(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Interrupted by {0}")]
    Interrupted(&'static str),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, HarvestError>;

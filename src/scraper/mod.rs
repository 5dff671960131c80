//! Headless browser rendering for sources that build their link lists
//! with JavaScript.
//!
//! # Architecture
//!
//! ```text
//! BoardSource (requires_rendering) → BrowserLauncher → Scraper → rendered HTML
//! ```
//!
//! The browser is launched on first need by
//! [`SourceFetcher`](crate::fetcher::SourceFetcher) and closed explicitly at
//! the end of the run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pyq_harvester::scraper::{BrowserLauncher, ChromeLauncher, ScraperConfig};
//!
//! let mut scraper = ChromeLauncher::new(ScraperConfig::default()).launch().await?;
//! let html = scraper.render("https://example.com/papers").await?;
//! scraper.close().await?;
//! ```

mod chrome;
mod config;

pub use chrome::{ChromeLauncher, ChromeScraper};
pub use config::ScraperConfig;

use async_trait::async_trait;

use crate::app::Result;

/// A running browser able to render pages
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Load a URL and return the rendered document HTML
    async fn render(&self, url: &str) -> Result<String>;

    /// Shut the browser down and release its process
    async fn close(&mut self) -> Result<()>;
}

/// Starts browsers on demand
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn Scraper>>;
}

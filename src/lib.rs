//! # pyq-harvester
//!
//! Collects previous-year question papers from examination board websites.
//!
//! ## Architecture
//!
//! pyq-harvester follows a sequential pipeline:
//!
//! ```text
//! Fetcher → Link extractor → Classifier → Downloader → Store → Statistics
//! ```
//!
//! - [`fetcher`]: plain HTTP or headless-browser retrieval of source pages
//! - [`normalizer`]: link extraction and metadata classification
//! - [`downloader`]: cached file downloads
//! - [`store`]: per-board JSON metadata and statistics
//!
//! ## Quick Start
//!
//! ```bash
//! # Scrape every configured board, then print a summary
//! pyq-harvester
//!
//! # Scrape a single board
//! pyq-harvester scrape --board WB
//!
//! # Recompute statistics from stored metadata
//! pyq-harvester analyze
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the HTTP
/// client, the metadata store and the harvester.
pub mod app;

/// Command-line interface using clap.
///
/// - `run` - Scrape, analyze and print a summary (default)
/// - `scrape [--board B]` - Scrape only
/// - `analyze` - Recompute statistics
/// - `sources` - List configured sources
pub mod cli;

/// Configuration loaded from `~/.config/pyq-harvester/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Board`](domain::Board) and [`BoardSource`](domain::BoardSource)
/// - [`PaperRecord`](domain::PaperRecord): one question paper with
///   inferred subject, year and grade
pub mod domain;

/// Paper file downloads with an existing-file cache.
pub mod downloader;

/// Page retrieval.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for HTTP access
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
/// - [`SourceFetcher`](fetcher::SourceFetcher): Dispatches between HTTP and
///   the headless browser
pub mod fetcher;

/// Link extraction and metadata classification.
pub mod normalizer;

/// Sequential harvest of all configured boards.
pub mod pipeline;

/// Headless Chrome rendering via chromiumoxide.
///
/// - [`ChromeScraper`](scraper::ChromeScraper): Chrome-based renderer
/// - [`ScraperConfig`](scraper::ScraperConfig): Configuration options
/// - [`Scraper`](scraper::Scraper): Async trait for rendering implementations
pub mod scraper;

/// JSON persistence and statistics.
///
/// - [`PaperStore`](store::PaperStore): Trait defining storage operations
/// - [`JsonStore`](store::JsonStore): One JSON file per board
pub mod store;

#[cfg(test)]
mod test_support;

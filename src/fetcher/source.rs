use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::BoardSource;
use crate::fetcher::Fetcher;
use crate::scraper::{BrowserLauncher, Scraper};

enum BrowserState {
    Idle,
    Ready(Box<dyn Scraper>),
    /// Launch failed; rendering sources are skipped for the rest of the run
    Failed,
}

/// Retrieves the HTML of a board source, over plain HTTP or through a
/// lazily launched headless browser
pub struct SourceFetcher {
    http: Arc<dyn Fetcher>,
    launcher: Box<dyn BrowserLauncher>,
    browser: BrowserState,
}

impl SourceFetcher {
    pub fn new(http: Arc<dyn Fetcher>, launcher: Box<dyn BrowserLauncher>) -> Self {
        Self {
            http,
            launcher,
            browser: BrowserState::Idle,
        }
    }

    /// HTML for the source, or an empty string if it could not be retrieved
    pub async fn fetch(&mut self, source: &BoardSource) -> String {
        if source.requires_rendering {
            self.fetch_rendered(source).await
        } else {
            self.fetch_plain(source).await
        }
    }

    async fn fetch_plain(&self, source: &BoardSource) -> String {
        info!("Scraping {} with HTTP", source.url);
        match self.http.fetch(&source.url).await {
            Ok(html) => html,
            Err(e) => {
                error!("Request failed for {} ({}): {}", source.url, source.board, e);
                String::new()
            }
        }
    }

    async fn fetch_rendered(&mut self, source: &BoardSource) -> String {
        let Some(browser) = self.browser().await else {
            warn!(
                "Browser unavailable, skipping {} ({})",
                source.url, source.board
            );
            return String::new();
        };

        info!("Scraping {} with browser", source.url);
        match browser.render(&source.url).await {
            Ok(html) => html,
            Err(e) => {
                error!(
                    "Browser scraping failed for {} ({}): {}",
                    source.url, source.board, e
                );
                String::new()
            }
        }
    }

    /// The shared browser, launching it on first use
    async fn browser(&mut self) -> Option<&dyn Scraper> {
        if matches!(self.browser, BrowserState::Idle) {
            self.browser = match self.launcher.launch().await {
                Ok(browser) => BrowserState::Ready(browser),
                Err(e) => {
                    error!("Browser initialization failed: {}", e);
                    BrowserState::Failed
                }
            };
        }

        match &self.browser {
            BrowserState::Ready(browser) => Some(browser.as_ref()),
            _ => None,
        }
    }

    pub fn browser_running(&self) -> bool {
        matches!(self.browser, BrowserState::Ready(_))
    }

    /// Close the browser if one was launched. Safe to call repeatedly.
    /// A failed launch stays failed.
    pub async fn shutdown(&mut self) {
        let BrowserState::Ready(browser) = &mut self.browser else {
            return;
        };
        match browser.close().await {
            Ok(()) => info!("Browser closed"),
            Err(e) => error!("Failed to close browser cleanly: {}", e),
        }
        self.browser = BrowserState::Idle;
    }
}

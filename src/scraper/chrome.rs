use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::{HarvestError, Result};
use crate::scraper::config::ScraperConfig;
use crate::scraper::{BrowserLauncher, Scraper};

const BODY_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Chrome-based page renderer using chromiumoxide
pub struct ChromeScraper {
    browser: Browser,
    handler: JoinHandle<()>,
    config: ScraperConfig,
}

impl ChromeScraper {
    /// Launch a new Chrome instance with the given configuration
    pub async fn new(config: ScraperConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer");

        if !config.headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| HarvestError::Scraper(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config).await.map_err(|e| {
            HarvestError::Scraper(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            ))
        })?;

        // Drive the CDP connection until the browser goes away
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {}", e);
                }
            }
        });

        info!("Browser initialized successfully");

        Ok(Self {
            browser,
            handler,
            config,
        })
    }

    /// Navigate, wait for the body, let scripts settle, read the DOM
    async fn load(&self, page: &Page, url: &str) -> Result<String> {
        if let Some(ref ua) = self.config.user_agent {
            page.set_user_agent(ua)
                .await
                .map_err(|e| HarvestError::Scraper(format!("Failed to set user agent: {}", e)))?;
        }

        let ready = async {
            page.goto(url)
                .await
                .map_err(|e| HarvestError::Scraper(format!("Navigation failed: {}", e)))?;

            while page.find_element("body").await.is_err() {
                tokio::time::sleep(BODY_POLL_INTERVAL).await;
            }
            Ok::<(), HarvestError>(())
        };

        tokio::time::timeout(self.config.timeout(), ready)
            .await
            .map_err(|_| {
                HarvestError::Scraper(format!(
                    "Timed out after {}s waiting for document body",
                    self.config.timeout_secs
                ))
            })??;

        // Additional wait for dynamic content
        tokio::time::sleep(self.config.wait_after_load()).await;

        page.content()
            .await
            .map_err(|e| HarvestError::Scraper(format!("Failed to read page content: {}", e)))
    }
}

#[async_trait]
impl Scraper for ChromeScraper {
    async fn render(&self, url: &str) -> Result<String> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| HarvestError::Scraper(format!("Failed to create page: {}", e)))?;

        let result = self.load(&page, url).await;

        if let Err(e) = page.close().await {
            warn!("Failed to close page for {}: {}", url, e);
        }

        result
    }

    async fn close(&mut self) -> Result<()> {
        let closed = self
            .browser
            .close()
            .await
            .map_err(|e| HarvestError::Scraper(format!("Failed to close browser: {}", e)));

        if closed.is_ok() {
            if let Err(e) = self.browser.wait().await {
                warn!("Failed to wait for browser exit: {}", e);
            }
        }

        self.handler.abort();
        closed.map(|_| ())
    }
}

/// Launches [`ChromeScraper`] instances
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    config: ScraperConfig,
}

impl ChromeLauncher {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    async fn launch(&self) -> Result<Box<dyn Scraper>> {
        let scraper = ChromeScraper::new(self.config.clone()).await?;
        Ok(Box::new(scraper))
    }
}

//! In-memory fetchers and browsers for pipeline tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::app::{HarvestError, Result};
use crate::fetcher::Fetcher;
use crate::scraper::{BrowserLauncher, Scraper};

/// Serves canned pages and records every request
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    failing_downloads: Vec<String>,
    pub fetches: Mutex<Vec<String>>,
    pub downloads: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn failing_download(mut self, url: &str) -> Self {
        self.failing_downloads.push(url.to_string());
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }

    pub fn download_urls(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.fetches.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| HarvestError::Other(format!("404 Not Found: {}", url)))
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        self.downloads.lock().unwrap().push(url.to_string());
        if self.failing_downloads.iter().any(|u| u == url) {
            return Err(HarvestError::Other(format!("connection reset: {}", url)));
        }
        let body = format!("%PDF-1.4 {}", url);
        std::fs::write(dest, &body)?;
        Ok(body.len() as u64)
    }
}

/// Counters shared between a launcher and the browsers it creates
#[derive(Default)]
pub struct BrowserStats {
    pub launches: AtomicUsize,
    pub closes: AtomicUsize,
    pub renders: Mutex<Vec<String>>,
}

impl BrowserStats {
    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }

    pub fn rendered(&self) -> Vec<String> {
        self.renders.lock().unwrap().clone()
    }
}

/// How mock browsers answer render calls
#[derive(Clone, Copy, PartialEq, Eq)]
enum RenderMode {
    Pages,
    Panic,
    Hang,
}

pub struct MockLauncher {
    pages: HashMap<String, String>,
    fail: bool,
    mode: RenderMode,
    pub stats: Arc<BrowserStats>,
}

impl MockLauncher {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            fail: false,
            mode: RenderMode::Pages,
            stats: Arc::new(BrowserStats::default()),
        }
    }

    /// Browsers that panic while rendering
    pub fn panicking() -> Self {
        Self {
            mode: RenderMode::Panic,
            ..Self::new()
        }
    }

    /// Browsers whose renders never finish
    pub fn hanging() -> Self {
        Self {
            mode: RenderMode::Hang,
            ..Self::new()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

#[async_trait]
impl BrowserLauncher for MockLauncher {
    async fn launch(&self) -> Result<Box<dyn Scraper>> {
        self.stats.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(HarvestError::Scraper("Failed to launch browser".into()));
        }
        Ok(Box::new(MockScraper {
            pages: self.pages.clone(),
            mode: self.mode,
            stats: self.stats.clone(),
        }))
    }
}

struct MockScraper {
    pages: HashMap<String, String>,
    mode: RenderMode,
    stats: Arc<BrowserStats>,
}

#[async_trait]
impl Scraper for MockScraper {
    async fn render(&self, url: &str) -> Result<String> {
        self.stats.renders.lock().unwrap().push(url.to_string());
        match self.mode {
            RenderMode::Pages => {}
            RenderMode::Panic => panic!("renderer crashed on {}", url),
            RenderMode::Hang => std::future::pending::<()>().await,
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| HarvestError::Scraper(format!("Navigation failed: {}", url)))
    }

    async fn close(&mut self) -> Result<()> {
        self.stats.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

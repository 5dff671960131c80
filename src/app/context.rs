use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::app::error::Result;
use crate::config::Config;
use crate::downloader::Downloader;
use crate::fetcher::{Fetcher, HttpFetcher, SourceFetcher};
use crate::pipeline::Harvester;
use crate::scraper::ChromeLauncher;
use crate::store::JsonStore;

pub struct AppContext {
    pub config: Config,
    pub store: Arc<JsonStore>,
    pub http: Arc<dyn Fetcher>,
}

impl AppContext {
    /// Wire up components and make sure the storage directories exist
    pub fn new(config: Config) -> Result<Self> {
        for dir in [&config.storage.download_dir, &config.storage.metadata_dir] {
            ensure_dir(dir)?;
        }

        let http: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(&config.http)?);
        let store = Arc::new(JsonStore::new(&config.storage.metadata_dir));

        Ok(Self {
            config,
            store,
            http,
        })
    }

    /// A harvester with a fresh, not yet launched, browser slot
    pub fn harvester(&self) -> Harvester<JsonStore> {
        let launcher = ChromeLauncher::new(self.config.scraper.clone());
        let fetcher = SourceFetcher::new(self.http.clone(), Box::new(launcher));
        let downloader = Downloader::new(
            self.http.clone(),
            &self.config.storage.download_dir,
            self.config.storage.layout,
        );
        Harvester::new(fetcher, downloader, self.store.clone())
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        info!("Created directory: {}", dir.display());
    }
    Ok(())
}

//! Sequential scrape of every configured board.
//!
//! For each board, each source is fetched, its matching links classified
//! into [`PaperRecord`]s and downloaded, and the board's result set is
//! stored. The browser is released whatever happens during the run,
//! including a panic or a termination signal.

use std::collections::{BTreeMap, HashSet};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{error, info, warn};

use crate::app::{HarvestError, Result};
use crate::domain::{Board, BoardSource, BoardSources, PaperRecord};
use crate::downloader::Downloader;
use crate::fetcher::SourceFetcher;
use crate::normalizer::{classify, extract_links};
use crate::store::PaperStore;

/// Outcome of one harvest run
#[derive(Debug, Default)]
pub struct HarvestReport {
    pub papers: BTreeMap<Board, Vec<PaperRecord>>,
    pub downloaded: usize,
    pub failed_downloads: usize,
}

impl HarvestReport {
    pub fn total_papers(&self) -> usize {
        self.papers.values().map(Vec::len).sum()
    }
}

pub struct Harvester<S: PaperStore> {
    fetcher: SourceFetcher,
    downloader: Downloader,
    store: Arc<S>,
}

impl<S: PaperStore> Harvester<S> {
    pub fn new(fetcher: SourceFetcher, downloader: Downloader, store: Arc<S>) -> Self {
        Self {
            fetcher,
            downloader,
            store,
        }
    }

    /// Harvest all boards, then release the browser. The release also
    /// happens if the harvest panics or SIGTERM/SIGINT arrives; both are
    /// reported as errors.
    pub async fn run(&mut self, boards: &[BoardSources]) -> Result<HarvestReport> {
        self.run_until(boards, shutdown_signal()).await
    }

    /// Like [`Harvester::run`], stopping early when `signal` resolves.
    /// The signal's name is carried in [`HarvestError::Interrupted`].
    pub async fn run_until<F>(
        &mut self,
        boards: &[BoardSources],
        signal: F,
    ) -> Result<HarvestReport>
    where
        F: Future<Output = &'static str>,
    {
        let outcome = tokio::select! {
            harvest = AssertUnwindSafe(self.harvest_all(boards)).catch_unwind() => {
                harvest.map_err(|_| HarvestError::Other("Harvest aborted unexpectedly".to_string()))
            }
            name = signal => {
                warn!("Received {}, stopping harvest", name);
                Err(HarvestError::Interrupted(name))
            }
        };

        self.shutdown().await;

        outcome
    }

    pub async fn harvest_all(&mut self, boards: &[BoardSources]) -> HarvestReport {
        info!("Starting to scrape all boards");
        let mut report = HarvestReport::default();

        for entry in boards {
            info!("Processing board: {}", entry.board);
            let mut board_papers = report.papers.remove(&entry.board).unwrap_or_default();

            for source in entry.sources() {
                let papers = self.harvest_source(&source, &board_papers, &mut report).await;
                board_papers.extend(papers);
            }

            match self.store.save_board(entry.board, &board_papers) {
                Ok(path) => info!("Saved metadata to {}", path.display()),
                Err(e) => error!("Failed to save metadata for {}: {}", entry.board, e),
            }

            report.papers.insert(entry.board, board_papers);
        }

        report
    }

    /// Papers found on one source page, skipping ids already in `seen`
    async fn harvest_source(
        &mut self,
        source: &BoardSource,
        seen: &[PaperRecord],
        report: &mut HarvestReport,
    ) -> Vec<PaperRecord> {
        let html = self.fetcher.fetch(source).await;
        if html.is_empty() {
            warn!("No content from {} ({})", source.url, source.board);
            return Vec::new();
        }

        self.harvest_page(source, &html, seen, report).await
    }

    async fn harvest_page(
        &self,
        source: &BoardSource,
        html: &str,
        seen: &[PaperRecord],
        report: &mut HarvestReport,
    ) -> Vec<PaperRecord> {
        let mut ids: HashSet<String> = seen.iter().map(|p| p.id.clone()).collect();
        let mut papers = Vec::new();

        for link in extract_links(html, &source.url, &source.pattern) {
            let paper = classify(&link.text, &link.url, source.board);

            if !ids.insert(paper.id.clone()) {
                info!("Skipping duplicate paper {}", paper.id);
                continue;
            }

            if self.downloader.download(&paper).await {
                report.downloaded += 1;
            } else {
                report.failed_downloads += 1;
            }

            papers.push(paper);
        }

        info!("Found {} papers for {} at {}", papers.len(), source.board, source.url);
        papers
    }

    pub async fn shutdown(&mut self) {
        self.fetcher.shutdown().await;
    }
}

/// Resolves with the name of the first termination signal received.
/// Never resolves if the handlers cannot be installed.
pub async fn shutdown_signal() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => "SIGTERM",
                    _ = sigint.recv() => "SIGINT",
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to set up signal handlers: {}", e);
                std::future::pending().await
            }
        }
    }

    #[cfg(not(unix))]
    {
        match tokio::signal::ctrl_c().await {
            Ok(()) => "Ctrl-C",
            Err(e) => {
                error!("Failed to set up Ctrl-C handler: {}", e);
                std::future::pending().await
            }
        }
    }
}

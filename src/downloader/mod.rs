//! Persists paper files to local storage.
//!
//! Files are cached by target path: if the file is already there the
//! download is skipped without touching the network. Content is not
//! verified.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::app::Result;
use crate::domain::PaperRecord;
use crate::fetcher::Fetcher;

/// How downloaded files are laid out under the download directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageLayout {
    /// `<dir>/<file_name>`; same-named papers from different boards collide
    #[default]
    Flat,
    /// `<dir>/<board>/<file_name>`
    ByBoard,
}

pub struct Downloader {
    fetcher: Arc<dyn Fetcher>,
    root: PathBuf,
    layout: StorageLayout,
}

impl Downloader {
    pub fn new(fetcher: Arc<dyn Fetcher>, root: impl Into<PathBuf>, layout: StorageLayout) -> Self {
        Self {
            fetcher,
            root: root.into(),
            layout,
        }
    }

    /// Local path a record's file is stored at
    pub fn target_path(&self, record: &PaperRecord) -> PathBuf {
        match self.layout {
            StorageLayout::Flat => self.root.join(&record.file_name),
            StorageLayout::ByBoard => self
                .root
                .join(record.board.as_str())
                .join(&record.file_name),
        }
    }

    /// Download the record's file unless it is already stored.
    /// Failures are logged and reported as `false`.
    pub async fn download(&self, record: &PaperRecord) -> bool {
        let path = self.target_path(record);

        if path.exists() {
            info!("File already exists: {}", path.display());
            return true;
        }

        if let Some(parent) = path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                error!("Failed to create {}: {}", parent.display(), e);
                return false;
            }
        }

        // Write to a sibling file first so an interrupted download is never
        // mistaken for a cached one
        let partial = partial_path(&path);

        let result: Result<u64> = match self.fetcher.download(&record.url, &partial).await {
            Ok(bytes) => tokio::fs::rename(&partial, &path)
                .await
                .map(|_| bytes)
                .map_err(Into::into),
            Err(e) => Err(e),
        };

        match result {
            Ok(bytes) => {
                info!("Downloaded: {} ({} bytes)", path.display(), bytes);
                true
            }
            Err(e) => {
                error!("Download failed for {} ({}): {}", record.url, record.board, e);
                let _ = tokio::fs::remove_file(&partial).await;
                false
            }
        }
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}

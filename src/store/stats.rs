//! Cross-board statistics over stored metadata.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::domain::{Board, PaperRecord};
use crate::store::PaperStore;

/// Paper counts, written to `statistics.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_papers: usize,
    pub papers_by_board: BTreeMap<String, usize>,
    pub papers_by_subject: BTreeMap<String, usize>,
    pub papers_by_year: BTreeMap<String, usize>,
    pub papers_by_standard: BTreeMap<String, usize>,
}

impl Statistics {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a PaperRecord>) -> Self {
        let mut stats = Self::default();
        for record in records {
            stats.total_papers += 1;
            *stats.papers_by_board.entry(record.board.to_string()).or_default() += 1;
            *stats.papers_by_subject.entry(record.subject.to_string()).or_default() += 1;
            *stats.papers_by_year.entry(record.year.to_string()).or_default() += 1;
            *stats.papers_by_standard.entry(record.grade.to_string()).or_default() += 1;
        }
        stats
    }

    pub fn is_empty(&self) -> bool {
        self.total_papers == 0
    }
}

/// Reload the stored result set of every board and count them.
///
/// Boards without a file are skipped; unreadable files are logged and
/// skipped. The summary is persisted through the store even when empty.
pub fn analyze<S: PaperStore + ?Sized>(store: &S, boards: &[Board]) -> Statistics {
    let mut papers = Vec::new();

    for &board in boards {
        match store.load_board(board) {
            Ok(Some(records)) => {
                debug!("Loaded {} papers for {}", records.len(), board);
                papers.extend(records);
            }
            Ok(None) => debug!("No stored papers for {}", board),
            Err(e) => error!("Failed to load papers for {}: {}", board, e),
        }
    }

    if papers.is_empty() {
        warn!("No papers found for analysis");
    }

    let stats = Statistics::from_records(&papers);

    match store.save_statistics(&stats) {
        Ok(path) => info!("Saved statistics to {}", path.display()),
        Err(e) => error!("Failed to save statistics: {}", e),
    }

    stats
}

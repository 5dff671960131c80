pub mod json;
pub mod stats;

use std::path::PathBuf;

use crate::app::Result;
use crate::domain::{Board, PaperRecord};

pub use json::JsonStore;
pub use stats::{analyze, Statistics};

pub trait PaperStore {
    /// Replace the stored result set of a board
    fn save_board(&self, board: Board, papers: &[PaperRecord]) -> Result<PathBuf>;

    /// Stored result set of a board, `None` if the board has never been saved
    fn load_board(&self, board: Board) -> Result<Option<Vec<PaperRecord>>>;

    fn save_statistics(&self, stats: &Statistics) -> Result<PathBuf>;
}

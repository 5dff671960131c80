use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::app::Result;
use crate::domain::{Board, PaperRecord};
use crate::store::{PaperStore, Statistics};

pub const STATISTICS_FILE: &str = "statistics.json";

/// Stores metadata as pretty-printed JSON files in one directory
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn board_path(&self, board: Board) -> PathBuf {
        self.dir.join(format!("{}_papers.json", board))
    }

    pub fn statistics_path(&self) -> PathBuf {
        self.dir.join(STATISTICS_FILE)
    }

    fn write_json<T: serde::Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut writer = BufWriter::new(fs::File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
        Ok(())
    }
}

impl PaperStore for JsonStore {
    fn save_board(&self, board: Board, papers: &[PaperRecord]) -> Result<PathBuf> {
        let path = self.board_path(board);
        self.write_json(&path, papers)?;
        Ok(path)
    }

    fn load_board(&self, board: Board) -> Result<Option<Vec<PaperRecord>>> {
        let path = self.board_path(board);
        if !path.exists() {
            return Ok(None);
        }
        let reader = BufReader::new(fs::File::open(&path)?);
        Ok(Some(serde_json::from_reader(reader)?))
    }

    fn save_statistics(&self, stats: &Statistics) -> Result<PathBuf> {
        let path = self.statistics_path();
        self.write_json(&path, stats)?;
        Ok(path)
    }
}

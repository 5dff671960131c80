//! Configuration management for pyq-harvester.
//!
//! Configuration is read from `--config <path>` or from
//! `~/.config/pyq-harvester/config.toml`. If the default file doesn't
//! exist, a default configuration with comments is created.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{Board, BoardSource, BoardSources};
use crate::downloader::StorageLayout;
use crate::scraper::ScraperConfig;

/// Main configuration struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub http: HttpConfig,
    pub scraper: ScraperConfig,
    pub boards: Vec<BoardSources>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for downloaded paper files
    pub download_dir: PathBuf,
    /// Directory for `<BOARD>_papers.json` and `statistics.json`
    pub metadata_dir: PathBuf,
    /// Log file, appended to on every run
    pub log_file: PathBuf,
    pub layout: StorageLayout,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from("downloads"),
            metadata_dir: PathBuf::from("metadata"),
            log_file: PathBuf::from("scraper.log"),
            layout: StorageLayout::Flat,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Timeout for page fetches and downloads in seconds (default: 30)
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("pyq-harvester/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            http: HttpConfig::default(),
            scraper: ScraperConfig::default(),
            boards: default_boards(),
        }
    }
}

/// Boards and pages scraped when the config file does not say otherwise
pub fn default_boards() -> Vec<BoardSources> {
    vec![
        BoardSources::new(Board::Cbse)
            .with_source(
                "https://cbseacademic.nic.in/qbarchive.html",
                "question papers",
                true,
            )
            .with_source(
                "https://www.cbse.gov.in/cbsenew/question-paper.html",
                "Previous Year Question Papers",
                true,
            ),
        BoardSources::new(Board::Icse).with_source(
            "https://cisce.org/DownloadPapers.aspx",
            "Question Papers",
            true,
        ),
        BoardSources::new(Board::Wb).with_source(
            "https://wbchse.wb.gov.in/Question-Papers",
            "Question Papers",
            false,
        ),
    ]
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. If the default file doesn't exist,
    /// creates a default one with comments. Missing fields in the config
    /// file use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default_path = Self::default_config_path()?;
                if !default_path.exists() {
                    Self::create_default_config(&default_path)?;
                    return Ok(Self::default());
                }
                default_path
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get the default config file path: `~/.config/pyq-harvester/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("pyq-harvester").join("config.toml"))
    }

    /// All configured sources of all boards, in scrape order
    pub fn sources(&self) -> impl Iterator<Item = BoardSource> + '_ {
        self.boards.iter().flat_map(|b| b.sources())
    }

    /// Distinct configured boards, in config order
    pub fn board_names(&self) -> Vec<Board> {
        let mut boards = Vec::new();
        for entry in &self.boards {
            if !boards.contains(&entry.board) {
                boards.push(entry.board);
            }
        }
        boards
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    pub fn default_config_content() -> String {
        format!(
            r##"# pyq-harvester configuration
#
# Relative paths are resolved against the working directory.

[storage]
download_dir = "downloads"
metadata_dir = "metadata"
log_file = "scraper.log"

# "flat" stores every file directly in download_dir (same-named papers
# from different boards overwrite each other's cache entry); "by_board"
# uses one subdirectory per board.
layout = "flat"

[http]
# Timeout for page fetches and file downloads, in seconds
timeout_secs = 30
user_agent = "pyq-harvester/{version}"

[scraper]
# Run the browser in headless mode (no visible window)
headless = true

# How long to wait for the document body, in seconds
timeout_secs = 20

# Wait time after the body appears, for dynamic content (milliseconds)
wait_after_load_ms = 2000

user_agent = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"

# Boards are scraped in order, and their sources in order.
# `pattern` is a case-insensitive regular expression matched against
# link text. `requires_rendering` loads the page in headless Chrome.

[[boards]]
board = "CBSE"

[[boards.sources]]
url = "https://cbseacademic.nic.in/qbarchive.html"
pattern = "question papers"
requires_rendering = true

[[boards.sources]]
url = "https://www.cbse.gov.in/cbsenew/question-paper.html"
pattern = "Previous Year Question Papers"
requires_rendering = true

[[boards]]
board = "ICSE"

[[boards.sources]]
url = "https://cisce.org/DownloadPapers.aspx"
pattern = "Question Papers"
requires_rendering = true

[[boards]]
board = "WB"

[[boards.sources]]
url = "https://wbchse.wb.gov.in/Question-Papers"
pattern = "Question Papers"
requires_rendering = false
"##,
            version = env!("CARGO_PKG_VERSION")
        )
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_content_matches_default() {
        let config = Config::parse(&Config::default_config_content())
            .expect("Default config should be valid TOML");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_default_sources() {
        let config = Config::default();
        let sources: Vec<_> = config.sources().collect();

        assert_eq!(sources.len(), 4);
        assert_eq!(sources[0].board, Board::Cbse);
        assert!(sources[0].requires_rendering);
        assert_eq!(sources[3].board, Board::Wb);
        assert!(!sources[3].requires_rendering);
        assert_eq!(config.board_names(), vec![Board::Cbse, Board::Icse, Board::Wb]);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[http]
timeout_secs = 5

[storage]
layout = "by_board"
"##;
        let config = Config::parse(content).expect("Partial config should work");

        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.storage.layout, StorageLayout::ByBoard);
        assert_eq!(config.storage.download_dir, PathBuf::from("downloads"));
        assert_eq!(config.scraper, ScraperConfig::default());
        assert_eq!(config.boards, default_boards());
    }

    #[test]
    fn test_empty_config() {
        let config = Config::parse("").expect("Empty config should work");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_custom_boards_replace_defaults() {
        let content = r##"
[[boards]]
board = "WB"

[[boards.sources]]
url = "https://example.org/papers"
pattern = "papers"
"##;
        let config = Config::parse(content).unwrap();
        let sources: Vec<_> = config.sources().collect();

        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].board, Board::Wb);
        assert!(!sources[0].requires_rendering);
    }

    #[test]
    fn test_unknown_board_is_error() {
        let content = r##"
[[boards]]
board = "XYZ"
"##;
        assert!(Config::parse(content).is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[scraper]\nheadless = false\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(!config.scraper.headless);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[http\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}

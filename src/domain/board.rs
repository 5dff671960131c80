use std::fmt;

use serde::{Deserialize, Serialize};

/// Examination boards with a configured scraping source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Board {
    #[serde(rename = "CBSE")]
    Cbse,
    #[serde(rename = "ICSE")]
    Icse,
    #[serde(rename = "WB")]
    Wb,
}

impl Board {
    pub const ALL: [Board; 3] = [Board::Cbse, Board::Icse, Board::Wb];

    pub fn as_str(&self) -> &'static str {
        match self {
            Board::Cbse => "CBSE",
            Board::Icse => "ICSE",
            Board::Wb => "WB",
        }
    }

    /// Case-insensitive lookup by board name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single page to scrape for one board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSource {
    pub board: Board,
    pub url: String,
    /// Regex matched case-insensitively against link text
    pub pattern: String,
    pub requires_rendering: bool,
}

/// Source entry as written in the config file, under its board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEntry {
    pub url: String,
    pub pattern: String,
    #[serde(default)]
    pub requires_rendering: bool,
}

/// All configured sources of one board, in scrape order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSources {
    pub board: Board,
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
}

impl BoardSources {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            sources: Vec::new(),
        }
    }

    pub fn with_source(mut self, url: &str, pattern: &str, requires_rendering: bool) -> Self {
        self.sources.push(SourceEntry {
            url: url.to_string(),
            pattern: pattern.to_string(),
            requires_rendering,
        });
        self
    }

    /// Expand entries into fully qualified sources
    pub fn sources(&self) -> impl Iterator<Item = BoardSource> + '_ {
        self.sources.iter().map(move |entry| BoardSource {
            board: self.board,
            url: entry.url.clone(),
            pattern: entry.pattern.clone(),
            requires_rendering: entry.requires_rendering,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_name() {
        assert_eq!(Board::from_name("cbse"), Some(Board::Cbse));
        assert_eq!(Board::from_name(" WB "), Some(Board::Wb));
        assert_eq!(Board::from_name("state"), None);
    }

    #[test]
    fn test_board_serializes_as_name() {
        let json = serde_json::to_string(&Board::Icse).unwrap();
        assert_eq!(json, "\"ICSE\"");
    }

    #[test]
    fn test_sources_carry_board() {
        let sources = BoardSources::new(Board::Wb)
            .with_source("https://a.example/papers", "question papers", false)
            .with_source("https://b.example/papers", "papers", true);

        let expanded: Vec<_> = sources.sources().collect();
        assert_eq!(expanded.len(), 2);
        assert!(expanded.iter().all(|s| s.board == Board::Wb));
        assert!(expanded[1].requires_rendering);
    }
}

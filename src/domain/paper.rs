use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

use crate::domain::{Board, Grade, Subject, Year};

/// Metadata for one question paper found on a board's site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub id: String,
    pub board: Board,
    pub subject: Subject,
    pub year: Year,
    #[serde(rename = "standard")]
    pub grade: Grade,
    pub url: String,
    pub title: String,
    pub file_name: String,
    pub scraped_at: DateTime<Utc>,
}

impl PaperRecord {
    pub fn new(
        board: Board,
        subject: Subject,
        year: Year,
        grade: Grade,
        url: &Url,
        title: &str,
    ) -> Self {
        let file_name = Self::file_name_for(url);
        let id = Self::generate_id(board, subject, year, grade, &file_name);
        Self {
            id,
            board,
            subject,
            year,
            grade,
            url: url.to_string(),
            title: title.to_string(),
            file_name,
            scraped_at: Utc::now(),
        }
    }

    /// Deterministic, human-readable key: `{board}_{subject}_{year}_{grade}_{file}`
    pub fn generate_id(
        board: Board,
        subject: Subject,
        year: Year,
        grade: Grade,
        file_name: &str,
    ) -> String {
        format!("{}_{}_{}_{}_{}", board, subject, year, grade, file_name)
    }

    /// Last non-empty path segment of the URL, or a name derived from a
    /// hash of the whole URL when the path has none
    pub fn file_name_for(url: &Url) -> String {
        url.path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .unwrap_or_else(|| {
                let mut hasher = Sha256::new();
                hasher.update(url.as_str().as_bytes());
                let digest = hex::encode(hasher.finalize());
                format!("paper-{}", &digest[..12])
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_file_name_is_last_segment() {
        let name = PaperRecord::file_name_for(&url("https://example.com/papers/math12_2021.pdf"));
        assert_eq!(name, "math12_2021.pdf");
    }

    #[test]
    fn test_file_name_ignores_query() {
        let name = PaperRecord::file_name_for(&url("https://example.com/get/qp.pdf?id=7"));
        assert_eq!(name, "qp.pdf");
    }

    #[test]
    fn test_file_name_fallback_when_no_segment() {
        let a = PaperRecord::file_name_for(&url("https://example.com/"));
        let b = PaperRecord::file_name_for(&url("https://example.com/"));
        let c = PaperRecord::file_name_for(&url("https://other.example.com/"));
        assert!(a.starts_with("paper-"));
        assert_eq!(a.len(), "paper-".len() + 12);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_file_name_fallback_for_trailing_slash() {
        let name = PaperRecord::file_name_for(&url("https://example.com/papers/"));
        assert!(name.starts_with("paper-"));
    }

    #[test]
    fn test_id_generation_deterministic() {
        let id1 = PaperRecord::generate_id(
            Board::Cbse,
            Subject::Physics,
            Year::new(2020),
            Grade::new(12),
            "phy.pdf",
        );
        let id2 = PaperRecord::generate_id(
            Board::Cbse,
            Subject::Physics,
            Year::new(2020),
            Grade::new(12),
            "phy.pdf",
        );
        assert_eq!(id1, id2);
        assert_eq!(id1, "CBSE_Physics_2020_12_phy.pdf");
    }

    #[test]
    fn test_id_with_unknown_fields() {
        let id = PaperRecord::generate_id(
            Board::Wb,
            Subject::Unknown,
            Year::UNKNOWN,
            Grade::UNKNOWN,
            "qp.pdf",
        );
        assert_eq!(id, "WB_Unknown_Unknown_Unknown_qp.pdf");
    }

    #[test]
    fn test_record_json_uses_standard_key() {
        let record = PaperRecord::new(
            Board::Icse,
            Subject::English,
            Year::new(2018),
            Grade::new(10),
            &url("https://example.com/eng.pdf"),
            "English 2018",
        );
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["standard"], "10");
        assert_eq!(value["board"], "ICSE");
        assert_eq!(value["file_name"], "eng.pdf");

        let back: PaperRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}

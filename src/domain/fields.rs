//! Metadata fields inferred from link text.
//!
//! Each field is either a known value or `Unknown`, and serializes as a
//! plain string so stored metadata stays readable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel written for any field the classifier could not infer
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subject {
    Mathematics,
    Physics,
    Chemistry,
    Biology,
    Science,
    English,
    Hindi,
    #[serde(rename = "Social Science")]
    SocialScience,
    History,
    Geography,
    Economics,
    #[serde(rename = "Computer Science")]
    ComputerScience,
    Accountancy,
    #[serde(rename = "Business Studies")]
    BusinessStudies,
    Unknown,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Mathematics => "Mathematics",
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Biology => "Biology",
            Subject::Science => "Science",
            Subject::English => "English",
            Subject::Hindi => "Hindi",
            Subject::SocialScience => "Social Science",
            Subject::History => "History",
            Subject::Geography => "Geography",
            Subject::Economics => "Economics",
            Subject::ComputerScience => "Computer Science",
            Subject::Accountancy => "Accountancy",
            Subject::BusinessStudies => "Business Studies",
            Subject::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exam year, e.g. 2021
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Year(Option<u16>);

impl Year {
    pub const UNKNOWN: Year = Year(None);

    pub fn new(year: u16) -> Self {
        Self(Some(year))
    }

    pub fn value(&self) -> Option<u16> {
        self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(year) => write!(f, "{}", year),
            None => f.write_str(UNKNOWN),
        }
    }
}

impl From<Year> for String {
    fn from(year: Year) -> Self {
        year.to_string()
    }
}

impl TryFrom<String> for Year {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.eq_ignore_ascii_case(UNKNOWN) {
            return Ok(Year::UNKNOWN);
        }
        s.trim()
            .parse::<u16>()
            .map(Year::new)
            .map_err(|_| format!("Invalid year: {}", s))
    }
}

/// Class or standard, e.g. 10 for "Class 10th"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Grade(Option<u8>);

impl Grade {
    pub const UNKNOWN: Grade = Grade(None);

    pub fn new(grade: u8) -> Self {
        Self(Some(grade))
    }

    pub fn value(&self) -> Option<u8> {
        self.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(grade) => write!(f, "{}", grade),
            None => f.write_str(UNKNOWN),
        }
    }
}

impl From<Grade> for String {
    fn from(grade: Grade) -> Self {
        grade.to_string()
    }
}

impl TryFrom<String> for Grade {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.eq_ignore_ascii_case(UNKNOWN) {
            return Ok(Grade::UNKNOWN);
        }
        s.trim()
            .parse::<u8>()
            .map(Grade::new)
            .map_err(|_| format!("Invalid grade: {}", s))
    }
}

//! Heuristic metadata inference from link text.
//!
//! Every rule is a pure function over the text, so each can be tested in
//! isolation. Rules are independent: a text with no recognizable signal
//! still produces a record with every field `Unknown`.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use url::Url;

use crate::domain::{Board, Grade, PaperRecord, Subject, Year};

static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:19|20)\d{2}").expect("valid year regex"));

static GRADE_RE: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"\b(?:class|standard)[\s\-:]*(\d{1,2})(?:st|nd|rd|th)?\b")
        .case_insensitive(true)
        .build()
        .expect("valid grade regex")
});

/// Subjects in match priority. Compound names sit before the single words
/// they contain so "Social Science" is never read as "Science".
const SUBJECT_PRIORITY: [Subject; 14] = [
    Subject::SocialScience,
    Subject::ComputerScience,
    Subject::BusinessStudies,
    Subject::Mathematics,
    Subject::Physics,
    Subject::Chemistry,
    Subject::Biology,
    Subject::Science,
    Subject::English,
    Subject::Hindi,
    Subject::History,
    Subject::Geography,
    Subject::Economics,
    Subject::Accountancy,
];

static SUBJECT_RES: LazyLock<Vec<(Subject, Regex)>> = LazyLock::new(|| {
    SUBJECT_PRIORITY
        .iter()
        .map(|subject| {
            let words: Vec<_> = subject.as_str().split(' ').map(regex::escape).collect();
            // Start at a letter boundary only: file-name style text such as
            // "Class_10_Social Science" puts `_` or digits before the term
            let pattern = format!(r"(?:^|[^A-Za-z]){}", words.join(r"[\s_\-]+"));
            let re = RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .expect("valid subject regex");
            (*subject, re)
        })
        .collect()
});

/// First four-digit run starting with 19 or 20
pub fn classify_year(text: &str) -> Year {
    YEAR_RE
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .map(Year::new)
        .unwrap_or(Year::UNKNOWN)
}

pub fn classify_subject(text: &str) -> Subject {
    SUBJECT_RES
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(subject, _)| *subject)
        .unwrap_or(Subject::Unknown)
}

/// "Class 10", "Standard-10th", "class  12" and the like
pub fn classify_grade(text: &str) -> Grade {
    GRADE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u8>().ok())
        .filter(|grade| *grade > 0)
        .map(Grade::new)
        .unwrap_or(Grade::UNKNOWN)
}

/// Build a record for a matched link
pub fn classify(text: &str, url: &Url, board: Board) -> PaperRecord {
    PaperRecord::new(
        board,
        classify_subject(text),
        classify_year(text),
        classify_grade(text),
        url,
        text,
    )
}

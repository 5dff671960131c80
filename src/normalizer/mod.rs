//! Turns fetched HTML into paper records.
//!
//! ```text
//! HTML → links::extract_links → classifier::classify → PaperRecord
//! ```

pub mod classifier;
pub mod links;

pub use classifier::{classify, classify_grade, classify_subject, classify_year};
pub use links::{extract_links, Link};

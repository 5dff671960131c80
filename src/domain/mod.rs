pub mod board;
pub mod fields;
pub mod paper;

pub use board::{Board, BoardSource, BoardSources};
pub use fields::{Grade, Subject, Year, UNKNOWN};
pub use paper::PaperRecord;

mod counter;
mod keys;
mod reader;

pub use counter::{RecordOutcome, ViewCounter, DEDUP_TTL};
pub use reader::ViewReader;

pub mod json_source;
pub mod jsonl_history;

pub use json_source::JsonFileSource;
pub use jsonl_history::JsonlHistoryLog;

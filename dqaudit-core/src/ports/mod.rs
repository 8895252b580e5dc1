// dqaudit-core/src/ports/mod.rs

pub mod dataset_source;
pub mod history;

pub use dataset_source::{DatasetLocation, DatasetSource};
pub use history::HistoryLog;

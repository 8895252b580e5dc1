// dqaudit-core/src/domain/dataset/mod.rs

pub mod catalog;
pub mod table;
pub mod value;

pub use catalog::DatasetCatalog;
pub use table::Dataset;
pub use value::{Value, ValueKey};

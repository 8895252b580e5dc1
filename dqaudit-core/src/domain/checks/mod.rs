// dqaudit-core/src/domain/checks/mod.rs
//
// One executor per check category. Executors read a dataset (and, for
// referential checks, its siblings) and never mutate their inputs.

pub mod category;
pub mod completeness;
pub mod membership;
pub mod outcome;
pub mod pattern;
pub mod range;
pub mod referential;
pub mod schema;
pub mod types;
pub mod uniqueness;
pub mod zscore;

pub use category::CheckCategory;
pub use completeness::NotNullCheck;
pub use membership::AllowedValuesCheck;
pub use outcome::{CheckOutcome, MAX_SAMPLE_ROWS};
pub use pattern::PatternCheck;
pub use range::RangeCheck;
pub use referential::ReferentialCheck;
pub use schema::SchemaCheck;
pub use uniqueness::UniqueCheck;
pub use zscore::{ZSCORE_THRESHOLD, ZScoreCheck};

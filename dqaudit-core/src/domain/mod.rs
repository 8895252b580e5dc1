// dqaudit-core/src/domain/mod.rs

pub mod checks;
pub mod dataset;
pub mod error;
pub mod report;
pub mod rules;

pub use error::DomainError;

// dqaudit-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

/// Configuration problems detected by the engine itself. Rule violations
/// are never reported through this type: they become `FAIL` results.
#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Dataset '{dataset}' references unknown dataset '{reference}' (rule on column '{column}')")]
    #[diagnostic(
        code(dqaudit::domain::missing_reference),
        help("Referential integrity targets must be among the datasets supplied to the run.")
    )]
    MissingReferenceDataset {
        dataset: String,
        column: String,
        reference: String,
    },

    #[error("Invalid reference '{0}'")]
    #[diagnostic(
        code(dqaudit::domain::invalid_reference),
        help("Use the form '<dataset>.<column>', e.g. 'customers.customer_id'.")
    )]
    InvalidReference(String),

    #[error("Invalid pattern for {dataset}.{column}: {source}")]
    #[diagnostic(code(dqaudit::domain::pattern))]
    InvalidPattern {
        dataset: String,
        column: String,
        #[source]
        source: regex::Error,
    },

    #[error("Dataset '{0}' supplied more than once")]
    #[diagnostic(code(dqaudit::domain::duplicate_dataset))]
    DuplicateDataset(String),
}

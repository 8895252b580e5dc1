// dqaudit-core/src/domain/checks/outcome.rs

use crate::domain::checks::category::CheckCategory;
use crate::domain::dataset::Dataset;

/// Maximum number of failing rows kept for diagnostics.
pub const MAX_SAMPLE_ROWS: usize = 5;

/// What an executor reports for one check, before severity is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub check: String,
    pub category: CheckCategory,
    pub failed_count: usize,
    pub total_count: usize,
    pub sample: Vec<serde_json::Value>,
}

impl CheckOutcome {
    /// Outcome over the full dataset, failing on `failed_rows` (row positions
    /// in ascending order). The sample holds the first failing records.
    pub fn over_rows(
        category: CheckCategory,
        check: String,
        dataset: &Dataset,
        failed_rows: &[usize],
    ) -> Self {
        Self {
            check,
            category,
            failed_count: failed_rows.len(),
            total_count: dataset.len(),
            sample: failed_rows
                .iter()
                .take(MAX_SAMPLE_ROWS)
                .map(|row| dataset.row_record(*row))
                .collect(),
        }
    }

    pub fn passed(&self) -> bool {
        self.failed_count == 0
    }
}

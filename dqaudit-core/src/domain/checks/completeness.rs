// dqaudit-core/src/domain/checks/completeness.rs

use crate::domain::checks::category::CheckCategory;
use crate::domain::checks::outcome::CheckOutcome;
use crate::domain::dataset::Dataset;

pub struct NotNullCheck;

impl NotNullCheck {
    pub fn run(dataset: &Dataset, columns: &[String]) -> Vec<CheckOutcome> {
        columns
            .iter()
            .map(|column| {
                let failing: Vec<usize> = dataset
                    .column_or_null(column)
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.is_null())
                    .map(|(i, _)| i)
                    .collect();
                CheckOutcome::over_rows(
                    CheckCategory::NotNull,
                    CheckCategory::NotNull.check_id(column),
                    dataset,
                    &failing,
                )
            })
            .collect()
    }
}

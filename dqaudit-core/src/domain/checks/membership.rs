// dqaudit-core/src/domain/checks/membership.rs

use crate::domain::checks::category::CheckCategory;
use crate::domain::checks::outcome::CheckOutcome;
use crate::domain::dataset::Dataset;
use crate::domain::rules::AllowedRule;

pub struct AllowedValuesCheck;

impl AllowedValuesCheck {
    /// A null only passes when the allowed set lists null explicitly.
    pub fn run(dataset: &Dataset, rules: &[AllowedRule]) -> Vec<CheckOutcome> {
        rules
            .iter()
            .map(|rule| {
                let failing: Vec<usize> = dataset
                    .column_or_null(&rule.column)
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| !rule.allowed.contains(&v.key()))
                    .map(|(i, _)| i)
                    .collect();
                CheckOutcome::over_rows(
                    CheckCategory::Allowed,
                    CheckCategory::Allowed.check_id(&rule.column),
                    dataset,
                    &failing,
                )
            })
            .collect()
    }
}

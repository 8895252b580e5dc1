// dqaudit-core/src/domain/checks/uniqueness.rs

use std::collections::HashMap;

use crate::domain::checks::category::CheckCategory;
use crate::domain::checks::outcome::CheckOutcome;
use crate::domain::dataset::{Dataset, ValueKey};

pub struct UniqueCheck;

impl UniqueCheck {
    /// Every row of a duplicated value fails, the first occurrence included.
    /// Nulls group together like any other value.
    pub fn run(dataset: &Dataset, columns: &[String]) -> Vec<CheckOutcome> {
        columns
            .iter()
            .map(|column| {
                let values = dataset.column_or_null(column);
                let mut counts: HashMap<ValueKey, usize> = HashMap::new();
                let keys: Vec<ValueKey> = values.iter().map(|v| v.key()).collect();
                for key in &keys {
                    *counts.entry(key.clone()).or_default() += 1;
                }
                let failing: Vec<usize> = keys
                    .iter()
                    .enumerate()
                    .filter(|(_, key)| counts.get(*key).is_some_and(|n| *n > 1))
                    .map(|(i, _)| i)
                    .collect();
                CheckOutcome::over_rows(
                    CheckCategory::Unique,
                    CheckCategory::Unique.check_id(column),
                    dataset,
                    &failing,
                )
            })
            .collect()
    }
}

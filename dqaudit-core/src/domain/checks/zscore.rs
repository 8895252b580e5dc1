// dqaudit-core/src/domain/checks/zscore.rs

use crate::domain::checks::category::CheckCategory;
use crate::domain::checks::outcome::CheckOutcome;
use crate::domain::dataset::{Dataset, Value};

/// Standardised deviation beyond which a value is flagged.
pub const ZSCORE_THRESHOLD: f64 = 3.0;

/// Running mean and spread of a column, accumulated with Welford's method.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColumnStats {
    pub count: u64,
    pub mean: f64,
    m2: f64,
}

impl ColumnStats {
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let old_mean = self.mean;
        self.mean += (value - old_mean) / self.count as f64;
        self.m2 += (value - old_mean) * (value - self.mean);
    }

    /// Sample standard deviation (n - 1). Undefined below two values.
    pub fn stddev(&self) -> Option<f64> {
        (self.count >= 2).then(|| (self.m2 / (self.count - 1) as f64).sqrt())
    }
}

pub struct ZScoreCheck;

impl ZScoreCheck {
    /// Runs over every numeric column of the dataset in column order. A zero
    /// deviation is replaced by 1.
    pub fn run(dataset: &Dataset) -> Vec<CheckOutcome> {
        dataset
            .columns()
            .iter()
            .filter_map(|column| {
                let values = dataset.column(column)?;
                if !is_numeric_column(&values) {
                    return None;
                }
                let failing = Self::outliers(&values, ZSCORE_THRESHOLD);
                Some(CheckOutcome::over_rows(
                    CheckCategory::AnomalyZscore,
                    CheckCategory::AnomalyZscore.check_id(column),
                    dataset,
                    &failing,
                ))
            })
            .collect()
    }

    /// Row positions whose |z| exceeds `threshold`. Nulls are ignored.
    pub fn outliers(values: &[&Value], threshold: f64) -> Vec<usize> {
        let mut stats = ColumnStats::default();
        for n in values.iter().filter_map(|v| v.as_f64()) {
            stats.update(n);
        }
        let Some(stddev) = stats.stddev() else {
            return Vec::new();
        };
        let stddev = if stddev == 0.0 { 1.0 } else { stddev };
        values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_f64().map(|n| (i, n)))
            .filter(|(_, n)| ((n - stats.mean) / stddev).abs() > threshold)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Numeric when at least one value is present and every present value is a number.
fn is_numeric_column(values: &[&Value]) -> bool {
    let mut present = values.iter().filter(|v| !v.is_null()).peekable();
    present.peek().is_some() && present.all(|v| matches!(v, Value::Int(_) | Value::Float(_)))
}

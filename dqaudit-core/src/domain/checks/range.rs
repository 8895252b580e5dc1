// dqaudit-core/src/domain/checks/range.rs

use crate::domain::checks::category::CheckCategory;
use crate::domain::checks::outcome::CheckOutcome;
use crate::domain::dataset::Dataset;
use crate::domain::rules::RangeBounds;

pub struct RangeCheck;

impl RangeCheck {
    /// Values that cannot be read as numbers are not evaluated; only numbers
    /// strictly outside a configured bound fail. Type conformance is the
    /// schema check's job.
    pub fn run(dataset: &Dataset, ranges: &[(String, RangeBounds)]) -> Vec<CheckOutcome> {
        ranges
            .iter()
            .map(|(column, bounds)| {
                let failing: Vec<usize> = dataset
                    .column_or_null(column)
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| v.coerce_f64().is_some_and(|n| out_of_bounds(n, bounds)))
                    .map(|(i, _)| i)
                    .collect();
                CheckOutcome::over_rows(
                    CheckCategory::Range,
                    CheckCategory::Range.check_id(column),
                    dataset,
                    &failing,
                )
            })
            .collect()
    }
}

fn out_of_bounds(n: f64, bounds: &RangeBounds) -> bool {
    bounds.min.is_some_and(|min| n < min) || bounds.max.is_some_and(|max| n > max)
}

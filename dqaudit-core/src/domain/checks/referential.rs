// dqaudit-core/src/domain/checks/referential.rs

use std::collections::HashSet;

use crate::domain::checks::category::CheckCategory;
use crate::domain::checks::outcome::CheckOutcome;
use crate::domain::dataset::{Dataset, DatasetCatalog, ValueKey};
use crate::domain::error::DomainError;
use crate::domain::rules::ForeignKey;

pub struct ReferentialCheck;

impl ReferentialCheck {
    /// A source row fails when its value is absent from the distinct non-null
    /// values of the referenced column. Null keys therefore always fail.
    /// A reference to a dataset outside the catalog is a configuration error.
    pub fn run(
        dataset: &Dataset,
        foreign_keys: &[ForeignKey],
        catalog: &DatasetCatalog,
    ) -> Result<Vec<CheckOutcome>, DomainError> {
        foreign_keys
            .iter()
            .map(|fk| {
                let referenced = catalog.get(&fk.ref_dataset).ok_or_else(|| {
                    DomainError::MissingReferenceDataset {
                        dataset: dataset.name().to_string(),
                        column: fk.column.clone(),
                        reference: fk.ref_dataset.clone(),
                    }
                })?;
                let known = Self::reference_keys(referenced, &fk.ref_column);
                let failing: Vec<usize> = dataset
                    .column_or_null(&fk.column)
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| !known.contains(&v.key()))
                    .map(|(i, _)| i)
                    .collect();
                Ok(CheckOutcome::over_rows(
                    CheckCategory::Fk,
                    format!("{}->{}", CheckCategory::Fk.check_id(&fk.column), fk.target()),
                    dataset,
                    &failing,
                ))
            })
            .collect()
    }

    fn reference_keys(referenced: &Dataset, column: &str) -> HashSet<ValueKey> {
        referenced
            .column_or_null(column)
            .into_iter()
            .filter(|v| !v.is_null())
            .map(|v| v.key())
            .collect()
    }

    /// Confirms every reference target is a known dataset, without running.
    /// Rules for datasets that are not part of the run are ignored.
    pub fn validate_targets<'a>(
        foreign_keys: impl IntoIterator<Item = (&'a str, &'a ForeignKey)>,
        is_known: impl Fn(&str) -> bool,
    ) -> Result<(), DomainError> {
        for (dataset, fk) in foreign_keys {
            if is_known(dataset) && !is_known(&fk.ref_dataset) {
                return Err(DomainError::MissingReferenceDataset {
                    dataset: dataset.to_string(),
                    column: fk.column.clone(),
                    reference: fk.ref_dataset.clone(),
                });
            }
        }
        Ok(())
    }
}

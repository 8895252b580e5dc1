// dqaudit-core/src/domain/checks/schema.rs

use serde_json::json;

use crate::domain::checks::category::CheckCategory;
use crate::domain::checks::outcome::CheckOutcome;
use crate::domain::checks::types;
use crate::domain::dataset::Dataset;
use crate::domain::rules::DatasetSchema;

pub struct SchemaCheck;

impl SchemaCheck {
    /// One synthetic failure (`failed=1, total=0`) per declared column that the
    /// dataset does not carry at all.
    pub fn required_columns(dataset: &Dataset, schema: &DatasetSchema) -> Vec<CheckOutcome> {
        schema
            .columns()
            .filter(|(column, _)| !dataset.has_column(column))
            .map(|(column, _)| CheckOutcome {
                check: CheckCategory::SchemaRequired.check_id(column),
                category: CheckCategory::SchemaRequired,
                failed_count: 1,
                total_count: 0,
                sample: vec![json!({ "missing_column": column })],
            })
            .collect()
    }

    /// Type conformance for every declared column that is present. Columns
    /// with an unrecognised type produce no result.
    pub fn column_types(dataset: &Dataset, schema: &DatasetSchema) -> Vec<CheckOutcome> {
        schema
            .columns()
            .filter_map(|(column, ty)| {
                let ty = ty?;
                let values = dataset.column(column)?;
                let invalid = types::invalid_positions(&values, ty);
                Some(CheckOutcome::over_rows(
                    CheckCategory::SchemaType,
                    CheckCategory::SchemaType.check_id(column),
                    dataset,
                    &invalid,
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use serde_json::json;

    fn schema(entries: &[(&str, &str)]) -> DatasetSchema {
        DatasetSchema {
            required: entries
                .iter()
                .map(|(c, t)| (c.to_string(), t.to_string()))
                .collect::<IndexMap<_, _>>(),
        }
    }

    #[test]
    fn test_missing_column_emits_synthetic_failure() {
        let ds = Dataset::from_json_rows("customers", &[json!({"email": "a@b.com"})]);
        let outcomes =
            SchemaCheck::required_columns(&ds, &schema(&[("customer_id", "int"), ("email", "string")]));
        assert_eq!(outcomes.len(), 1);
        let missing = &outcomes[0];
        assert_eq!(missing.check, "schema_required:customer_id");
        assert_eq!((missing.failed_count, missing.total_count), (1, 0));
        assert_eq!(missing.sample, vec![json!({"missing_column": "customer_id"})]);
    }

    #[test]
    fn test_type_check_counts_violations_over_all_rows() {
        let ds = Dataset::from_json_rows(
            "customers",
            &[json!({"age": "bad"}), json!({"age": 22}), json!({"age": null})],
        );
        let outcomes = SchemaCheck::column_types(&ds, &schema(&[("age", "int")]));
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].check, "schema_type:age");
        assert_eq!(outcomes[0].failed_count, 1);
        assert_eq!(outcomes[0].total_count, 3);
        assert_eq!(outcomes[0].sample, vec![json!({"age": "bad"})]);
    }

    #[test]
    fn test_unknown_type_and_absent_column_are_skipped() {
        let ds = Dataset::from_json_rows("t", &[json!({"blob": "x"})]);
        let outcomes =
            SchemaCheck::column_types(&ds, &schema(&[("blob", "varbinary"), ("missing", "int")]));
        assert!(outcomes.is_empty());
    }
}

// dqaudit-core/src/domain/checks/pattern.rs

use crate::domain::checks::category::CheckCategory;
use crate::domain::checks::outcome::CheckOutcome;
use crate::domain::dataset::Dataset;
use crate::domain::rules::PatternRule;

pub struct PatternCheck;

impl PatternCheck {
    /// Missing values are matched as the empty string. The compiled pattern is
    /// anchored at the start only; an end anchor must be written explicitly.
    pub fn run(dataset: &Dataset, rules: &[PatternRule]) -> Vec<CheckOutcome> {
        rules
            .iter()
            .map(|rule| {
                let failing: Vec<usize> = dataset
                    .column_or_null(&rule.column)
                    .iter()
                    .enumerate()
                    .filter(|(_, v)| !rule.regex.is_match(&v.render()))
                    .map(|(i, _)| i)
                    .collect();
                CheckOutcome::over_rows(
                    CheckCategory::Regex,
                    CheckCategory::Regex.check_id(&rule.column),
                    dataset,
                    &failing,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::{DatasetRules, RuleSet};
    use indexmap::IndexMap;
    use serde_json::json;

    fn compile(column: &str, pattern: &str) -> anyhow::Result<Vec<PatternRule>> {
        let rules = RuleSet::default().with(
            "t",
            DatasetRules {
                regex: IndexMap::from([(column.to_string(), pattern.to_string())]),
                ..Default::default()
            },
        );
        Ok(rules
            .compile()?
            .for_dataset("t")
            .map(|r| r.patterns.clone())
            .unwrap_or_default())
    }

    #[test]
    fn test_email_pattern() -> anyhow::Result<()> {
        let ds = Dataset::from_json_rows(
            "customers",
            &[json!({"email": "ok@test.com"}), json!({"email": "bad-email"})],
        );
        let outcomes = PatternCheck::run(&ds, &compile("email", r"^.+@.+\..+$")?);
        assert_eq!(outcomes[0].check, "regex:email");
        assert_eq!(outcomes[0].failed_count, 1);
        assert_eq!(outcomes[0].sample, vec![json!({"email": "bad-email"})]);
        Ok(())
    }

    #[test]
    fn test_prefix_match_without_end_anchor() -> anyhow::Result<()> {
        let ds = Dataset::from_json_rows(
            "t",
            &[json!({"sku": "AB-123-extra"}), json!({"sku": "xAB-123"})],
        );
        let outcomes = PatternCheck::run(&ds, &compile("sku", r"[A-Z]{2}-\d+")?);
        assert_eq!(outcomes[0].failed_count, 1);
        Ok(())
    }

    #[test]
    fn test_null_is_matched_as_empty_string() -> anyhow::Result<()> {
        let ds = Dataset::from_json_rows("t", &[json!({"note": null}), json!({"note": "x"})]);
        assert_eq!(PatternCheck::run(&ds, &compile("note", ".*")?)[0].failed_count, 0);
        assert_eq!(PatternCheck::run(&ds, &compile("note", ".+")?)[0].failed_count, 1);
        Ok(())
    }

    #[test]
    fn test_numbers_are_matched_by_text_form() -> anyhow::Result<()> {
        let ds = Dataset::from_json_rows("t", &[json!({"zip": 12345}), json!({"zip": 99.5})]);
        let outcomes = PatternCheck::run(&ds, &compile("zip", r"^\d{5}$")?);
        assert_eq!(outcomes[0].failed_count, 1);
        Ok(())
    }
}

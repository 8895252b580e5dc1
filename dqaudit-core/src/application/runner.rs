// dqaudit-core/src/application/runner.rs

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::checks::{
    AllowedValuesCheck, CheckOutcome, NotNullCheck, PatternCheck, RangeCheck, ReferentialCheck,
    SchemaCheck, UniqueCheck, ZScoreCheck,
};
use crate::domain::dataset::{Dataset, DatasetCatalog};
use crate::domain::error::DomainError;
use crate::domain::report::{CheckResult, QualityReport, ResultAggregator, RunId, RunMetrics};
use crate::domain::rules::{CompiledRules, CompiledRuleSet, QualityProfile, RuleSet, SchemaDocument};
use crate::error::AuditError;

/// Runs every configured check over a catalog and folds the outcomes into a
/// report. Holds only read-only configuration, so one runner can be shared
/// across tasks.
#[derive(Debug, Clone, Default)]
pub struct AuditRunner {
    rules: CompiledRuleSet,
    schema: SchemaDocument,
    profile: QualityProfile,
}

impl AuditRunner {
    pub fn new(rules: CompiledRuleSet, schema: SchemaDocument, profile: QualityProfile) -> Self {
        Self {
            rules,
            schema,
            profile,
        }
    }

    /// Compiles the rule document. Fails on bad patterns or references.
    pub fn from_documents(
        rules: &RuleSet,
        schema: SchemaDocument,
        profile: QualityProfile,
    ) -> Result<Self, DomainError> {
        Ok(Self::new(rules.compile()?, schema, profile))
    }

    pub fn rules(&self) -> &CompiledRuleSet {
        &self.rules
    }

    pub fn profile(&self) -> &QualityProfile {
        &self.profile
    }

    /// Fails when a rule for a dataset in the run references a dataset that
    /// is not.
    pub fn validate(&self, is_known: impl Fn(&str) -> bool) -> Result<(), DomainError> {
        ReferentialCheck::validate_targets(self.rules.foreign_keys(), is_known)
    }

    #[instrument(skip_all, fields(datasets = catalog.len()))]
    pub fn run(&self, catalog: &DatasetCatalog) -> Result<QualityReport, DomainError> {
        self.run_at(catalog, Utc::now())
    }

    /// Sequential run with an explicit start instant.
    pub fn run_at(
        &self,
        catalog: &DatasetCatalog,
        started_at: DateTime<Utc>,
    ) -> Result<QualityReport, DomainError> {
        self.validate(|name| catalog.contains(name))?;

        let mut results = Vec::new();
        for dataset in catalog {
            results.extend(self.audit_dataset(dataset, catalog)?);
        }
        Ok(self.assemble(catalog, results, started_at))
    }

    /// Same results as [`AuditRunner::run`], one blocking task per dataset.
    /// Per-dataset lists are concatenated in catalog order.
    #[instrument(skip_all, fields(datasets = catalog.len()))]
    pub async fn run_concurrent(
        self: Arc<Self>,
        catalog: Arc<DatasetCatalog>,
    ) -> Result<QualityReport, AuditError> {
        let started_at = Utc::now();
        self.validate(|name| catalog.contains(name))?;

        let tasks = (0..catalog.len()).map(|position| {
            let runner = Arc::clone(&self);
            let catalog = Arc::clone(&catalog);
            async move {
                tokio::task::spawn_blocking(move || {
                    catalog
                        .iter()
                        .nth(position)
                        .ok_or_else(|| {
                            AuditError::InternalError(format!("dataset #{} vanished", position))
                        })
                        .and_then(|dataset| {
                            runner
                                .audit_dataset(dataset, &catalog)
                                .map_err(AuditError::from)
                        })
                })
                .await
                .map_err(|e| AuditError::InternalError(format!("audit task failed: {}", e)))
                .and_then(|result| result)
            }
        });

        let per_dataset = try_join_all(tasks).await?;
        let results = per_dataset.into_iter().flatten().collect();
        Ok(self.assemble(&catalog, results, started_at))
    }

    /// All results for one dataset: schema checks, then rule checks, then
    /// anomaly detection.
    pub fn audit_dataset(
        &self,
        dataset: &Dataset,
        catalog: &DatasetCatalog,
    ) -> Result<Vec<CheckResult>, DomainError> {
        let mut outcomes: Vec<CheckOutcome> = Vec::new();

        if let Some(schema) = self.schema.for_dataset(dataset.name()) {
            outcomes.extend(SchemaCheck::required_columns(dataset, schema));
            outcomes.extend(SchemaCheck::column_types(dataset, schema));
        }

        if let Some(rules) = self.rules.for_dataset(dataset.name()) {
            warn_absent_columns(dataset, rules);
            outcomes.extend(NotNullCheck::run(dataset, &rules.not_null));
            outcomes.extend(UniqueCheck::run(dataset, &rules.unique));
            outcomes.extend(PatternCheck::run(dataset, &rules.patterns));
            outcomes.extend(RangeCheck::run(dataset, &rules.ranges));
            outcomes.extend(AllowedValuesCheck::run(dataset, &rules.allowed));
            outcomes.extend(ReferentialCheck::run(dataset, &rules.foreign_keys, catalog)?);
        }

        outcomes.extend(ZScoreCheck::run(dataset));

        let failed = outcomes.iter().filter(|o| !o.passed()).count();
        debug!(
            dataset = dataset.name(),
            checks = outcomes.len(),
            failed,
            "Dataset audited"
        );

        let aggregator = ResultAggregator::new(&self.profile);
        Ok(outcomes
            .into_iter()
            .map(|outcome| aggregator.classify(dataset.name(), outcome))
            .collect())
    }

    fn assemble(
        &self,
        catalog: &DatasetCatalog,
        results: Vec<CheckResult>,
        started_at: DateTime<Utc>,
    ) -> QualityReport {
        let row_counts: IndexMap<String, usize> = catalog
            .iter()
            .map(|ds| (ds.name().to_string(), ds.len()))
            .collect();
        let summary = ResultAggregator::new(&self.profile).summarize(&results);
        info!(
            total = summary.total_checks,
            failed = summary.failed_checks,
            pass_rate = summary.pass_rate,
            sla = summary.sla.pass,
            "Run aggregated"
        );
        let metrics = RunMetrics::new(
            RunId::from_instant(started_at),
            started_at,
            row_counts,
            summary,
        );
        QualityReport { results, metrics }
    }
}

fn warn_absent_columns(dataset: &Dataset, rules: &CompiledRules) {
    let columns = rules
        .not_null
        .iter()
        .chain(&rules.unique)
        .chain(rules.patterns.iter().map(|p| &p.column))
        .chain(rules.ranges.iter().map(|(c, _)| c))
        .chain(rules.allowed.iter().map(|a| &a.column))
        .chain(rules.foreign_keys.iter().map(|fk| &fk.column));
    for column in columns.filter(|c| !dataset.has_column(c)) {
        warn!(
            dataset = dataset.name(),
            column = column.as_str(),
            "Rule column absent from dataset, reading it as null"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::checks::CheckCategory;
    use crate::domain::report::CheckStatus;
    use crate::domain::rules::{DatasetRules, DatasetSchema, RangeBounds, Severity, SlaThresholds};
    use chrono::TimeZone;
    use serde_json::json;

    fn customers() -> Dataset {
        Dataset::from_json_rows(
            "customers",
            &[
                json!({"customer_id": 1, "email": "ann@shop.io", "age": 25, "tier": "gold"}),
                json!({"customer_id": 2, "email": "bob(at)shop.io", "age": 17, "tier": "silver"}),
                json!({"customer_id": 3, "email": null, "age": 70, "tier": "platinum"}),
                json!({"customer_id": 3, "email": "cy@shop.io", "age": "n/a", "tier": null}),
            ],
        )
    }

    fn orders() -> Dataset {
        Dataset::from_json_rows(
            "orders",
            &[
                json!({"order_id": 10, "customer_id": 1, "amount": 12.5}),
                json!({"order_id": 11, "customer_id": 2, "amount": 8.0}),
                json!({"order_id": 12, "customer_id": 99, "amount": 9.5}),
            ],
        )
    }

    fn catalog() -> DatasetCatalog {
        DatasetCatalog::new()
            .with(customers())
            .and_then(|c| c.with(orders()))
            .unwrap()
    }

    fn rules() -> RuleSet {
        let customers = DatasetRules {
            not_null: vec!["email".into()],
            unique: vec!["customer_id".into()],
            regex: [("email".to_string(), r"[^@]+@[^@]+\.[a-z]+".to_string())].into(),
            ranges: [(
                "age".to_string(),
                RangeBounds {
                    min: Some(18.0),
                    max: Some(65.0),
                },
            )]
            .into(),
            allowed_values: [(
                "tier".to_string(),
                vec![serde_yaml::Value::from("gold"), serde_yaml::Value::from("silver")],
            )]
            .into(),
            ..Default::default()
        };
        let orders = DatasetRules {
            referential_integrity: [(
                "customer_id".to_string(),
                "customers.customer_id".to_string(),
            )]
            .into(),
            ..Default::default()
        };
        RuleSet::default()
            .with("customers", customers)
            .with("orders", orders)
    }

    fn schema() -> SchemaDocument {
        let mut doc = SchemaDocument::default();
        doc.insert(
            "orders",
            DatasetSchema {
                required: [
                    ("order_id".to_string(), "int".to_string()),
                    ("amount".to_string(), "float".to_string()),
                    ("currency".to_string(), "string".to_string()),
                ]
                .into(),
            },
        );
        doc
    }

    fn runner(profile: QualityProfile) -> AuditRunner {
        AuditRunner::from_documents(&rules(), schema(), profile).unwrap()
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 31, 10, 15, 0).unwrap()
    }

    fn find<'a>(report: &'a QualityReport, dataset: &str, check: &str) -> &'a CheckResult {
        report
            .results
            .iter()
            .find(|r| r.dataset == dataset && r.check == check)
            .unwrap()
    }

    #[test]
    fn test_result_order_is_fixed() -> anyhow::Result<()> {
        let report = runner(QualityProfile::default()).run_at(&catalog(), at())?;
        let checks: Vec<_> = report
            .results
            .iter()
            .map(|r| format!("{}/{}", r.dataset, r.check))
            .collect();
        assert_eq!(
            checks,
            vec![
                "customers/not_null:email",
                "customers/unique:customer_id",
                "customers/regex:email",
                "customers/range:age",
                "customers/allowed:tier",
                "customers/anomaly_zscore:customer_id",
                "orders/schema_required:currency",
                "orders/schema_type:order_id",
                "orders/schema_type:amount",
                "orders/fk:customer_id->customers.customer_id",
                "orders/anomaly_zscore:order_id",
                "orders/anomaly_zscore:customer_id",
                "orders/anomaly_zscore:amount",
            ]
        );
        Ok(())
    }

    #[test]
    fn test_rule_semantics_end_to_end() -> anyhow::Result<()> {
        let report = runner(QualityProfile::default()).run_at(&catalog(), at())?;

        assert_eq!(find(&report, "customers", "not_null:email").failed_count, 1);
        assert_eq!(find(&report, "customers", "unique:customer_id").failed_count, 2);
        // Null email is matched as "", which fails the pattern.
        assert_eq!(find(&report, "customers", "regex:email").failed_count, 2);
        // 17 and 70 fail, "n/a" is not evaluable.
        assert_eq!(find(&report, "customers", "range:age").failed_count, 2);
        // "platinum" and null.
        assert_eq!(find(&report, "customers", "allowed:tier").failed_count, 2);

        let fk = find(&report, "orders", "fk:customer_id->customers.customer_id");
        assert_eq!(fk.failed_count, 1);
        assert_eq!(fk.status, CheckStatus::Fail);

        let missing = find(&report, "orders", "schema_required:currency");
        assert_eq!((missing.failed_count, missing.total_count), (1, 0));
        assert_eq!(find(&report, "orders", "schema_type:amount").status, CheckStatus::Pass);

        // Age holds text, so it is not a numeric column.
        assert!(
            !report
                .results
                .iter()
                .any(|r| r.check == "anomaly_zscore:age")
        );
        Ok(())
    }

    #[test]
    fn test_metrics_and_invariants() -> anyhow::Result<()> {
        let report = runner(QualityProfile::default()).run_at(&catalog(), at())?;
        let m = &report.metrics;

        assert_eq!(m.row_counts.values().sum::<usize>(), 7);
        assert_eq!(m.run_id.as_str(), "20240131T101500Z");
        assert_eq!(m.generated_at, "2024-01-31T10:15:00+00:00");
        assert_eq!(m.summary.total_checks, report.results.len());
        assert!((0.0..=100.0).contains(&m.summary.pass_rate));
        assert!(m.summary.critical_failures <= m.summary.failed_checks);
        assert!(m.summary.sla.pass);
        for r in &report.results {
            assert!(r.failed_count <= r.total_count || r.check_type == CheckCategory::SchemaRequired);
            assert_eq!(r.status == CheckStatus::Pass, r.failed_count == 0);
            assert_eq!(r.severity, Severity::Medium);
        }
        Ok(())
    }

    #[test]
    fn test_sla_uses_profile() -> anyhow::Result<()> {
        let profile = QualityProfile {
            severity_map: Default::default(),
            sla: SlaThresholds {
                min_pass_rate: Some(99.0),
                max_critical_failures: None,
            },
        };
        let report = runner(profile).run_at(&catalog(), at())?;
        assert!(!report.metrics.summary.sla.pass);

        let strict = QualityProfile {
            severity_map: crate::domain::rules::SeverityMap::default()
                .with(CheckCategory::Fk, Severity::Critical),
            sla: SlaThresholds {
                min_pass_rate: None,
                max_critical_failures: Some(0),
            },
        };
        let report = runner(strict).run_at(&catalog(), at())?;
        assert_eq!(report.metrics.summary.critical_failures, 1);
        assert!(!report.metrics.summary.sla.pass);
        Ok(())
    }

    #[test]
    fn test_rule_and_row_count_order_follow_sources() -> anyhow::Result<()> {
        let rules: RuleSet = serde_yaml::from_str(
            "orders:\n  not_null: [order_id]\n  ranges:\n    order_id: {min: 0}\n    amount: {min: 0}\ncustomers:\n",
        )?;
        let runner = AuditRunner::from_documents(
            &rules,
            SchemaDocument::default(),
            QualityProfile::default(),
        )?;
        let catalog = DatasetCatalog::new().with(orders())?.with(customers())?;
        let report = runner.run_at(&catalog, at())?;

        let ranges: Vec<_> = report
            .results
            .iter()
            .filter(|r| r.check_type == CheckCategory::Range)
            .map(|r| r.check.as_str())
            .collect();
        assert_eq!(ranges, vec!["range:order_id", "range:amount"]);
        assert_eq!(
            report.metrics.row_counts.keys().collect::<Vec<_>>(),
            vec!["orders", "customers"]
        );
        Ok(())
    }

    #[test]
    fn test_missing_reference_dataset_is_fatal() {
        let only_orders = DatasetCatalog::new().with(orders()).unwrap();
        let res = runner(QualityProfile::default()).run_at(&only_orders, at());
        assert!(matches!(res, Err(DomainError::MissingReferenceDataset { .. })));
    }

    #[test]
    fn test_runs_are_idempotent() -> anyhow::Result<()> {
        let runner = runner(QualityProfile::default());
        let first = runner.run(&catalog())?;
        let second = runner.run(&catalog())?;
        assert_eq!(first.results, second.results);
        assert_eq!(first.metrics.summary, second.metrics.summary);
        assert_eq!(first.metrics.row_counts, second.metrics.row_counts);
        Ok(())
    }

    #[test]
    fn test_empty_catalog_produces_empty_report() -> anyhow::Result<()> {
        let report = AuditRunner::default().run_at(&DatasetCatalog::new(), at())?;
        assert!(report.results.is_empty());
        assert_eq!(report.metrics.summary.pass_rate, 0.0);
        assert!(report.metrics.summary.sla.pass);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_run_matches_sequential() -> anyhow::Result<()> {
        let runner = Arc::new(runner(QualityProfile::default()));
        let catalog = Arc::new(catalog());

        let sequential = runner.run(&catalog)?;
        let concurrent = Arc::clone(&runner)
            .run_concurrent(Arc::clone(&catalog))
            .await?;

        assert_eq!(sequential.results, concurrent.results);
        assert_eq!(sequential.metrics.summary, concurrent.metrics.summary);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_run_validates_before_spawning() {
        let runner = Arc::new(runner(QualityProfile::default()));
        let only_orders = Arc::new(DatasetCatalog::new().with(orders()).unwrap());
        let res = runner.run_concurrent(only_orders).await;
        assert!(matches!(
            res,
            Err(AuditError::Domain(DomainError::MissingReferenceDataset { .. }))
        ));
    }
}

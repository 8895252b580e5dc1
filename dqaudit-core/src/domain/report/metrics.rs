// dqaudit-core/src/domain/report/metrics.rs

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use std::fmt;

use crate::domain::checks::CheckOutcome;
use crate::domain::report::result::{CheckResult, CheckStatus};
use crate::domain::rules::{QualityProfile, SlaThresholds};

/// Run identifier derived from the UTC start instant, e.g. `20240131T101500Z`.
/// Lexical order equals chronological order at second granularity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self(instant.format("%Y%m%dT%H%M%SZ").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlaVerdict {
    pub min_pass_rate: Option<f64>,
    pub max_critical_failures: Option<u64>,
    pub pass: bool,
}

impl SlaVerdict {
    /// Each threshold can only fail when it is configured.
    pub fn evaluate(thresholds: &SlaThresholds, pass_rate: f64, critical_failures: usize) -> Self {
        let rate_ok = thresholds.min_pass_rate.is_none_or(|min| pass_rate >= min);
        let critical_ok = thresholds
            .max_critical_failures
            .is_none_or(|max| critical_failures as u64 <= max);
        Self {
            min_pass_rate: thresholds.min_pass_rate,
            max_critical_failures: thresholds.max_critical_failures,
            pass: rate_ok && critical_ok,
        }
    }
}

/// Aggregate counts over a run's results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_checks: usize,
    pub failed_checks: usize,
    pub pass_rate: f64,
    pub critical_failures: usize,
    pub sla: SlaVerdict,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Rows per dataset, in run order.
    pub row_counts: IndexMap<String, usize>,
    pub generated_at: String,
    pub run_id: RunId,
    #[serde(flatten)]
    pub summary: RunSummary,
}

impl RunMetrics {
    pub fn new(
        run_id: RunId,
        generated_at: DateTime<Utc>,
        row_counts: IndexMap<String, usize>,
        summary: RunSummary,
    ) -> Self {
        Self {
            row_counts,
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, false),
            run_id,
            summary,
        }
    }
}

/// Attaches severity and status to executor outcomes and folds results into
/// run-level metrics, using the severity map and SLA of one profile.
pub struct ResultAggregator<'a> {
    profile: &'a QualityProfile,
}

impl<'a> ResultAggregator<'a> {
    pub fn new(profile: &'a QualityProfile) -> Self {
        Self { profile }
    }

    pub fn classify(&self, dataset: &str, outcome: CheckOutcome) -> CheckResult {
        CheckResult {
            dataset: dataset.to_string(),
            severity: self.profile.severity_map.severity_for(outcome.category),
            status: CheckStatus::from_failures(outcome.failed_count),
            check: outcome.check,
            check_type: outcome.category,
            failed_count: outcome.failed_count,
            total_count: outcome.total_count,
            sample: outcome.sample,
        }
    }

    pub fn summarize(&self, results: &[CheckResult]) -> RunSummary {
        let total_checks = results.len();
        let failed_checks = results.iter().filter(|r| r.is_failure()).count();
        let critical_failures = results.iter().filter(|r| r.is_critical_failure()).count();
        let pass_rate = pass_rate(total_checks, failed_checks);
        RunSummary {
            total_checks,
            failed_checks,
            pass_rate,
            critical_failures,
            sla: SlaVerdict::evaluate(&self.profile.sla, pass_rate, critical_failures),
        }
    }
}

/// Percentage of passing checks, rounded to one decimal. Exact halves round
/// to even, so 81.25 reports as 81.2.
pub fn pass_rate(total: usize, failed: usize) -> f64 {
    let passed = total.saturating_sub(failed) as f64;
    let rate = passed / total.max(1) as f64 * 100.0;
    (rate * 10.0).round_ties_even() / 10.0
}

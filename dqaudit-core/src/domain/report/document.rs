// dqaudit-core/src/domain/report/document.rs

use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

use crate::domain::report::metrics::{RunId, RunMetrics, SlaVerdict};
use crate::domain::report::result::CheckResult;

/// The output document handed to reporting and archival consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub results: Vec<CheckResult>,
    pub metrics: RunMetrics,
}

impl QualityReport {
    pub fn history_entry(&self) -> RunHistoryEntry {
        RunHistoryEntry::from(&self.metrics)
    }
}

/// Append-only projection of one run's metrics. Written once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunHistoryEntry {
    pub run_id: RunId,
    pub generated_at: String,
    pub total_checks: usize,
    pub failed_checks: usize,
    pub pass_rate: f64,
    pub critical_failures: usize,
    pub sla: SlaVerdict,
    pub row_counts: IndexMap<String, usize>,
}

impl From<&RunMetrics> for RunHistoryEntry {
    fn from(metrics: &RunMetrics) -> Self {
        Self {
            run_id: metrics.run_id.clone(),
            generated_at: metrics.generated_at.clone(),
            total_checks: metrics.summary.total_checks,
            failed_checks: metrics.summary.failed_checks,
            pass_rate: metrics.summary.pass_rate,
            critical_failures: metrics.summary.critical_failures,
            sla: metrics.summary.sla,
            row_counts: metrics.row_counts.clone(),
        }
    }
}

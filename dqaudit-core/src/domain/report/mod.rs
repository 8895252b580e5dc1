// dqaudit-core/src/domain/report/mod.rs

pub mod document;
pub mod metrics;
pub mod result;

pub use document::{QualityReport, RunHistoryEntry};
pub use metrics::{ResultAggregator, RunId, RunMetrics, RunSummary, SlaVerdict, pass_rate};
pub use result::{CheckResult, CheckStatus};

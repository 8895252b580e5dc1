// dqaudit-core/src/domain/report/result.rs

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::checks::CheckCategory;
use crate::domain::rules::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl CheckStatus {
    pub fn from_failures(failed_count: usize) -> Self {
        if failed_count == 0 { Self::Pass } else { Self::Fail }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One check applied to one column (or column pair) of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub dataset: String,
    pub check: String,
    pub check_type: CheckCategory,
    pub severity: Severity,
    pub status: CheckStatus,
    pub failed_count: usize,
    pub total_count: usize,
    pub sample: Vec<serde_json::Value>,
}

impl CheckResult {
    pub fn is_failure(&self) -> bool {
        self.status == CheckStatus::Fail
    }

    pub fn is_critical_failure(&self) -> bool {
        self.is_failure() && self.severity.is_critical()
    }
}

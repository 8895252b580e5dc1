// dqaudit-core/src/domain/rules/profile.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;
use validator::Validate;

use crate::domain::checks::category::CheckCategory;

/// Classification label attached to a result. Only `critical` feeds the
/// critical-failure count; any other label is carried through as written.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
            Self::Other(label) => label,
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Critical)
    }
}

impl From<String> for Severity {
    fn from(label: String) -> Self {
        match label.as_str() {
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "critical" => Self::Critical,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for Severity {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity per check category. Unmapped categories are `medium`; keys that
/// name no check category are dropped when the document is read.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(from = "BTreeMap<String, Severity>", into = "BTreeMap<String, Severity>")]
pub struct SeverityMap(BTreeMap<CheckCategory, Severity>);

impl SeverityMap {
    pub fn severity_for(&self, category: CheckCategory) -> Severity {
        self.0.get(&category).cloned().unwrap_or_default()
    }

    pub fn with(mut self, category: CheckCategory, severity: Severity) -> Self {
        self.0.insert(category, severity);
        self
    }
}

impl From<BTreeMap<String, Severity>> for SeverityMap {
    fn from(raw: BTreeMap<String, Severity>) -> Self {
        let mut map = BTreeMap::new();
        for (key, severity) in raw {
            match key.parse::<CheckCategory>() {
                Ok(category) => {
                    map.insert(category, severity);
                }
                Err(_) => warn!(
                    category = key.as_str(),
                    "Ignoring severity for unknown check category"
                ),
            }
        }
        Self(map)
    }
}

impl From<SeverityMap> for BTreeMap<String, Severity> {
    fn from(map: SeverityMap) -> Self {
        map.0
            .into_iter()
            .map(|(category, severity)| (category.as_str().to_string(), severity))
            .collect()
    }
}

/// Thresholds a run is judged against. An absent threshold cannot fail.
#[derive(Debug, Deserialize, Serialize, Validate, Clone, Copy, Default, PartialEq)]
pub struct SlaThresholds {
    #[validate(range(min = 0.0, max = 100.0, message = "min_pass_rate must be a percentage"))]
    #[serde(default)]
    pub min_pass_rate: Option<f64>,
    #[serde(default)]
    pub max_critical_failures: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone, Default, PartialEq)]
pub struct QualityProfile {
    #[serde(default)]
    pub severity_map: SeverityMap,
    #[validate(nested)]
    #[serde(default)]
    pub sla: SlaThresholds,
}

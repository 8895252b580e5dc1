// dqaudit-core/src/domain/checks/category.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of check categories the engine executes. The wire name is
/// the prefix of every check identifier (`<category>:<column>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    SchemaRequired,
    SchemaType,
    NotNull,
    Unique,
    Regex,
    Range,
    Allowed,
    Fk,
    AnomalyZscore,
}

impl CheckCategory {
    pub const ALL: [CheckCategory; 9] = [
        Self::SchemaRequired,
        Self::SchemaType,
        Self::NotNull,
        Self::Unique,
        Self::Regex,
        Self::Range,
        Self::Allowed,
        Self::Fk,
        Self::AnomalyZscore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SchemaRequired => "schema_required",
            Self::SchemaType => "schema_type",
            Self::NotNull => "not_null",
            Self::Unique => "unique",
            Self::Regex => "regex",
            Self::Range => "range",
            Self::Allowed => "allowed",
            Self::Fk => "fk",
            Self::AnomalyZscore => "anomaly_zscore",
        }
    }

    /// Check identifier for a single-column check.
    pub fn check_id(&self, column: &str) -> String {
        format!("{}:{}", self.as_str(), column)
    }
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CheckCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown check category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_wire_names_round_trip_through_serde() -> anyhow::Result<()> {
        for category in CheckCategory::ALL {
            let yaml = serde_yaml::to_string(&category)?;
            assert_eq!(yaml.trim(), category.as_str());
            assert_eq!(
                CheckCategory::from_str(category.as_str()).map_err(|e| anyhow::anyhow!(e))?,
                category
            );
        }
        Ok(())
    }

    #[test]
    fn test_check_id() {
        assert_eq!(CheckCategory::NotNull.check_id("email"), "not_null:email");
        assert_eq!(
            CheckCategory::AnomalyZscore.check_id("order_total"),
            "anomaly_zscore:order_total"
        );
    }
}

// dqaudit-core/src/domain/rules/ruleset.rs

use regex::Regex;
use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use std::collections::HashSet;

use crate::domain::dataset::{Value, ValueKey};
use crate::domain::error::DomainError;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq)]
pub struct RangeBounds {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

/// Declarative rules for one dataset, as written in the rules document.
/// Column maps keep document order, which is the order checks run in.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DatasetRules {
    #[serde(default)]
    pub not_null: Vec<String>,
    #[serde(default)]
    pub unique: Vec<String>,
    #[serde(default)]
    pub regex: IndexMap<String, String>,
    #[serde(default)]
    pub ranges: IndexMap<String, RangeBounds>,
    #[serde(default)]
    pub allowed_values: IndexMap<String, Vec<serde_yaml::Value>>,
    /// column -> "<dataset>.<column>"
    #[serde(default)]
    pub referential_integrity: IndexMap<String, String>,
}

/// Rules document keyed by dataset name.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(transparent)]
pub struct RuleSet {
    datasets: IndexMap<String, Option<DatasetRules>>,
}

impl RuleSet {
    pub fn for_dataset(&self, dataset: &str) -> Option<&DatasetRules> {
        self.datasets.get(dataset).and_then(Option::as_ref)
    }

    pub fn insert(&mut self, dataset: impl Into<String>, rules: DatasetRules) {
        self.datasets.insert(dataset.into(), Some(rules));
    }

    pub fn with(mut self, dataset: impl Into<String>, rules: DatasetRules) -> Self {
        self.insert(dataset, rules);
        self
    }

    /// Compiles patterns, value sets and references up front so a malformed
    /// rule stops the run before any check executes.
    pub fn compile(&self) -> Result<CompiledRuleSet, DomainError> {
        let mut datasets = IndexMap::new();
        for (name, rules) in &self.datasets {
            let compiled = match rules {
                Some(r) => CompiledRules::compile(name, r)?,
                None => CompiledRules::default(),
            };
            datasets.insert(name.clone(), compiled);
        }
        Ok(CompiledRuleSet { datasets })
    }
}

/// A foreign-key link parsed from `<dataset>.<column>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: String,
    pub ref_dataset: String,
    pub ref_column: String,
}

impl ForeignKey {
    pub fn parse(column: &str, reference: &str) -> Result<Self, DomainError> {
        match reference.split_once('.') {
            Some((dataset, ref_column))
                if !dataset.is_empty() && !ref_column.is_empty() && !ref_column.contains('.') =>
            {
                Ok(Self {
                    column: column.to_string(),
                    ref_dataset: dataset.to_string(),
                    ref_column: ref_column.to_string(),
                })
            }
            _ => Err(DomainError::InvalidReference(reference.to_string())),
        }
    }

    /// The `<dataset>.<column>` form used in check identifiers.
    pub fn target(&self) -> String {
        format!("{}.{}", self.ref_dataset, self.ref_column)
    }
}

#[derive(Debug, Clone)]
pub struct PatternRule {
    pub column: String,
    pub pattern: String,
    /// `pattern` anchored at the start of the input.
    pub regex: Regex,
}

#[derive(Debug, Clone)]
pub struct AllowedRule {
    pub column: String,
    pub allowed: HashSet<ValueKey>,
}

/// Execution-ready form of [`DatasetRules`].
#[derive(Debug, Clone, Default)]
pub struct CompiledRules {
    pub not_null: Vec<String>,
    pub unique: Vec<String>,
    pub patterns: Vec<PatternRule>,
    pub ranges: Vec<(String, RangeBounds)>,
    pub allowed: Vec<AllowedRule>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl CompiledRules {
    fn compile(dataset: &str, rules: &DatasetRules) -> Result<Self, DomainError> {
        let patterns = rules
            .regex
            .iter()
            .map(|(column, pattern)| {
                let regex = Regex::new(&format!(r"\A(?:{})", pattern)).map_err(|source| {
                    DomainError::InvalidPattern {
                        dataset: dataset.to_string(),
                        column: column.clone(),
                        source,
                    }
                })?;
                Ok(PatternRule {
                    column: column.clone(),
                    pattern: pattern.clone(),
                    regex,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let allowed = rules
            .allowed_values
            .iter()
            .map(|(column, values)| AllowedRule {
                column: column.clone(),
                allowed: values.iter().map(|v| Value::from(v).key()).collect(),
            })
            .collect();

        let foreign_keys = rules
            .referential_integrity
            .iter()
            .map(|(column, reference)| ForeignKey::parse(column, reference))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            not_null: rules.not_null.clone(),
            unique: rules.unique.clone(),
            patterns,
            ranges: rules
                .ranges
                .iter()
                .map(|(column, bounds)| (column.clone(), *bounds))
                .collect(),
            allowed,
            foreign_keys,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompiledRuleSet {
    datasets: IndexMap<String, CompiledRules>,
}

impl CompiledRuleSet {
    pub fn for_dataset(&self, dataset: &str) -> Option<&CompiledRules> {
        self.datasets.get(dataset)
    }

    /// Every (dataset, foreign key) pair, in document order.
    pub fn foreign_keys(&self) -> impl Iterator<Item = (&str, &ForeignKey)> {
        self.datasets
            .iter()
            .flat_map(|(name, rules)| rules.foreign_keys.iter().map(move |fk| (name.as_str(), fk)))
    }
}

// dqaudit-core/src/domain/rules/mod.rs

pub mod profile;
pub mod ruleset;
pub mod schema;

pub use profile::{QualityProfile, Severity, SeverityMap, SlaThresholds};
pub use ruleset::{
    AllowedRule, CompiledRuleSet, CompiledRules, DatasetRules, ForeignKey, PatternRule,
    RangeBounds, RuleSet,
};
pub use schema::{DatasetSchema, SchemaDocument, SemanticType};

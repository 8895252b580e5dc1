// dqaudit-core/src/domain/rules/schema.rs

use serde::{Deserialize, Serialize};
use indexmap::IndexMap;
use std::fmt;

/// Semantic column types a schema may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Int,
    Float,
    Bool,
    String,
    Date,
    Datetime,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Date => "date",
            Self::Datetime => "datetime",
        }
    }

    /// Resolves a declared type name. Unknown names resolve to `None` and the
    /// column is left out of type-conformance checking.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "int" => Some(Self::Int),
            "float" => Some(Self::Float),
            "bool" => Some(Self::Bool),
            "string" => Some(Self::String),
            "date" => Some(Self::Date),
            "datetime" => Some(Self::Datetime),
            _ => None,
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Expected columns of one dataset. Types are kept as written so that an
/// unrecognised type does not reject the whole document.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DatasetSchema {
    #[serde(default)]
    pub required: IndexMap<String, String>,
}

impl DatasetSchema {
    pub fn columns(&self) -> impl Iterator<Item = (&str, Option<SemanticType>)> {
        self.required
            .iter()
            .map(|(column, ty)| (column.as_str(), SemanticType::parse(ty)))
    }
}

/// Schema document keyed by dataset name.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(transparent)]
pub struct SchemaDocument {
    datasets: IndexMap<String, Option<DatasetSchema>>,
}

impl SchemaDocument {
    pub fn for_dataset(&self, dataset: &str) -> Option<&DatasetSchema> {
        self.datasets.get(dataset).and_then(Option::as_ref)
    }

    pub fn insert(&mut self, dataset: impl Into<String>, schema: DatasetSchema) {
        self.datasets.insert(dataset.into(), Some(schema));
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema_document() -> anyhow::Result<()> {
        let yaml = "customers:\n  required:\n    customer_id: int\n    signup: datetime\n    blob: varbinary\norders:\n";
        let doc: SchemaDocument = serde_yaml::from_str(yaml)?;
        let customers = doc.for_dataset("customers").unwrap();
        let cols: Vec<_> = customers.columns().collect();
        assert_eq!(
            cols,
            vec![
                ("customer_id", Some(SemanticType::Int)),
                ("signup", Some(SemanticType::Datetime)),
                ("blob", None),
            ]
        );
        assert!(doc.for_dataset("orders").is_none());
        assert!(doc.for_dataset("web_events").is_none());
        Ok(())
    }

    #[test]
    fn test_type_names_are_case_insensitive() {
        assert_eq!(SemanticType::parse("INT"), Some(SemanticType::Int));
        assert_eq!(SemanticType::parse("Date"), Some(SemanticType::Date));
        assert_eq!(SemanticType::parse("decimal"), None);
    }
}

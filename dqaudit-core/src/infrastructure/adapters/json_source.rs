// dqaudit-core/src/infrastructure/adapters/json_source.rs

use async_trait::async_trait;
use std::path::Path;
use tracing::{debug, instrument};

use crate::domain::dataset::Dataset;
use crate::error::AuditError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::dataset_source::{DatasetLocation, DatasetSource};

/// Reads datasets from `.json` (array of objects) and `.jsonl` (one object per
/// line) files.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFileSource;

impl JsonFileSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DatasetSource for JsonFileSource {
    #[instrument(skip(self), fields(dataset = %location.name))]
    async fn load(&self, location: &DatasetLocation) -> Result<Dataset, AuditError> {
        let path = location.path.as_path();
        let content = tokio::fs::read_to_string(path).await?;

        let rows = match extension(path).as_deref() {
            Some("json") => parse_array(path, &content)?,
            Some("jsonl") => parse_lines(path, &content)?,
            _ => return Err(InfrastructureError::UnsupportedFormat(path.to_path_buf()).into()),
        };

        if let Some(index) = rows.iter().position(|row| !row.is_object()) {
            return Err(InfrastructureError::ConfigError(format!(
                "Record {} in {:?} is not a JSON object",
                index, path
            ))
            .into());
        }

        let dataset = Dataset::from_json_rows(&location.name, &rows);
        debug!(
            rows = dataset.len(),
            columns = dataset.columns().len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
}

fn parse_array(path: &Path, content: &str) -> Result<Vec<serde_json::Value>, InfrastructureError> {
    serde_json::from_str(content).map_err(|source| InfrastructureError::JsonError {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_lines(path: &Path, content: &str) -> Result<Vec<serde_json::Value>, InfrastructureError> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|source| InfrastructureError::JsonError {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::dataset::Value;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn location(dir: &Path, name: &str, file: &str) -> DatasetLocation {
        DatasetLocation {
            name: name.to_string(),
            path: dir.join(file),
        }
    }

    #[tokio::test]
    async fn test_load_json_array() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("customers.json"),
            r#"[{"id": 1, "email": "a@x.io"}, {"id": 2, "tier": "gold"}]"#,
        )?;

        let ds = JsonFileSource::new()
            .load(&location(dir.path(), "customers", "customers.json"))
            .await?;

        assert_eq!(ds.name(), "customers");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.columns(), ["id", "email", "tier"]);
        assert_eq!(ds.column("email").unwrap()[1], &Value::Null);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_jsonl_skips_blank_lines() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("orders.jsonl"),
            "{\"order_id\": 10, \"amount\": 12.5}\n\n{\"order_id\": 11, \"amount\": null}\n",
        )?;

        let ds = JsonFileSource::new()
            .load(&location(dir.path(), "orders", "orders.jsonl"))
            .await?;

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.column("amount").unwrap()[0], &Value::Float(12.5));
        Ok(())
    }

    #[tokio::test]
    async fn test_rejects_malformed_and_foreign_files() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("bad.jsonl"), "{\"a\": 1}\nnot json\n")?;
        fs::write(dir.path().join("flat.json"), "[1, 2, 3]")?;
        fs::write(dir.path().join("table.csv"), "a,b\n1,2\n")?;
        let source = JsonFileSource::new();

        let err = source
            .load(&location(dir.path(), "bad", "bad.jsonl"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuditError::Infrastructure(InfrastructureError::JsonError { .. })
        ));

        let err = source
            .load(&location(dir.path(), "flat", "flat.json"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuditError::Infrastructure(InfrastructureError::ConfigError(_))
        ));

        let err = source
            .load(&location(dir.path(), "table", "table.csv"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuditError::Infrastructure(InfrastructureError::UnsupportedFormat(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_catalog_keeps_location_order() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("b.json"), "[]")?;
        fs::write(dir.path().join("a.json"), "[]")?;
        let locations = vec![
            location(dir.path(), "b", "b.json"),
            location(dir.path(), "a", "a.json"),
        ];

        let catalog = JsonFileSource::new().load_catalog(&locations).await?;
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["b", "a"]);
        Ok(())
    }
}

// dqaudit-core/src/ports/dataset_source.rs

// What the engine needs from whoever stores the raw data: hand over one
// fully materialised dataset per name. Where the rows come from (files, a
// relational store, a record log) is the adapter's business.

use crate::domain::dataset::{Dataset, DatasetCatalog};
use crate::error::AuditError;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetLocation {
    pub name: String,
    pub path: PathBuf,
}

#[async_trait]
pub trait DatasetSource: Send + Sync {
    async fn load(&self, location: &DatasetLocation) -> Result<Dataset, AuditError>;

    /// Loads every location, keeping the given order as run order.
    async fn load_catalog(
        &self,
        locations: &[DatasetLocation],
    ) -> Result<DatasetCatalog, AuditError> {
        let mut catalog = DatasetCatalog::new();
        for location in locations {
            let dataset = self.load(location).await?;
            catalog.insert(dataset)?;
        }
        Ok(catalog)
    }
}

// dqaudit-core/src/domain/dataset/catalog.rs

use crate::domain::dataset::table::Dataset;
use crate::domain::error::DomainError;

/// The datasets supplied to one run, in run order.
#[derive(Debug, Clone, Default)]
pub struct DatasetCatalog {
    datasets: Vec<Dataset>,
}

impl DatasetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, dataset: Dataset) -> Result<(), DomainError> {
        if self.contains(dataset.name()) {
            return Err(DomainError::DuplicateDataset(dataset.name().to_string()));
        }
        self.datasets.push(dataset);
        Ok(())
    }

    pub fn with(mut self, dataset: Dataset) -> Result<Self, DomainError> {
        self.insert(dataset)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.datasets.iter().map(Dataset::name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dataset> {
        self.datasets.iter()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl<'a> IntoIterator for &'a DatasetCatalog {
    type Item = &'a Dataset;
    type IntoIter = std::slice::Iter<'a, Dataset>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

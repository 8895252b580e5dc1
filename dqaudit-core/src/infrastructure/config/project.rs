// dqaudit-core/src/infrastructure/config/project.rs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use crate::domain::error::DomainError;
use crate::error::AuditError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::DatasetLocation;

pub const CONFIG_CANDIDATES: [&str; 2] = ["dqaudit.yaml", "dqaudit_project.yaml"];
pub const DATASET_EXTENSIONS: [&str; 2] = ["json", "jsonl"];

pub const ENV_OUTPUT_PATH: &str = "DQAUDIT_OUTPUT_PATH";
pub const ENV_HISTORY_PATH: &str = "DQAUDIT_HISTORY_PATH";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatasetEntry {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProjectConfig {
    pub name: String,

    #[serde(rename = "data-path", default = "default_data_path")]
    pub data_path: String,

    /// Explicit dataset list. Empty means "discover under data-path".
    #[serde(default)]
    pub datasets: Vec<DatasetEntry>,

    pub rules: String,

    #[serde(default)]
    pub schema: Option<String>,

    #[serde(default)]
    pub profile: Option<String>,

    #[serde(rename = "output-path", default = "default_output_path")]
    pub output_path: String,

    #[serde(rename = "history-path", default = "default_history_path")]
    pub history_path: String,
}

fn default_data_path() -> String {
    "data".to_string()
}
fn default_output_path() -> String {
    "target/quality_results.json".to_string()
}
fn default_history_path() -> String {
    "target/run_history.jsonl".to_string()
}

impl ProjectConfig {
    pub fn rules_file(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.rules)
    }

    pub fn schema_file(&self, project_dir: &Path) -> Option<PathBuf> {
        self.schema.as_ref().map(|p| project_dir.join(p))
    }

    pub fn profile_file(&self, project_dir: &Path) -> Option<PathBuf> {
        self.profile.as_ref().map(|p| project_dir.join(p))
    }

    pub fn output_file(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.output_path)
    }

    pub fn history_file(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.history_path)
    }
}

// --- LOADER ---

#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    let config_path = find_main_config(project_dir)?;
    info!(path = ?config_path, "Loading project manifest");

    let content = fs::read_to_string(&config_path)?;
    let mut config: ProjectConfig =
        serde_yaml::from_str(&content).map_err(|source| InfrastructureError::YamlError {
            path: config_path.clone(),
            source,
        })?;

    // Layering: DQAUDIT_OUTPUT_PATH=/tmp/out.json dqaudit run
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    Ok(config)
}

pub fn find_main_config(root: &Path) -> Result<PathBuf, InfrastructureError> {
    CONFIG_CANDIDATES
        .iter()
        .map(|filename| root.join(filename))
        .find(|p| p.exists())
        .ok_or_else(|| {
            InfrastructureError::ConfigNotFound(format!(
                "No configuration file found in {:?}. Checked: {:?}",
                root, CONFIG_CANDIDATES
            ))
        })
}

fn apply_env_overrides(config: &mut ProjectConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup(ENV_OUTPUT_PATH) {
        info!(old = ?config.output_path, new = ?val, "Overriding output path via ENV");
        config.output_path = val;
    }
    if let Some(val) = lookup(ENV_HISTORY_PATH) {
        info!(old = ?config.history_path, new = ?val, "Overriding history path via ENV");
        config.history_path = val;
    }
}

// --- DATASET RESOLUTION ---

/// Turns the manifest into an ordered list of dataset locations: the explicit
/// list as written, or every json/jsonl file under `data-path` sorted by name.
pub fn resolve_datasets(
    project_dir: &Path,
    config: &ProjectConfig,
) -> Result<Vec<DatasetLocation>, AuditError> {
    let locations = if config.datasets.is_empty() {
        discover_datasets(&project_dir.join(&config.data_path))?
    } else {
        config
            .datasets
            .iter()
            .map(|entry| explicit_location(project_dir, entry))
            .collect::<Result<Vec<_>, _>>()?
    };

    let mut seen = HashSet::new();
    for location in &locations {
        if !seen.insert(location.name.as_str()) {
            return Err(DomainError::DuplicateDataset(location.name.clone()).into());
        }
    }
    info!(count = locations.len(), "Datasets resolved");
    Ok(locations)
}

fn explicit_location(
    project_dir: &Path,
    entry: &DatasetEntry,
) -> Result<DatasetLocation, AuditError> {
    let rel = Path::new(&entry.path);
    if rel.is_relative() && rel.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(AuditError::UnsafePath(entry.path.clone()));
    }
    let path = project_dir.join(rel);
    if !has_dataset_extension(&path) {
        return Err(InfrastructureError::UnsupportedFormat(path).into());
    }
    Ok(DatasetLocation {
        name: entry.name.clone(),
        path,
    })
}

fn discover_datasets(data_dir: &Path) -> Result<Vec<DatasetLocation>, InfrastructureError> {
    if !data_dir.is_dir() {
        return Err(InfrastructureError::ConfigError(format!(
            "Data directory {:?} does not exist",
            data_dir
        )));
    }

    let mut locations = Vec::new();
    for entry in WalkDir::new(data_dir).follow_links(true) {
        let entry = entry.map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || !has_dataset_extension(path) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        debug!(dataset = stem, path = ?path, "Discovered dataset");
        locations.push(DatasetLocation {
            name: stem.to_string(),
            path: path.to_path_buf(),
        });
    }
    locations.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
    Ok(locations)
}

fn has_dataset_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| DATASET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

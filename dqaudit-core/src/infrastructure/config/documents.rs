// dqaudit-core/src/infrastructure/config/documents.rs
//
// Loaders for the three rule documents referenced by the manifest.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use validator::Validate;

use crate::domain::rules::{QualityProfile, RuleSet, SchemaDocument};
use crate::infrastructure::error::InfrastructureError;

/// Reads a YAML document. An empty (or comment-only) file yields `T::default()`.
fn load_document<T: DeserializeOwned + Default>(path: &Path) -> Result<T, InfrastructureError> {
    let content = fs::read_to_string(path)?;
    let raw: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|source| InfrastructureError::YamlError {
            path: path.to_path_buf(),
            source,
        })?;
    if raw.is_null() {
        return Ok(T::default());
    }
    serde_yaml::from_value(raw).map_err(|source| InfrastructureError::YamlError {
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`load_document`], but a missing file means "no document".
fn load_optional<T: DeserializeOwned + Default>(
    path: Option<&Path>,
    kind: &str,
) -> Result<T, InfrastructureError> {
    match path {
        Some(p) if p.exists() => load_document(p),
        Some(p) => {
            warn!(path = ?p, "No {} document found, continuing without it", kind);
            Ok(T::default())
        }
        None => Ok(T::default()),
    }
}

pub fn load_rules(path: &Path) -> Result<RuleSet, InfrastructureError> {
    if !path.exists() {
        return Err(InfrastructureError::ConfigNotFound(format!(
            "Rules document {:?} does not exist",
            path
        )));
    }
    let rules = load_document(path)?;
    info!(path = ?path, "  ✅ Rules loaded");
    Ok(rules)
}

pub fn load_schema(path: Option<&Path>) -> Result<SchemaDocument, InfrastructureError> {
    load_optional(path, "schema")
}

pub fn load_profile(path: Option<&Path>) -> Result<QualityProfile, InfrastructureError> {
    let profile: QualityProfile = load_optional(path, "profile")?;
    profile
        .validate()
        .map_err(|source| InfrastructureError::Validation {
            path: path.map(Path::to_path_buf).unwrap_or_default(),
            source,
        })?;
    Ok(profile)
}

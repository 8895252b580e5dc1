// dqaudit-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(dqaudit::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error in {path:?}: {source}")]
    #[diagnostic(
        code(dqaudit::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    // --- DATA / JSON ---
    #[error("JSON Error in {path:?}: {source}")]
    #[diagnostic(
        code(dqaudit::infra::json),
        help("Datasets are JSON arrays of objects (.json) or one object per line (.jsonl).")
    )]
    JsonError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(dqaudit::infra::config))]
    ConfigError(String),

    #[error("Invalid configuration in {path:?}: {source}")]
    #[diagnostic(code(dqaudit::infra::validation))]
    Validation {
        path: PathBuf,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error("Project configuration not found at '{0}'")]
    #[diagnostic(
        code(dqaudit::infra::config_missing),
        help("Create a dqaudit.yaml at the project root.")
    )]
    ConfigNotFound(String),

    #[error("Unsupported dataset format: {0:?}")]
    #[diagnostic(code(dqaudit::infra::format), help("Supported extensions: json, jsonl."))]
    UnsupportedFormat(PathBuf),
}

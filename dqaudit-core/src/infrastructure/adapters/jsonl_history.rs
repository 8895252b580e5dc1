// dqaudit-core/src/infrastructure/adapters/jsonl_history.rs

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::report::RunHistoryEntry;
use crate::error::AuditError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::history::HistoryLog;

/// Run history as JSON Lines, one entry per run.
#[derive(Debug, Clone)]
pub struct JsonlHistoryLog {
    path: PathBuf,
}

impl JsonlHistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn json_error(&self, source: serde_json::Error) -> AuditError {
        InfrastructureError::JsonError {
            path: self.path.clone(),
            source,
        }
        .into()
    }
}

impl HistoryLog for JsonlHistoryLog {
    fn append(&self, entry: &RunHistoryEntry) -> Result<(), AuditError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(entry).map_err(|e| self.json_error(e))?;
        line.push('\n');

        // Handle lives for this write only.
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;

        debug!(path = ?self.path, run_id = %entry.run_id, "History entry appended");
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<RunHistoryEntry>, AuditError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)?;
        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(|e| self.json_error(e)))
            .collect()
    }
}

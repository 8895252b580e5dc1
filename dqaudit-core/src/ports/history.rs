// dqaudit-core/src/ports/history.rs

use crate::domain::report::RunHistoryEntry;
use crate::error::AuditError;

/// Append-only record of past runs. Implementations never rewrite or
/// compact existing entries.
pub trait HistoryLog: Send + Sync {
    fn append(&self, entry: &RunHistoryEntry) -> Result<(), AuditError>;

    /// Entries in the order they were appended.
    fn read_all(&self) -> Result<Vec<RunHistoryEntry>, AuditError>;
}

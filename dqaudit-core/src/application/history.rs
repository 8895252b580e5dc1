// dqaudit-core/src/application/history.rs

use crate::domain::report::RunHistoryEntry;
use crate::error::AuditError;
use crate::ports::HistoryLog;

/// The `limit` most recent runs, oldest first.
pub fn recent_runs<H: HistoryLog + ?Sized>(
    history: &H,
    limit: usize,
) -> Result<Vec<RunHistoryEntry>, AuditError> {
    let mut entries = history.read_all()?;
    let skip = entries.len().saturating_sub(limit);
    entries.drain(..skip);
    Ok(entries)
}

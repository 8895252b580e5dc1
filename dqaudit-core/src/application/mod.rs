// dqaudit-core/src/application/mod.rs

pub mod audit;
pub mod history;
pub mod runner;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use dqaudit_core::application::{run_audit, AuditPlan, recent_runs};`

pub use audit::{AuditOutcome, AuditPlan, run_audit};
pub use history::recent_runs;
pub use runner::AuditRunner;

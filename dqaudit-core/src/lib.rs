// dqaudit-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts for dataset loading and run history.
pub mod ports;

// 2. Domain
// Datasets, rule documents, check executors, report model.
// Depends on nothing else in the crate (no infra, no app).
pub mod domain;

// 3. Infrastructure (Adapters)
// Config files, JSON/JSONL datasets, history log, atomic writes.
pub mod infrastructure;

// 4. Application (Use Cases)
// Audit orchestration and history queries.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::AuditError;

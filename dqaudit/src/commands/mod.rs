// dqaudit/src/commands/mod.rs

pub mod history;
pub mod run;
pub mod validate;

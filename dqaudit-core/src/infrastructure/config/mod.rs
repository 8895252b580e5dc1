pub mod documents;
pub mod project;

pub use documents::{load_profile, load_rules, load_schema};
pub use project::{
    DatasetEntry, ProjectConfig, find_main_config, load_project_config, resolve_datasets,
};

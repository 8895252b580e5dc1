// dqaudit-core/src/application/audit.rs
//
// USE CASE: audit a project (config -> datasets -> checks -> report + history).

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::application::runner::AuditRunner;
use crate::domain::report::QualityReport;
use crate::error::AuditError;
use crate::infrastructure::config::{
    ProjectConfig, load_profile, load_rules, load_schema, resolve_datasets,
};
use crate::infrastructure::fs::write_json_atomic;
use crate::ports::{DatasetLocation, DatasetSource, HistoryLog};

/// Everything a run needs, resolved and compiled but not yet executed.
#[derive(Debug, Clone)]
pub struct AuditPlan {
    pub runner: AuditRunner,
    pub datasets: Vec<DatasetLocation>,
}

impl AuditPlan {
    /// Loads the rule documents and dataset list of a project and checks that
    /// every referential rule points at a dataset of the run.
    #[instrument(skip_all, fields(project = %config.name))]
    pub fn prepare(project_dir: &Path, config: &ProjectConfig) -> Result<Self, AuditError> {
        let rules = load_rules(&config.rules_file(project_dir))?;
        let schema = load_schema(config.schema_file(project_dir).as_deref())?;
        let profile = load_profile(config.profile_file(project_dir).as_deref())?;
        let runner = AuditRunner::from_documents(&rules, schema, profile)?;

        let datasets = resolve_datasets(project_dir, config)?;
        runner.validate(|name| datasets.iter().any(|d| d.name == name))?;

        Ok(Self { runner, datasets })
    }
}

#[derive(Debug)]
pub struct AuditOutcome {
    pub report: QualityReport,
    pub output_path: PathBuf,
}

/// Runs a full audit. Nothing is written unless every dataset loaded and the
/// run completed.
#[instrument(skip_all, fields(project = %config.name))]
pub async fn run_audit<S, H>(
    project_dir: &Path,
    config: &ProjectConfig,
    source: &S,
    history: &H,
) -> Result<AuditOutcome, AuditError>
where
    S: DatasetSource + ?Sized,
    H: HistoryLog + ?Sized,
{
    let plan = AuditPlan::prepare(project_dir, config)?;

    let catalog = source.load_catalog(&plan.datasets).await?;
    info!(datasets = catalog.len(), "Datasets loaded");

    let report = Arc::new(plan.runner)
        .run_concurrent(Arc::new(catalog))
        .await?;

    let output_path = config.output_file(project_dir);
    write_json_atomic(&output_path, &report)?;
    history.append(&report.history_entry())?;
    info!(path = ?output_path, run_id = %report.metrics.run_id, "Report written");

    Ok(AuditOutcome {
        report,
        output_path,
    })
}

// dqaudit/src/commands/validate.rs
//
// USE CASE: Check the configuration without touching the data.

use std::path::PathBuf;

use anyhow::Context;
use dqaudit_core::application::AuditPlan;
use dqaudit_core::infrastructure::config::load_project_config;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    println!("⚙️  Loading configuration...");
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;

    match AuditPlan::prepare(&project_dir, &config) {
        Ok(plan) => {
            println!("   Project: {}", config.name);
            for dataset in &plan.datasets {
                println!("   📦 {} ({})", dataset.name, dataset.path.display());
            }
            println!(
                "✨ Configuration valid: {} dataset(s), {} referential rule(s).",
                plan.datasets.len(),
                plan.runner.rules().foreign_keys().count()
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Invalid configuration");
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    }
}

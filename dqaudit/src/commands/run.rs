// dqaudit/src/commands/run.rs
//
// USE CASE: Audit the project datasets.

use std::path::PathBuf;

use anyhow::Context;
use dqaudit_core::application::run_audit;
use dqaudit_core::domain::report::QualityReport;
use dqaudit_core::infrastructure::adapters::{JsonFileSource, JsonlHistoryLog};
use dqaudit_core::infrastructure::config::load_project_config;

pub async fn execute(project_dir: PathBuf, fail_on_sla: bool) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    println!("⚙️  Loading configuration...");
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Project: {}", config.name);

    let source = JsonFileSource::new();
    let history = JsonlHistoryLog::new(config.history_file(&project_dir));

    println!("🔎 Auditing datasets...");
    let outcome = match run_audit(&project_dir, &config, &source, &history).await {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("\n💥 AUDIT ABORTED");
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    };

    print_summary(&outcome.report);
    println!("📝 Report: {}", outcome.output_path.display());

    let sla_pass = outcome.report.metrics.summary.sla.pass;
    if sla_pass {
        println!("\n✨ SLA MET. Audit finished in {:.2?}", start.elapsed());
    } else {
        eprintln!("\n❌ SLA NOT MET. Audit finished in {:.2?}", start.elapsed());
        if fail_on_sla {
            std::process::exit(1);
        }
    }
    Ok(())
}

fn print_summary(report: &QualityReport) {
    let metrics = &report.metrics;
    println!("   Run: {}", metrics.run_id);
    for (dataset, rows) in &metrics.row_counts {
        println!("   📦 {:<20} {:>8} rows", dataset, rows);
    }
    for result in report.results.iter().filter(|r| r.is_failure()) {
        println!(
            "   ❌ {}.{} [{}] {}/{}",
            result.dataset, result.check, result.severity, result.failed_count, result.total_count
        );
    }
    println!(
        "   Checks: {} | Failed: {} | Pass rate: {:.1}% | Critical: {}",
        metrics.summary.total_checks,
        metrics.summary.failed_checks,
        metrics.summary.pass_rate,
        metrics.summary.critical_failures
    );
}

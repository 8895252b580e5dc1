// dqaudit/src/commands/history.rs
//
// USE CASE: Show recent runs from the history log.

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use dqaudit_core::application::recent_runs;
use dqaudit_core::domain::report::RunHistoryEntry;
use dqaudit_core::infrastructure::adapters::JsonlHistoryLog;
use dqaudit_core::infrastructure::config::load_project_config;

pub fn execute(project_dir: PathBuf, limit: usize) -> anyhow::Result<()> {
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    let history = JsonlHistoryLog::new(config.history_file(&project_dir));
    let entries = recent_runs(&history, limit)
        .with_context(|| format!("Failed to read run history at {:?}", history.path()))?;

    if entries.is_empty() {
        println!("📭 No runs recorded yet in {}", history.path().display());
        return Ok(());
    }

    println!("📜 Last {} run(s) of {}", entries.len(), config.name);
    println!("{}", render_table(&entries));
    Ok(())
}

fn render_table(entries: &[RunHistoryEntry]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            [
                "Run", "Generated", "Checks", "Failed", "Pass %", "Critical", "Rows", "SLA",
            ]
            .into_iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );

    for entry in entries {
        let rows: usize = entry.row_counts.values().sum();
        let sla = if entry.sla.pass {
            Cell::new("PASS").fg(Color::Green)
        } else {
            Cell::new("FAIL").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(&entry.run_id),
            Cell::new(&entry.generated_at),
            Cell::new(entry.total_checks).set_alignment(CellAlignment::Right),
            Cell::new(entry.failed_checks).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", entry.pass_rate)).set_alignment(CellAlignment::Right),
            Cell::new(entry.critical_failures).set_alignment(CellAlignment::Right),
            Cell::new(rows).set_alignment(CellAlignment::Right),
            sla,
        ]);
    }
    table
}

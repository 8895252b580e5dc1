// dqaudit/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dqaudit")]
#[command(about = "Rule-based data quality auditing for tabular datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Audits every dataset of the project and writes the quality report
    Run {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Exit with an error code when the SLA verdict is false
        #[arg(long)]
        fail_on_sla: bool,
    },

    /// 📜 Shows the most recent runs from the history log
    History {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Number of runs to display
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// ✅ Loads and compiles the configuration without running any check
    Validate {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_run_defaults() -> Result<()> {
        let args = Cli::parse_from(["dqaudit", "run"]);
        match args.command {
            Commands::Run {
                project_dir,
                fail_on_sla,
            } => {
                assert_eq!(project_dir.to_string_lossy(), ".");
                assert!(!fail_on_sla);
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_run_fail_on_sla() -> Result<()> {
        let args = Cli::parse_from([
            "dqaudit",
            "run",
            "--fail-on-sla",
            "--project-dir",
            "/tmp/shop",
        ]);
        match args.command {
            Commands::Run {
                project_dir,
                fail_on_sla,
            } => {
                assert_eq!(project_dir.to_string_lossy(), "/tmp/shop");
                assert!(fail_on_sla);
                Ok(())
            }
            _ => bail!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_history_limit() -> Result<()> {
        let args = Cli::parse_from(["dqaudit", "history", "--limit", "3"]);
        match args.command {
            Commands::History { limit, .. } => {
                assert_eq!(limit, 3);
                Ok(())
            }
            _ => bail!("Expected History command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_command() {
        assert!(Cli::try_parse_from(["dqaudit", "clean"]).is_err());
    }
}

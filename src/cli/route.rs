//! CLI route: single route table and run context. Dispatches to the tracker and presentation.

use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_change_report_json, format_change_report_text, format_commit_summary,
    format_health_text, format_tree_json, format_tree_text,
};
use crate::config::DirtrackConfig;
use crate::error::TrackError;
use crate::fsutil::create_dir_if_not_exists;
use crate::store::{sidecar_path, SidecarStore};
use crate::tracker::ChangeTracker;
use std::io::IsTerminal;
use std::path::Path;
use tracing::info;

/// Runtime context for CLI execution: effective config and the tracker built from it.
pub struct RunContext {
    config: DirtrackConfig,
    tracker: ChangeTracker<SidecarStore>,
    color: bool,
}

impl RunContext {
    /// Context over an already loaded and validated configuration.
    pub fn from_config(config: DirtrackConfig) -> Self {
        let store = SidecarStore::new().pretty(config.tracker.pretty_snapshots);
        let tracker = ChangeTracker::new(store, config.tracker.options());
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self {
            config,
            tracker,
            color,
        }
    }

    /// Execute a command and return its rendered output.
    pub fn execute(&self, command: &Commands) -> Result<String, TrackError> {
        match command {
            Commands::Changes {
                dir,
                commit,
                format,
            } => self.handle_changes(dir, *commit, *format),
            Commands::Commit { dir } => {
                let tree = self.tracker.commit(dir)?;
                Ok(format_commit_summary(dir, &tree, &sidecar_path(dir)))
            }
            Commands::Show { dir, format } => {
                let tree = self.tracker.build_tree(dir)?;
                match format {
                    OutputFormat::Text => Ok(format_tree_text(dir, &tree, self.color)),
                    OutputFormat::Json => format_tree_json(dir, &tree),
                }
            }
            Commands::Verify { dir } => {
                let health = self.tracker.verify(dir)?;
                Ok(format_health_text(dir, &health))
            }
            Commands::Forget { dir } => {
                let removed = self.tracker.forget(dir)?;
                Ok(if removed {
                    format!("Removed snapshot {}", sidecar_path(dir).display())
                } else {
                    format!("{} is not tracked", dir.display())
                })
            }
            Commands::Init { dir } => self.handle_init(dir),
            Commands::Config => self.config.to_toml(),
        }
    }

    fn handle_changes(
        &self,
        dir: &Path,
        commit: bool,
        format: OutputFormat,
    ) -> Result<String, TrackError> {
        let (report, current) = self.tracker.scan(dir)?;
        if commit && !report.baseline_created && !report.changed.is_empty() {
            self.tracker.commit_tree(dir, &current)?;
            info!("Snapshot refreshed after reporting changes");
        }
        match format {
            OutputFormat::Text => Ok(format_change_report_text(
                &report,
                &sidecar_path(dir),
                self.color,
            )),
            OutputFormat::Json => format_change_report_json(&report),
        }
    }

    fn handle_init(&self, dir: &Path) -> Result<String, TrackError> {
        let created = create_dir_if_not_exists(dir)?;
        let tree = self.tracker.commit(dir)?;
        let mut out = String::new();
        if created {
            out.push_str(&format!("Created {}\n", dir.display()));
        }
        out.push_str(&format_commit_summary(dir, &tree, &sidecar_path(dir)));
        Ok(out)
    }
}

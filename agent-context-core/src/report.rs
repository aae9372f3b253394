use crate::{state::WorkspaceMode, workspace::LinkRecord};
use std::path::{Path, PathBuf};

/// What the run produced, handed back once the terminal is restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitReport {
    pub code: u8,
    pub mode: WorkspaceMode,
    pub target: Option<PathBuf>,
    pub records: Vec<LinkRecord>,
    /// The link batch ran to the end
    pub completed: bool,
    /// Notice or fatal error to print after the UI is gone
    pub message: Option<String>,
}

impl ExitReport {
    pub fn linked(&self) -> impl Iterator<Item = &LinkRecord> {
        self.records.iter().filter(|r| r.ok)
    }

    pub fn failed(&self) -> impl Iterator<Item = &LinkRecord> {
        self.records.iter().filter(|r| !r.ok)
    }

    /// Target path to print on its own line, so it can be copied into an editor.
    /// Only automatic workspaces get this; the user already typed a manual one.
    pub fn copyable_target(&self) -> Option<&Path> {
        if self.completed && self.mode == WorkspaceMode::Automatic {
            self.target.as_deref()
        } else {
            None
        }
    }

    /// Plain-text summary of a completed run.
    pub fn summary_lines(&self) -> Vec<String> {
        if !self.completed {
            return Vec::new();
        }
        let mut lines = Vec::new();

        let linked: Vec<_> = self.linked().collect();
        if !linked.is_empty() {
            lines.push("Created symlinks:".to_string());
            for record in linked {
                let destination = record
                    .destination
                    .as_deref()
                    .map(|d| d.display().to_string())
                    .unwrap_or_default();
                lines.push(format!("  {} -> {destination}", record.source.display()));
            }
        }

        let failed: Vec<_> = self.failed().collect();
        if !failed.is_empty() {
            lines.push("Failed:".to_string());
            for record in failed {
                lines.push(format!(
                    "  {}: {}",
                    record.source.display(),
                    record.message
                ));
            }
        }

        if let Some(target) = &self.target {
            lines.push(format!("Workspace ready at: {}", target.display()));
        }
        lines
    }
}

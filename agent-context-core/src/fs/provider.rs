use crate::workspace::LinkRecord;
use anyhow::Result;
use std::path::Path;

pub trait FsProvider: Send + Sync {
    /// Visible subdirectory names under `dir`, sorted. Unreadable directories list as empty.
    fn list_subdirectories(&self, dir: &Path, hidden_prefix: char) -> Vec<String>;
    fn ensure_directory(&self, path: &Path) -> Result<()>;
    fn link_project(&self, target: &Path, project: &Path) -> LinkRecord;
}

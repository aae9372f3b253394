use super::provider::FsProvider;
use crate::workspace::{self, LinkRecord};
use anyhow::Result;
use std::path::Path;

/// The real filesystem
pub struct LocalFs;

impl FsProvider for LocalFs {
    fn list_subdirectories(&self, dir: &Path, hidden_prefix: char) -> Vec<String> {
        match workspace::list_subdirectories(dir, hidden_prefix) {
            Ok(names) => names,
            Err(e) => {
                log::debug!("failed to list {}: {e}", dir.display());
                Vec::new()
            }
        }
    }

    fn ensure_directory(&self, path: &Path) -> Result<()> {
        workspace::ensure_directory(path)
    }

    fn link_project(&self, target: &Path, project: &Path) -> LinkRecord {
        workspace::link_project(target, project)
    }
}

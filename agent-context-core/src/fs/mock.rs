use super::provider::FsProvider;
use crate::workspace::{LinkRecord, display_name};
use anyhow::Result;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Mutex,
};

/// In-memory filesystem for driver tests.
///
/// Listings are canned per directory. `ensure_directory` and `link_project` pop
/// scripted results and fall back to success. Every call is recorded.
#[derive(Default)]
pub struct MockFs {
    pub listings: HashMap<PathBuf, Vec<String>>,
    pub ensure_results: Mutex<HashMap<PathBuf, Result<()>>>,
    pub link_failures: Mutex<HashMap<PathBuf, String>>,
    pub list_calls: Mutex<Vec<PathBuf>>,
    pub ensure_calls: Mutex<Vec<PathBuf>>,
    pub link_calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl MockFs {
    pub fn with_listing(mut self, dir: impl Into<PathBuf>, names: &[&str]) -> Self {
        self.listings.insert(
            dir.into(),
            names.iter().map(ToString::to_string).collect(),
        );
        self
    }

    pub fn fail_ensure(self, path: impl Into<PathBuf>, message: &str) -> Self {
        self.ensure_results
            .lock()
            .unwrap()
            .insert(path.into(), Err(anyhow::anyhow!(message.to_string())));
        self
    }

    pub fn fail_link(self, project: impl Into<PathBuf>, message: &str) -> Self {
        self.link_failures
            .lock()
            .unwrap()
            .insert(project.into(), message.to_string());
        self
    }
}

impl FsProvider for MockFs {
    fn list_subdirectories(&self, dir: &Path, _hidden_prefix: char) -> Vec<String> {
        self.list_calls.lock().unwrap().push(dir.to_path_buf());
        self.listings.get(dir).cloned().unwrap_or_default()
    }

    fn ensure_directory(&self, path: &Path) -> Result<()> {
        self.ensure_calls.lock().unwrap().push(path.to_path_buf());
        self.ensure_results
            .lock()
            .unwrap()
            .remove(path)
            .unwrap_or(Ok(()))
    }

    fn link_project(&self, target: &Path, project: &Path) -> LinkRecord {
        self.link_calls
            .lock()
            .unwrap()
            .push((target.to_path_buf(), project.to_path_buf()));
        match self.link_failures.lock().unwrap().remove(project) {
            Some(message) => LinkRecord::failed(project.to_path_buf(), message),
            None => LinkRecord::linked(
                project.to_path_buf(),
                target.join(display_name(project)),
            ),
        }
    }
}

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDateTime};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

pub const DEFAULT_BASE_DIR_NAME: &str = "agent-context";
pub const SESSION_DIR_PREFIX: &str = "session-";
const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M";
const LINK_OK_MESSAGE: &str = "ok";

/// Where an automatic workspace lives: `{home}/{base}/session-{timestamp}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoTarget {
    pub base_dir: PathBuf,
    pub session_path: PathBuf,
}

/// Outcome of linking one project into the target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub source: PathBuf,
    /// `None` when the link could not be created
    pub destination: Option<PathBuf>,
    pub ok: bool,
    pub message: String,
}

impl LinkRecord {
    pub fn linked(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            source,
            destination: Some(destination),
            ok: true,
            message: LINK_OK_MESSAGE.to_string(),
        }
    }

    pub fn failed(source: PathBuf, message: impl Into<String>) -> Self {
        Self {
            source,
            destination: None,
            ok: false,
            message: message.into(),
        }
    }

    /// Final path component of the source, for display
    pub fn source_name(&self) -> String {
        display_name(&self.source)
    }
}

pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Current local wall-clock time as `YYYYMMDD-HHMM`.
pub fn format_timestamp() -> String {
    format_timestamp_at(&Local::now().naive_local())
}

pub fn format_timestamp_at(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn compute_auto_target(base_name: &str) -> Result<AutoTarget> {
    let Some(home) = dirs::home_dir() else {
        bail!("Unable to determine home directory");
    };
    Ok(auto_target_in(&home, base_name, &format_timestamp()))
}

pub fn auto_target_in(home: &Path, base_name: &str, timestamp: &str) -> AutoTarget {
    let base_dir = home.join(base_name);
    let session_path = base_dir.join(format!("{SESSION_DIR_PREFIX}{timestamp}"));
    AutoTarget {
        base_dir,
        session_path,
    }
}

/// True if anything (file, directory, symlink, even a dangling one) sits at `path`.
///
/// Every lookup failure counts as "absent", so a permission error on a parent
/// directory is indistinguishable from a missing entry.
pub fn path_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Create `path` and any missing ancestors. Succeeds if it is already a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory {}", path.display()))
}

/// First of `desired`, `desired-1`, `desired-2`, ... with no entry directly under `target_dir`.
///
/// Each candidate is probed on disk, so names freed since a previous call are reused.
pub fn unique_name(target_dir: &Path, desired: &str) -> String {
    let mut candidate = desired.to_string();
    let mut suffix = 1usize;
    while path_exists(&target_dir.join(&candidate)) {
        candidate = format!("{desired}-{suffix}");
        suffix += 1;
    }
    candidate
}

/// Names of the visible subdirectories directly under `dir`, sorted.
///
/// Symlinks are not followed, so a link pointing at a directory is not listed.
pub fn list_subdirectories(dir: &Path, hidden_prefix: char) -> io::Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|ft| ft.is_dir()))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with(hidden_prefix))
        .collect();
    names.sort();
    Ok(names)
}

/// Link `project` into `target` under a collision-free name.
///
/// Never returns an error: failures are folded into the record so the batch can continue.
pub fn link_project(target: &Path, project: &Path) -> LinkRecord {
    match try_link_project(target, project) {
        Ok(destination) => LinkRecord::linked(project.to_path_buf(), destination),
        Err(e) => LinkRecord::failed(project.to_path_buf(), format!("{e:#}")),
    }
}

fn try_link_project(target: &Path, project: &Path) -> Result<PathBuf> {
    let Some(name) = project.file_name() else {
        bail!("{} has no final path component", project.display());
    };
    let final_name = unique_name(target, &name.to_string_lossy());
    let destination = target.join(final_name);

    clear_stale_destination(&destination)?;
    create_dir_link(project, &destination).with_context(|| {
        format!(
            "failed to link {} -> {}",
            destination.display(),
            project.display()
        )
    })?;
    log::info!(
        "linked {} -> {}",
        destination.display(),
        project.display()
    );
    Ok(destination)
}

/// Remove a leftover file or symlink at `destination`.
///
/// A directory there is an error. Any failure to inspect the path is treated as
/// "nothing there"; link creation reports the real problem if there is one.
fn clear_stale_destination(destination: &Path) -> Result<()> {
    let Ok(metadata) = fs::symlink_metadata(destination) else {
        return Ok(());
    };
    let file_type = metadata.file_type();
    if file_type.is_dir() {
        bail!(
            "Destination exists and is a directory: {}",
            destination.display()
        );
    }
    log::debug!("removing stale entry at {}", destination.display());
    fs::remove_file(destination)
        .with_context(|| format!("failed to remove stale {}", destination.display()))
}

#[cfg(unix)]
pub fn create_dir_link(source: &Path, destination: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, destination)
}

#[cfg(windows)]
pub fn create_dir_link(source: &Path, destination: &Path) -> io::Result<()> {
    junction::create(source, destination)
}

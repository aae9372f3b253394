use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` to the user's home directory.
///
/// Returns `None` when the path starts with `~` but the home directory
/// cannot be determined (e.g. sandboxed environments). Non-tilde paths
/// are always returned as-is.
pub fn expand_tilde(path: &str) -> Option<PathBuf> {
    if path == "~" {
        dirs::home_dir()
    } else if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir().map(|home| home.join(rest))
    } else {
        Some(PathBuf::from(path))
    }
}

/// Turn user input into an absolute, lexically normalised directory path.
///
/// Relative input is resolved against `cwd`. Symlinks are left alone; only `.` and
/// `..` components are folded, and `..` never climbs above the root.
pub fn resolve_start_dir(input: &str, cwd: &Path) -> PathBuf {
    let expanded = expand_tilde(input).unwrap_or_else(|| PathBuf::from(input));
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };
    normalize_lexically(&joined)
}

/// Render `path` with the home directory shown as `~`, for display only.
pub fn display_with_tilde(path: &Path) -> String {
    match dirs::home_dir() {
        Some(home) => contract_home(path, &home),
        None => path.display().to_string(),
    }
}

pub fn contract_home(path: &Path, home: &Path) -> String {
    match path.strip_prefix(home) {
        Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Ok(rest) => format!("~{}{}", std::path::MAIN_SEPARATOR, rest.display()),
        Err(_) => path.display().to_string(),
    }
}

pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = out.parent().is_none();
                if !at_root {
                    out.pop();
                }
            }
        }
    }
    out
}

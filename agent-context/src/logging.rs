use anyhow::Context;
use std::path::PathBuf;

const APP_NAME: &str = "agent-context";
const LOG_FILE_NAME: &str = "agent-context.log";

pub const DEFAULT_LOG_LEVEL: &str = "warn";

pub fn cache_dir() -> anyhow::Result<PathBuf> {
    #[cfg(unix)]
    {
        if let Ok(xdg_cache_home) = std::env::var("XDG_CACHE_HOME")
            && !xdg_cache_home.is_empty()
        {
            return Ok(PathBuf::from(xdg_cache_home).join(APP_NAME));
        }
        let home = dirs::home_dir().context("Unable to find home directory")?;
        Ok(home.join(".cache").join(APP_NAME))
    }
    #[cfg(windows)]
    {
        Ok(dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_NAME))
    }
}

pub fn default_log_file() -> anyhow::Result<PathBuf> {
    Ok(cache_dir()?.join(LOG_FILE_NAME))
}

/// Log to a file; the terminal belongs to the UI.
pub fn setup_logging(level: log::LevelFilter) -> anyhow::Result<()> {
    if level == log::LevelFilter::Off {
        return Ok(());
    }
    let log_file = default_log_file()?;
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    simple_log::file(log_file.to_string_lossy().into_owned(), level, 10, 10)
        .map_err(|e| anyhow::anyhow!(e))?;
    log::info!("agent-context logging initialised (level={level})");
    Ok(())
}

use crate::{browser::DEFAULT_HIDDEN_PREFIX, paths, workspace::DEFAULT_BASE_DIR_NAME};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const APP_NAME: &str = "agent-context";
pub const DEFAULT_EXIT_DELAY_MS: u64 = 3000;

pub fn config_dir() -> Result<PathBuf> {
    // ~/.config on both Linux and macOS, not ~/Library/Application Support
    #[cfg(unix)]
    {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config_home.is_empty()
        {
            return Ok(PathBuf::from(xdg_config_home).join(APP_NAME));
        }
        let home = dirs::home_dir().context("Unable to find home directory")?;
        Ok(home.join(".config").join(APP_NAME))
    }
    #[cfg(windows)]
    {
        let dir = dirs::config_dir().context("Unable to find config directory")?;
        Ok(dir.join(APP_NAME))
    }
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Directory under home that holds automatic session workspaces.
    /// ```toml
    /// base_dir_name = "agent-context"
    /// ```
    pub base_dir_name: String,

    /// Entries whose name starts with this character are hidden from the browser.
    #[serde(deserialize_with = "deserialize_prefix")]
    pub hidden_prefix: char,

    /// How long the summary stays on screen before the program exits.
    pub exit_delay_ms: u64,

    /// Where browsing starts. Supports `~`. Defaults to the working directory.
    pub start_dir: Option<String>,

    /// Color theme configuration.
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir_name: DEFAULT_BASE_DIR_NAME.to_string(),
            hidden_prefix: DEFAULT_HIDDEN_PREFIX,
            exit_delay_ms: DEFAULT_EXIT_DELAY_MS,
            start_dir: None,
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    pub fn exit_delay(&self) -> Duration {
        Duration::from_millis(self.exit_delay_ms)
    }

    /// Absolute directory where both browsers open.
    pub fn resolved_start_dir(&self, cwd: &Path) -> PathBuf {
        match self.start_dir.as_deref() {
            Some(dir) => paths::resolve_start_dir(dir, cwd),
            None => paths::normalize_lexically(cwd),
        }
    }

    fn validate(&self) -> Result<()> {
        let name = self.base_dir_name.trim();
        if name.is_empty() {
            bail!("base_dir_name must not be empty");
        }
        if Path::new(name).components().count() != 1 || name == ".." || name == "." {
            bail!("base_dir_name must be a single directory name, got '{name}'");
        }
        Ok(())
    }
}

fn deserialize_prefix<'de, D>(deserializer: D) -> Result<char, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(serde::de::Error::custom(format!(
            "invalid hidden_prefix '{s}': expected exactly one character"
        ))),
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Titles and the highlighted row (default: "cyan").
    #[serde(
        default = "ThemeConfig::default_accent",
        deserialize_with = "deserialize_color"
    )]
    pub accent: ThemeColor,
    /// Created links and selected entries (default: "green").
    #[serde(
        default = "ThemeConfig::default_success",
        deserialize_with = "deserialize_color"
    )]
    pub success: ThemeColor,
    /// Failed links and fatal errors (default: "red").
    #[serde(
        default = "ThemeConfig::default_error",
        deserialize_with = "deserialize_color"
    )]
    pub error: ThemeColor,
    /// Notices such as the manual-mode fallback (default: "yellow").
    #[serde(
        default = "ThemeConfig::default_warning",
        deserialize_with = "deserialize_color"
    )]
    pub warning: ThemeColor,
    /// Muted/dim text color (default: "gray").
    #[serde(
        default = "ThemeConfig::default_muted",
        deserialize_with = "deserialize_color"
    )]
    pub muted: ThemeColor,
    /// Border color (default: "gray").
    #[serde(
        default = "ThemeConfig::default_border",
        deserialize_with = "deserialize_color"
    )]
    pub border: ThemeColor,
    /// Key hint color (default: "blue").
    #[serde(
        default = "ThemeConfig::default_hint",
        deserialize_with = "deserialize_color"
    )]
    pub hint: ThemeColor,
    /// Foreground for the highlighted row (default: "black").
    #[serde(
        default = "ThemeConfig::default_highlight_fg",
        deserialize_with = "deserialize_color"
    )]
    pub highlight_fg: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent: Self::default_accent(),
            success: Self::default_success(),
            error: Self::default_error(),
            warning: Self::default_warning(),
            muted: Self::default_muted(),
            border: Self::default_border(),
            hint: Self::default_hint(),
            highlight_fg: Self::default_highlight_fg(),
        }
    }
}

impl ThemeConfig {
    fn default_accent() -> ThemeColor {
        ThemeColor::Named(NamedColor::Cyan)
    }
    fn default_success() -> ThemeColor {
        ThemeColor::Named(NamedColor::Green)
    }
    fn default_error() -> ThemeColor {
        ThemeColor::Named(NamedColor::Red)
    }
    fn default_warning() -> ThemeColor {
        ThemeColor::Named(NamedColor::Yellow)
    }
    fn default_muted() -> ThemeColor {
        ThemeColor::Named(NamedColor::Gray)
    }
    fn default_border() -> ThemeColor {
        ThemeColor::Named(NamedColor::Gray)
    }
    fn default_hint() -> ThemeColor {
        ThemeColor::Named(NamedColor::Blue)
    }
    fn default_highlight_fg() -> ThemeColor {
        ThemeColor::Named(NamedColor::Black)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl NamedColor {
    /// Accepted names, alphabetical.
    pub const fn all() -> &'static [(&'static str, NamedColor)] {
        &[
            ("black", NamedColor::Black),
            ("blue", NamedColor::Blue),
            ("cyan", NamedColor::Cyan),
            ("gray", NamedColor::Gray),
            ("green", NamedColor::Green),
            ("magenta", NamedColor::Magenta),
            ("red", NamedColor::Red),
            ("white", NamedColor::White),
            ("yellow", NamedColor::Yellow),
        ]
    }
}

impl ThemeColor {
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return None;
            }
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Self::Rgb(r, g, b));
        }
        let lower = s.to_lowercase();
        let lookup = match lower.as_str() {
            "grey" => "gray",
            other => other,
        };
        NamedColor::all()
            .iter()
            .find(|(name, _)| *name == lookup)
            .map(|(_, color)| Self::Named(*color))
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<ThemeColor, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ThemeColor::parse(&s).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid color '{s}': expected a named color (black, red, green, yellow, blue, magenta, cyan, white, gray/grey) or hex (#rrggbb)"
        ))
    })
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    config.validate()?;
    Ok(config)
}

/// Load the config file.
///
/// With no override, a missing file at the default location means defaults. An
/// explicit path that does not exist is an error.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let config_file = match config_override {
        Some(path) => {
            if !path.exists() {
                bail!("Config file not found at {}", path.display());
            }
            path.to_path_buf()
        }
        None => {
            let default = config_file()?;
            if !default.exists() {
                log::debug!("no config at {}, using defaults", default.display());
                return Ok(Config::default());
            }
            default
        }
    };
    let contents = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed to read {}", config_file.display()))?;
    load_config_from_str(&contents)
        .with_context(|| format!("Invalid config file {}", config_file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.base_dir_name, "agent-context");
        assert_eq!(config.hidden_prefix, '.');
        assert_eq!(config.exit_delay(), Duration::from_secs(3));
        assert!(config.start_dir.is_none());
    }

    #[test]
    fn test_full_config() {
        let config = load_config_from_str(
            r##"
base_dir_name = "scratch"
hidden_prefix = "_"
exit_delay_ms = 500
start_dir = "/srv/code"

[theme]
accent = "magenta"
highlight_fg = "#ffffff"
"##,
        )
        .unwrap();
        assert_eq!(config.base_dir_name, "scratch");
        assert_eq!(config.hidden_prefix, '_');
        assert_eq!(config.exit_delay(), Duration::from_millis(500));
        assert_eq!(config.start_dir.as_deref(), Some("/srv/code"));
        assert_eq!(config.theme.accent, ThemeColor::Named(NamedColor::Magenta));
        assert_eq!(config.theme.highlight_fg, ThemeColor::Rgb(255, 255, 255));
        assert_eq!(config.theme.success, ThemeColor::Named(NamedColor::Green));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(load_config_from_str("search_dirs = []").is_err());
    }

    #[test]
    fn test_hidden_prefix_must_be_one_char() {
        let err = load_config_from_str(r#"hidden_prefix = "__""#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("exactly one character"), "Error was: {err}");
        assert!(load_config_from_str(r#"hidden_prefix = """#).is_err());
    }

    #[test]
    fn test_base_dir_name_validated() {
        assert!(load_config_from_str(r#"base_dir_name = """#).is_err());
        assert!(load_config_from_str(r#"base_dir_name = "a/b""#).is_err());
        assert!(load_config_from_str(r#"base_dir_name = "..""#).is_err());
    }

    #[test]
    fn test_negative_delay_rejected() {
        assert!(load_config_from_str("exit_delay_ms = -1").is_err());
    }

    #[test]
    fn test_theme_invalid_color_rejected() {
        let err = load_config_from_str(
            r#"
[theme]
accent = "notacolor"
"#,
        )
        .unwrap_err();
        assert!(
            format!("{err:#}").contains("invalid color"),
            "Error was: {err:#}"
        );
    }

    #[test]
    fn test_theme_unknown_field_rejected() {
        assert!(load_config_from_str("[theme]\nsecondary = \"blue\"").is_err());
    }

    #[test]
    fn test_theme_partial_override_keeps_defaults() {
        let config =
            load_config_from_str("[theme]\nwarning = \"Grey\"\nborder = \"#102030\"").unwrap();
        assert_eq!(config.theme.warning, ThemeColor::Named(NamedColor::Gray));
        assert_eq!(config.theme.border, ThemeColor::Rgb(16, 32, 48));
        assert_eq!(
            ThemeConfig {
                warning: ThemeConfig::default().warning,
                border: ThemeConfig::default().border,
                ..config.theme
            },
            ThemeConfig::default()
        );
    }

    #[test]
    fn test_theme_color_parse() {
        assert_eq!(
            ThemeColor::parse("RED"),
            Some(ThemeColor::Named(NamedColor::Red))
        );
        assert_eq!(
            ThemeColor::parse("grey"),
            Some(ThemeColor::Named(NamedColor::Gray))
        );
        assert_eq!(
            ThemeColor::parse("#0a0b0c"),
            Some(ThemeColor::Rgb(10, 11, 12))
        );
        assert_eq!(ThemeColor::parse("#fff"), None);
        assert_eq!(ThemeColor::parse("#zzzzzz"), None);
        assert_eq!(ThemeColor::parse("#ééé"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_resolved_start_dir() {
        let cwd = Path::new("/home/u/code/./repo");
        assert_eq!(
            Config::default().resolved_start_dir(cwd),
            PathBuf::from("/home/u/code/repo")
        );
        let config = load_config_from_str(r#"start_dir = "../elsewhere""#).unwrap();
        assert_eq!(
            config.resolved_start_dir(Path::new("/home/u/code")),
            PathBuf::from("/home/u/elsewhere")
        );
    }

    #[test]
    fn test_load_config_override_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let err = load_config(Some(&missing)).unwrap_err().to_string();
        assert!(err.contains("Config file not found"), "Error was: {err}");
    }

    #[test]
    fn test_load_config_override_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        fs::write(&file, "exit_delay_ms = 10\n").unwrap();
        let config = load_config(Some(&file)).unwrap();
        assert_eq!(config.exit_delay_ms, 10);
    }

    #[test]
    fn test_load_config_bad_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("config.toml");
        fs::write(&file, "exit_delay_ms = \"soon\"\n").unwrap();
        let err = format!("{:#}", load_config(Some(&file)).unwrap_err());
        assert!(err.contains("Invalid config file"), "Error was: {err}");
    }
}

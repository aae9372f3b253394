use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

fn agent_context_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_agent-context"))
}

/// Run the binary with its config and cache dirs pointed into `home`
fn run(home: &Path, args: &[&str]) -> Output {
    Command::new(agent_context_binary())
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_CACHE_HOME", home.join("cache"))
        .output()
        .unwrap()
}

#[test]
fn test_help_lists_flags_and_exits_zero() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--choose", "--manual", "--config", "--log-level", "--version"] {
        assert!(stdout.contains(flag), "missing {flag} in:\n{stdout}");
    }
}

#[test]
fn test_version_prints_package_version() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "got: {stdout}");
}

#[test]
fn test_missing_config_override_exits_two() {
    let home = tempfile::tempdir().unwrap();
    let missing = home.path().join("nope.toml");
    let output = run(
        home.path(),
        &["--config", missing.to_str().unwrap(), "--log-level", "off"],
    );
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Config file not found"), "got: {stderr}");
}

#[cfg(unix)]
#[test]
fn test_invalid_config_exits_two() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join("config").join("agent-context");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "hidden_prefix = \"..\"\n").unwrap();

    let output = run(home.path(), &[]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid config file"), "got: {stderr}");
    assert!(stderr.contains("hidden_prefix"), "got: {stderr}");
}

#[cfg(unix)]
#[test]
fn test_bad_config_is_logged() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("bad.toml");
    fs::write(&config, "unknown_key = 1\n").unwrap();

    let output = run(home.path(), &["-c", config.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    let log = fs::read_to_string(
        home.path()
            .join("cache")
            .join("agent-context")
            .join("agent-context.log"),
    )
    .unwrap();
    assert!(log.contains("failed to load config"), "got: {log}");
}

#[test]
fn test_unknown_flag_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let output = run(home.path(), &["--frobnicate"]);
    assert_eq!(output.status.code(), Some(2));
}

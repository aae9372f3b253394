mod logging;
mod report;

use agent_context_core::{
    config,
    fs::{FsProvider, LocalFs},
    report::ExitReport,
    state::{AppState, LaunchMode, Session},
    workspace::compute_auto_target,
};
use agent_context_tui::Theme;
use anyhow::{Context, Result};
use clap::Parser;
use std::{env, path::PathBuf, process::ExitCode, sync::Arc};

/// Exit code for failures before the UI starts
const STARTUP_FAILURE: u8 = 2;

#[derive(Parser)]
#[command(
    version,
    about = "Build a scoped workspace of symlinked projects for a coding agent"
)]
struct Cli {
    /// Show the mode selection screen instead of trying the automatic workspace
    #[arg(long)]
    choose: bool,

    /// Skip the automatic workspace and browse for a target directory
    #[arg(long)]
    manual: bool,

    /// Override path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value = logging::DEFAULT_LOG_LEVEL)]
    log_level: log::LevelFilter,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = logging::setup_logging(cli.log_level) {
        eprintln!("Warning: logging disabled: {error:#}");
    }

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            log::error!("failed to load config: {error:#}");
            report::print_error(&error);
            return ExitCode::from(STARTUP_FAILURE);
        }
    };

    match run_tui(&cli, &config) {
        Ok(exit) => {
            log::info!("exiting with code {}", exit.code);
            report::print(&exit);
            ExitCode::from(exit.code)
        }
        Err(error) => {
            log::error!("{error:#}");
            report::print_error(&error);
            ExitCode::from(STARTUP_FAILURE)
        }
    }
}

fn run_tui(cli: &Cli, config: &config::Config) -> Result<ExitReport> {
    let launch = LaunchMode::from_flags(cli.choose, cli.manual);
    let auto_target = compute_auto_target(&config.base_dir_name)?;
    let cwd = env::current_dir().context("Failed to read the current directory")?;
    let session = Session {
        auto_target,
        start_dir: config.resolved_start_dir(&cwd),
        hidden_prefix: config.hidden_prefix,
        exit_delay: config.exit_delay(),
    };
    log::info!(
        "starting in {launch:?} mode, browsing from {}",
        session.start_dir.display()
    );

    let (mut state, initial) = AppState::start(launch, session);
    let fs: Arc<dyn FsProvider> = Arc::new(LocalFs);
    let theme = Theme::from_config(&config.theme);

    let mut terminal = ratatui::init();
    let result = agent_context_tui::run(&mut terminal, &mut state, initial, &fs, &theme);
    ratatui::restore();

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_to_auto() {
        let cli = Cli::try_parse_from(["agent-context"]).unwrap();
        assert_eq!(
            LaunchMode::from_flags(cli.choose, cli.manual),
            LaunchMode::Auto
        );
        assert_eq!(cli.log_level, log::LevelFilter::Warn);
        assert!(cli.config.is_none());
    }

    #[test]
    fn cli_manual_wins_over_choose() {
        let cli = Cli::try_parse_from(["agent-context", "--choose", "--manual"]).unwrap();
        assert_eq!(
            LaunchMode::from_flags(cli.choose, cli.manual),
            LaunchMode::Manual
        );
    }

    #[test]
    fn cli_parses_config_and_log_level() {
        let cli = Cli::try_parse_from([
            "agent-context",
            "-c",
            "/tmp/ac.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/ac.toml")));
        assert_eq!(cli.log_level, log::LevelFilter::Debug);
    }

    #[test]
    fn cli_rejects_bad_log_level() {
        assert!(Cli::try_parse_from(["agent-context", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn cli_rejects_positional_args() {
        assert!(Cli::try_parse_from(["agent-context", "somewhere"]).is_err());
    }
}

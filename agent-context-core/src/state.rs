use crate::{
    action::Action,
    browser::{BrowseMode, BrowseOutcome, DirectoryBrowser},
    effect::{Effect, Update},
    event::AppEvent,
    report::ExitReport,
    workspace::{AutoTarget, LinkRecord},
};
use std::{path::PathBuf, time::Duration};

/// How the workspace target was chosen. Set once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkspaceMode {
    #[default]
    Unset,
    Automatic,
    Manual,
}

/// Which branch of the flow asked for a target directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetOrigin {
    Automatic,
    Manual,
}

/// Startup branch picked from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Try the automatic target, fall back to manual without asking
    Auto,
    /// Show the mode selection screen first
    Choose,
    /// Skip the automatic target entirely
    Manual,
}

impl LaunchMode {
    /// `manual` wins when both flags are given.
    pub fn from_flags(choose: bool, manual: bool) -> Self {
        if manual {
            Self::Manual
        } else if choose {
            Self::Choose
        } else {
            Self::Auto
        }
    }
}

/// Highlighted entry on the mode selection screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChoice {
    Automatic,
    Manual,
}

impl ModeChoice {
    pub fn toggled(self) -> Self {
        match self {
            Self::Automatic => Self::Manual,
            Self::Manual => Self::Automatic,
        }
    }
}

/// What screen the app is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Automatic target is being created; no input except Ctrl+C
    Preparing,
    ModeSelect,
    SelectTarget,
    SelectProjects,
    /// Links are being created; input is ignored until the batch is done
    Creating,
    Done,
}

/// Startup inputs that come from the environment rather than the user
#[derive(Debug, Clone)]
pub struct Session {
    pub auto_target: AutoTarget,
    /// Where both browsers start
    pub start_dir: PathBuf,
    pub hidden_prefix: char,
    /// How long the summary stays up before the program exits on its own
    pub exit_delay: Duration,
}

/// Central application state. Components read from this, transitions modify it.
///
/// Transitions never touch the filesystem: they return [`Effect`]s for the driver
/// to run, and the results come back in as [`AppEvent`]s.
#[derive(Debug, Clone)]
pub struct AppState {
    pub step: Step,
    pub mode: WorkspaceMode,
    pub mode_choice: ModeChoice,
    pub session: Session,
    pub target: Option<PathBuf>,
    pub projects: Vec<PathBuf>,
    pub browser: Option<DirectoryBrowser>,
    /// Index into `projects` of the link being created
    pub progress: usize,
    pub records: Vec<LinkRecord>,
    /// Shown once on the target screen after the automatic target failed
    pub notice: Option<String>,
    /// Carried into the exit report
    pub message: Option<String>,
}

impl AppState {
    pub fn start(launch: LaunchMode, session: Session) -> (Self, Update) {
        let mut state = Self {
            step: Step::Preparing,
            mode: WorkspaceMode::Unset,
            mode_choice: ModeChoice::Automatic,
            session,
            target: None,
            projects: Vec::new(),
            browser: None,
            progress: 0,
            records: Vec::new(),
            notice: None,
            message: None,
        };
        let update = match launch {
            LaunchMode::Manual => state.enter_target_select(),
            LaunchMode::Auto => state.begin_auto_probe(),
            LaunchMode::Choose => {
                state.step = Step::ModeSelect;
                Update::none()
            }
        };
        (state, update)
    }

    pub fn set_viewport_rows(&mut self, rows: usize) {
        if let Some(browser) = self.browser.as_mut() {
            browser.set_viewport_rows(rows);
        }
    }

    /// True while the user can't act: waiting on the filesystem or linking
    pub fn is_busy(&self) -> bool {
        match self.step {
            Step::Preparing | Step::Creating => true,
            Step::SelectTarget | Step::SelectProjects => {
                self.browser.as_ref().is_some_and(|b| b.loading)
            }
            Step::ModeSelect | Step::Done => false,
        }
    }

    pub fn exit_report(&self, code: u8) -> ExitReport {
        ExitReport {
            code,
            mode: self.mode,
            target: self.target.clone(),
            records: self.records.clone(),
            completed: self.step == Step::Done,
            message: self.message.clone(),
        }
    }

    fn begin_auto_probe(&mut self) -> Update {
        self.step = Step::Preparing;
        Update::effect(Effect::EnsureTarget {
            path: self.session.auto_target.session_path.clone(),
            origin: TargetOrigin::Automatic,
        })
    }

    fn enter_target_select(&mut self) -> Update {
        self.mode = WorkspaceMode::Manual;
        self.step = Step::SelectTarget;
        self.open_browser(BrowseMode::Target)
    }

    fn enter_project_select(&mut self, target: PathBuf) -> Update {
        self.target = Some(target);
        self.step = Step::SelectProjects;
        self.open_browser(BrowseMode::Projects)
    }

    fn open_browser(&mut self, mode: BrowseMode) -> Update {
        let start = self.session.start_dir.clone();
        let mut browser = DirectoryBrowser::new(mode, start.clone());
        if let Some(previous) = &self.browser {
            browser.set_viewport_rows(previous.viewport_rows());
        }
        self.browser = Some(browser);
        Update::effect(Effect::ListDirectory(start))
    }

    pub fn apply_action(&mut self, action: Action) -> Update {
        if action == Action::Quit {
            // A running batch can't be aborted.
            return if self.step == Step::Creating {
                Update::none()
            } else {
                Update::exit(0)
            };
        }

        match self.step {
            Step::Preparing | Step::Creating => Update::none(),
            Step::ModeSelect => self.mode_select_action(action),
            Step::SelectTarget | Step::SelectProjects => self.browser_action(action),
            Step::Done => match action {
                Action::Confirm | Action::Cancel => Update::exit(0),
                _ => Update::none(),
            },
        }
    }

    fn mode_select_action(&mut self, action: Action) -> Update {
        match action {
            Action::MoveSelection(_) => {
                self.mode_choice = self.mode_choice.toggled();
                Update::none()
            }
            Action::Confirm => match self.mode_choice {
                ModeChoice::Automatic => self.begin_auto_probe(),
                ModeChoice::Manual => self.enter_target_select(),
            },
            Action::Cancel => Update::exit(0),
            _ => Update::none(),
        }
    }

    fn browser_action(&mut self, action: Action) -> Update {
        let Some(browser) = self.browser.as_mut() else {
            return Update::none();
        };
        if browser.loading {
            return Update::none();
        }

        match action {
            Action::Cancel => return Update::exit(0),
            Action::MoveSelection(delta) => browser.move_cursor(delta),
            Action::Descend => {
                if let Some(dir) = browser.descend() {
                    return Update::effect(Effect::ListDirectory(dir));
                }
            }
            Action::Ascend => {
                if let Some(dir) = browser.ascend() {
                    return Update::effect(Effect::ListDirectory(dir));
                }
            }
            Action::FilterPush(c) => {
                browser.push_filter(c);
            }
            Action::FilterPop => {
                browser.pop_filter();
            }
            Action::ToggleSelection => {
                browser.toggle_highlighted();
            }
            Action::Confirm => match browser.confirm() {
                BrowseOutcome::Target(dir) => {
                    browser.loading = true;
                    return Update::effect(Effect::EnsureTarget {
                        path: dir,
                        origin: TargetOrigin::Manual,
                    });
                }
                BrowseOutcome::Projects(projects) => return self.begin_linking(projects),
            },
            Action::Quit => {}
        }
        Update::none()
    }

    fn begin_linking(&mut self, projects: Vec<PathBuf>) -> Update {
        if projects.is_empty() {
            self.message = Some("No projects selected. Exiting.".to_string());
            return Update::exit(0);
        }
        let Some(target) = self.target.clone() else {
            self.message = Some("No target directory selected".to_string());
            return Update::exit(1);
        };
        log::info!(
            "linking {} project(s) into {}",
            projects.len(),
            target.display()
        );
        self.projects.clone_from(&projects);
        self.records.clear();
        self.progress = 0;
        self.browser = None;
        self.step = Step::Creating;
        Update::effect(Effect::CreateLinks { target, projects })
    }

    pub fn apply_event(&mut self, event: AppEvent) -> Update {
        match event {
            AppEvent::DirectoryListed { path, entries } => {
                if let Some(browser) = self.browser.as_mut()
                    && !browser.set_entries(&path, entries)
                {
                    log::debug!("discarding stale listing for {}", path.display());
                }
                Update::none()
            }
            AppEvent::TargetReady { path, origin } => match origin {
                TargetOrigin::Automatic if self.step == Step::Preparing => {
                    self.mode = WorkspaceMode::Automatic;
                    log::info!("automatic workspace at {}", path.display());
                    self.enter_project_select(path)
                }
                TargetOrigin::Manual if self.step == Step::SelectTarget => {
                    log::info!("manual workspace at {}", path.display());
                    self.enter_project_select(path)
                }
                _ => Update::none(),
            },
            AppEvent::TargetFailed {
                path,
                origin,
                error,
            } => match origin {
                TargetOrigin::Automatic => {
                    log::warn!("automatic target {} unusable: {error}", path.display());
                    self.notice = Some(format!(
                        "No write permissions for {}. Falling back to manual mode. (Reason: {error})",
                        path.display()
                    ));
                    self.enter_target_select()
                }
                TargetOrigin::Manual => {
                    log::error!("target {} unusable: {error}", path.display());
                    self.message = Some(format!("Failed to ensure target: {error}"));
                    Update::exit(1)
                }
            },
            AppEvent::LinkStarted { index } => {
                self.progress = index;
                Update::none()
            }
            AppEvent::LinkCreated(record) => {
                if !record.ok {
                    log::warn!(
                        "failed to link {}: {}",
                        record.source.display(),
                        record.message
                    );
                }
                self.records.push(record);
                Update::none()
            }
            AppEvent::LinksFinished => {
                self.progress = self.projects.len();
                self.step = Step::Done;
                Update::effect(Effect::ScheduleExit(self.session.exit_delay))
            }
            AppEvent::LinkTargetFailed { error } => {
                self.message = Some(format!("Failed to create target directory: {error}"));
                Update::exit(1)
            }
            AppEvent::ExitTimerElapsed => {
                if self.step == Step::Done {
                    Update::exit(0)
                } else {
                    Update::none()
                }
            }
        }
    }
}

pub mod action;
pub mod browser;
pub mod config;
pub mod effect;
pub mod event;
pub mod fs;
pub mod paths;
pub mod report;
pub mod state;
pub mod workspace;

// Re-export commonly used types at crate root
pub use action::Action;
pub use browser::{BrowseMode, BrowseOutcome, DirectoryBrowser};
pub use config::Config;
pub use effect::{Effect, Flow, Update};
pub use event::AppEvent;
pub use fs::FsProvider;
pub use report::ExitReport;
pub use state::{AppState, LaunchMode, Session, Step, WorkspaceMode};
pub use workspace::{AutoTarget, LinkRecord};

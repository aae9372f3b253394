use crate::{state::TargetOrigin, workspace::LinkRecord};
use std::path::PathBuf;

/// Events that arrive asynchronously from background workers.
/// These get merged into the main event loop alongside keyboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A directory listing completed. Unreadable directories arrive as empty listings.
    DirectoryListed { path: PathBuf, entries: Vec<String> },

    /// The target directory exists and is usable
    TargetReady { path: PathBuf, origin: TargetOrigin },

    /// The target directory could not be created
    TargetFailed {
        path: PathBuf,
        origin: TargetOrigin,
        error: String,
    },

    /// Linking of the project at `index` has begun
    LinkStarted { index: usize },

    LinkCreated(LinkRecord),

    /// Every project has been attempted
    LinksFinished,

    /// The target vanished or became unwritable before linking started
    LinkTargetFailed { error: String },

    ExitTimerElapsed,
}

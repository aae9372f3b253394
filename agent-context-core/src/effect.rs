use crate::state::TargetOrigin;
use std::{path::PathBuf, time::Duration};

/// Side effect requested by a state transition. The driver runs it and reports back
/// with an [`AppEvent`](crate::event::AppEvent).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ListDirectory(PathBuf),
    EnsureTarget {
        path: PathBuf,
        origin: TargetOrigin,
    },
    /// Link each project into `target`, one at a time, in order
    CreateLinks {
        target: PathBuf,
        projects: Vec<PathBuf>,
    },
    ScheduleExit(Duration),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    Exit(u8),
}

/// Result of one transition
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Update {
    pub effects: Vec<Effect>,
    pub flow: Flow,
}

impl Update {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn effect(effect: Effect) -> Self {
        Self {
            effects: vec![effect],
            flow: Flow::Continue,
        }
    }

    pub fn exit(code: u8) -> Self {
        Self {
            effects: Vec::new(),
            flow: Flow::Exit(code),
        }
    }
}

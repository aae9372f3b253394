use agent_context_core::{event::AppEvent, fs::FsProvider, state::TargetOrigin};
use std::{
    path::PathBuf,
    sync::{Arc, atomic::Ordering},
    thread,
    time::Duration,
};

use super::EventSender;

pub(super) fn spawn_listing(
    fs: &Arc<dyn FsProvider>,
    sender: &EventSender,
    dir: PathBuf,
    hidden_prefix: char,
) {
    let fs = Arc::clone(fs);
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.cancel.load(Ordering::Relaxed) {
            return;
        }
        let entries = fs.list_subdirectories(&dir, hidden_prefix);
        sender.send(AppEvent::DirectoryListed { path: dir, entries });
    });
}

pub(super) fn spawn_ensure_target(
    fs: &Arc<dyn FsProvider>,
    sender: &EventSender,
    path: PathBuf,
    origin: TargetOrigin,
) {
    let fs = Arc::clone(fs);
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.cancel.load(Ordering::Relaxed) {
            return;
        }
        match fs.ensure_directory(&path) {
            Ok(()) => sender.send(AppEvent::TargetReady { path, origin }),
            Err(e) => sender.send(AppEvent::TargetFailed {
                path,
                origin,
                error: format!("{e:#}"),
            }),
        }
    });
}

/// One worker for the whole batch, so links are created strictly in order.
pub(super) fn spawn_link_batch(
    fs: &Arc<dyn FsProvider>,
    sender: &EventSender,
    target: PathBuf,
    projects: Vec<PathBuf>,
) {
    let fs = Arc::clone(fs);
    let sender = sender.clone();
    thread::spawn(move || {
        if let Err(e) = fs.ensure_directory(&target) {
            sender.send(AppEvent::LinkTargetFailed {
                error: format!("{e:#}"),
            });
            return;
        }
        for (index, project) in projects.iter().enumerate() {
            sender.send(AppEvent::LinkStarted { index });
            let record = fs.link_project(&target, project);
            sender.send(AppEvent::LinkCreated(record));
        }
        sender.send(AppEvent::LinksFinished);
    });
}

pub(super) fn spawn_exit_timer(sender: &EventSender, delay: Duration) {
    let sender = sender.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        if !sender.cancel.load(Ordering::Relaxed) {
            sender.send(AppEvent::ExitTimerElapsed);
        }
    });
}

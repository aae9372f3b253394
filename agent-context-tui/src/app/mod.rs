mod spawn;

use crate::{components, keymap, theme::Theme};
use agent_context_core::{
    effect::{Effect, Flow, Update},
    event::AppEvent,
    fs::FsProvider,
    report::ExitReport,
    state::{AppState, Step},
};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use spawn::{spawn_ensure_target, spawn_exit_timer, spawn_link_batch, spawn_listing};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    time::{Duration, Instant},
};

/// Handle for dispatching background work
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<AppEvent>,
    cancel: Arc<AtomicBool>,
}

impl EventSender {
    /// Send an event from a background thread to the main loop
    pub fn send(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }
}

/// Drive the UI until a transition asks to exit.
///
/// `initial` is the update returned by [`AppState::start`]; its effects are started
/// before the first frame.
pub fn run(
    terminal: &mut DefaultTerminal,
    state: &mut AppState,
    initial: Update,
    fs: &Arc<dyn FsProvider>,
    theme: &Theme,
) -> anyhow::Result<ExitReport> {
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let cancel = Arc::new(AtomicBool::new(false));
    let event_sender = EventSender {
        tx,
        cancel: Arc::clone(&cancel),
    };
    let spinner_start = Instant::now();

    let mut exit = process_update(initial, state, fs, &event_sender);

    let code = loop {
        if let Some(code) = exit {
            break code;
        }

        terminal.draw(|f| draw(f, state, theme, &spinner_start))?;

        // Check background channel (non-blocking)
        if let Ok(app_event) = rx.try_recv() {
            log::debug!("event: {app_event:?}");
            let update = state.apply_event(app_event);
            exit = process_update(update, state, fs, &event_sender);
            continue;
        }

        // Poll terminal events with a timeout so we can update spinner + check channel
        if event::poll(Duration::from_millis(80))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = keymap::resolve_action(key, state) {
                log::debug!("action: {action:?}");
                let update = state.apply_action(action);
                exit = process_update(update, state, fs, &event_sender);
            }
        }
    };

    // Signal cancellation to background threads
    cancel.store(true, Ordering::Relaxed);
    Ok(state.exit_report(code))
}

/// Start every effect on a worker thread. Returns the exit code if the update ends the run.
fn process_update(
    update: Update,
    state: &AppState,
    fs: &Arc<dyn FsProvider>,
    sender: &EventSender,
) -> Option<u8> {
    for effect in update.effects {
        dispatch_effect(effect, state.session.hidden_prefix, fs, sender);
    }
    match update.flow {
        Flow::Continue => None,
        Flow::Exit(code) => Some(code),
    }
}

fn dispatch_effect(
    effect: Effect,
    hidden_prefix: char,
    fs: &Arc<dyn FsProvider>,
    sender: &EventSender,
) {
    match effect {
        Effect::ListDirectory(dir) => spawn_listing(fs, sender, dir, hidden_prefix),
        Effect::EnsureTarget { path, origin } => spawn_ensure_target(fs, sender, path, origin),
        Effect::CreateLinks { target, projects } => {
            spawn_link_batch(fs, sender, target, projects);
        }
        Effect::ScheduleExit(delay) => spawn_exit_timer(sender, delay),
    }
}

fn draw(f: &mut Frame, state: &mut AppState, theme: &Theme, spinner_start: &Instant) {
    let area = f.area();

    let notice = match state.step {
        Step::SelectTarget => state.notice.clone(),
        _ => None,
    };
    let (main_area, notice_area) = if let Some(notice) = &notice {
        let rows = components::notice_bar::height(notice, area.width);
        let chunks = Layout::vertical([Constraint::Length(rows), Constraint::Min(1)]).split(area);
        (chunks[1], Some(chunks[0]))
    } else {
        (area, None)
    };

    match state.step {
        Step::Preparing => {
            components::progress::draw_preparing(f, main_area, state, theme, spinner_start);
        }
        Step::ModeSelect => components::mode_select::draw(f, main_area, state, theme),
        Step::SelectTarget | Step::SelectProjects => {
            if let Some(mode) = state.browser.as_ref().map(|b| b.mode) {
                state.set_viewport_rows(components::browser::list_rows(main_area, mode));
            }
            if let Some(browser) = &state.browser {
                components::browser::draw(f, main_area, browser, theme, spinner_start);
            }
        }
        Step::Creating => components::progress::draw(f, main_area, state, theme, spinner_start),
        Step::Done => components::summary::draw(f, main_area, state, theme),
    }

    if let (Some(notice), Some(area)) = (notice, notice_area) {
        components::notice_bar::draw(f, area, &notice, theme);
    }
}

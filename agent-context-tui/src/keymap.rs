use agent_context_core::{
    action::Action,
    browser::{BrowseMode, is_filter_char},
    state::{AppState, Step},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Resolve a key event into an Action based on the current step
pub fn resolve_action(key: KeyEvent, state: &AppState) -> Option<Action> {
    // Global quit
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    if state.is_busy() {
        return None;
    }

    match state.step {
        Step::Preparing | Step::Creating => None,
        Step::ModeSelect => resolve_mode_select_key(key.code),
        Step::SelectTarget => resolve_browser_key(key.code, BrowseMode::Target),
        Step::SelectProjects => resolve_browser_key(key.code, BrowseMode::Projects),
        Step::Done => resolve_done_key(key.code),
    }
}

fn resolve_mode_select_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Up => Some(Action::MoveSelection(-1)),
        KeyCode::Down => Some(Action::MoveSelection(1)),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Cancel),
        _ => None,
    }
}

fn resolve_browser_key(key: KeyCode, mode: BrowseMode) -> Option<Action> {
    match key {
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Up => Some(Action::MoveSelection(-1)),
        KeyCode::Down => Some(Action::MoveSelection(1)),
        KeyCode::Left => Some(Action::Ascend),
        KeyCode::Right => Some(Action::Descend),
        KeyCode::Char(' ') => match mode {
            BrowseMode::Target => Some(Action::Confirm),
            BrowseMode::Projects => Some(Action::ToggleSelection),
        },
        KeyCode::Backspace | KeyCode::Delete => Some(Action::FilterPop),
        KeyCode::Char(c) if is_filter_char(c) => Some(Action::FilterPush(c)),
        _ => None,
    }
}

fn resolve_done_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => Some(Action::Cancel),
        _ => None,
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use partview_core::action::Action;
use partview_core::config::keymap::Keymap;

use crate::app::AppMode;

/// Actions that can result from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Dispatch a bound action.
    Action(Action),
    /// Close the help popup or the alert.
    Dismiss,
    /// No action for this key.
    None,
}

/// Tracks state for multi-key sequences like "gg".
#[derive(Debug, Default)]
pub struct InputState {
    pending_g: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self { pending_g: false }
    }

    pub fn is_pending(&self) -> bool {
        self.pending_g
    }
}

/// Maps a key event to an InputAction based on the current mode.
/// Returns the action and a new InputState (immutable pattern).
///
/// In Normal mode, character keys are resolved through the `Keymap`;
/// arrow keys, Enter, Ctrl+C and the `g` prefix are hardcoded.
pub fn handle_key(
    key: KeyEvent,
    mode: &AppMode,
    state: &InputState,
    keymap: &Keymap,
) -> (InputAction, InputState) {
    match mode {
        AppMode::Normal => handle_normal_key(key, state, keymap),
        AppMode::Help => handle_help_key(key),
        AppMode::Alert(_) => handle_alert_key(key),
    }
}

fn bound(keymap: &Keymap, key: &str) -> InputAction {
    match keymap.action_for_key(key) {
        Some(action) => InputAction::Action(action),
        None => InputAction::None,
    }
}

fn handle_normal_key(
    key: KeyEvent,
    state: &InputState,
    keymap: &Keymap,
) -> (InputAction, InputState) {
    // Handle "gg" sequence
    if state.pending_g {
        let new_state = InputState { pending_g: false };
        return match key.code {
            KeyCode::Char('g') => (bound(keymap, "gg"), new_state),
            _ => (InputAction::None, new_state),
        };
    }

    let new_state = InputState { pending_g: false };

    // Hardcoded keys: arrows, Enter, Ctrl+C (not remappable)
    let action = match key.code {
        KeyCode::Down => InputAction::Action(Action::CursorDown),
        KeyCode::Up => InputAction::Action(Action::CursorUp),
        KeyCode::Left => InputAction::Action(Action::Collapse),
        KeyCode::Right => InputAction::Action(Action::Expand),
        KeyCode::Home => InputAction::Action(Action::CursorTop),
        KeyCode::End => InputAction::Action(Action::CursorBottom),
        KeyCode::Enter => InputAction::Action(Action::Activate),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            InputAction::Action(Action::Quit)
        }
        KeyCode::Char('g') => {
            return (InputAction::None, InputState { pending_g: true });
        }
        KeyCode::Char(' ') => bound(keymap, "Space"),
        // Look up character keys in the keymap
        KeyCode::Char(c) => bound(keymap, &c.to_string()),
        _ => InputAction::None,
    };

    (action, new_state)
}

fn handle_help_key(key: KeyEvent) -> (InputAction, InputState) {
    let new_state = InputState::new();
    let action = match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => InputAction::Dismiss,
        _ => InputAction::None,
    };
    (action, new_state)
}

fn handle_alert_key(key: KeyEvent) -> (InputAction, InputState) {
    let new_state = InputState::new();
    let action = match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') | KeyCode::Char('q') => {
            InputAction::Dismiss
        }
        _ => InputAction::None,
    };
    (action, new_state)
}

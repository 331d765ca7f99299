//! Input dispatch layer for Elm Architecture (TEA) pattern.
//!
//! Maps key events to messages based on current app mode.

use super::{App, Message};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map key events to messages based on current app mode.
pub fn dispatch(app: &App, key: KeyEvent) -> Message {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Message::Quit;
    }

    if app.show_help() {
        dispatch_help_modal(key)
    } else if app.show_project_picker() || app.show_assignee_menu() {
        dispatch_menu(key)
    } else {
        dispatch_normal_mode(key)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mode-specific dispatch functions
// ─────────────────────────────────────────────────────────────────────────────

/// Handle keys in normal mode (report view).
fn dispatch_normal_mode(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Char('q') => Message::Quit,
        KeyCode::Char('p') => Message::OpenProjectPicker,
        KeyCode::Char('a') => Message::OpenAssigneeMenu,
        KeyCode::Tab | KeyCode::BackTab => Message::FocusNextTable,
        KeyCode::Char('l') | KeyCode::Right => Message::NextColumn,
        KeyCode::Char('h') | KeyCode::Left => Message::PrevColumn,
        KeyCode::Char('s') | KeyCode::Enter => Message::SortByCursor,
        KeyCode::Char(c @ '1'..='9') => Message::SortColumn(c as usize - '1' as usize),
        KeyCode::Char('r') => Message::Retry,
        KeyCode::Char('R') => Message::ReloadProjects,
        KeyCode::Char('e') => Message::Export,
        KeyCode::Char('?') => Message::ToggleHelp,
        _ => Message::None,
    }
}

/// Handle keys in help modal.
fn dispatch_help_modal(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Message::CloseModal,
        _ => Message::None,
    }
}

/// Handle keys in the project picker and assignee menu.
fn dispatch_menu(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Message::MenuDown,
        KeyCode::Char('k') | KeyCode::Up => Message::MenuUp,
        KeyCode::Enter => Message::MenuConfirm,
        KeyCode::Esc | KeyCode::Char('q') => Message::CloseModal,
        _ => Message::None,
    }
}

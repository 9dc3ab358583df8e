mod edit;
mod mouse;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use super::app::{App, Focus};

use edit::handle_edit;
use navigate::handle_navigate;

/// Handle a key event for whichever control has focus
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // An open alert swallows the key that dismisses it
    if app.alert.is_some() {
        app.alert = None;
        return;
    }

    match app.focus {
        Focus::Input => handle_edit(app, key),
        Focus::List => handle_navigate(app, key),
    }
}

/// Handle a mouse event (clicks and wheel)
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    mouse::handle_mouse(app, mouse);
}

/// Handle a bracketed paste. Only lands in the input field; newlines become spaces.
pub fn handle_paste(app: &mut App, text: &str) {
    if app.alert.is_some() || text.is_empty() {
        return;
    }
    app.focus = Focus::Input;
    let clean: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect();
    edit::insert_str(app, &clean);
}

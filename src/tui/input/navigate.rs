use crossterm::event::{KeyCode, KeyEvent};

use crate::model::FilterMode;
use crate::tui::app::{App, Focus};

/// Keys while the task list has focus
pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        KeyCode::Char('i') | KeyCode::Char('a') | KeyCode::Tab => app.focus = Focus::Input,
        KeyCode::Up | KeyCode::Char('k') => {
            if app.cursor == 0 {
                app.focus = Focus::Input;
            } else {
                app.move_cursor(-1);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::Home | KeyCode::Char('g') => app.cursor = 0,
        KeyCode::End | KeyCode::Char('G') => app.move_cursor(isize::MAX),
        KeyCode::PageDown => app.move_cursor(10),
        KeyCode::PageUp => app.move_cursor(-10),

        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(id) = app.selected_id() {
                app.toggle(id);
            }
        }
        KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace => {
            if let Some(id) = app.selected_id() {
                app.delete(id);
            }
        }

        KeyCode::Char('1') => app.set_filter(FilterMode::All),
        KeyCode::Char('2') => app.set_filter(FilterMode::Pending),
        KeyCode::Char('3') => app.set_filter(FilterMode::Completed),
        KeyCode::Char('f') | KeyCode::Right | KeyCode::Char('l') => {
            app.set_filter(app.filter.mode().next())
        }
        KeyCode::Left | KeyCode::Char('h') => {
            // Two steps forward around a three-mode cycle is one step back
            app.set_filter(app.filter.mode().next().next())
        }
        _ => {}
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Focus};
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

/// Keys while the input field has focus
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Esc | KeyCode::Tab | KeyCode::Down => app.focus = Focus::List,
        KeyCode::Backspace => {
            if let Some(start) = prev_grapheme_boundary(&app.input, app.input_cursor) {
                app.input.replace_range(start..app.input_cursor, "");
                app.input_cursor = start;
            }
        }
        KeyCode::Delete => {
            if let Some(end) = next_grapheme_boundary(&app.input, app.input_cursor) {
                app.input.replace_range(app.input_cursor..end, "");
            }
        }
        KeyCode::Left => {
            if let Some(pos) = prev_grapheme_boundary(&app.input, app.input_cursor) {
                app.input_cursor = pos;
            }
        }
        KeyCode::Right => {
            if let Some(pos) = next_grapheme_boundary(&app.input, app.input_cursor) {
                app.input_cursor = pos;
            }
        }
        KeyCode::Home => app.input_cursor = 0,
        KeyCode::End => app.input_cursor = app.input.len(),
        KeyCode::Char('a') if ctrl => app.input_cursor = 0,
        KeyCode::Char('e') if ctrl => app.input_cursor = app.input.len(),
        KeyCode::Char('u') if ctrl => {
            app.input.replace_range(..app.input_cursor, "");
            app.input_cursor = 0;
        }
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            let mut buf = [0u8; 4];
            insert_str(app, c.encode_utf8(&mut buf));
        }
        _ => {}
    }
}

/// Insert `text` at the caret and move the caret past it
pub(super) fn insert_str(app: &mut App, text: &str) {
    app.input.insert_str(app.input_cursor, text);
    app.input_cursor += text.len();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    fn press(app: &mut App, code: KeyCode) {
        handle_edit(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn insert_in_middle() {
        let mut app = empty_app();
        type_str(&mut app, "Buy mlk");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        type_str(&mut app, "i");
        assert_eq!(app.input, "Buy milk");
        assert_eq!(app.input_cursor, 6);
    }

    #[test]
    fn backspace_and_delete_respect_graphemes() {
        let mut app = empty_app();
        type_str(&mut app, "cafe\u{0301}!");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input, "caf!");
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.input, "af!");
        assert_eq!(app.input_cursor, 0);
    }

    #[test]
    fn backspace_at_start_is_noop() {
        let mut app = empty_app();
        type_str(&mut app, "x");
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input, "x");
    }

    #[test]
    fn ctrl_u_clears_to_start() {
        let mut app = empty_app();
        type_str(&mut app, "hello world");
        handle_edit(
            &mut app,
            KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL),
        );
        assert!(app.input.is_empty());
        assert_eq!(app.input_cursor, 0);
    }

    #[test]
    fn esc_moves_focus_to_list_and_keeps_text() {
        let mut app = empty_app();
        type_str(&mut app, "draft");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focus, Focus::List);
        assert_eq!(app.input, "draft");
    }

    #[test]
    fn enter_on_whitespace_alerts() {
        let mut app = empty_app();
        type_str(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert!(app.store.tasks().is_empty());
        assert_eq!(app.alert.as_ref().unwrap().message, "Task cannot be empty");
        assert!(app.input.is_empty());
    }
}

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::tui::app::{App, Focus, HitTarget};

pub(super) fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if app.alert.is_some() {
                app.alert = None;
                return;
            }
            if let Some(target) = app.hit_test(mouse.column, mouse.row) {
                click(app, target);
            }
        }
        MouseEventKind::ScrollDown if app.alert.is_none() => app.move_cursor(1),
        MouseEventKind::ScrollUp if app.alert.is_none() => app.move_cursor(-1),
        _ => {}
    }
}

fn click(app: &mut App, target: HitTarget) {
    match target {
        HitTarget::Input => app.focus = Focus::Input,
        HitTarget::AddButton => app.submit_input(),
        HitTarget::Filter(mode) => app.set_filter(mode),
        HitTarget::Row(id) => {
            app.focus = Focus::List;
            app.select(id);
            app.toggle(id);
        }
        HitTarget::Delete(id) => {
            app.focus = Focus::List;
            app.select(id);
            app.delete(id);
        }
    }
}

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus, HitTarget};
use crate::util::unicode::{display_width, truncate_to_width};

pub const EMPTY_MESSAGE: &str = "No tasks found";

const DELETE_GLYPH: &str = " \u{00D7} ";
const PENDING_MARK: &str = " \u{25CB} ";
const DONE_MARK: &str = " \u{2713} ";

/// Render the filtered task list, or the empty-state message
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let visible_height = area.height as usize;
    let len = app.visible_tasks().len();

    if len == 0 {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                EMPTY_MESSAGE,
                Style::default().fg(app.theme.dim).bg(bg),
            )),
        ];
        let empty = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(bg));
        frame.render_widget(empty, area);
        return;
    }

    // Keep the cursor row on screen
    if app.cursor < app.scroll {
        app.scroll = app.cursor;
    } else if visible_height > 0 && app.cursor >= app.scroll + visible_height {
        app.scroll = app.cursor + 1 - visible_height;
    }
    app.scroll = app.scroll.min(len.saturating_sub(1));

    let width = area.width as usize;
    let title_w = width.saturating_sub(display_width(PENDING_MARK) + display_width(DELETE_GLYPH) + 1);
    let list_focused = app.focus == Focus::List;

    let mut lines: Vec<Line> = Vec::new();
    let mut hits: Vec<(Rect, HitTarget)> = Vec::new();

    for (i, task) in app
        .visible_tasks()
        .into_iter()
        .enumerate()
        .skip(app.scroll)
        .take(visible_height)
    {
        let row_y = area.y + (i - app.scroll) as u16;
        let row_bg = if list_focused && i == app.cursor {
            app.theme.selection_bg
        } else {
            bg
        };

        let (mark, mark_style, title_style) = if task.completed {
            (
                DONE_MARK,
                Style::default().fg(app.theme.green).bg(row_bg),
                Style::default()
                    .fg(app.theme.dim)
                    .bg(row_bg)
                    .add_modifier(Modifier::CROSSED_OUT),
            )
        } else {
            (
                PENDING_MARK,
                Style::default().fg(app.theme.text).bg(row_bg),
                Style::default().fg(app.theme.text_bright).bg(row_bg),
            )
        };

        let title = truncate_to_width(&task.title, title_w);
        let pad = title_w.saturating_sub(display_width(&title)) + 1;
        lines.push(Line::from(vec![
            Span::styled(mark, mark_style),
            Span::styled(title, title_style),
            Span::styled(" ".repeat(pad), Style::default().bg(row_bg)),
            Span::styled(DELETE_GLYPH, Style::default().fg(app.theme.red).bg(row_bg)),
        ]));

        // Delete first so it wins over the row underneath
        let delete_w = display_width(DELETE_GLYPH) as u16;
        let delete_x = area.x + area.width.saturating_sub(delete_w);
        hits.push((
            Rect::new(delete_x, row_y, delete_w.min(area.width), 1),
            HitTarget::Delete(task.id),
        ));
        hits.push((Rect::new(area.x, row_y, area.width, 1), HitTarget::Row(task.id)));
    }

    app.hit_regions.extend(hits);
    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

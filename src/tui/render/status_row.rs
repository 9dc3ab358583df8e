use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Focus};

/// Render the status row (bottom of screen): counts on the left, key hints on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let tasks = app.store.tasks();
    let done = tasks.iter().filter(|t| t.completed).count();
    let counts = format!(" {} tasks, {} done", tasks.len(), done);

    let mut spans = vec![Span::styled(
        counts,
        Style::default().fg(app.theme.dim).bg(bg),
    )];

    if app.show_key_hints {
        let hint = match app.focus {
            Focus::Input => "Enter add  Esc list  Ctrl-C quit ",
            Focus::List => "Space toggle  d delete  1-3 filter  i input  q quit ",
        };
        let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        let hint_width = hint.chars().count();
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::FilterMode;
use crate::tui::app::{App, HitTarget};

/// Render the three filter controls with a separator line below
pub fn render_filter_bar(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // labels
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_labels(frame, app, chunks[0]);

    let sep = "\u{2500}".repeat(chunks[1].width as usize);
    let separator = Paragraph::new(Span::styled(
        sep,
        Style::default().fg(app.theme.dim).bg(app.theme.background),
    ));
    frame.render_widget(separator, chunks[1]);
}

fn render_labels(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let active = app.filter.mode();
    let mut spans: Vec<Span> = vec![Span::styled(" ", Style::default().bg(bg))];
    let mut col = area.x + 1;

    for (i, mode) in FilterMode::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(
                " \u{2502} ",
                Style::default().fg(app.theme.dim).bg(bg),
            ));
            col += 3;
        }

        let label = format!(" {} ", mode.label());
        let style = if mode == active {
            Style::default()
                .fg(app.theme.highlight)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        let label_w = label.chars().count() as u16;
        let hit = Rect::new(col, area.y, label_w, 1).intersection(area);
        app.hit_regions.push((hit, HitTarget::Filter(mode)));
        col += label_w;
        spans.push(Span::styled(label, style));
    }

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(bar, area);
}

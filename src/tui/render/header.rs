use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

pub const TITLE: &str = "Task Manager";

/// Render the static header
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let style = Style::default()
        .fg(app.theme.text_bright)
        .bg(app.theme.background)
        .add_modifier(Modifier::BOLD);
    let header = Paragraph::new(Line::from(TITLE))
        .style(style)
        .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

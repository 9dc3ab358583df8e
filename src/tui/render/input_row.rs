use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::app::{App, Focus, HitTarget};
use crate::util::unicode::{byte_offset_to_display_col, display_width};

pub const PLACEHOLDER: &str = "What needs to be done?";
pub const ADD_BUTTON: &str = "[ Add ]";

/// Render the text field and the Add button
pub fn render_input_row(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(1),
            Constraint::Length(ADD_BUTTON.len() as u16),
        ])
        .split(area);
    let field_area = chunks[0];
    let focused = app.focus == Focus::Input;

    let border_color = if focused {
        app.theme.highlight
    } else {
        app.theme.dim
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).bg(bg))
        .style(Style::default().bg(app.theme.surface));
    let inner = block.inner(field_area);

    let width = inner.width as usize;
    let caret_col = byte_offset_to_display_col(&app.input, app.input_cursor);
    let skip_cols = (caret_col + 1).saturating_sub(width);

    let line = if app.input.is_empty() {
        Line::from(Span::styled(
            PLACEHOLDER,
            Style::default().fg(app.theme.dim).bg(app.theme.surface),
        ))
    } else {
        Line::from(Span::styled(
            skip_columns(&app.input, skip_cols),
            Style::default().fg(app.theme.text_bright).bg(app.theme.surface),
        ))
    };
    frame.render_widget(Paragraph::new(line).block(block), field_area);
    app.hit_regions.push((field_area, HitTarget::Input));

    if focused && app.alert.is_none() && inner.width > 0 && inner.height > 0 {
        let x = inner.x + (caret_col - skip_cols).min(width.saturating_sub(1)) as u16;
        frame.set_cursor_position(Position::new(x, inner.y));
    }

    // Button sits on the field's text row
    let button_area = Rect::new(
        chunks[2].x,
        area.y + area.height.min(3) / 2,
        chunks[2].width,
        1u16.min(area.height),
    );
    let button = Paragraph::new(Span::styled(
        ADD_BUTTON,
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(button, button_area);
    app.hit_regions.push((button_area, HitTarget::AddButton));
}

/// Drop leading graphemes until at least `cols` cells are skipped
fn skip_columns(s: &str, cols: usize) -> &str {
    if cols == 0 {
        return s;
    }
    let mut skipped = 0;
    for (i, g) in s.grapheme_indices(true) {
        if skipped >= cols {
            return &s[i..];
        }
        skipped += display_width(g);
    }
    ""
}

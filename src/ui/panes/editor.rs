//! Formula editor rendering

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the input of the selected cell.
///
/// While editing, `text` is the edit buffer and the terminal cursor is placed
/// after its last character.
pub fn render_editor_pane(
    frame: &mut Frame,
    area: Rect,
    cursor: (usize, usize),
    text: &str,
    is_editing: bool,
) {
    let (title, border_style) = if is_editing {
        (
            format!(" Editing [{}, {}] ", cursor.0, cursor.1),
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            format!(" Input [{}, {}] ", cursor.0, cursor.1),
            Style::default().fg(DEFAULT_THEME.border_normal),
        )
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);

    let lines: Vec<Line> = if text.is_empty() && !is_editing {
        vec![Line::styled(
            "(empty, press Enter to edit)",
            Style::default().fg(DEFAULT_THEME.comment),
        )]
    } else {
        text.split('\n')
            .map(|line| Line::styled(line.to_string(), Style::default().fg(DEFAULT_THEME.fg)))
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);

    if is_editing && inner.width > 0 && inner.height > 0 {
        let last = text.rsplit('\n').next().unwrap_or("");
        let line_count = text.split('\n').count();
        let x = inner.x + (last.chars().count() as u16).min(inner.width - 1);
        let y = inner.y + (line_count.saturating_sub(1) as u16).min(inner.height - 1);
        frame.set_cursor_position(Position::new(x, y));
    }
}

//! Selected-cell display: evaluated value and canonical formula

use crate::session::CellState;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

pub fn render_display_pane(
    frame: &mut Frame,
    area: Rect,
    state: &CellState,
    canonical: Option<&str>,
) {
    let block = Block::default()
        .title(" Cell ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 0, 0, 0));

    let label = Style::default()
        .fg(DEFAULT_THEME.comment)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![match state {
        CellState::Empty => Line::from(vec![
            Span::styled("Value  ", label),
            Span::styled("(empty)", Style::default().fg(DEFAULT_THEME.comment)),
        ]),
        CellState::Value(value) => Line::from(vec![
            Span::styled("Value  ", label),
            Span::styled(value.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
            Span::styled(
                format!("  {}", value.kind()),
                Style::default().fg(DEFAULT_THEME.primary),
            ),
        ]),
        CellState::Error(message) => Line::from(vec![
            Span::styled("Error  ", label),
            Span::styled(message.clone(), Style::default().fg(DEFAULT_THEME.error)),
        ]),
    }];

    if let Some(canonical) = canonical {
        lines.push(Line::styled("Canonical", label));
        lines.extend(canonical.split('\n').map(|line| {
            Line::styled(
                format!("  {}", line),
                Style::default().fg(DEFAULT_THEME.secondary),
            )
        }));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

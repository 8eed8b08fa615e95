//! Status bar rendering with keybindings and mode indicator

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the status bar at the bottom.
///
/// `is_error` colors the message when the last commit left the cell in error.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    is_editing: bool,
    is_error: bool,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Left side: mode and status message
    let (mode_text, mode_color) = if is_editing {
        (" EDIT ", DEFAULT_THEME.secondary)
    } else {
        (" NAV ", DEFAULT_THEME.primary)
    };

    let left_spans = vec![
        Span::styled(
            mode_text,
            Style::default()
                .bg(if is_error { DEFAULT_THEME.error } else { mode_color })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(if is_error {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.fg
                }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let bindings: &[(&str, &str)] = if is_editing {
        &[
            (" ↵ ", " commit "),
            (" alt+↵ ", " newline "),
            (" ⌫ ", " delete "),
            (" esc ", " cancel "),
        ]
    } else {
        &[
            (" ←↑↓→ ", " move "),
            (" ↵ ", " edit "),
            (" del ", " clear "),
            (" tab ", " focus "),
            (" q ", " quit "),
        ]
    };

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in bindings.iter().enumerate() {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(*key, key_style));
        right_spans.push(Span::styled(*desc, desc_style));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}

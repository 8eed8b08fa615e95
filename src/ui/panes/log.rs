//! Error/debug log pane rendering

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the session log
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    entries: &[String],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Log ({}) ", entries.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if entries.is_empty() {
        let paragraph = Paragraph::new("(no errors)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
    } else {
        let block = block.padding(Padding::new(1, 0, 0, 0));
        let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

        // Clamp scroll offset only if content exceeds visible area
        if entries.len() > visible_height {
            *scroll_offset = (*scroll_offset).min(entries.len() - visible_height);
        } else {
            *scroll_offset = 0;
        }

        let items: Vec<ListItem> = entries
            .iter()
            .skip(*scroll_offset)
            .take(visible_height)
            .map(|entry| ListItem::new(entry.as_str()).style(Style::default().fg(DEFAULT_THEME.error)))
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}

//! Sheet grid rendering with row/column headers and the cell cursor

use crate::session::{CellState, Session};
use crate::sheet::Value;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Characters shown per cell
pub const CELL_WIDTH: usize = 10;

const ROW_HEADER_WIDTH: usize = 5;

/// First visible row and column of the grid pane
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridScrollState {
    pub row_offset: usize,
    pub col_offset: usize,
}

/// Render the sheet, scrolling so the cursor stays visible
pub fn render_grid_pane(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    cursor: (usize, usize),
    is_focused: bool,
    scroll: &mut GridScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Sheet {} × {} ", session.rows(), session.cols()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    // One line goes to the column header
    let visible_rows = (inner.height as usize).saturating_sub(1).max(1);
    let visible_cols = ((inner.width as usize).saturating_sub(ROW_HEADER_WIDTH) / (CELL_WIDTH + 1)).max(1);

    scroll.row_offset = keep_visible(scroll.row_offset, cursor.0, visible_rows);
    scroll.col_offset = keep_visible(scroll.col_offset, cursor.1, visible_cols);

    let row_end = (scroll.row_offset + visible_rows).min(session.rows());
    let col_end = (scroll.col_offset + visible_cols).min(session.cols());

    let header_style = Style::default()
        .fg(DEFAULT_THEME.header)
        .add_modifier(Modifier::BOLD);

    let mut header = vec![Span::raw(" ".repeat(ROW_HEADER_WIDTH))];
    for col in scroll.col_offset..col_end {
        let style = if col == cursor.1 {
            header_style.add_modifier(Modifier::UNDERLINED)
        } else {
            header_style
        };
        header.push(Span::styled(format!("{:^width$} ", col, width = CELL_WIDTH), style));
    }

    let mut lines = vec![Line::from(header)];
    for row in scroll.row_offset..row_end {
        let style = if row == cursor.0 {
            header_style.add_modifier(Modifier::UNDERLINED)
        } else {
            header_style
        };
        let mut spans = vec![Span::styled(
            format!("{:>width$} ", row, width = ROW_HEADER_WIDTH - 1),
            style,
        )];

        for col in scroll.col_offset..col_end {
            let state = session.state(row, col);
            let mut style = cell_style(state);
            if (row, col) == cursor {
                style = style.bg(DEFAULT_THEME.cursor_bg).add_modifier(Modifier::BOLD);
            }
            spans.push(Span::styled(format_cell(state), style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Move `offset` the least amount that keeps `cursor` inside a window of `visible` items
pub fn keep_visible(offset: usize, cursor: usize, visible: usize) -> usize {
    if cursor < offset {
        cursor
    } else if cursor >= offset + visible {
        cursor + 1 - visible
    } else {
        offset
    }
}

/// Fixed-width cell text: numbers right-aligned, everything else left-aligned
pub fn format_cell(state: &CellState) -> String {
    let (text, right_align) = match state {
        CellState::Empty => (String::new(), false),
        CellState::Value(value) => (value.to_string(), value.is_numeric()),
        CellState::Error(_) => ("ERR".to_string(), false),
    };

    let text = truncate(&text, CELL_WIDTH);
    if right_align {
        format!("{:>width$}", text, width = CELL_WIDTH)
    } else {
        format!("{:<width$}", text, width = CELL_WIDTH)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(max_chars - 1).collect();
        truncated.push('…');
        truncated
    }
}

fn cell_style(state: &CellState) -> Style {
    let color = match state {
        CellState::Empty => DEFAULT_THEME.fg,
        CellState::Error(_) => DEFAULT_THEME.error,
        CellState::Value(Value::Integer(_) | Value::Float(_)) => DEFAULT_THEME.number,
        CellState::Value(Value::Boolean(_)) => DEFAULT_THEME.boolean,
        CellState::Value(Value::String(_)) => DEFAULT_THEME.string,
        CellState::Value(Value::CellAddress { .. }) => DEFAULT_THEME.keyword,
    };
    Style::default().fg(color)
}

//! Main TUI application state and logic

use super::panes::{self, GridScrollState};
use crate::session::{CellState, Session};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Grid,
    Log,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Grid => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Grid,
        }
    }
}

/// Whether keys move the cursor or edit the selected cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Edit,
}

/// The main application state
pub struct App {
    pub session: Session,

    /// Selected cell
    pub cursor_row: usize,
    pub cursor_col: usize,

    pub mode: Mode,

    /// Text being edited; committed to the selected cell on Enter
    pub edit_buffer: String,

    pub focused_pane: FocusedPane,

    pub grid_scroll: GridScrollState,
    pub log_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the status message reports a failure
    pub status_is_error: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            cursor_row: 0,
            cursor_col: 0,
            mode: Mode::Navigate,
            edit_buffer: String::new(),
            focused_pane: FocusedPane::Grid,
            grid_scroll: GridScrollState::default(),
            log_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            status_is_error: false,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn cursor(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let is_editing = self.mode == Mode::Edit;

        let editor_text = if is_editing {
            self.edit_buffer.as_str()
        } else {
            self.session.input(self.cursor_row, self.cursor_col)
        };
        // Borders plus one line per formula line, capped
        let editor_height = (editor_text.split('\n').count() as u16 + 2).clamp(3, 8);

        // Editor on top, panes in the middle, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(editor_height),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(size);

        // Grid on the left, cell display and log on the right
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[1]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Min(0)])
            .split(columns[1]);

        panes::render_editor_pane(
            frame,
            main_chunks[0],
            self.cursor(),
            editor_text,
            is_editing,
        );

        panes::render_grid_pane(
            frame,
            columns[0],
            &self.session,
            self.cursor(),
            self.focused_pane == FocusedPane::Grid,
            &mut self.grid_scroll,
        );

        let canonical = self.session.canonical_form(self.cursor_row, self.cursor_col);
        panes::render_display_pane(
            frame,
            right_rows[0],
            self.session.state(self.cursor_row, self.cursor_col),
            canonical.as_deref(),
        );

        panes::render_log_pane(
            frame,
            right_rows[1],
            self.session.log(),
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[2],
            &self.status_message,
            is_editing,
            self.status_is_error,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Navigate => self.handle_navigate_key(key),
            Mode::Edit => self.handle_edit_key(key),
        }
    }

    fn handle_navigate_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Grid => self.move_cursor(-1, 0),
                FocusedPane::Log => self.log_scroll = self.log_scroll.saturating_sub(1),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Grid => self.move_cursor(1, 0),
                FocusedPane::Log => self.log_scroll = self.log_scroll.saturating_add(1),
            },
            KeyCode::Left if self.focused_pane == FocusedPane::Grid => self.move_cursor(0, -1),
            KeyCode::Right if self.focused_pane == FocusedPane::Grid => self.move_cursor(0, 1),
            KeyCode::Enter => {
                let current = self.session.input(self.cursor_row, self.cursor_col).to_string();
                self.start_edit(current);
            }
            KeyCode::Delete => {
                self.commit(String::new());
            }
            // Typing on a cell starts a fresh edit
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.start_edit(c.to_string());
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Navigate;
                self.edit_buffer.clear();
                self.set_status("Edit cancelled", false);
            }
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                self.edit_buffer.push('\n');
            }
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.edit_buffer);
                self.mode = Mode::Navigate;
                self.commit(input);
            }
            KeyCode::Backspace => {
                self.edit_buffer.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit_buffer.push(c);
            }
            _ => {}
        }
    }

    fn start_edit(&mut self, initial: String) {
        self.focused_pane = FocusedPane::Grid;
        self.mode = Mode::Edit;
        self.edit_buffer = initial;
        let status = format!("Editing [{}, {}]", self.cursor_row, self.cursor_col);
        self.set_status(status, false);
    }

    /// Move the cursor, clamped to the sheet
    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let max_row = self.session.rows().saturating_sub(1);
        let max_col = self.session.cols().saturating_sub(1);
        self.cursor_row = self.cursor_row.saturating_add_signed(d_row).min(max_row);
        self.cursor_col = self.cursor_col.saturating_add_signed(d_col).min(max_col);
    }

    /// Store input for the selected cell and report the result
    fn commit(&mut self, input: String) {
        let (row, col) = self.cursor();
        let logged = self.session.logged();

        let (message, is_error) = match self.session.commit(row, col, &input) {
            Ok(CellState::Empty) => (format!("Cleared [{}, {}]", row, col), false),
            Ok(CellState::Value(value)) => (format!("[{}, {}] = {}", row, col, value), false),
            Ok(CellState::Error(message)) => {
                (format!("Error in [{}, {}]: {}", row, col, message), true)
            }
            Err(err) => (err.to_string(), true),
        };
        self.set_status(message, is_error);

        // Follow new log entries
        if self.session.logged() > logged {
            self.log_scroll = usize::MAX;
        }
    }

    fn set_status(&mut self, message: impl Into<String>, is_error: bool) {
        self.status_message = message.into();
        self.status_is_error = is_error;
    }
}

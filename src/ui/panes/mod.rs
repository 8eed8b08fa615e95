//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility for maintainability.
//!
//! # Pane Modules
//!
//! - [`editor`]: Input of the selected cell, or the edit buffer while editing
//! - [`display`]: Evaluated value, error and canonical formula of the selected cell
//! - [`grid`]: The sheet with row/column headers and the highlighted cursor
//! - [`log`]: Session error log
//! - [`status`]: Status bar with keybindings and the current mode
//!
//! # Architecture
//!
//! Each pane module exports a stateless `render_*()` function. Panes that
//! scroll take their offset as `&mut` state owned by the [`App`](super::App).

pub mod display;
pub mod editor;
pub mod grid;
pub mod log;
pub mod status;

// Re-export render functions for convenience
pub use display::render_display_pane;
pub use editor::render_editor_pane;
pub use grid::{render_grid_pane, GridScrollState};
pub use log::render_log_pane;
pub use status::render_status_bar;

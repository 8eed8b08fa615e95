// Limits shared by the parser, the evaluator and the session

/// Default bound on block and expression nesting, for parsing and evaluation
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Remaining stack below which recursion moves onto a fresh segment
pub const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each stack segment allocated by `stacker::maybe_grow`
pub const STACK_GROW_SIZE: usize = 4 * 1024 * 1024;

/// Error log entries kept by a session; older entries are dropped first
pub const MAX_LOG_ENTRIES: usize = 500;

/// Default sheet dimensions for a new session
pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 10;

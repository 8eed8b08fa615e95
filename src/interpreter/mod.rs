//! Formula evaluation engine
//!
//! This module provides the tree-walking evaluator:
//! - [`engine`]: the [`Evaluator`] and the [`evaluate`] entry point
//! - [`errors`]: evaluation error types
//!
//! # Execution Model
//!
//! The evaluator walks the AST recursively against a mutable
//! [`Runtime`](crate::sheet::Runtime). Every node yields an
//! [`Outcome`](crate::sheet::Outcome): a value, or `Unit` for statements that
//! produce none. Nesting depth is bounded so deep trees fail with an error
//! instead of exhausting the native stack.
//!
//! # Statistics
//!
//! `sum`, `mean`, `min` and `max` are implemented in [`builtins`] rather than as
//! user-callable functions; the formula language has no function definitions.

pub mod builtins;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod expressions;
pub mod loops;
pub mod ops;
pub mod statements;

pub use engine::{evaluate, Evaluator};
pub use errors::{EvalError, Side};

//! Sheet state shared by formula evaluation
//!
//! - [`value`]: tagged runtime values and the [`value::Outcome`] of an evaluation
//! - [`grid`]: fixed-size square store of optional cell values
//! - [`runtime`]: a grid paired with the flat variable namespace
//!
//! Grid coordinates are validated on every access: reads outside the grid see
//! an empty cell and writes outside it are logged and ignored.

pub mod grid;
pub mod runtime;
pub mod value;

pub use grid::Grid;
pub use runtime::Runtime;
pub use value::{Outcome, Value, ValueKind};

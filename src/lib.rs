//! # Introduction
//!
//! cellscript is a small formula language for spreadsheets. A formula is
//! lexed, parsed into an AST and evaluated against a square grid of cells and
//! a table of variables. A terminal UI built with
//! [ratatui](https://docs.rs/ratatui) lets the user edit a sheet of cells and
//! watches every formula recompute on each change.
//!
//! ## Evaluation pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Evaluator → Grid / Variables → TUI
//!                            └──→ Serializer (canonical text)
//! ```
//!
//! 1. [`parser`]: tokenises formula text and builds an [`parser::ast::AstNode`] tree.
//! 2. [`interpreter`]: walks the tree against a [`sheet::Runtime`] and produces
//!    an [`sheet::Outcome`].
//! 3. [`sheet`]: the value model, the [`sheet::Grid`] of cells and the runtime
//!    that pairs the grid with the variable table.
//! 4. [`serializer`]: prints a tree back as fully parenthesized canonical text.
//! 5. [`session`]: cell inputs, row-major recomputation and the error log.
//! 6. [`config`]: command-line flags and session settings.
//! 7. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use cellscript::interpreter::evaluate;
//! use cellscript::parser::parse_formula;
//! use cellscript::sheet::{Runtime, Value};
//!
//! let mut runtime = Runtime::with_size(4);
//! runtime.grid_mut().write(0, 0, Value::Integer(20));
//!
//! let ast = parse_formula("x -> #[0, 0] + 1\nx * 2").unwrap();
//! let outcome = evaluate(&ast, &mut runtime).unwrap();
//! assert_eq!(outcome.into_value(), Some(Value::Integer(42)));
//! ```

pub mod config;
pub mod interpreter;
pub mod parser;
pub mod serializer;
pub mod session;
pub mod sheet;
pub mod ui;

//! Formula parser
//!
//! This module transforms formula text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: The [`Parser`] struct, its helpers and the error type
//! - [`ast`]: AST node definitions
//!
//! `expressions` and `statements` extend [`Parser`] with the grammar rules.
//!
//! # Grammar
//!
//! A formula is a block of statements separated by line breaks. Statements
//! are assignments (`x -> expr`), conditionals (`if` / `else` / `end`),
//! `for` loops over a rectangle of cells, and bare expressions. Expressions
//! have eight precedence levels, loosest first:
//!
//! 1. `&&` `||`
//! 2. `==` `!=` `<` `<=` `>` `>=`
//! 3. `+` `-`
//! 4. `*` `/` `%` `**`
//! 5. `&` `|` `^` `<<` `>>`
//! 6. unary `!` `-` `~`
//! 7. `float(..)` `int(..)`
//! 8. literals, variables, `( )`, cell reads `#[r, c]`, cell addresses
//!    `[r, c]` and the statistics `sum` `mean` `min` `max`
//!
//! All binary levels are left-associative.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use lexer::{lex, Token, TokenKind};
pub use parse::{parse, parse_formula, ParseError, Parser};

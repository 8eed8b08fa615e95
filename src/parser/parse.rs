//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, token helpers, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: blocks, conditionals, `for` loops and assignments
//! - `expressions`: the eight precedence levels of the expression grammar
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::interpreter::constants::{DEFAULT_MAX_DEPTH, STACK_GROW_SIZE, STACK_RED_ZONE};
use crate::parser::ast::*;
use crate::parser::lexer::{lex, Token, TokenKind};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    /// Byte offset of the offending token (input length at end of input)
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error at index {}: {}", self.position, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Parse a token list into a top-level [`AstNode::Block`].
pub fn parse(tokens: Vec<Token>) -> Result<AstNode, ParseError> {
    Parser::new(tokens).parse_program()
}

/// Lex and parse formula text (without the leading `=` marker).
pub fn parse_formula(source: &str) -> Result<AstNode, ParseError> {
    parse(lex(source))
}

/// Recursive descent parser for the formula language
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) depth: usize,
    pub(crate) max_depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Bound the nesting depth of blocks and expressions
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the entire token list as one block
    pub fn parse_program(&mut self) -> Result<AstNode, ParseError> {
        let program = self.parse_block()?;

        // A block stops at 'end'/'else'; at top level those are stray
        if !self.is_at_end() {
            return Err(ParseError::new(
                format!("Unexpected {}", self.describe_current()),
                self.current_position(),
            ));
        }

        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Consume the current token if it has the given kind
    pub(crate) fn match_token(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            self.advance()
        } else {
            None
        }
    }

    /// Byte offset used for errors at the current position
    pub(crate) fn current_position(&self) -> usize {
        match self.peek() {
            Some(token) => token.span.start,
            None => self.tokens.last().map(|t| t.span.end).unwrap_or(0),
        }
    }

    /// Describe the current token for error messages
    pub(crate) fn describe_current(&self) -> String {
        match self.peek() {
            Some(token) => token.to_string(),
            None => "end of input".to_string(),
        }
    }

    pub(crate) fn error_here(&self, message: &str) -> ParseError {
        ParseError::new(
            format!("{}, found {}", message, self.describe_current()),
            self.current_position(),
        )
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<Token, ParseError> {
        match self.match_token(kind) {
            Some(token) => Ok(token),
            None => Err(self.error_here(message)),
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::LParen, &format!("Expected '(' {ctx}"))
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::RParen, &format!("Expected ')' {ctx}"))
    }

    pub(crate) fn expect_comma(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Comma, &format!("Expected ',' {ctx}"))
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Identifier, &format!("Expected identifier {ctx}"))
    }

    /// Consume an integer literal token and return its value
    pub(crate) fn expect_integer(&mut self, ctx: &str) -> Result<i64, ParseError> {
        let token = self.expect_token(TokenKind::Integer, &format!("Expected integer {ctx}"))?;
        Self::integer_value(&token)
    }

    pub(crate) fn integer_value(token: &Token) -> Result<i64, ParseError> {
        token.text.parse::<i64>().map_err(|_| {
            ParseError::new(
                format!("Integer literal {} is out of range", token.text),
                token.span.start,
            )
        })
    }

    /// Track one level of nesting; paired with [`Parser::leave`]
    pub(crate) fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::new(
                format!("Formula nesting exceeds the limit of {}", self.max_depth),
                self.current_position(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Run a recursive parse one nesting level deeper, growing the native
    /// stack when it runs low
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.enter()?;
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || parse(self));
        self.leave();
        result
    }
}

//! Statement parsing implementation
//!
//! This module handles parsing of blocks and the statements they contain:
//!
//! - Conditionals: `if cond ... [else ...] end`
//! - Bounded loops: `for v in [r, c]..[r, c] do ... end`
//! - Assignments: `name -> expression`
//! - Bare expressions
//!
//! # Grammar
//!
//! ```text
//! block       ::= { linebreak } [ statement { linebreak+ statement } ] { linebreak }
//! statement   ::= conditional | for_loop | assignment | expression
//! conditional ::= 'if' expression linebreak block [ 'else' linebreak block ] 'end'
//! for_loop    ::= 'for' identifier 'in' coord '..' coord ( 'do' | linebreak ) block 'end'
//! coord       ::= '[' integer ',' integer ']'
//! assignment  ::= identifier '->' expression
//! ```
//!
//! A block ends at `end`, `else` or the end of input.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse statements up to a block terminator (not consumed)
    pub(crate) fn parse_block(&mut self) -> Result<AstNode, ParseError> {
        self.nested(Self::parse_statements)
    }

    fn parse_statements(&mut self) -> Result<AstNode, ParseError> {
        let mut statements = Vec::new();

        loop {
            while self.match_token(TokenKind::LineBreak).is_some() {}

            if matches!(
                self.peek_kind(),
                None | Some(TokenKind::End) | Some(TokenKind::Else)
            ) {
                break;
            }

            statements.push(self.parse_statement()?);

            if !matches!(
                self.peek_kind(),
                None | Some(TokenKind::LineBreak) | Some(TokenKind::End) | Some(TokenKind::Else)
            ) {
                return Err(self.error_here("Expected a line break after statement"));
            }
        }

        Ok(AstNode::Block { statements })
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::If) => self.parse_conditional(),
            Some(TokenKind::For) => self.parse_for_loop(),
            Some(TokenKind::Identifier)
                if self
                    .peek_ahead(1)
                    .is_some_and(|t| t.kind == TokenKind::Arrow) =>
            {
                self.parse_assignment()
            }
            _ => self.parse_expression(),
        }
    }

    /// Parse `name -> expression`
    fn parse_assignment(&mut self) -> Result<AstNode, ParseError> {
        let name = self.expect_identifier("for assignment")?;
        let arrow = self.expect_token(TokenKind::Arrow, "Expected '->' in assignment")?;
        let value = self.parse_expression()?;

        let end = value.span().unwrap_or(arrow.span);
        Ok(AstNode::Assignment {
            name: name.text,
            value: Box::new(value),
            span: Some(name.span.to(end)),
        })
    }

    /// Parse `if cond <lb> block [else <lb> block] end`
    fn parse_conditional(&mut self) -> Result<AstNode, ParseError> {
        let if_token = self.expect_token(TokenKind::If, "Expected 'if' at the start of a conditional")?;

        let condition = self.parse_expression()?;
        self.expect_token(
            TokenKind::LineBreak,
            "Expected a line break after the condition",
        )?;

        let then_block = self.parse_block()?;

        let else_block = if self.match_token(TokenKind::Else).is_some() {
            self.expect_token(TokenKind::LineBreak, "Expected a line break after 'else'")?;
            Some(Box::new(self.parse_block()?))
        } else {
            None
        };

        let end = self.expect_token(TokenKind::End, "Expected 'end' to close the conditional")?;

        Ok(AstNode::Conditional {
            condition: Box::new(condition),
            then_block: Box::new(then_block),
            else_block,
            span: Some(if_token.span.to(end.span)),
        })
    }

    /// Parse `for v in [r, c]..[r, c] (do | <lb>) block end`
    fn parse_for_loop(&mut self) -> Result<AstNode, ParseError> {
        let for_token = self.expect_token(TokenKind::For, "Expected 'for'")?;
        let iterator = self.expect_identifier("after 'for'")?;
        self.expect_token(TokenKind::In, "Expected 'in' after the loop variable")?;

        let start = self.parse_coord("for the loop start")?;
        self.expect_token(TokenKind::DotDot, "Expected '..' between loop bounds")?;
        let end = self.parse_coord("for the loop end")?;

        if self.match_token(TokenKind::Do).is_none()
            && self.match_token(TokenKind::LineBreak).is_none()
        {
            return Err(self.error_here("Expected 'do' or a line break in 'for' loop"));
        }

        let body = self.parse_block()?;
        let end_token = self.expect_token(TokenKind::End, "Expected 'end' to close the 'for' loop")?;

        Ok(AstNode::ForLoop {
            iterator: iterator.text,
            start,
            end,
            body: Box::new(body),
            span: Some(for_token.span.to(end_token.span)),
        })
    }

    /// Parse a literal `[row, col]` loop bound
    fn parse_coord(&mut self, ctx: &str) -> Result<CellCoord, ParseError> {
        self.expect_token(TokenKind::LBracket, &format!("Expected '[' {ctx}"))?;
        let row = self.expect_integer(ctx)?;
        self.expect_comma(ctx)?;
        let col = self.expect_integer(ctx)?;
        self.expect_token(TokenKind::RBracket, &format!("Expected ']' {ctx}"))?;
        Ok(CellCoord::new(row, col))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::parse_formula;

    fn statements(source: &str) -> Vec<AstNode> {
        match parse_formula(source).unwrap() {
            AstNode::Block { statements } => statements,
            other => panic!("Expected block, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_assignment() {
        let stmts = statements("test -> 3 + 2 - 1");
        match &stmts[0] {
            AstNode::Assignment { name, value, .. } => {
                assert_eq!(name, "test");
                assert!(matches!(**value, AstNode::BinaryOp { op: BinOp::Sub, .. }));
            }
            other => panic!("Expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_multiple_statements() {
        let stmts = statements("1 + 2 \n 2 + 3\\n x");
        assert_eq!(stmts.len(), 3);
    }

    #[test]
    fn test_statements_need_separator() {
        let err = parse_formula("1 2").unwrap_err();
        assert!(err.message.contains("line break"));
        assert_eq!(err.position, 2);
    }

    #[test]
    fn test_parse_conditional_with_else() {
        let stmts = statements("if true \n result -> 10 \n else \n result -> 5 \n end");
        match &stmts[0] {
            AstNode::Conditional {
                then_block,
                else_block,
                ..
            } => {
                assert!(matches!(**then_block, AstNode::Block { ref statements } if statements.len() == 1));
                assert!(else_block.is_some());
            }
            other => panic!("Expected conditional, got {:?}", other),
        }
    }

    #[test]
    fn test_conditional_requires_line_break() {
        let err = parse_formula("if true x -> 1 end").unwrap_err();
        assert!(err.message.contains("line break after the condition"));

        let err = parse_formula("if true \n 1 \n else 2 \n end").unwrap_err();
        assert!(err.message.contains("after 'else'"));

        let err = parse_formula("if true \n 1").unwrap_err();
        assert!(err.message.contains("'end'"));
    }

    #[test]
    fn test_parse_for_loop() {
        let stmts = statements("for value in [0,0]..[2,3] do \n total -> value \n end");
        match &stmts[0] {
            AstNode::ForLoop {
                iterator,
                start,
                end,
                body,
                ..
            } => {
                assert_eq!(iterator, "value");
                assert_eq!(*start, CellCoord::new(0, 0));
                assert_eq!(*end, CellCoord::new(2, 3));
                assert!(matches!(**body, AstNode::Block { ref statements } if statements.len() == 1));
            }
            other => panic!("Expected for loop, got {:?}", other),
        }

        // A line break may replace 'do'
        assert_eq!(statements("for v in [0,0]..[0,1]\nv\nend").len(), 1);
    }

    #[test]
    fn test_for_loop_bounds_are_literals() {
        let err = parse_formula("for v in [x,0]..[0,1] do \n v \n end").unwrap_err();
        assert!(err.message.contains("Expected integer"));

        let err = parse_formula("for v in [0,0]..[0,1] v end").unwrap_err();
        assert!(err.message.contains("'do'"));
    }

    #[test]
    fn test_nested_blocks() {
        let source = "for v in [0,0]..[0,1] do\n if v > 1\n x -> v\n end\nend";
        let stmts = statements(source);
        assert!(matches!(stmts[0], AstNode::ForLoop { .. }));
    }
}

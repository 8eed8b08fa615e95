//! Expression parsing implementation
//!
//! This module handles parsing of formula expressions using one method per
//! precedence level, lowest first:
//!
//! 1. logical `&&` `||`
//! 2. equality and relational `==` `!=` `<` `<=` `>` `>=`
//! 3. additive `+` `-`
//! 4. multiplicative `*` `/` `%` `**` (exponentiation shares this level)
//! 5. bitwise `&` `|` `^` `<<` `>>`
//! 6. prefix `!` `-` `~`
//! 7. casts `float(...)` and `int(...)`
//! 8. primaries: parentheses, `#[r, c]`, `[r, c]`, statistics calls,
//!    literals and variable references
//!
//! Binary levels are left-associative; prefix operators nest by recursion.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{Token, TokenKind};
use crate::parser::parse::{ParseError, Parser};

const LOGICAL: &[(TokenKind, BinOp)] = &[(TokenKind::AndAnd, BinOp::And), (TokenKind::OrOr, BinOp::Or)];

const COMPARISON: &[(TokenKind, BinOp)] = &[
    (TokenKind::EqEq, BinOp::Eq),
    (TokenKind::NotEq, BinOp::Ne),
    (TokenKind::Lt, BinOp::Lt),
    (TokenKind::Le, BinOp::Le),
    (TokenKind::Gt, BinOp::Gt),
    (TokenKind::Ge, BinOp::Ge),
];

const ADDITIVE: &[(TokenKind, BinOp)] = &[(TokenKind::Plus, BinOp::Add), (TokenKind::Minus, BinOp::Sub)];

const MULTIPLICATIVE: &[(TokenKind, BinOp)] = &[
    (TokenKind::Star, BinOp::Mul),
    (TokenKind::Slash, BinOp::Div),
    (TokenKind::Percent, BinOp::Mod),
    (TokenKind::StarStar, BinOp::Pow),
];

const BITWISE: &[(TokenKind, BinOp)] = &[
    (TokenKind::Amp, BinOp::BitAnd),
    (TokenKind::Pipe, BinOp::BitOr),
    (TokenKind::Caret, BinOp::BitXor),
    (TokenKind::LtLt, BinOp::BitShl),
    (TokenKind::GtGt, BinOp::BitShr),
];

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.nested(Self::parse_logical)
    }

    /// Parse logical AND / OR (level 1)
    fn parse_logical(&mut self) -> Result<AstNode, ParseError> {
        self.parse_left_assoc(LOGICAL, Self::parse_comparison)
    }

    /// Parse equality and relational operators (level 2)
    fn parse_comparison(&mut self) -> Result<AstNode, ParseError> {
        self.parse_left_assoc(COMPARISON, Self::parse_additive)
    }

    /// Parse addition and subtraction (level 3)
    fn parse_additive(&mut self) -> Result<AstNode, ParseError> {
        self.parse_left_assoc(ADDITIVE, Self::parse_multiplicative)
    }

    /// Parse multiplication, division, modulo and exponentiation (level 4)
    fn parse_multiplicative(&mut self) -> Result<AstNode, ParseError> {
        self.parse_left_assoc(MULTIPLICATIVE, Self::parse_bitwise)
    }

    /// Parse bitwise operators and shifts (level 5)
    fn parse_bitwise(&mut self) -> Result<AstNode, ParseError> {
        self.parse_left_assoc(BITWISE, Self::parse_unary)
    }

    /// Shared loop for the left-associative binary levels
    fn parse_left_assoc(
        &mut self,
        operators: &[(TokenKind, BinOp)],
        operand: fn(&mut Self) -> Result<AstNode, ParseError>,
    ) -> Result<AstNode, ParseError> {
        let mut left = operand(self)?;
        // Each chained operator deepens the left-leaning tree by one level
        let mut chained = 0;

        loop {
            let Some(kind) = self.peek_kind() else {
                break;
            };
            let Some(&(_, op)) = operators.iter().find(|(k, _)| *k == kind) else {
                break;
            };
            let op_token = self.advance().map(|t| t.span);
            self.enter()?;
            chained += 1;

            let right = operand(self)?;
            left = Self::binary_node(op, left, right, op_token);
        }

        for _ in 0..chained {
            self.leave();
        }
        Ok(left)
    }

    /// Parse prefix `!`, `-` and `~` (level 6)
    pub(crate) fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        let op = match self.peek_kind() {
            Some(TokenKind::Bang) => UnOp::Not,
            Some(TokenKind::Minus) => UnOp::Neg,
            Some(TokenKind::Tilde) => UnOp::BitNot,
            _ => return self.parse_cast(),
        };
        let op_span = self.advance().map(|t| t.span);

        let operand = self.nested(Self::parse_unary)?;

        let span = match (op_span, operand.span()) {
            (Some(start), Some(end)) => Some(start.to(end)),
            (start, _) => start,
        };
        Ok(AstNode::UnaryOp {
            op,
            operand: Box::new(operand),
            span,
        })
    }

    /// Parse `float(expr)` and `int(expr)` (level 7)
    fn parse_cast(&mut self) -> Result<AstNode, ParseError> {
        let (op, name) = match self.peek_kind() {
            Some(TokenKind::FloatCast) => (UnOp::IntToFloat, "float"),
            Some(TokenKind::IntCast) => (UnOp::FloatToInt, "int"),
            _ => return self.parse_primary(),
        };
        let keyword = self.advance().map(|t| t.span);

        self.expect_lparen(&format!("after '{name}'"))?;
        let operand = self.parse_expression()?;
        let close = self.expect_rparen(&format!("after {name} argument"))?;

        Ok(AstNode::UnaryOp {
            op,
            operand: Box::new(operand),
            span: keyword.map(|span| span.to(close.span)),
        })
    }

    /// Parse primaries (level 8)
    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let Some(kind) = self.peek_kind() else {
            return Err(self.error_here("Expected expression"));
        };

        match kind {
            // Operands may continue on the next line
            TokenKind::LineBreak => {
                while self.match_token(TokenKind::LineBreak).is_some() {}
                self.parse_unary()
            }

            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("to close the parenthesized expression")?;
                Ok(expr)
            }

            TokenKind::HashBracket => self.parse_cell_pair(BinOp::RValue, "cell read"),
            TokenKind::LBracket => self.parse_cell_pair(BinOp::LValue, "cell address"),

            TokenKind::Sum | TokenKind::Mean | TokenKind::Min | TokenKind::Max => {
                self.parse_statistic(kind)
            }

            TokenKind::Integer => {
                let token = self.advance_token()?;
                let value = Self::integer_value(&token)?;
                Ok(AstNode::Integer(value, Some(token.span)))
            }

            TokenKind::Float => {
                let token = self.advance_token()?;
                let value = token
                    .text
                    .parse::<f64>()
                    .ok()
                    .filter(|x| x.is_finite())
                    .ok_or_else(|| {
                        ParseError::new(
                            format!("Float literal {} is out of range", token.text),
                            token.span.start,
                        )
                    })?;
                Ok(AstNode::Float(value, Some(token.span)))
            }

            TokenKind::True | TokenKind::False => {
                let token = self.advance_token()?;
                Ok(AstNode::Boolean(kind == TokenKind::True, Some(token.span)))
            }

            TokenKind::Identifier => {
                let token = self.advance_token()?;
                Ok(AstNode::Reference {
                    name: token.text,
                    span: Some(token.span),
                })
            }

            _ => Err(self.error_here("Expected expression")),
        }
    }

    /// Parse `#[a, b]` or `[a, b]`; the opening token is current
    fn parse_cell_pair(&mut self, op: BinOp, ctx: &str) -> Result<AstNode, ParseError> {
        let open = self.advance_token()?;
        let row = self.parse_expression()?;
        self.expect_comma(&format!("between {ctx} row and column"))?;
        let col = self.parse_expression()?;
        let close = self.expect_token(TokenKind::RBracket, &format!("Expected closing ']' for {ctx}"))?;

        Ok(AstNode::BinaryOp {
            op,
            left: Box::new(row),
            right: Box::new(col),
            span: Some(open.span.to(close.span)),
        })
    }

    /// Parse `sum|mean|min|max(a, b)`
    fn parse_statistic(&mut self, kind: TokenKind) -> Result<AstNode, ParseError> {
        let op = match kind {
            TokenKind::Sum => BinOp::Sum,
            TokenKind::Mean => BinOp::Mean,
            TokenKind::Min => BinOp::Min,
            _ => BinOp::Max,
        };
        let name = self.advance_token()?;

        self.expect_lparen(&format!("after '{}'", name.text))?;
        let first = self.parse_expression()?;
        self.expect_comma(&format!("between {} arguments", name.text))?;
        let second = self.parse_expression()?;
        let close = self.expect_rparen(&format!("for {} function", name.text))?;

        Ok(AstNode::BinaryOp {
            op,
            left: Box::new(first),
            right: Box::new(second),
            span: Some(name.span.to(close.span)),
        })
    }

    fn advance_token(&mut self) -> Result<Token, ParseError> {
        match self.advance() {
            Some(token) => Ok(token),
            None => Err(self.error_here("Unexpected end of input")),
        }
    }

    fn binary_node(op: BinOp, left: AstNode, right: AstNode, op_span: Option<Span>) -> AstNode {
        let span = match (left.span(), right.span()) {
            (Some(start), Some(end)) => Some(start.to(end)),
            _ => op_span,
        };
        AstNode::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span,
        }
    }
}

//! Lexer (tokenizer) for formula text
//!
//! Converts raw formula text into a flat [`Token`] list consumed by the parser.
//! Lexing never fails: characters outside the language become
//! [`TokenKind::Invalid`] tokens and surface later as parse errors.

use super::ast::Span;
use std::fmt;

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Integer,
    Float,

    // Identifiers
    Identifier,

    // Keywords
    Sum,
    Mean,
    Min,
    Max,
    FloatCast,
    IntCast,
    True,
    False,
    If,
    Else,
    End,
    For,
    In,
    Each,
    Do,

    // Arithmetic
    Plus,     // +
    Minus,    // -
    Star,     // *
    StarStar, // **
    Slash,    // /
    Percent,  // %

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    // Logical
    AndAnd, // &&
    OrOr,   // ||
    Bang,   // !

    // Bitwise
    Amp,   // &
    Pipe,  // |
    Caret, // ^
    Tilde, // ~
    LtLt,  // <<
    GtGt,  // >>

    // Punctuation
    Arrow,       // ->
    DotDot,      // ..
    HashBracket, // #[
    LBracket,    // [
    RBracket,    // ]
    LParen,      // (
    RParen,      // )
    Comma,       // ,

    // Statement separator: newline or the two-character escape `\n`
    LineBreak,

    Invalid,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Integer => "integer literal",
            TokenKind::Float => "float literal",
            TokenKind::Identifier => "identifier",
            TokenKind::Sum => "'sum'",
            TokenKind::Mean => "'mean'",
            TokenKind::Min => "'min'",
            TokenKind::Max => "'max'",
            TokenKind::FloatCast => "'float'",
            TokenKind::IntCast => "'int'",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::End => "'end'",
            TokenKind::For => "'for'",
            TokenKind::In => "'in'",
            TokenKind::Each => "'each'",
            TokenKind::Do => "'do'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::StarStar => "'**'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Bang => "'!'",
            TokenKind::Amp => "'&'",
            TokenKind::Pipe => "'|'",
            TokenKind::Caret => "'^'",
            TokenKind::Tilde => "'~'",
            TokenKind::LtLt => "'<<'",
            TokenKind::GtGt => "'>>'",
            TokenKind::Arrow => "'->'",
            TokenKind::DotDot => "'..'",
            TokenKind::HashBracket => "'#['",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::LineBreak => "line break",
            TokenKind::Invalid => "invalid character",
        };
        f.write_str(text)
    }
}

/// A lexed token: its kind, the exact source slice and where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Integer | TokenKind::Float => {
                write!(f, "{} {}", self.kind, self.text)
            }
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Invalid => write!(f, "invalid character '{}'", self.text.escape_default()),
            _ => write!(f, "{}", self.kind),
        }
    }
}

/// Tokenize a whole formula.
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

/// Lexer for formula text
pub struct Lexer<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given formula text.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            if matches!(ch, ' ' | '\t' | '\r') {
                self.advance();
                continue;
            }
            tokens.push(self.next_token(ch));
        }

        tracing::trace!(count = tokens.len(), "formula tokenized");
        tokens
    }

    /// Lex one token starting at the current character
    fn next_token(&mut self, ch: char) -> Token {
        let start = self.position;
        self.advance();

        let kind = match ch {
            '0'..='9' => return self.number_literal(start),
            'a'..='z' | 'A'..='Z' => return self.identifier_or_keyword(start),

            '+' => TokenKind::Plus,
            '-' => self.pair('>', TokenKind::Arrow, TokenKind::Minus),
            '*' => self.pair('*', TokenKind::StarStar, TokenKind::Star),
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '&' => self.pair('&', TokenKind::AndAnd, TokenKind::Amp),
            '|' => self.pair('|', TokenKind::OrOr, TokenKind::Pipe),
            '^' => TokenKind::Caret,
            '~' => TokenKind::Tilde,
            '!' => self.pair('=', TokenKind::NotEq, TokenKind::Bang),
            // A lone '=' has no meaning inside a formula
            '=' => self.pair('=', TokenKind::EqEq, TokenKind::Invalid),
            '#' => self.pair('[', TokenKind::HashBracket, TokenKind::Invalid),
            '.' => self.pair('.', TokenKind::DotDot, TokenKind::Invalid),
            '\\' => self.pair('n', TokenKind::LineBreak, TokenKind::Invalid),
            '<' => {
                if self.match_char('=') {
                    TokenKind::Le
                } else if self.match_char('<') {
                    TokenKind::LtLt
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.match_char('=') {
                    TokenKind::Ge
                } else if self.match_char('>') {
                    TokenKind::GtGt
                } else {
                    TokenKind::Gt
                }
            }
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '\n' => TokenKind::LineBreak,
            _ => TokenKind::Invalid,
        };

        self.emit(kind, start)
    }

    /// Numeric literal: `digit+ ('.' digit+)?`
    fn number_literal(&mut self, start: usize) -> Token {
        self.skip_digits();

        let mut kind = TokenKind::Integer;
        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // '.'
            self.skip_digits();
            kind = TokenKind::Float;
        }

        self.emit(kind, start)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, start: usize) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.advance();
        }

        let kind = match self.slice(start) {
            "sum" => TokenKind::Sum,
            "mean" => TokenKind::Mean,
            "min" => TokenKind::Min,
            "max" => TokenKind::Max,
            "float" => TokenKind::FloatCast,
            "int" => TokenKind::IntCast,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "end" => TokenKind::End,
            "for" => TokenKind::For,
            "in" => TokenKind::In,
            "each" => TokenKind::Each,
            "do" => TokenKind::Do,
            _ => TokenKind::Identifier,
        };

        self.emit(kind, start)
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Two-character operator if `second` follows, otherwise the single form
    fn pair(&mut self, second: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.match_char(second) {
            matched
        } else {
            single
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn emit(&self, kind: TokenKind, start: usize) -> Token {
        let span = Span::new(self.offset(start), self.offset(self.position));
        Token::new(kind, self.slice(start), span)
    }

    /// Source text from character index `start` up to the current position
    fn slice(&self, start: usize) -> &'a str {
        &self.source[self.offset(start)..self.offset(self.position)]
    }

    /// Byte offset of a character index
    fn offset(&self, index: usize) -> usize {
        self.chars
            .get(index)
            .map(|(offset, _)| *offset)
            .unwrap_or(self.source.len())
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).map(|(_, c)| *c)
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.chars.get(self.position + n).map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }
}

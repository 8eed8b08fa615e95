// AST (Abstract Syntax Tree) definitions for the formula language

/// Byte range of a node or token in the formula text (`end` is exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A literal `[row, col]` corner used by `for` loop bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellCoord {
    pub row: i64,
    pub col: i64,
}

impl CellCoord {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    // Logical
    And,
    Or,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    BitShl,
    BitShr,
    // Cell access
    RValue, // #[row, col]
    LValue, // [row, col]
    // Statistics over a rectangle
    Max,
    Min,
    Mean,
    Sum,
}

impl BinOp {
    /// Source symbol for infix operators, function name for the statistics
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "**",
            BinOp::And => "&&",
            BinOp::Or => "||",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::BitAnd => "&",
            BinOp::BitOr => "|",
            BinOp::BitXor => "^",
            BinOp::BitShl => "<<",
            BinOp::BitShr => ">>",
            BinOp::RValue => "#[]",
            BinOp::LValue => "[]",
            BinOp::Max => "max",
            BinOp::Min => "min",
            BinOp::Mean => "mean",
            BinOp::Sum => "sum",
        }
    }

    /// Human-readable name used in error messages
    pub fn name(self) -> &'static str {
        match self {
            BinOp::Add => "addition",
            BinOp::Sub => "subtraction",
            BinOp::Mul => "multiplication",
            BinOp::Div => "division",
            BinOp::Mod => "modulo",
            BinOp::Pow => "exponentiation",
            BinOp::And => "logical and",
            BinOp::Or => "logical or",
            BinOp::Eq => "equals",
            BinOp::Ne => "not equals",
            BinOp::Lt => "less than",
            BinOp::Le => "less than or equal",
            BinOp::Gt => "more than",
            BinOp::Ge => "more than or equal",
            BinOp::BitAnd => "bitwise and",
            BinOp::BitOr => "bitwise or",
            BinOp::BitXor => "bitwise xor",
            BinOp::BitShl => "bitwise left shift",
            BinOp::BitShr => "bitwise right shift",
            BinOp::RValue => "cell read",
            BinOp::LValue => "cell address",
            BinOp::Max => "max",
            BinOp::Min => "min",
            BinOp::Mean => "mean",
            BinOp::Sum => "sum",
        }
    }

    pub fn is_statistic(self) -> bool {
        matches!(self, BinOp::Max | BinOp::Min | BinOp::Mean | BinOp::Sum)
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,        // -x
    Not,        // !x
    BitNot,     // ~x
    FloatToInt, // int(x)
    IntToFloat, // float(x)
}

impl UnOp {
    pub fn name(self) -> &'static str {
        match self {
            UnOp::Neg => "negation",
            UnOp::Not => "logical not",
            UnOp::BitNot => "bitwise not",
            UnOp::FloatToInt => "int cast",
            UnOp::IntToFloat => "float cast",
        }
    }
}

/// AST nodes representing statements and expressions
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    // Statements
    Block {
        statements: Vec<AstNode>,
    },
    Assignment {
        name: String,
        value: Box<AstNode>,
        span: Option<Span>,
    },
    Conditional {
        condition: Box<AstNode>,
        then_block: Box<AstNode>,
        else_block: Option<Box<AstNode>>,
        span: Option<Span>,
    },
    ForLoop {
        iterator: String,
        start: CellCoord,
        end: CellCoord,
        body: Box<AstNode>,
        span: Option<Span>,
    },

    // Expressions
    Integer(i64, Option<Span>),
    Float(f64, Option<Span>),
    Boolean(bool, Option<Span>),
    String(String, Option<Span>),
    Reference {
        name: String,
        span: Option<Span>,
    },
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        span: Option<Span>,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<AstNode>,
        span: Option<Span>,
    },
}

impl AstNode {
    /// Build a binary node; mostly used by hand-written trees in tests
    pub fn binary(op: BinOp, left: AstNode, right: AstNode) -> Self {
        AstNode::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            span: None,
        }
    }

    pub fn unary(op: UnOp, operand: AstNode) -> Self {
        AstNode::UnaryOp {
            op,
            operand: Box::new(operand),
            span: None,
        }
    }

    pub fn block(statements: Vec<AstNode>) -> Self {
        AstNode::Block { statements }
    }

    /// Get the source span of this node, if it was recorded
    pub fn span(&self) -> Option<Span> {
        match self {
            AstNode::Block { statements } => {
                let first = statements.first().and_then(AstNode::span)?;
                let last = statements.last().and_then(AstNode::span)?;
                Some(first.to(last))
            }
            AstNode::Assignment { span, .. } => *span,
            AstNode::Conditional { span, .. } => *span,
            AstNode::ForLoop { span, .. } => *span,
            AstNode::Integer(_, span) => *span,
            AstNode::Float(_, span) => *span,
            AstNode::Boolean(_, span) => *span,
            AstNode::String(_, span) => *span,
            AstNode::Reference { span, .. } => *span,
            AstNode::BinaryOp { span, .. } => *span,
            AstNode::UnaryOp { span, .. } => *span,
        }
    }

    /// Statements and blocks never yield a value for an enclosing expression
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            AstNode::Block { .. } | AstNode::Conditional { .. } | AstNode::ForLoop { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_span_covers_statements() {
        let block = AstNode::block(vec![
            AstNode::Integer(1, Some(Span::new(0, 1))),
            AstNode::Integer(2, Some(Span::new(4, 5))),
        ]);
        assert_eq!(block.span(), Some(Span::new(0, 5)));
    }

    #[test]
    fn test_statistic_ops() {
        assert!(BinOp::Sum.is_statistic());
        assert!(BinOp::Mean.is_statistic());
        assert!(!BinOp::RValue.is_statistic());
        assert_eq!(BinOp::Pow.symbol(), "**");
    }
}

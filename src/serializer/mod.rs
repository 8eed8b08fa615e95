//! Canonical text form of a parsed formula
//!
//! [`serialize`] walks the AST and prints every binary operation fully
//! parenthesized, so the output shows exactly how the parser grouped the
//! input. Feeding the output back through the parser yields the same tree,
//! which makes serialization a fixed point after one pass.
//!
//! | node                | form              |
//! |---------------------|-------------------|
//! | infix operator      | `(left OP right)` |
//! | negation            | `-operand`        |
//! | logical not         | `!(operand)`      |
//! | bitwise not         | `(~operand)`      |
//! | casts               | `int(x)`, `float(x)` |
//! | statistics          | `sum(a, b)`       |
//! | cell read / address | `#[a, b]`, `[a, b]` |
//!
//! Statements are printed one per line; the bodies of `if` and `for` are
//! indented by two spaces per nesting level.

use crate::interpreter::constants::{STACK_GROW_SIZE, STACK_RED_ZONE};
use crate::parser::ast::*;
use crate::sheet::value::format_float;

const INDENT: &str = "  ";

/// Serialize a node to its canonical text.
pub fn serialize(node: &AstNode) -> String {
    let mut serializer = Serializer::new();
    serializer.statement(node);
    serializer.finish()
}

/// Accumulates canonical text while walking the tree
#[derive(Debug, Default)]
pub struct Serializer {
    output: String,
    indent: usize,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> String {
        self.output
    }

    /// Write a statement (or bare expression) at the current position
    pub fn statement(&mut self, node: &AstNode) {
        match node {
            AstNode::Block { statements } => {
                for (i, stmt) in statements.iter().enumerate() {
                    if i > 0 {
                        self.newline();
                    }
                    self.statement(stmt);
                }
            }
            AstNode::Assignment { name, value, .. } => {
                self.output.push_str(name);
                self.output.push_str(" -> ");
                self.expression(value);
            }
            AstNode::Conditional {
                condition,
                then_block,
                else_block,
                ..
            } => {
                self.output.push_str("if ");
                self.expression(condition);
                self.nested(then_block);
                if let Some(block) = else_block {
                    self.newline();
                    self.output.push_str("else");
                    self.nested(block);
                }
                self.newline();
                self.output.push_str("end");
            }
            AstNode::ForLoop {
                iterator,
                start,
                end,
                body,
                ..
            } => {
                self.output.push_str(&format!(
                    "for {} in [{}, {}]..[{}, {}] do",
                    iterator, start.row, start.col, end.row, end.col
                ));
                self.nested(body);
                self.newline();
                self.output.push_str("end");
            }
            _ => self.expression(node),
        }
    }

    /// Write an expression; statement nodes fall back to statement form
    pub fn expression(&mut self, node: &AstNode) {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.write_expression(node))
    }

    fn write_expression(&mut self, node: &AstNode) {
        match node {
            AstNode::Integer(n, _) => self.output.push_str(&n.to_string()),
            AstNode::Float(x, _) => self.output.push_str(&format_float(*x)),
            AstNode::Boolean(b, _) => self.output.push_str(if *b { "true" } else { "false" }),
            AstNode::String(s, _) => {
                self.output.push('"');
                self.output.push_str(s);
                self.output.push('"');
            }
            AstNode::Reference { name, .. } => self.output.push_str(name),
            AstNode::BinaryOp {
                op, left, right, ..
            } => self.binary(*op, left, right),
            AstNode::UnaryOp { op, operand, .. } => self.unary(*op, operand),
            _ => self.statement(node),
        }
    }

    fn binary(&mut self, op: BinOp, left: &AstNode, right: &AstNode) {
        let (open, separator, close) = match op {
            BinOp::RValue => ("#[".to_string(), ", ".to_string(), "]"),
            BinOp::LValue => ("[".to_string(), ", ".to_string(), "]"),
            _ if op.is_statistic() => (format!("{}(", op.symbol()), ", ".to_string(), ")"),
            _ => ("(".to_string(), format!(" {} ", op.symbol()), ")"),
        };

        self.output.push_str(&open);
        self.expression(left);
        self.output.push_str(&separator);
        self.expression(right);
        self.output.push_str(close);
    }

    fn unary(&mut self, op: UnOp, operand: &AstNode) {
        let (open, close) = match op {
            UnOp::Neg => ("-", ""),
            UnOp::Not => ("!(", ")"),
            UnOp::BitNot => ("(~", ")"),
            UnOp::FloatToInt => ("int(", ")"),
            UnOp::IntToFloat => ("float(", ")"),
        };

        self.output.push_str(open);
        self.expression(operand);
        self.output.push_str(close);
    }

    /// Write a block body one level deeper, each statement on its own line
    fn nested(&mut self, block: &AstNode) {
        self.indent += 1;
        let statements = match block {
            AstNode::Block { statements } => statements.as_slice(),
            other => std::slice::from_ref(other),
        };
        for stmt in statements {
            self.newline();
            self.statement(stmt);
        }
        self.indent -= 1;
    }

    fn newline(&mut self) {
        self.output.push('\n');
        for _ in 0..self.indent {
            self.output.push_str(INDENT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::parse_formula;

    fn canonical(source: &str) -> String {
        serialize(&parse_formula(source).unwrap())
    }

    #[test]
    fn test_binary_operators_are_parenthesized() {
        assert_eq!(canonical("1 + 2 * 3"), "(1 + (2 * 3))");
        assert_eq!(canonical("1 < 2 && x >= 3"), "((1 < 2) && (x >= 3))");
        assert_eq!(canonical("7 % 2 ** 3"), "((7 % 2) ** 3)");
    }

    #[test]
    fn test_unary_forms() {
        assert_eq!(canonical("-x"), "-x");
        assert_eq!(canonical("!true"), "!(true)");
        assert_eq!(canonical("~5"), "(~5)");
        assert_eq!(canonical("int(2.5) + float(3)"), "(int(2.5) + float(3))");
    }

    #[test]
    fn test_cells_and_statistics() {
        assert_eq!(canonical("#[1,2]"), "#[1, 2]");
        assert_eq!(canonical("[0,1]"), "[0, 1]");
        assert_eq!(canonical("max([0,0],[2,2])"), "max([0, 0], [2, 2])");
    }

    #[test]
    fn test_float_literals_keep_fraction() {
        assert_eq!(serialize(&AstNode::Float(2.0, None)), "2.0");
        assert_eq!(canonical("2.50"), "2.5");
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(serialize(&AstNode::String("hi".into(), None)), "\"hi\"");
    }

    #[test]
    fn test_statements_and_indentation() {
        let source = "total -> 0\nfor v in [0,0]..[1,1] do\nif v > 1\ntotal -> total + v\nelse\ntotal -> total\nend\nend";
        let expected = "total -> 0\n\
                        for v in [0, 0]..[1, 1] do\n  \
                        if (v > 1)\n    \
                        total -> (total + v)\n  \
                        else\n    \
                        total -> total\n  \
                        end\n\
                        end";
        assert_eq!(canonical(source), expected);
    }

    #[test]
    fn test_output_parses_to_same_tree() {
        let sources = [
            "1 + 2 * 3 - -4",
            "x -> mean([0,0],[1,1]) / 2",
            "if !(a == b) || c\n1\nend",
            "for i in [0,0]..[0,3]\n s -> s + i << 1\nend",
        ];
        for source in sources {
            let once = canonical(source);
            let twice = canonical(&once);
            assert_eq!(once, twice, "not a fixed point for {:?}", source);
        }
    }
}

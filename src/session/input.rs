// Classification of raw cell input text

use crate::sheet::Value;

/// What the user typed into a cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellInput {
    /// Nothing (or only whitespace)
    Blank,
    /// Text after a leading `=`, to be lexed and parsed
    Formula(String),
    /// A plain number, boolean or quoted string
    Literal(Value),
    /// Anything else, kept verbatim for the error message
    Invalid(String),
}

impl CellInput {
    pub fn classify(text: &str) -> CellInput {
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return CellInput::Blank;
        }

        if let Some(formula) = trimmed.strip_prefix('=') {
            return CellInput::Formula(formula.trim().to_string());
        }

        if trimmed.eq_ignore_ascii_case("true") {
            return CellInput::Literal(Value::Boolean(true));
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellInput::Literal(Value::Boolean(false));
        }

        if let Some(value) = parse_number(trimmed) {
            return CellInput::Literal(value);
        }

        if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
            return CellInput::Literal(Value::String(trimmed[1..trimmed.len() - 1].to_string()));
        }

        CellInput::Invalid(trimmed.to_string())
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, CellInput::Formula(_))
    }
}

/// Integral numbers that fit an i64 become Integers, other finite numbers Floats
fn parse_number(text: &str) -> Option<Value> {
    if let Ok(n) = text.parse::<i64>() {
        return Some(Value::Integer(n));
    }

    let x = text.parse::<f64>().ok().filter(|x| x.is_finite())?;
    if x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 {
        Some(Value::Integer(x as i64))
    } else {
        Some(Value::Float(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formulas() {
        assert_eq!(CellInput::classify("=1 + 2"), CellInput::Formula("1 + 2".into()));
        assert_eq!(CellInput::classify("  = x  "), CellInput::Formula("x".into()));
        assert!(CellInput::classify("=").is_formula());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(CellInput::classify("42"), CellInput::Literal(Value::Integer(42)));
        assert_eq!(CellInput::classify("-7"), CellInput::Literal(Value::Integer(-7)));
        assert_eq!(CellInput::classify("3.0"), CellInput::Literal(Value::Integer(3)));
        assert_eq!(CellInput::classify("2.5"), CellInput::Literal(Value::Float(2.5)));
        assert_eq!(CellInput::classify("1e3"), CellInput::Literal(Value::Integer(1000)));
        assert_eq!(CellInput::classify("1e30"), CellInput::Literal(Value::Float(1e30)));
    }

    #[test]
    fn test_booleans_and_strings() {
        assert_eq!(CellInput::classify("TRUE"), CellInput::Literal(Value::Boolean(true)));
        assert_eq!(CellInput::classify("false"), CellInput::Literal(Value::Boolean(false)));
        assert_eq!(
            CellInput::classify("\"total\""),
            CellInput::Literal(Value::String("total".into()))
        );
    }

    #[test]
    fn test_blank_and_invalid() {
        assert_eq!(CellInput::classify("   "), CellInput::Blank);
        assert_eq!(CellInput::classify("abc"), CellInput::Invalid("abc".into()));
        assert_eq!(CellInput::classify("inf"), CellInput::Invalid("inf".into()));
        assert_eq!(CellInput::classify("\""), CellInput::Invalid("\"".into()));
    }
}

//! Parsing of value-node literal source strings.

use crate::model::value::DVal;

/// Parse a literal source string into a value. Runs once at value-node
/// construction.
///
/// Accepts JSON-shaped literals (`42`, `1.5`, `"hi"`, `true`, `null`,
/// `[1, 2]`, `{"a": 1}`). A blank source is an unfilled input and parses to
/// `Incomplete`; anything else that is not valid JSON falls back to a bare
/// string literal.
pub fn parse_literal(source: &str) -> DVal {
    let trimmed = source.trim();
    if trimmed.is_empty() {
        return DVal::Incomplete;
    }
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(json) => DVal::from(json),
        Err(_) => DVal::Str(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literals() {
        assert_eq!(parse_literal("42"), DVal::Int(42));
        assert_eq!(parse_literal("1.5"), DVal::float(1.5));
        assert_eq!(parse_literal("\"hi\""), DVal::Str("hi".to_string()));
        assert_eq!(parse_literal("true"), DVal::Bool(true));
        assert_eq!(parse_literal("null"), DVal::Null);
        assert_eq!(
            parse_literal("[1, 2, 3]"),
            DVal::List(vec![DVal::Int(1), DVal::Int(2), DVal::Int(3)])
        );
    }

    #[test]
    fn test_blank_is_incomplete() {
        assert_eq!(parse_literal(""), DVal::Incomplete);
        assert_eq!(parse_literal("   "), DVal::Incomplete);
    }

    #[test]
    fn test_bare_word_falls_back_to_string() {
        assert_eq!(parse_literal("hello"), DVal::Str("hello".to_string()));
    }
}

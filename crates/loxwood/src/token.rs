//! Tokens as handed over by the scanner

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum TokenKind {
    // Single-character tokens
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,
    Question,
    Colon,

    // One or two character tokens
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

/// A literal value carried by a token or a literal expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    /// `nil`
    Nil,
    /// `true` / `false`
    Bool(bool),
    /// Any number; Lox has a single numeric type
    Number(#[serde(with = "number_text")] f64),
    /// String contents without the quotes
    String(String),
}

/// JSON cannot carry infinities or NaN, so those are written as the strings
/// `"inf"`, `"-inf"` and `"NaN"`; finite numbers stay JSON numbers.
mod number_text {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(n: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if n.is_finite() {
            serializer.serialize_f64(*n)
        } else if n.is_nan() {
            serializer.serialize_str("NaN")
        } else if n.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Finite(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Finite(n) => Ok(n),
            Repr::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "NaN" => Ok(f64::NAN),
                other => Err(D::Error::custom(format!("`{}` is not a number", other))),
            },
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Nil => write!(f, "nil"),
            LiteralValue::Bool(b) => write!(f, "{}", b),
            LiteralValue::Number(n) => write!(f, "{}", crate::value::format_number(*n)),
            LiteralValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for LiteralValue {
    fn from(n: f64) -> Self {
        LiteralValue::Number(n)
    }
}

impl From<bool> for LiteralValue {
    fn from(b: bool) -> Self {
        LiteralValue::Bool(b)
    }
}

impl From<&str> for LiteralValue {
    fn from(s: &str) -> Self {
        LiteralValue::String(s.to_string())
    }
}

/// An immutable token.
///
/// Nodes embed tokens by value; cloning a token never aliases another node's copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Lexical category
    pub kind: TokenKind,

    /// Source text of the token
    pub lexeme: String,

    /// Literal payload for string and number tokens
    pub literal: Option<LiteralValue>,

    /// 1-indexed source line
    pub line: usize,
}

impl Token {
    /// Create a new token.
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        literal: Option<LiteralValue>,
        line: usize,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            line,
        }
    }

    /// An identifier token, the common case for environment lookups.
    pub fn identifier(name: impl Into<String>, line: usize) -> Self {
        Self::new(TokenKind::Identifier, name, None, line)
    }

    /// A token with no literal payload.
    pub fn symbol(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self::new(kind, lexeme, None, line)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {}", self.kind, self.lexeme)?;
        if let Some(literal) = &self.literal {
            write!(f, " {}", literal)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_token() {
        let token = Token::identifier("answer", 3);
        assert_eq!(token.kind, TokenKind::Identifier);
        assert_eq!(token.lexeme, "answer");
        assert_eq!(token.literal, None);
        assert_eq!(token.line, 3);
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::Number, "1.5", Some(1.5.into()), 1);
        assert_eq!(token.to_string(), "Number 1.5 1.5");
        assert_eq!(Token::symbol(TokenKind::Plus, "+", 1).to_string(), "Plus +");
    }

    #[test]
    fn test_non_finite_numbers_serialize_as_text() {
        let json = serde_json::to_string(&LiteralValue::Number(f64::NEG_INFINITY)).unwrap();
        assert_eq!(json, r#"{"Number":"-inf"}"#);
        let json = serde_json::to_string(&LiteralValue::Number(2.5)).unwrap();
        assert_eq!(json, r#"{"Number":2.5}"#);
    }

    #[test]
    fn test_unknown_number_text_rejected() {
        assert!(serde_json::from_str::<LiteralValue>(r#"{"Number":"lots"}"#).is_err());
        assert!(serde_json::from_str::<LiteralValue>(r#"{"Number":null}"#).is_err());
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(LiteralValue::Nil.to_string(), "nil");
        assert_eq!(LiteralValue::Number(45.0).to_string(), "45");
        assert_eq!(LiteralValue::Number(45.67).to_string(), "45.67");
        assert_eq!(LiteralValue::from("hi").to_string(), "hi");
    }
}

//! Runtime values stored in environment bindings

mod callable;
mod display;

pub use callable::{FunctionValue, NativeFn, NativeFnPtr};
pub use display::format_number;

use std::rc::Rc;

use crate::token::LiteralValue;

/// A Lox runtime value.
///
/// Primitives are inline; strings and callables are reference counted so
/// that copying a value out of a frame never deep-copies.
#[derive(Clone)]
pub enum Value {
    /// `nil`
    Nil,

    /// `true` / `false`
    Bool(bool),

    /// Double-precision number
    Number(f64),

    /// Immutable string
    String(Rc<str>),

    /// Function implemented in Rust
    Native(NativeFn),

    /// User function together with its captured environment
    Function(Rc<FunctionValue>),
}

impl Value {
    /// Create a string value.
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    /// Lox truthiness: `nil` and `false` are falsey, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Numeric payload, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Name of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Native(_) | Value::Function(_) => "function",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(&a.func, &b.func),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<LiteralValue> for Value {
    fn from(literal: LiteralValue) -> Self {
        match literal {
            LiteralValue::Nil => Value::Nil,
            LiteralValue::Bool(b) => Value::Bool(b),
            LiteralValue::Number(n) => Value::Number(n),
            LiteralValue::String(s) => Value::string(s),
        }
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        literal.clone().into()
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(Value::Number(0.0).is_truthy());
        assert!(Value::string("").is_truthy());
    }

    #[test]
    fn test_equality_does_not_coerce() {
        assert_eq!(Value::Nil, Value::Nil);
        assert_eq!(Value::from(1.0), Value::Number(1.0));
        assert_ne!(Value::Number(0.0), Value::Bool(false));
        assert_ne!(Value::string("1"), Value::Number(1.0));
        assert_eq!(Value::from("a"), Value::string("a"));
    }

    #[test]
    fn test_from_literal() {
        assert_eq!(Value::from(LiteralValue::Nil), Value::Nil);
        assert_eq!(Value::from(&LiteralValue::from("x")), Value::string("x"));
        assert_eq!(Value::from(LiteralValue::Number(2.5)).as_number(), Some(2.5));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Nil.type_name(), "nil");
        assert_eq!(Value::Bool(true).type_name(), "boolean");
        assert_eq!(Value::Number(1.0).type_name(), "number");
        assert_eq!(Value::string("s").type_name(), "string");
    }
}

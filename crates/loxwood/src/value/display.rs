//! Display and Debug implementations for Value

use std::fmt;

use super::*;

/// Format a number the way Lox prints it: integral values drop the `.0`.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        // -0.0 prints as "-0"
        if n == 0.0 && n.is_sign_negative() {
            return "-0".to_string();
        }
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::String(s) => write!(f, "{}", s),
            Value::Native(_) => write!(f, "<native fn>"),
            Value::Function(func) => write!(f, "<fn {}>", func.name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s.as_ref()),
            Value::Native(native) => write!(f, "{:?}", native),
            Value::Function(func) => write!(f, "{:?}", func),
            other => write!(f, "{}", other),
        }
    }
}

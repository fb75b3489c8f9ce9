//! The Lox syntax tree
//!
//! Both families are generated at build time by `loxwood-astgen` from its
//! `LOX_GRAMMAR` table: every variant is an immutable struct, the family is
//! a closed enum, and traversal goes through the family's `Visitor<R>` trait
//! via `accept`. A visitor that misses a variant does not compile.
//!
//! # Example
//!
//! ```
//! use loxwood::ast::{expr, Expr};
//! use loxwood::{LiteralValue, Token, TokenKind};
//!
//! // -123 * (45.67)
//! let tree = Expr::binary(
//!     Expr::unary(
//!         Token::symbol(TokenKind::Minus, "-", 1),
//!         Expr::literal(LiteralValue::Number(123.0)),
//!     ),
//!     Token::symbol(TokenKind::Star, "*", 1),
//!     Expr::grouping(Expr::literal(LiteralValue::Number(45.67))),
//! );
//!
//! assert_eq!(tree.variant_name(), "Binary");
//! assert_eq!(
//!     loxwood::ast::AstPrinter.print_expr(&tree),
//!     "(* (- 123) (group 45.67))"
//! );
//! ```

pub mod printer;

pub use crate::token::{LiteralValue, Token};

/// Expression family.
pub mod expr {
    include!(concat!(env!("OUT_DIR"), "/expr.rs"));
}

/// Statement family.
pub mod stmt {
    include!(concat!(env!("OUT_DIR"), "/stmt.rs"));
}

pub use expr::Expr;
pub use printer::{AstPrinter, RpnPrinter};
pub use stmt::Stmt;

use crate::error::Result;

/// Serialize a program to its canonical text form (JSON).
pub fn to_canonical(program: &[Stmt]) -> Result<String> {
    Ok(serde_json::to_string(program)?)
}

/// Reconstruct a program from its canonical text form.
///
/// The result compares equal to the serialized program and dispatches
/// identically on every visitor.
pub fn from_canonical(text: &str) -> Result<Vec<Stmt>> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn test_variants_declared_in_order() {
        assert_eq!(
            Expr::VARIANTS,
            &[
                "Assign", "Binary", "Call", "Grouping", "Literal", "Logical", "Unary", "Ternary",
                "Variable"
            ]
        );
        assert_eq!(
            Stmt::VARIANTS,
            &["Block", "Expression", "Function", "If", "Print", "While", "Var"]
        );
    }

    #[test]
    fn test_constructor_moves_children_into_parent() {
        let left = Expr::literal(LiteralValue::Number(1.0));
        let right = Expr::literal(LiteralValue::Number(2.0));
        let node = expr::Binary::new(left, Token::symbol(TokenKind::Plus, "+", 1), right);

        assert_eq!(node.left(), &Expr::literal(LiteralValue::Number(1.0)));
        assert_eq!(node.operator().lexeme, "+");
        assert_eq!(node.right().variant_name(), "Literal");
    }

    #[test]
    fn test_optional_children() {
        let var = stmt::Var::new(Token::identifier("x", 1), None);
        assert!(var.initializer().is_none());

        let branch = stmt::If::new(
            Expr::literal(true.into()),
            Stmt::print(Expr::literal(1.0.into())),
            Some(Stmt::print(Expr::literal(2.0.into()))),
        );
        assert_eq!(branch.else_branch().map(Stmt::variant_name), Some("Print"));
    }

    #[test]
    fn test_from_variant_struct() {
        let node: Stmt = stmt::Block::new(vec![]).into();
        assert_eq!(node.variant_name(), "Block");
    }

    #[test]
    fn test_malformed_canonical_text() {
        let err = from_canonical("[{\"Nope\": {}}]").unwrap_err();
        assert!(matches!(err, crate::Error::Canonical(_)));
    }
}

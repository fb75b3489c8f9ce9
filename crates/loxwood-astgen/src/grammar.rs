//! The Lox syntax families

use crate::descriptor::FamilyDescriptor;

/// Descriptor table for the Lox expression and statement families.
pub const LOX_GRAMMAR: &[(&str, &[&str])] = &[
    (
        "Expr",
        &[
            "Assign   : Token name, Expr value",
            "Binary   : Expr left, Token operator, Expr right",
            "Call     : Expr callee, Token paren, List<Expr> arguments",
            "Grouping : Expr expression",
            "Literal  : LiteralValue value",
            "Logical  : Expr left, Token operator, Expr right",
            "Unary    : Token operator, Expr right",
            "Ternary  : Expr condition, Token question, Expr then_branch, Token colon, Expr else_branch",
            "Variable : Token name",
        ],
    ),
    (
        "Stmt",
        &[
            "Block      : List<Stmt> statements",
            "Expression : Expr expression",
            "Function   : Token name, List<Token> params, List<Stmt> body",
            "If         : Expr condition, Stmt then_branch, Option<Stmt> else_branch",
            "Print      : Expr expression",
            "While      : Expr condition, Stmt body",
            "Var        : Token name, Option<Expr> initializer",
        ],
    ),
];

/// [`LOX_GRAMMAR`] as owned descriptors.
pub fn lox_grammar() -> Vec<FamilyDescriptor> {
    LOX_GRAMMAR
        .iter()
        .map(|(name, variants)| FamilyDescriptor::new(*name, variants.iter().copied()))
        .collect()
}

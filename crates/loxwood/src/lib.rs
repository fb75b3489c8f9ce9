//! # Loxwood
//!
//! The syntax tree and runtime scoping core of a Lox tree-walking
//! interpreter.
//!
//! - **Syntax tree**: the `Expr` and `Stmt` families are generated at build
//!   time by `loxwood-astgen`. Each family is a closed enum with an
//!   exhaustive `Visitor<R>` trait, so adding a variant breaks every
//!   visitor that does not handle it.
//! - **Environment**: a chain of scope frames with `define`, `get` and
//!   `assign`. A name can be unbound, declared but uninitialized, or
//!   initialized; frames stay alive as long as any closure holds them.
//!
//! Scanning, parsing, and evaluation live outside this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod environment;
pub mod error;
pub mod token;
pub mod value;

// Re-export main types
pub use ast::{AstPrinter, Expr, RpnPrinter, Stmt};
pub use environment::{Binding, Environment, ScopeGuard};
pub use error::{EnvironmentError, Error, Result};
pub use token::{LiteralValue, Token, TokenKind};
pub use value::{FunctionValue, NativeFn, NativeFnPtr, Value};

/// Loxwood version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

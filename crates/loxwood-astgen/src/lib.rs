//! # loxwood-astgen
//!
//! Build-time generator for loxwood's syntax tree.
//!
//! A node family (expressions, statements) is described declaratively as a
//! list of variant lines:
//!
//! ```text
//! Binary : Expr left, Token operator, Expr right
//! ```
//!
//! From that list the generator emits, per family, a Rust module holding
//! one immutable struct per variant, the closed family enum, a `Visitor<R>`
//! trait with one required method per variant, and an exhaustive `accept`
//! dispatch. Adding a variant therefore breaks the build of every visitor
//! that does not handle it.
//!
//! The generator runs from `loxwood`'s build script and from the
//! `generate-ast` binary; it never runs inside the interpreter.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod descriptor;
pub mod emit;
pub mod error;
pub mod generator;
pub mod grammar;

pub use descriptor::{Family, FamilyDescriptor, Field, FieldType, Variant};
pub use error::{Result, SchemaError};
pub use generator::{Artifact, Generator, DEFAULT_DERIVES};
pub use grammar::{lox_grammar, LOX_GRAMMAR};

//! Error types for schema parsing and generation

use std::path::PathBuf;

use thiserror::Error;

/// A generation-time failure.
///
/// Every variant is fatal: the generator stops before writing anything.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The family name is not a valid Rust identifier.
    #[error("family name `{family}` is not a valid identifier")]
    InvalidFamilyName {
        /// Offending family name
        family: String,
    },

    /// The same family appears twice in the descriptor list.
    #[error("family `{family}` is declared more than once")]
    DuplicateFamily {
        /// Family name
        family: String,
    },

    /// A family with no variants cannot be dispatched over.
    #[error("family `{family}` declares no variants")]
    EmptyFamily {
        /// Family name
        family: String,
    },

    /// A variant line is not of the form `Name : fields`.
    #[error("family `{family}`: variant spec `{spec}` must have the form `Name : Type field, ...`")]
    MalformedVariant {
        /// Family name
        family: String,
        /// The raw variant line
        spec: String,
    },

    /// Two variants of one family share a name.
    #[error("family `{family}` declares variant `{variant}` more than once")]
    DuplicateVariant {
        /// Family name
        family: String,
        /// Variant name
        variant: String,
    },

    /// A field spec does not split into a type and an identifier.
    #[error("`{family}::{variant}`: field spec `{spec}` does not parse as `Type name`")]
    MalformedField {
        /// Family name
        family: String,
        /// Variant name
        variant: String,
        /// The raw field spec
        spec: String,
    },

    /// Two fields of one variant share a name.
    #[error("`{family}::{variant}` declares field `{field}` more than once")]
    DuplicateField {
        /// Family name
        family: String,
        /// Variant name
        variant: String,
        /// Field name
        field: String,
    },

    /// A name would collide with another item of the generated module.
    #[error("family `{family}`: `{name}` collides with {existing}")]
    NameClash {
        /// Family name
        family: String,
        /// The colliding name as written
        name: String,
        /// What it collides with
        existing: String,
    },

    /// The field type parsed, but is not a shape the generator can store.
    #[error("`{family}::{variant}.{field}`: unsupported field type `{ty}`")]
    UnsupportedType {
        /// Family name
        family: String,
        /// Variant name
        variant: String,
        /// Field name
        field: String,
        /// The type as written
        ty: String,
    },

    /// A derive path passed to the generator does not parse.
    #[error("derive path `{0}` is not a valid Rust path")]
    InvalidDerive(String),

    /// The emitted source failed to re-parse as a Rust file.
    #[error("generated source for family `{family}` is not valid Rust: {message}")]
    InvalidOutput {
        /// Family name
        family: String,
        /// Parser diagnostic
        message: String,
    },

    /// Writing an artifact failed.
    #[error("failed to write `{}`: {source}", path.display())]
    Io {
        /// Target path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, SchemaError>;

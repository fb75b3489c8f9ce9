//! Error types for loxwood

use thiserror::Error;

/// Binding failure raised by environment lookups and assignments.
///
/// Recoverable: the evaluator decides whether to abort the current unit.
/// Carries the offending name and source line for an external presenter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    /// No frame on the chain binds the name.
    #[error("Undefined variable '{name}'.")]
    UndefinedVariable {
        /// Variable name
        name: String,
        /// Line of the offending reference
        line: usize,
    },

    /// The innermost frame binding the name has not initialized it yet.
    #[error("Cannot access uninitialized variable '{name}'.")]
    UninitializedVariable {
        /// Variable name
        name: String,
        /// Line of the offending reference
        line: usize,
    },

    /// A resolved distance points past the root frame.
    #[error("No scope {distance} level(s) out while resolving '{name}'.")]
    InvalidDepth {
        /// Variable name
        name: String,
        /// Requested distance
        distance: usize,
        /// Line of the offending reference
        line: usize,
    },
}

impl EnvironmentError {
    /// Name of the variable involved.
    pub fn name(&self) -> &str {
        match self {
            EnvironmentError::UndefinedVariable { name, .. }
            | EnvironmentError::UninitializedVariable { name, .. }
            | EnvironmentError::InvalidDepth { name, .. } => name,
        }
    }

    /// Source line of the offending reference.
    pub fn line(&self) -> usize {
        match self {
            EnvironmentError::UndefinedVariable { line, .. }
            | EnvironmentError::UninitializedVariable { line, .. }
            | EnvironmentError::InvalidDepth { line, .. } => *line,
        }
    }
}

/// Main error type for loxwood operations
#[derive(Error, Debug)]
pub enum Error {
    /// Binding error
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    /// Canonical text could not be produced or parsed
    #[error("Canonical form error: {0}")]
    Canonical(#[from] serde_json::Error),
}

/// Result type alias for loxwood operations
pub type Result<T> = std::result::Result<T, Error>;

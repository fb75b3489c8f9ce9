//! Runtime environment: a chain of lexical scope frames
//!
//! Every block or call gets a fresh frame whose enclosing link points at
//! the frame that was current when it was created. Frames are shared
//! (`Rc`), so a closure that captured a frame keeps it, and all of its
//! ancestors, alive after the block that created it has exited.

mod frame;
mod guard;
mod prelude;

pub use guard::ScopeGuard;

use std::fmt;
use std::rc::Rc;

use frame::Frame;

use crate::error::EnvironmentError;
use crate::token::Token;
use crate::value::Value;

/// State of a name in a single frame.
///
/// A name absent from the frame is *unbound* there; that state is
/// represented by the absence of a `Binding`, never by a null value.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// Declared (`var x;`) but not yet given a value.
    Uninitialized,

    /// Holds a value.
    Initialized(Value),
}

impl Binding {
    /// The value, if initialized.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Binding::Uninitialized => None,
            Binding::Initialized(value) => Some(value),
        }
    }
}

impl From<Value> for Binding {
    fn from(value: Value) -> Self {
        Binding::Initialized(value)
    }
}

/// A handle to one frame of the scope chain.
///
/// Cloning the handle shares the frame; it does not copy bindings.
///
/// # Example
///
/// ```
/// use loxwood::{Binding, Environment, Token, Value};
///
/// let globals = Environment::new();
/// globals.define_value("x", Value::Number(1.0));
///
/// // Enter a block
/// let block = globals.child();
/// block.declare("y");
///
/// let x = Token::identifier("x", 1);
/// let y = Token::identifier("y", 1);
/// assert_eq!(block.get(&x), Ok(Value::Number(1.0)));
/// assert!(block.get(&y).is_err()); // declared, not initialized
///
/// // Assignment lands in the frame that declared the name
/// block.assign(&x, Value::Number(2.0)).unwrap();
/// assert_eq!(globals.get(&x), Ok(Value::Number(2.0)));
/// assert!(!block.contains_local("x"));
/// ```
#[derive(Clone)]
pub struct Environment(Rc<Frame>);

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Create a root frame with no enclosing frame.
    pub fn new() -> Self {
        Environment(Rc::new(Frame::new(None)))
    }

    /// Create a frame enclosed by `enclosing`.
    pub fn with_enclosing(enclosing: &Environment) -> Self {
        Environment(Rc::new(Frame::new(Some(enclosing.clone()))))
    }

    /// Create a frame enclosed by this one.
    pub fn child(&self) -> Self {
        Self::with_enclosing(self)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Chain Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// The enclosing frame, fixed at creation.
    pub fn enclosing(&self) -> Option<&Environment> {
        self.0.enclosing.as_ref()
    }

    /// Number of frames from this one up to the root, inclusive.
    pub fn depth(&self) -> usize {
        self.frames().count()
    }

    /// Whether this is a root frame.
    pub fn is_global_scope(&self) -> bool {
        self.0.enclosing.is_none()
    }

    /// Whether two handles refer to the same frame.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// The frame `distance` steps outward (`0` is this frame).
    pub fn ancestor(&self, distance: usize) -> Option<&Environment> {
        self.frames().nth(distance)
    }

    /// Iterate from this frame outward to the root.
    fn frames(&self) -> impl Iterator<Item = &Environment> {
        std::iter::successors(Some(self), |env| env.0.enclosing.as_ref())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding Definition
    // ═══════════════════════════════════════════════════════════════════

    /// Install `binding` for `name` in this frame only.
    ///
    /// Always succeeds; a previous binding of `name` in this frame is
    /// replaced. Enclosing frames are never touched.
    pub fn define(&self, name: impl Into<String>, binding: Binding) {
        let name = name.into();
        tracing::trace!(name = %name, initialized = binding.value().is_some(), "define");
        self.0.bindings.borrow_mut().insert(name, binding);
    }

    /// Define an initialized binding.
    pub fn define_value(&self, name: impl Into<String>, value: Value) {
        self.define(name, Binding::Initialized(value));
    }

    /// Declare a name without a value (`var x;`).
    pub fn declare(&self, name: impl Into<String>) {
        self.define(name, Binding::Uninitialized);
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// This frame's binding for `name`, without delegating outward.
    ///
    /// `None` means the name is unbound in this frame.
    pub fn binding(&self, name: &str) -> Option<Binding> {
        self.0.local(name)
    }

    /// The binding that governs `name` from this frame: the first frame on
    /// the chain holding the name decides, even when it is uninitialized.
    pub fn resolve(&self, name: &str) -> Option<Binding> {
        self.frames().find_map(|env| env.0.local(name))
    }

    /// Read a variable.
    ///
    /// # Errors
    ///
    /// - `UninitializedVariable` if the nearest frame binding the name has
    ///   not initialized it, even when an outer frame has a value for it
    /// - `UndefinedVariable` if no frame on the chain binds the name
    pub fn get(&self, name: &Token) -> Result<Value, EnvironmentError> {
        read(self.resolve(&name.lexeme), name)
    }

    /// Read a variable in the frame exactly `distance` steps outward.
    ///
    /// This is the entry point for evaluators that resolve scopes
    /// statically; no other frame is consulted.
    pub fn get_at(&self, distance: usize, name: &Token) -> Result<Value, EnvironmentError> {
        let frame = self.ancestor_or_err(distance, name)?;
        read(frame.0.local(&name.lexeme), name)
    }

    /// Check if `name` is bound in this frame only.
    pub fn contains_local(&self, name: &str) -> bool {
        self.0.bindings.borrow().contains_key(name)
    }

    /// Check if `name` is bound anywhere on the chain.
    pub fn contains(&self, name: &str) -> bool {
        self.frames().any(|env| env.contains_local(name))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Assignment (Mutation)
    // ═══════════════════════════════════════════════════════════════════

    /// Assign to an existing variable.
    ///
    /// The value lands in the nearest frame that binds `name`; no new
    /// binding is ever created.
    ///
    /// # Errors
    ///
    /// - `UndefinedVariable` if no frame on the chain binds the name; no
    ///   frame is modified in that case
    pub fn assign(&self, name: &Token, value: Value) -> Result<(), EnvironmentError> {
        let frame = self
            .frames()
            .find(|env| env.contains_local(&name.lexeme))
            .ok_or_else(|| undefined(name))?;
        tracing::trace!(name = %name.lexeme, line = name.line, "assign");
        frame.0.overwrite(&name.lexeme, Binding::Initialized(value));
        Ok(())
    }

    /// Assign in the frame exactly `distance` steps outward.
    ///
    /// # Errors
    ///
    /// - `InvalidDepth` if the chain is shorter than `distance`
    /// - `UndefinedVariable` if that frame does not bind the name
    pub fn assign_at(
        &self,
        distance: usize,
        name: &Token,
        value: Value,
    ) -> Result<(), EnvironmentError> {
        let frame = self.ancestor_or_err(distance, name)?;
        if frame.0.overwrite(&name.lexeme, Binding::Initialized(value)) {
            Ok(())
        } else {
            Err(undefined(name))
        }
    }

    fn ancestor_or_err(
        &self,
        distance: usize,
        name: &Token,
    ) -> Result<&Environment, EnvironmentError> {
        self.ancestor(distance)
            .ok_or_else(|| EnvironmentError::InvalidDepth {
                name: name.lexeme.clone(),
                distance,
                line: name.line,
            })
    }

    // ═══════════════════════════════════════════════════════════════════
    // Iteration and Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Names bound in this frame, in definition order.
    pub fn names(&self) -> Vec<String> {
        self.0.bindings.borrow().keys().cloned().collect()
    }

    /// Number of bindings in this frame.
    pub fn len(&self) -> usize {
        self.0.bindings.borrow().len()
    }

    /// Whether this frame holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.0.bindings.borrow().is_empty()
    }
}

fn read(binding: Option<Binding>, name: &Token) -> Result<Value, EnvironmentError> {
    match binding {
        Some(Binding::Initialized(value)) => Ok(value),
        Some(Binding::Uninitialized) => Err(EnvironmentError::UninitializedVariable {
            name: name.lexeme.clone(),
            line: name.line,
        }),
        None => Err(undefined(name)),
    }
}

fn undefined(name: &Token) -> EnvironmentError {
    EnvironmentError::UndefinedVariable {
        name: name.lexeme.clone(),
        line: name.line,
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

//! Callable value types: user functions and natives

use std::fmt;
use std::rc::Rc;

use super::Value;
use crate::ast::stmt;
use crate::environment::Environment;

/// Signature of a native function body.
pub type NativeFnPtr = Rc<dyn Fn(&[Value]) -> Result<Value, String>>;

/// A user-defined function.
///
/// Holds the declaration and the environment that was current when the
/// declaration was evaluated. Holding the environment keeps that frame and
/// all of its ancestors alive for as long as the function value exists.
#[derive(Clone)]
pub struct FunctionValue {
    /// The `fun` declaration
    pub declaration: Rc<stmt::Function>,

    /// Captured defining environment
    pub closure: Environment,
}

impl FunctionValue {
    /// Create a function value capturing `closure`.
    pub fn new(declaration: Rc<stmt::Function>, closure: Environment) -> Self {
        Self {
            declaration,
            closure,
        }
    }

    /// Function name as declared.
    pub fn name(&self) -> &str {
        &self.declaration.name().lexeme
    }

    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.declaration.params().len()
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The closure may reach this function again; print only the name
        write!(f, "FunctionValue({})", self.name())
    }
}

/// A function implemented in Rust.
#[derive(Clone)]
pub struct NativeFn {
    /// Function name (for display/debugging)
    pub name: String,

    /// Exact number of arguments
    pub arity: usize,

    /// The function body
    pub func: NativeFnPtr,
}

impl NativeFn {
    /// Create a native function.
    pub fn new(
        name: impl Into<String>,
        arity: usize,
        func: impl Fn(&[Value]) -> Result<Value, String> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            func: Rc::new(func),
        }
    }

    /// Invoke the native, checking arity first.
    pub fn call(&self, args: &[Value]) -> Result<Value, String> {
        if args.len() != self.arity {
            return Err(format!(
                "{} expects {} argument(s), got {}",
                self.name,
                self.arity,
                args.len()
            ));
        }
        (self.func)(args)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFn({})", self.name)
    }
}

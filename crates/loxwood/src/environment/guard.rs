//! RAII scope guard for entering and leaving a block

use std::mem;

use super::Environment;

/// Guard that makes a fresh child frame current and restores the previous
/// frame when dropped.
///
/// The child frame itself is not destroyed on drop: any closure that
/// captured it keeps it alive.
///
/// # Example
///
/// ```
/// use loxwood::{Environment, Value};
///
/// let mut current = Environment::new();
/// current.define_value("x", Value::Number(1.0));
///
/// {
///     let guard = current.scope_guard();
///     guard.define_value("y", Value::Number(2.0));
///     assert!(guard.contains("x"));
/// }
/// // guard dropped, the outer frame is current again
/// assert!(!current.contains("y"));
/// assert!(current.contains("x"));
/// ```
pub struct ScopeGuard<'a> {
    slot: &'a mut Environment,
    previous: Environment,
}

impl Environment {
    /// Replace `self` with a new child frame until the guard is dropped.
    pub fn scope_guard(&mut self) -> ScopeGuard<'_> {
        let child = self.child();
        let previous = mem::replace(self, child);
        ScopeGuard {
            slot: self,
            previous,
        }
    }
}

impl<'a> Drop for ScopeGuard<'a> {
    fn drop(&mut self) {
        *self.slot = self.previous.clone();
    }
}

impl<'a> std::ops::Deref for ScopeGuard<'a> {
    type Target = Environment;

    fn deref(&self) -> &Self::Target {
        self.slot
    }
}

//! Frame storage: one scope level's bindings plus its fixed parent link

use std::cell::RefCell;
use std::fmt;

use indexmap::IndexMap;

use super::{Binding, Environment};

/// One lexical scope level.
///
/// The enclosing link lives outside the `RefCell`: it is set at creation
/// and there is no way to change it afterwards. Only the binding map is
/// mutable.
pub(crate) struct Frame {
    pub(crate) bindings: RefCell<IndexMap<String, Binding>>,
    pub(crate) enclosing: Option<Environment>,
}

impl Frame {
    pub(crate) fn new(enclosing: Option<Environment>) -> Self {
        Self {
            bindings: RefCell::new(IndexMap::new()),
            enclosing,
        }
    }

    /// This frame's binding for `name`, without looking outward.
    pub(crate) fn local(&self, name: &str) -> Option<Binding> {
        self.bindings.borrow().get(name).cloned()
    }

    /// Overwrite an existing binding in place. Returns false if `name` is
    /// not bound in this frame; nothing is inserted in that case.
    pub(crate) fn overwrite(&self, name: &str, binding: Binding) -> bool {
        match self.bindings.borrow_mut().get_mut(name) {
            Some(slot) => {
                *slot = binding;
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("bindings", &*self.bindings.borrow())
            .field("enclosing", &self.enclosing)
            .finish()
    }
}

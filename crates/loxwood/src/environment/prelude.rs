//! Standard prelude with built-in functions

use std::time::{SystemTime, UNIX_EPOCH};

use super::Environment;
use crate::value::{NativeFn, Value};

impl Environment {
    /// Create a root environment with the built-in functions defined.
    pub fn with_prelude() -> Self {
        let env = Self::new();
        env.load_prelude();
        env
    }

    /// Define the built-in functions in this frame.
    pub fn load_prelude(&self) {
        self.define_native(NativeFn::new("clock", 0, builtin_clock));
    }

    /// Define a native function under its own name.
    pub fn define_native(&self, native: NativeFn) {
        self.define_value(native.name.clone(), Value::Native(native));
    }
}

/// Seconds since the UNIX epoch.
fn builtin_clock(_args: &[Value]) -> Result<Value, String> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| format!("clock: {}", e))?;
    Ok(Value::Number(elapsed.as_secs_f64()))
}

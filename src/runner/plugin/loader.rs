//! Foreign loader trait for the one-time population of the `ffi` module.
//!
//! The host implements `ForeignLoader` to attach native bindings as named
//! fields of the `ffi` table. The registry runs exactly one loader, before
//! any generated code that touches `ffi` executes.

use tracing::warn;

use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::function::{Function, NativeFn};
use crate::runner::ds::table::TableRef;
use crate::runner::ds::value::Value;

/// A host-side loader that can attach foreign bindings to the `ffi` module.
pub trait ForeignLoader {
    /// Attach bindings. Returning an error aborts the binding phase and
    /// leaves the `ffi` module untouched.
    fn bind(&self, namespace: &mut ForeignNamespace) -> Result<(), RuntimeError>;

    /// Human-readable name for this loader (for logging).
    fn name(&self) -> &str;
}

/// Staging area handed to a [`ForeignLoader`]. Its contents are copied into
/// the `ffi` table only if the loader succeeds.
pub struct ForeignNamespace {
    staged: TableRef,
    names: Vec<String>,
}

impl ForeignNamespace {
    pub(crate) fn new() -> Self {
        ForeignNamespace {
            staged: TableRef::new(),
            names: Vec::new(),
        }
    }

    /// Bind a plain function pointer as `ffi.<name>`.
    pub fn bind_function(&mut self, name: &str, func: NativeFn) {
        self.bind_value(name, Value::Function(Function::native(name, func)));
    }

    /// Bind a stateful callable as `ffi.<name>`.
    pub fn bind_closure<F>(&mut self, name: &str, func: F)
    where
        F: Fn(Vec<Value>) -> Result<Value, RuntimeError> + 'static,
    {
        self.bind_value(name, Value::Function(Function::closure(name, func)));
    }

    /// Bind any value (constants, nested tables) as `ffi.<name>`.
    pub fn bind_value(&mut self, name: &str, value: Value) {
        if self.names.iter().any(|n| n == name) {
            warn!(binding = name, "foreign binding redefined");
        } else {
            self.names.push(name.to_string());
        }
        self.staged.set_field(name, value);
    }

    /// Names bound so far, in binding order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Copy the staged bindings into the real `ffi` table.
    pub(crate) fn commit(self, target: &TableRef) {
        for name in &self.names {
            target.set_field(name, self.staged.get_field(name));
        }
    }
}

/// Adapter turning a closure into a [`ForeignLoader`].
pub struct FnLoader<F> {
    name: String,
    bind: F,
}

impl<F> FnLoader<F>
where
    F: Fn(&mut ForeignNamespace) -> Result<(), RuntimeError>,
{
    pub fn new(name: impl Into<String>, bind: F) -> Self {
        FnLoader {
            name: name.into(),
            bind,
        }
    }
}

impl<F> ForeignLoader for FnLoader<F>
where
    F: Fn(&mut ForeignNamespace) -> Result<(), RuntimeError>,
{
    fn bind(&self, namespace: &mut ForeignNamespace) -> Result<(), RuntimeError> {
        (self.bind)(namespace)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

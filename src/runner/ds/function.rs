use std::fmt;
use std::rc::Rc;

use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::value::Value;

/// Signature of built-in functions compiled into the runtime.
///
/// There is no implicit receiver: a method invoked as `obj:m(...)` gets `obj`
/// as `args[0]`.
pub type NativeFn = fn(args: Vec<Value>) -> Result<Value, RuntimeError>;

/// Boxed callable for functions that carry state, such as compiled script
/// closures, foreign bindings or the seeded `math.random`.
pub type ClosureFn = Box<dyn Fn(Vec<Value>) -> Result<Value, RuntimeError>>;

pub enum FunctionKind {
    /// Direct function pointer.
    Native(NativeFn),

    /// Anything that captures state.
    Closure(ClosureFn),
}

/// A callable Lua value. Multiple return values are packed into a table by
/// the caller's generated code, so a call always yields a single `Value`.
pub struct Function {
    name: String,
    kind: FunctionKind,
}

pub type FunctionRef = Rc<Function>;

impl Function {
    pub fn native(name: impl Into<String>, func: NativeFn) -> FunctionRef {
        Rc::new(Function {
            name: name.into(),
            kind: FunctionKind::Native(func),
        })
    }

    pub fn closure<F>(name: impl Into<String>, func: F) -> FunctionRef
    where
        F: Fn(Vec<Value>) -> Result<Value, RuntimeError> + 'static,
    {
        Rc::new(Function {
            name: name.into(),
            kind: FunctionKind::Closure(Box::new(func)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FunctionKind {
        &self.kind
    }

    pub fn call(&self, args: Vec<Value>) -> Result<Value, RuntimeError> {
        match &self.kind {
            FunctionKind::Native(f) => f(args),
            FunctionKind::Closure(f) => f(args),
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            FunctionKind::Native(_) => "native",
            FunctionKind::Closure(_) => "closure",
        };
        write!(f, "Function({}, {})", self.name, kind)
    }
}

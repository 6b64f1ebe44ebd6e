//! Call sites. Lua's `obj:m(...)` is sugar for `obj.m(obj, ...)`, and the
//! same function may be called either way, so the receiver is always passed
//! positionally and never through an implicit binding.

use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::operations::prototype::lookup;
use crate::runner::ds::operations::type_conversion::type_name;
use crate::runner::ds::value::Value;

/// `f(args...)`.
pub fn call(function: &Value, args: Vec<Value>) -> Result<Value, RuntimeError> {
    match function {
        Value::Function(f) => f.call(args),
        other => Err(RuntimeError::type_mismatch(format!(
            "attempt to call a {} value",
            type_name(other)
        ))),
    }
}

/// `receiver:method_name(args...)`.
///
/// `receiver` arrives already evaluated, so whatever expression produced it
/// ran exactly once. The method is resolved through the fallback chain and
/// called with `receiver` prepended to `args`. Errors raised by the callee
/// propagate unchanged.
pub fn method_call(
    receiver: Value,
    method_name: &str,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    let method = match &receiver {
        Value::Table(t) => lookup(t, &Value::from(method_name)),
        other => {
            return Err(RuntimeError::type_mismatch(format!(
                "attempt to call method '{}' on a {} value",
                method_name,
                type_name(other)
            )))
        }
    };
    if method.is_nil() {
        return Err(RuntimeError::lookup(format!(
            "method '{}' not found on receiver or its fallback chain",
            method_name
        )));
    }
    let mut full_args = Vec::with_capacity(args.len() + 1);
    full_args.push(receiver);
    full_args.extend(args);
    call(&method, full_args)
}

//! Base functions (`print`, `tostring`, `tonumber`, `type`, `error`),
//! exposed to generated code through the `_G` module.

use crate::parser::parse_numeric_string;
use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::function::Function;
use crate::runner::ds::operations::type_conversion::{to_display_string, type_name};
use crate::runner::ds::table::TableRef;
use crate::runner::ds::value::Value;

/// Build the `_G` module table.
pub fn create() -> TableRef {
    let globals = TableRef::new();
    globals.set_field("print", Function::native("print", base_print));
    globals.set_field("tostring", Function::native("tostring", base_tostring));
    globals.set_field("tonumber", Function::native("tonumber", base_tonumber));
    globals.set_field("type", Function::native("type", base_type));
    globals.set_field("error", Function::native("error", base_error));
    globals
}

/// Render `print` arguments: `tostring` of each, tab separated.
pub fn format_args(args: &[Value]) -> String {
    args.iter()
        .map(to_display_string)
        .collect::<Vec<_>>()
        .join("\t")
}

/// `print(...)` - writes to stdout.
fn base_print(args: Vec<Value>) -> Result<Value, RuntimeError> {
    println!("{}", format_args(&args));
    Ok(Value::Nil)
}

/// `tostring(v)`
fn base_tostring(args: Vec<Value>) -> Result<Value, RuntimeError> {
    match args.first() {
        Some(v) => Ok(Value::String(to_display_string(v))),
        None => Err(RuntimeError::UndefinedArgument(
            "bad argument #1 to 'tostring' (value expected)".to_string(),
        )),
    }
}

/// `tonumber(v)` - nil when `v` is not a number or numeric string.
fn base_tonumber(args: Vec<Value>) -> Result<Value, RuntimeError> {
    Ok(match args.first() {
        Some(Value::Number(n)) => Value::Number(*n),
        Some(Value::String(s)) => parse_numeric_string(s).map_or(Value::Nil, Value::Number),
        _ => Value::Nil,
    })
}

/// `type(v)`
fn base_type(args: Vec<Value>) -> Result<Value, RuntimeError> {
    match args.first() {
        Some(v) => Ok(Value::from(type_name(v))),
        None => Err(RuntimeError::UndefinedArgument(
            "bad argument #1 to 'type' (value expected)".to_string(),
        )),
    }
}

/// `error(v)` - always fails, carrying `v` to the caller.
fn base_error(args: Vec<Value>) -> Result<Value, RuntimeError> {
    Err(raise(args.into_iter().next().unwrap_or(Value::Nil)))
}

/// The error generated code returns for a script-level `error(value)`.
pub fn raise(value: Value) -> RuntimeError {
    RuntimeError::Raised(value)
}

//! Restricted metatable support: the `setmetatable(t, {__index = base})`
//! inheritance idiom and nothing else.
//!
//! A table carries at most one fallback link. Reads that miss locally walk the
//! chain of links; writes always land on the receiver itself. There are no
//! operator, call or write hooks.

use tracing::trace;

use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::operations::type_conversion::type_name;
use crate::runner::ds::table::{TableKey, TableRef};
use crate::runner::ds::value::Value;

lazy_static! {
    pub static ref INDEX_FIELD: TableKey = TableKey::Str("__index".to_string());
}

/// `setmetatable(table, metatable)`.
///
/// `metatable` must be a table with exactly one field, `__index`, holding a
/// table. On success the fallback link is installed and `table` is returned,
/// as Lua's `setmetatable` returns its first argument.
pub fn set_fallback(table: &Value, metatable: &Value) -> Result<Value, RuntimeError> {
    let target = match table {
        Value::Table(t) => t,
        other => {
            return Err(RuntimeError::type_mismatch(format!(
                "bad argument #1 to 'setmetatable' (table expected, got {})",
                type_name(other)
            )))
        }
    };
    let metatable = match metatable {
        Value::Table(s) => s,
        other => {
            return Err(RuntimeError::unsupported_metatable(format!(
                "metatable must be a table, got {}",
                type_name(other)
            )))
        }
    };
    let fallback = fallback_target(metatable)?;
    link_fallback(target, fallback)?;
    Ok(table.clone())
}

fn fallback_target(metatable: &TableRef) -> Result<TableRef, RuntimeError> {
    let metatable = metatable.borrow();
    if metatable.key_count() != 1 {
        return Err(RuntimeError::unsupported_metatable(format!(
            "only a single '__index' field is supported, found {} fields",
            metatable.key_count()
        )));
    }
    match metatable.raw_get(&INDEX_FIELD) {
        Some(Value::Table(t)) => Ok(t.clone()),
        Some(other) => Err(RuntimeError::unsupported_metatable(format!(
            "'__index' must be a table, got {}",
            type_name(other)
        ))),
        None => {
            let field = metatable
                .keys()
                .into_iter()
                .next()
                .map(|k| k.to_value().to_string())
                .unwrap_or_default();
            Err(RuntimeError::unsupported_metatable(format!(
                "unsupported metatable field '{}'",
                field
            )))
        }
    }
}

/// Installs `fallback` as the read-miss link of `table`, replacing any
/// previous link. Refused when `table` is already reachable from
/// `fallback`, so every lookup chain terminates.
pub fn link_fallback(table: &TableRef, fallback: TableRef) -> Result<(), RuntimeError> {
    let mut cursor = Some(fallback.clone());
    while let Some(current) = cursor {
        if current.ptr_eq(table) {
            return Err(RuntimeError::unsupported_metatable(
                "fallback chain would form a cycle",
            ));
        }
        cursor = current.fallback();
    }
    trace!(table = %table.identity(), fallback = %fallback.identity(), "linked fallback table");
    table.borrow_mut().set_fallback_link(fallback);
    Ok(())
}

/// `getmetatable(t).__index`, or nil when no link is installed.
pub fn fallback_of(table: &Value) -> Value {
    match table.as_table().and_then(TableRef::fallback) {
        Some(t) => Value::Table(t),
        None => Value::Nil,
    }
}

/// `value[key]` as generated code reads it.
pub fn index(value: &Value, key: &Value) -> Result<Value, RuntimeError> {
    match value {
        Value::Table(t) => Ok(lookup(t, key)),
        other => Err(RuntimeError::type_mismatch(format!(
            "attempt to index a {} value (key '{}')",
            type_name(other),
            key
        ))),
    }
}

/// Local read first, then each fallback table in turn. A key absent along
/// the whole chain reads as nil.
pub fn lookup(table: &TableRef, key: &Value) -> Value {
    let key = match TableKey::from_value(key) {
        Some(k) => k,
        None => return Value::Nil,
    };
    let mut cursor = table.clone();
    loop {
        let next = {
            let t = cursor.borrow();
            if let Some(v) = t.raw_get(&key) {
                return v.clone();
            }
            let next = t.fallback().cloned();
            next
        };
        match next {
            Some(n) => cursor = n,
            None => return Value::Nil,
        }
    }
}

/// `value[key] = v`. Writes go to the receiver only; the fallback chain is
/// never written through.
pub fn new_index(value: &Value, key: Value, v: Value) -> Result<(), RuntimeError> {
    match value {
        Value::Table(t) => t.set(key, v),
        other => Err(RuntimeError::type_mismatch(format!(
            "attempt to index a {} value (key '{}')",
            type_name(other),
            key
        ))),
    }
}

//! The Lua table: one associative container serving as both array and
//! dictionary.
//!
//! There is no separate array part. Sequence semantics (length, `ipairs`)
//! are layered on top by probing integer keys `1, 2, ...`, see
//! [`crate::runner::ds::operations::table`]. That keeps the observable
//! behaviour independent of how the host map enumerates its keys.

use std::cell::{OnceCell, Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use uuid::Uuid;

use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::operations::type_conversion::type_name;
use crate::runner::ds::value::Value;

/// A normalised table key. Integral numbers always become `Int`, so `t[2]`
/// and `t[2.0]` address the same slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TableKey {
    Int(i64),
    /// Non-integral number, stored as raw bits for hashing. Never NaN.
    Float(u64),
    Str(String),
}

impl TableKey {
    /// The key a value addresses, or `None` when the value cannot be a key
    /// (`nil`, NaN, booleans, tables and functions).
    pub fn from_value(value: &Value) -> Option<TableKey> {
        match value {
            Value::Number(n) => Self::from_number(*n),
            Value::String(s) => Some(TableKey::Str(s.clone())),
            _ => None,
        }
    }

    pub fn from_number(n: f64) -> Option<TableKey> {
        if n.is_nan() {
            None
        } else if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
            Some(TableKey::Int(n as i64))
        } else {
            Some(TableKey::Float(n.to_bits()))
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            TableKey::Int(i) => Value::Number(*i as f64),
            TableKey::Float(bits) => Value::Number(f64::from_bits(*bits)),
            TableKey::Str(s) => Value::String(s.clone()),
        }
    }

    fn for_write(value: &Value) -> Result<TableKey, RuntimeError> {
        match value {
            Value::Nil => Err(RuntimeError::type_mismatch("table index is nil")),
            Value::Number(n) if n.is_nan() => Err(RuntimeError::type_mismatch("table index is NaN")),
            other => Self::from_value(other).ok_or_else(|| {
                RuntimeError::type_mismatch(format!(
                    "unsupported table key type '{}'",
                    type_name(other)
                ))
            }),
        }
    }
}

impl From<i64> for TableKey {
    fn from(i: i64) -> Self {
        TableKey::Int(i)
    }
}

impl From<&str> for TableKey {
    fn from(s: &str) -> Self {
        TableKey::Str(s.to_string())
    }
}

pub struct Table {
    entries: HashMap<TableKey, Value>,
    fallback: Option<TableRef>,
}

impl Table {
    pub fn new() -> Self {
        Table {
            entries: HashMap::new(),
            fallback: None,
        }
    }

    pub fn raw_get(&self, key: &TableKey) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &TableKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Stores `value` under `key`. Storing `nil` removes the key, so a present
    /// key always maps to a non-nil value.
    pub fn insert(&mut self, key: TableKey, value: Value) {
        if value.is_nil() {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, value);
        }
    }

    pub fn remove(&mut self, key: &TableKey) -> Option<Value> {
        self.entries.remove(key)
    }

    /// Number of keys present, in any position.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// Snapshot of the present keys in the host map's enumeration order.
    pub fn keys(&self) -> Vec<TableKey> {
        self.entries.keys().cloned().collect()
    }

    pub fn fallback(&self) -> Option<&TableRef> {
        self.fallback.as_ref()
    }

    pub(crate) fn set_fallback_link(&mut self, fallback: TableRef) {
        self.fallback = Some(fallback);
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

struct TableCell {
    id: OnceCell<Uuid>,
    table: RefCell<Table>,
}

/// Shared handle to a table. Cloning the handle aliases the same table, the
/// way Lua variables holding a table do.
#[derive(Clone)]
pub struct TableRef(Rc<TableCell>);

impl TableRef {
    pub fn new() -> Self {
        Self::from_table(Table::new())
    }

    pub fn from_table(table: Table) -> Self {
        TableRef(Rc::new(TableCell {
            id: OnceCell::new(),
            table: RefCell::new(table),
        }))
    }

    /// Builds `{v1, v2, ...}` keyed `1..=n`. A `nil` element leaves a hole.
    pub fn from_sequence<I: IntoIterator<Item = Value>>(values: I) -> Self {
        let mut table = Table::new();
        for (i, value) in values.into_iter().enumerate() {
            table.insert(TableKey::Int(i as i64 + 1), value);
        }
        Self::from_table(table)
    }

    /// Builds `{[k1] = v1, [k2] = v2, ...}` with keys computed at run time.
    pub fn from_entries<I: IntoIterator<Item = (Value, Value)>>(
        entries: I,
    ) -> Result<Self, RuntimeError> {
        let table = TableRef::new();
        for (key, value) in entries {
            table.set(key, value)?;
        }
        Ok(table)
    }

    pub fn borrow(&self) -> Ref<'_, Table> {
        self.0.table.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Table> {
        self.0.table.borrow_mut()
    }

    pub fn ptr_eq(&self, other: &TableRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Identity used when a table is printed. Assigned on first use.
    pub fn identity(&self) -> Uuid {
        *self.0.id.get_or_init(Uuid::new_v4)
    }

    /// Raw read of this table only; the fallback chain is not consulted.
    pub fn get(&self, key: &Value) -> Value {
        match TableKey::from_value(key) {
            Some(k) => self.get_key(&k),
            None => Value::Nil,
        }
    }

    pub fn get_key(&self, key: &TableKey) -> Value {
        self.borrow().raw_get(key).cloned().unwrap_or(Value::Nil)
    }

    /// Raw write. Fails for keys Lua rejects (`nil`, NaN) and for key types
    /// this runtime does not support.
    pub fn set(&self, key: Value, value: Value) -> Result<(), RuntimeError> {
        let key = TableKey::for_write(&key)?;
        self.borrow_mut().insert(key, value);
        Ok(())
    }

    pub fn get_field(&self, name: &str) -> Value {
        self.get_key(&TableKey::Str(name.to_string()))
    }

    pub fn set_field(&self, name: &str, value: impl Into<Value>) {
        self.borrow_mut()
            .insert(TableKey::Str(name.to_string()), value.into());
    }

    pub fn get_index(&self, index: i64) -> Value {
        self.get_key(&TableKey::Int(index))
    }

    pub fn set_index(&self, index: i64, value: impl Into<Value>) {
        self.borrow_mut().insert(TableKey::Int(index), value.into());
    }

    pub fn fallback(&self) -> Option<TableRef> {
        self.borrow().fallback().cloned()
    }
}

impl Default for TableRef {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableRef({})", self.identity())
    }
}

//! Sequence semantics on top of the single table container: the `#`
//! operator, `ipairs`, `pairs` and variadic capture.
//!
//! Iterators never keep the table borrowed between steps, so a loop body is
//! free to read and write the table it is walking.

use std::iter::FusedIterator;
use std::vec;

use crate::runner::ds::error::RuntimeError;
use crate::runner::ds::operations::type_conversion::type_name;
use crate::runner::ds::table::{TableKey, TableRef};
use crate::runner::ds::value::Value;

/// Border of a table used as an array: the count of `1..=n` all present,
/// stopping at the first missing index even if higher indices exist.
///
/// Among the borders Lua would allow for a sparse table this always picks
/// the lowest, so the answer never depends on host key order. Cost is linear
/// in the returned length.
pub fn array_len(table: &TableRef) -> usize {
    let t = table.borrow();
    let mut count = 0;
    while t.contains_key(&TableKey::Int(count as i64 + 1)) {
        count += 1;
    }
    count
}

/// The `#` operator on any value: byte length for strings, [`array_len`] for
/// tables.
pub fn length(value: &Value) -> Result<Value, RuntimeError> {
    match value {
        Value::String(s) => Ok(Value::Number(s.len() as f64)),
        Value::Table(t) => Ok(Value::Number(array_len(t) as f64)),
        other => Err(RuntimeError::type_mismatch(format!(
            "attempt to get length of a {} value",
            type_name(other)
        ))),
    }
}

/// `ipairs(t)`. Each call to `iter` (or each `for` loop over the handle)
/// starts again from index 1 with its own state.
pub fn ipairs(table: &TableRef) -> IPairs {
    IPairs {
        table: table.clone(),
    }
}

/// `pairs(t)`. Visits every present key exactly once in host map order,
/// which callers must not rely on.
pub fn pairs(table: &TableRef) -> Pairs {
    Pairs {
        table: table.clone(),
    }
}

/// Adapts a host list of extra arguments (`...`) into the table `{...}`.
pub fn array_to_table<I: IntoIterator<Item = Value>>(sequence: I) -> TableRef {
    TableRef::from_sequence(sequence)
}

#[derive(Clone)]
pub struct IPairs {
    table: TableRef,
}

impl IPairs {
    pub fn iter(&self) -> IPairsIter {
        IPairsIter {
            table: self.table.clone(),
            next_index: 1,
            finished: false,
        }
    }
}

impl IntoIterator for IPairs {
    type Item = (i64, Value);
    type IntoIter = IPairsIter;

    fn into_iter(self) -> IPairsIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a IPairs {
    type Item = (i64, Value);
    type IntoIter = IPairsIter;

    fn into_iter(self) -> IPairsIter {
        self.iter()
    }
}

pub struct IPairsIter {
    table: TableRef,
    next_index: i64,
    finished: bool,
}

impl Iterator for IPairsIter {
    type Item = (i64, Value);

    fn next(&mut self) -> Option<(i64, Value)> {
        if self.finished {
            return None;
        }
        let index = self.next_index;
        let value = self.table.get_index(index);
        if value.is_nil() {
            self.finished = true;
            None
        } else {
            self.next_index += 1;
            Some((index, value))
        }
    }
}

impl FusedIterator for IPairsIter {}

#[derive(Clone)]
pub struct Pairs {
    table: TableRef,
}

impl Pairs {
    /// Starts a walk over the keys present right now. Keys removed while the
    /// walk is in progress are skipped.
    pub fn iter(&self) -> PairsIter {
        let keys = self.table.borrow().keys();
        PairsIter {
            table: self.table.clone(),
            keys: keys.into_iter(),
        }
    }
}

impl IntoIterator for Pairs {
    type Item = (Value, Value);
    type IntoIter = PairsIter;

    fn into_iter(self) -> PairsIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a Pairs {
    type Item = (Value, Value);
    type IntoIter = PairsIter;

    fn into_iter(self) -> PairsIter {
        self.iter()
    }
}

pub struct PairsIter {
    table: TableRef,
    keys: vec::IntoIter<TableKey>,
}

impl Iterator for PairsIter {
    type Item = (Value, Value);

    fn next(&mut self) -> Option<(Value, Value)> {
        loop {
            let key = self.keys.next()?;
            let value = self.table.get_key(&key);
            if !value.is_nil() {
                return Some((key.to_value(), value));
            }
        }
    }
}

impl FusedIterator for PairsIter {}

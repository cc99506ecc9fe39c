//! Array mutation on a field's value sequence.
//!
//! These work on a bare `Vec<Value>`. The graph-aware versions on
//! [`Rsz`](crate::Rsz) address arrays by owner and field and keep the
//! instance list consistent.

use crate::error::EditError;
use crate::value::Value;

/// What duplicating a reference element produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicateMode {
    /// Insert the same reference again; edits to one copy show in all.
    #[default]
    Alias,
    /// Insert a reference to a fresh copy of the referenced subtree.
    DeepClone,
}

/// Insert `value` at `index`, or append when `index` is `None`.
///
/// Returns the index the value landed at.
pub fn insert_item(
    values: &mut Vec<Value>,
    value: Value,
    index: Option<usize>,
) -> Result<usize, EditError> {
    let len = values.len();
    let index = index.unwrap_or(len);
    if index > len {
        return Err(EditError::IndexOutOfBounds { index, len });
    }
    values.insert(index, value);
    Ok(index)
}

/// Remove the first element equal to `value`. Absent values are ignored.
pub fn remove_item(values: &mut Vec<Value>, value: &Value) -> bool {
    match values.iter().position(|v| v == value) {
        Some(pos) => {
            values.remove(pos);
            true
        }
        None => false,
    }
}

/// Insert `times` copies of the element at `index` right after it.
pub fn duplicate_item(values: &mut Vec<Value>, index: usize, times: usize) -> Result<(), EditError> {
    let item = values
        .get(index)
        .cloned()
        .ok_or(EditError::IndexOutOfBounds {
            index,
            len: values.len(),
        })?;
    for _ in 0..times {
        values.insert(index + 1, item.clone());
    }
    Ok(())
}

//! Row values for an upsert batch.
//!
//! A column in a [`Row`] is in one of three states:
//!
//! - **absent**: the key was never set ([`Row::get`] returns `None`)
//! - **use default**: the key is present with [`Cell::UseDefault`]
//! - **value**: the key is present with [`Cell::Value`], which may itself be a SQL NULL
//!
//! Absent and use-default cells both render as `DEFAULT`. They differ only
//! under [`MissingKeyPolicy::Throw`](crate::MissingKeyPolicy::Throw), which
//! counts present keys.

use crate::error::{UpsertError, UpsertResult};

/// The value stored for a present column.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<V> {
    /// Treat the column as not supplied; renders as `DEFAULT`.
    UseDefault,
    /// A concrete value, bound as a parameter.
    Value(V),
}

impl<V> Cell<V> {
    /// Check if this is the use-default marker.
    pub fn is_default(&self) -> bool {
        matches!(self, Self::UseDefault)
    }

    /// The concrete value, if any.
    pub fn value(&self) -> Option<&V> {
        match self {
            Self::UseDefault => None,
            Self::Value(v) => Some(v),
        }
    }
}

impl<V> From<Option<V>> for Cell<V> {
    /// `None` becomes the use-default marker.
    fn from(value: Option<V>) -> Self {
        match value {
            Some(v) => Self::Value(v),
            None => Self::UseDefault,
        }
    }
}

/// One row of an upsert batch: column name to [`Cell`], in insertion order.
///
/// Key order matters: the statement's column list follows the order in which
/// columns are first seen across the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<V> {
    cells: Vec<(String, Cell<V>)>,
}

impl<V> Default for Row<V> {
    fn default() -> Self {
        Self { cells: Vec::new() }
    }
}

impl<V> Row<V> {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column to a concrete value.
    pub fn set(self, column: impl Into<String>, value: V) -> Self {
        self.set_cell(column, Cell::Value(value))
    }

    /// Mark a column as present but not supplied (`DEFAULT`).
    pub fn use_default(self, column: impl Into<String>) -> Self {
        self.set_cell(column, Cell::UseDefault)
    }

    /// Set a column to a cell. A column set twice keeps its first position.
    pub fn set_cell(mut self, column: impl Into<String>, cell: Cell<V>) -> Self {
        self.insert(column.into(), cell);
        self
    }

    /// In-place counterpart of [`Row::set_cell`].
    pub fn insert(&mut self, column: String, cell: Cell<V>) {
        match self.cells.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = cell,
            None => self.cells.push((column, cell)),
        }
    }

    /// Look up a column. `None` means the key is absent.
    pub fn get(&self, column: &str) -> Option<&Cell<V>> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, cell)| cell)
    }

    /// Whether the key is present, regardless of its cell.
    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Present keys in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    /// Number of present keys, including use-default cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cell<V>)> {
        self.cells.iter().map(|(name, cell)| (name.as_str(), cell))
    }
}

impl<K: Into<String>, V> FromIterator<(K, Cell<V>)> for Row<V> {
    fn from_iter<I: IntoIterator<Item = (K, Cell<V>)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, cell) in iter {
            row.insert(column.into(), cell);
        }
        row
    }
}

impl Row<serde_json::Value> {
    /// Build a row from a JSON object.
    ///
    /// Every key becomes a [`Cell::Value`]; JSON `null` is a SQL NULL, never
    /// the use-default marker. Key order follows the map's iteration order.
    pub fn from_json(object: serde_json::Map<String, serde_json::Value>) -> Self {
        object
            .into_iter()
            .map(|(column, value)| (column, Cell::Value(value)))
            .collect()
    }
}

impl TryFrom<serde_json::Value> for Row<serde_json::Value> {
    type Error = UpsertError;

    fn try_from(value: serde_json::Value) -> UpsertResult<Self> {
        match value {
            serde_json::Value::Object(object) => Ok(Row::from_json(object)),
            other => Err(UpsertError::InvalidRow(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }
}

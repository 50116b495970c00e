use ndarray::Array1;
use std::cmp::Ordering;
use std::fmt;


pub mod error;
mod impl_table;

pub use error::{Result, TableError};


/// A single cell of a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Two values belong to the same level when they compare equal, with all
    /// NaNs collapsed into a single level.
    pub fn same_level(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Text(a), Value::Text(b)) => a == b,
            _ => false,
        }
    }

    /// Ordering used to lay out categories: text lexicographically, numbers
    /// ascending with NaN last.
    pub fn level_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => match (a.is_nan(), b.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            },
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Number(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Number(_)) => Ordering::Greater,
        }
    }

    /// The hashable key of the level this value belongs to.
    pub fn level_key(&self) -> LevelKey<'_> {
        match self {
            Value::Number(x) => LevelKey::number(*x),
            Value::Text(s) => LevelKey::Text(s.as_str()),
        }
    }
}

/// A borrowed, hashable identity for a level. Numbers are keyed by their bit
/// pattern with `-0.0` folded into `0.0` and every NaN folded into one key, so
/// that two keys are equal exactly when [`Value::same_level`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LevelKey<'a> {
    Number(u64),
    Text(&'a str),
}

impl<'a> LevelKey<'a> {
    pub fn number(x: f64) -> LevelKey<'a> {
        if x.is_nan() {
            LevelKey::Number(f64::NAN.to_bits())
        } else if x == 0. {
            LevelKey::Number(0f64.to_bits())
        } else {
            LevelKey::Number(x.to_bits())
        }
    }

    /// Whether this key stands for a missing (NaN) numeric cell.
    pub fn is_missing(&self) -> bool {
        matches!(self, LevelKey::Number(bits) if f64::from_bits(*bits).is_nan())
    }

    pub fn to_value(&self) -> Value {
        match self {
            LevelKey::Number(bits) => Value::Number(f64::from_bits(*bits)),
            LevelKey::Text(s) => Value::Text(s.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// The values held by a column. Numeric columns are stored contiguously so
/// that they can be stacked into a design matrix without conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Array1<f64>),
    Nominal(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(values) => values.len(),
            ColumnData::Nominal(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnData::Numeric(_))
    }

    /// Returns the cell at position `i`, or `None` when out of bounds.
    pub fn get(&self, i: usize) -> Option<Value> {
        match self {
            ColumnData::Numeric(values) => values.get(i).map(|&x| Value::Number(x)),
            ColumnData::Nominal(values) => values.get(i).map(|s| Value::Text(s.clone())),
        }
    }

    /// Iterates over the level keys of the cells in row order, without
    /// copying text.
    pub fn level_keys(&self) -> Box<dyn Iterator<Item = LevelKey<'_>> + '_> {
        match self {
            ColumnData::Numeric(values) => Box::new(values.iter().map(|&x| LevelKey::number(x))),
            ColumnData::Nominal(values) => Box::new(values.iter().map(|s| LevelKey::Text(s.as_str()))),
        }
    }

    fn take(&self, positions: &[usize]) -> ColumnData {
        match self {
            ColumnData::Numeric(values) => {
                ColumnData::Numeric(positions.iter().map(|&i| values[i]).collect())
            }
            ColumnData::Nominal(values) => {
                ColumnData::Nominal(positions.iter().map(|&i| values[i].clone()).collect())
            }
        }
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric<S: Into<String>>(name: S, values: Vec<f64>) -> Column {
        Column {
            name: name.into(),
            data: ColumnData::Numeric(Array1::from(values)),
        }
    }

    pub fn nominal<S: Into<String>, V: Into<String>>(name: S, values: Vec<V>) -> Column {
        Column {
            name: name.into(),
            data: ColumnData::Nominal(values.into_iter().map(Into::into).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An in-memory record table
///
/// Columns are ordered and uniquely named, and all have the same length. Each
/// row carries an index entry giving it an identity that survives column
/// operations and row filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    index: Vec<usize>,
}

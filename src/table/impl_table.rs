use super::{Column, ColumnData, Result, Table, TableError, Value};
use ndarray::{Array2, ArrayView1, Axis};
use std::collections::HashSet;

/// This implementation block provides the constructors and accessors.
impl Table {
    /// Builds a table whose index is `0..n_rows`.
    pub fn new(columns: Vec<Column>) -> Result<Table> {
        let n_rows = columns.first().map_or(0, Column::len);
        Table::with_index(columns, (0..n_rows).collect())
    }

    /// Builds a table with an explicit row index.
    pub fn with_index(columns: Vec<Column>, index: Vec<usize>) -> Result<Table> {
        let mut seen = HashSet::new();
        for column in columns.iter() {
            if !seen.insert(column.name.as_str()) {
                return Err(TableError::DuplicateColumn(column.name.clone()));
            }
            if column.len() != index.len() {
                return Err(TableError::LengthMismatch {
                    name: column.name.clone(),
                    expected: index.len(),
                    found: column.len(),
                });
            }
        }
        Ok(Table { columns, index })
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Returns a view on a numeric column.
    pub fn numeric_column(&self, name: &str) -> Result<ArrayView1<f64>> {
        match &self.column(name)?.data {
            ColumnData::Numeric(values) => Ok(values.view()),
            ColumnData::Nominal(_) => Err(TableError::NotNumeric(name.to_string())),
        }
    }

    /// Returns the cell at the `row`-th position (not index label).
    pub fn value(&self, row: usize, name: &str) -> Result<Option<Value>> {
        Ok(self.column(name)?.data.get(row))
    }
}

/// This implementation block provides the column and row operations.
impl Table {
    /// Keeps the named columns, in the order given.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let columns = names
            .iter()
            .map(|name| self.column(name.as_ref()).cloned())
            .collect::<Result<Vec<_>>>()?;
        Table::with_index(columns, self.index.clone())
    }

    /// Removes the named columns. Every name must exist.
    pub fn drop_columns<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        for name in names {
            self.column(name.as_ref())?;
        }
        let columns = self
            .columns
            .iter()
            .filter(|c| !names.iter().any(|name| name.as_ref() == c.name))
            .cloned()
            .collect();
        Ok(Table {
            columns,
            index: self.index.clone(),
        })
    }

    /// Keeps the rows for which `predicate` holds, given the row position.
    /// Index entries of the kept rows are carried over unchanged.
    pub fn filter_rows<P: FnMut(usize) -> bool>(&self, mut predicate: P) -> Table {
        let positions: Vec<usize> = (0..self.n_rows()).filter(|&i| predicate(i)).collect();
        self.take_rows(&positions)
    }

    /// Builds a table made of the rows at `positions`, in that order.
    pub fn take_rows(&self, positions: &[usize]) -> Table {
        Table {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    data: c.data.take(positions),
                })
                .collect(),
            index: positions.iter().map(|&i| self.index[i]).collect(),
        }
    }

    /// Appends the columns of `other` to the right of this table. Both tables
    /// must share the same row index.
    pub fn concat_columns(&self, other: &Table) -> Result<Table> {
        if self.index != other.index {
            return Err(TableError::IndexMismatch);
        }
        let mut columns = self.columns.clone();
        columns.extend(other.columns.iter().cloned());
        Table::with_index(columns, self.index.clone())
    }

    /// Stacks the named numeric columns into a `(n_rows, names.len())` matrix.
    pub fn to_matrix<S: AsRef<str>>(&self, names: &[S]) -> Result<Array2<f64>> {
        let mut X = Array2::<f64>::zeros((self.n_rows(), names.len()));
        for (j, name) in names.iter().enumerate() {
            let values = self.numeric_column(name.as_ref())?;
            X.index_axis_mut(Axis(1), j).assign(&values);
        }
        Ok(X)
    }
}

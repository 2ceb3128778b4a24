//! In-memory tabular data shared by every pipeline stage.
//!
//! A [`Table`] is an ordered list of column names plus rows of JSON cells.
//! Cells are `Value::Null`, `Value::String` or `Value::Number`; a cell is
//! *absent* when it is null or a blank string (see [`is_absent`]).
//!
//! ```text
//! columns: ["submission_id", "player_num", "name", "hero"]
//! rows:    [["1", 1, "Alice", "Thor"],
//!           ["1", 2, "Bob",   "Hulk"]]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use crate::error::{TableError, TableResult};

/// One table row, positionally aligned with [`Table::columns`].
pub type Row = Vec<Value>;

/// Column-ordered table of JSON cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Create a table from columns and rows, checking every row's width.
    pub fn from_rows<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: Vec<Row>,
    ) -> TableResult<Self> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Position of a column, failing fast with the missing name.
    pub fn column_index(&self, name: &str) -> TableResult<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Append a row. The row must have one cell per column.
    pub fn push_row(&mut self, row: Row) -> TableResult<()> {
        if row.len() != self.columns.len() {
            return Err(TableError::ShapeMismatch {
                row: self.rows.len(),
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// All cells of one column, in row order.
    pub fn column_values(&self, name: &str) -> TableResult<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Replace the column names, keeping the rows.
    pub fn with_columns(mut self, columns: Vec<String>) -> TableResult<Self> {
        if columns.len() != self.columns.len() {
            return Err(TableError::ShapeMismatch {
                row: 0,
                expected: self.columns.len(),
                found: columns.len(),
            });
        }
        self.columns = columns;
        Ok(self)
    }

    /// Keep only the named columns, in the order given.
    pub fn select(&self, names: &[&str]) -> TableResult<Table> {
        let indices = names
            .iter()
            .map(|n| self.column_index(n))
            .collect::<TableResult<Vec<_>>>()?;

        Ok(Table {
            columns: names.iter().map(|n| n.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        })
    }

    /// Remove one column.
    pub fn drop_column(&self, name: &str) -> TableResult<Table> {
        let idx = self.column_index(name)?;
        let mut out = self.clone();
        out.columns.remove(idx);
        for row in &mut out.rows {
            row.remove(idx);
        }
        Ok(out)
    }

    /// Remove exact-duplicate rows, keeping the first occurrence.
    pub fn drop_duplicates(&self) -> Table {
        let mut seen = HashSet::new();
        let rows = self
            .rows
            .iter()
            .filter(|row| seen.insert(row_key(row)))
            .cloned()
            .collect();

        Table {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Left join on a shared key column.
    ///
    /// Every left row is kept exactly once. Right columns other than the key
    /// are appended (suffixed with `_right` on a name clash) and filled with
    /// `Null` when no right row carries the key. Null keys never match.
    pub fn left_join(&self, right: &Table, key: &str) -> TableResult<Table> {
        let left_key = self.column_index(key)?;
        let right_key = right.column_index(key)?;

        let mut lookup: HashMap<String, usize> = HashMap::new();
        for (i, row) in right.rows.iter().enumerate() {
            let Some(k) = as_text(&row[right_key]) else {
                continue;
            };
            if lookup.contains_key(&k) {
                log::warn!(
                    "Duplicate join key '{}' on the right side of a join; keeping the first row",
                    k
                );
                continue;
            }
            lookup.insert(k, i);
        }

        let right_cols: Vec<usize> = (0..right.columns.len()).filter(|&i| i != right_key).collect();

        let mut columns = self.columns.clone();
        for &i in &right_cols {
            let name = &right.columns[i];
            if self.has_column(name) {
                columns.push(format!("{}_right", name));
            } else {
                columns.push(name.clone());
            }
        }

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let matched = as_text(&row[left_key]).and_then(|k| lookup.get(&k).copied());
                let mut out = row.clone();
                for &i in &right_cols {
                    out.push(match matched {
                        Some(r) => right.rows[r][i].clone(),
                        None => Value::Null,
                    });
                }
                out
            })
            .collect();

        Ok(Table { columns, rows })
    }

    /// Rows as JSON objects keyed by column name.
    pub fn to_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let obj: Map<String, Value> = self
                    .columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect();
                Value::Object(obj)
            })
            .collect()
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }
}

/// Check if a cell is "absent" (null or blank string).
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Text form of a scalar cell. `None` for null, arrays and objects.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numeric form of a cell; numeric strings are parsed.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn row_key(row: &Row) -> String {
    Value::Array(row.clone()).to_string()
}

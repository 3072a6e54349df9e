//! Row-Oriented Transaction Table

use crate::{Record, TableError, Value};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered rows over a fixed, ordered column set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Column names in display order
    columns: Vec<String>,
    /// One value per column in every row
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create an empty table with the given columns
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Result<Self, TableError> {
        let mut names: Vec<String> = Vec::new();
        for column in columns {
            let column = column.into();
            if names.contains(&column) {
                return Err(TableError::DuplicateColumn(column));
            }
            names.push(column);
        }
        Ok(Self {
            columns: names,
            rows: Vec::new(),
        })
    }

    /// Create a table and fill it with rows
    pub fn from_rows<S: Into<String>>(
        columns: impl IntoIterator<Item = S>,
        rows: impl IntoIterator<Item = Vec<Value>>,
    ) -> Result<Self, TableError> {
        let mut table = Self::new(columns)?;
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append a row; its width must match the column count
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::RaggedRow {
                row: self.rows.len(),
                reason: format!("expected {} values, got {}", self.columns.len(), row.len()),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column
    pub fn column_index(&self, name: &str) -> Result<usize, TableError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    /// Cells of a single column, top to bottom
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Value> + '_, TableError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Iterate rows as value slices in column order
    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Single cell lookup
    pub fn value(&self, row: usize, column: &str) -> Result<Option<&Value>, TableError> {
        let idx = self.column_index(column)?;
        Ok(self.rows.get(row).map(|r| &r[idx]))
    }

    /// Materialize a row as a record
    pub fn row(&self, index: usize) -> Option<Record> {
        self.rows.get(index).map(|row| {
            self.columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect()
        })
    }

    /// Add a derived column, or replace an existing one in place
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<Value>,
    ) -> Result<Self, TableError> {
        let name = name.into();
        if values.len() != self.rows.len() {
            return Err(TableError::LengthMismatch {
                column: name,
                expected: self.rows.len(),
                actual: values.len(),
            });
        }

        match self.columns.iter().position(|c| *c == name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name);
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(self)
    }

    /// Build a table from a JSON array of objects.
    ///
    /// Columns come from the first object; every later object must carry
    /// the same key set.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, TableError> {
        let items = json
            .as_array()
            .ok_or_else(|| TableError::InvalidJson("table must be a JSON array".to_string()))?;

        let Some(first) = items.first() else {
            return Ok(Table::default());
        };
        let first = first
            .as_object()
            .ok_or_else(|| TableError::InvalidJson("row 0 is not an object".to_string()))?;
        let mut table = Table::new(first.keys().cloned())?;

        for (i, item) in items.iter().enumerate() {
            let object = item
                .as_object()
                .ok_or_else(|| TableError::InvalidJson(format!("row {} is not an object", i)))?;
            if object.len() != table.columns.len() {
                return Err(TableError::RaggedRow {
                    row: i,
                    reason: format!("expected {} fields, got {}", table.columns.len(), object.len()),
                });
            }

            let mut row = Vec::with_capacity(table.columns.len());
            for column in &table.columns {
                let cell = object.get(column).ok_or_else(|| TableError::RaggedRow {
                    row: i,
                    reason: format!("missing field {}", column),
                })?;
                row.push(Value::try_from(cell.clone())?);
            }
            table.rows.push(row);
        }
        Ok(table)
    }
}

/// Rows as a list of objects keyed by column name.
///
/// Timestamp cells become strings. Deserializing gives them back as
/// [`Value::Str`], so a round trip keeps the text but not the cell type.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&RowRef {
                columns: &self.columns,
                row,
            })?;
        }
        seq.end()
    }
}

struct RowRef<'a> {
    columns: &'a [String],
    row: &'a [Value],
}

impl Serialize for RowRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.columns.iter().zip(self.row) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Reads a list of objects through [`Table::from_json`]. Strings stay
/// strings, including ones written from timestamp cells.
impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = serde_json::Value::deserialize(deserializer)?;
        Table::from_json(&json).map_err(serde::de::Error::custom)
    }
}

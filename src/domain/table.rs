use serde_json::Value;
use thiserror::Error;

/// A single spreadsheet cell. Unformatted sheet values are strings, numbers, booleans or empty.
pub type CellValue = Value;

/// Rows of named fields, as fetched from a spreadsheet. Every row is exactly as wide as the header.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, TableError> {
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != columns.len()) {
            return Err(TableError::RowWidth {
                row: index + 1,
                expected: columns.len(),
                actual: row.len(),
            });
        }

        Ok(Table { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Returns a new table with `values` as column `name`. An existing column with that name is replaced in place,
    /// otherwise the column is appended.
    pub fn with_column(&self, name: &str, values: Vec<CellValue>) -> Result<Table, TableError> {
        if values.len() != self.rows.len() {
            return Err(TableError::ColumnLength {
                column: name.to_string(),
                expected: self.rows.len(),
                actual: values.len(),
            });
        }

        let mut columns = self.columns.clone();
        let index = self.column_index(name);
        if index.is_none() {
            columns.push(name.to_string());
        }

        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, value)| {
                let mut row = row.clone();
                match index {
                    Some(index) => row[index] = value,
                    None => row.push(value),
                }
                row
            })
            .collect();

        Ok(Table { columns, rows })
    }
}

/// Renders a cell the way a spreadsheet shows it: text as-is, numbers in shortest form and empty cells as nothing.
pub fn display_cell(value: &CellValue) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum TableError {
    #[error("row {row} has {actual} cells, expected {expected}")]
    RowWidth { row: usize, expected: usize, actual: usize },
    #[error("column '{column}' has {actual} values, expected {expected}")]
    ColumnLength { column: String, expected: usize, actual: usize },
}

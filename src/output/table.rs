//! In-memory result table with a header unioned across records

use crate::output::traits::IntoRecord;
use indexmap::{IndexMap, IndexSet};

/// One row: field name to cell text, in insertion order
pub type Record = IndexMap<String, String>;

/// Ordered rows of one record type plus the union of their keys
///
/// Columns appear in the order keys are first seen across all rows. A row
/// that lacks a column renders an empty cell there.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    columns: IndexSet<String>,
    rows: Vec<Record>,
}

impl ResultTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from typed records, preserving their order
    pub fn from_records<I, T>(records: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: IntoRecord,
    {
        let mut table = Self::new();
        for record in records {
            table.push(record.into_record());
        }
        table
    }

    /// Appends a row, extending the header with any unseen keys
    pub fn push(&mut self, record: Record) {
        for key in record.keys() {
            if !self.columns.contains(key) {
                self.columns.insert(key.clone());
            }
        }
        self.rows.push(record);
    }

    /// Header in first-seen order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Rows in insertion order
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of one row aligned to the header; missing keys become ""
    pub fn aligned_row<'a>(&'a self, row: &'a Record) -> Vec<&'a str> {
        self.columns
            .iter()
            .map(|column| row.get(column).map(String::as_str).unwrap_or(""))
            .collect()
    }
}

impl<T: IntoRecord> FromIterator<T> for ResultTable {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}

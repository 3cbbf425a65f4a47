//! Numeric table ingestion.
//!
//! Reads a headed delimited-text file into an indexed numeric table.
//! The engine only ever needs random access by row index and column
//! lookup by name, so the table is fully materialised up front and
//! immutable afterwards.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::IoError;

/// An immutable, fully materialised numeric table.
///
/// # Examples
///
/// ```
/// use nmc_io::NumericTable;
///
/// let data = "time,rate\n0.0,0.03\n0.5,0.031\n";
/// let table = NumericTable::from_reader(data.as_bytes()).unwrap();
///
/// assert_eq!(table.n_rows(), 2);
/// assert_eq!(table.value(1, "rate"), Some(0.031));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NumericTable {
    headers: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl NumericTable {
    /// Reads a table from any delimited-text source with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`] on read failures, malformed records, or
    /// non-numeric cells.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IoError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (row_idx, record) in csv_reader.records().enumerate() {
            let record = record?;
            let mut row = Vec::with_capacity(headers.len());
            for (col_idx, cell) in record.iter().enumerate() {
                let value = cell.trim().parse::<f64>().map_err(|_| {
                    IoError::MalformedNumber {
                        row: row_idx,
                        column: headers
                            .get(col_idx)
                            .cloned()
                            .unwrap_or_else(|| col_idx.to_string()),
                        value: cell.to_string(),
                    }
                })?;
                row.push(value);
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Reads a table from a file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, IoError> {
        Self::from_reader(File::open(path)?)
    }

    /// Number of data rows.
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    #[inline]
    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }

    /// Column headers, in file order.
    #[inline]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of the column named `name`, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Row at `index`, if in range.
    #[inline]
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Value at `(row, column-name)`, if both exist.
    pub fn value(&self, row: usize, column: &str) -> Option<f64> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col).copied()
    }
}

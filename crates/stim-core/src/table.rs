//! In-memory trial table backed by plain ordered rows, with CSV persistence.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::errors::{ErrorInfo, StimError};

fn csv_error(code: &str, err: impl ToString) -> StimError {
    StimError::Csv(ErrorInfo::new(code, err.to_string()))
}

/// Ordered collection of rows sharing one header.
///
/// Cells are kept as the raw text read from disk so that columns the tools
/// never touch are written back byte for byte. An empty cell is treated as a
/// missing value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrialTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TrialTable {
    /// Creates an empty table with the given header.
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Builds a table from a header and row data, checking row widths.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, StimError> {
        let mut table = Self::new(headers);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header (case-sensitive).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Raw cell text, `None` when the cell is empty.
    pub fn value(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .filter(|cell| !cell.is_empty())
    }

    /// Appends a row; its width must match the header.
    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), StimError> {
        if row.len() != self.headers.len() {
            return Err(StimError::Csv(
                ErrorInfo::new("stim.row_width", "row width does not match header")
                    .with_context("expected", self.headers.len().to_string())
                    .with_context("found", row.len().to_string())
                    .with_context("row", self.rows.len().to_string()),
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Replaces the named column in place, or appends it when absent.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) -> Result<(), StimError> {
        if values.len() != self.rows.len() {
            return Err(StimError::Csv(
                ErrorInfo::new("stim.column_length", "column length does not match row count")
                    .with_context("column", name)
                    .with_context("expected", self.rows.len().to_string())
                    .with_context("found", values.len().to_string()),
            ));
        }
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.headers.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }

    /// Copies the rows at `indices`, in that order, into a new table.
    pub fn select(&self, indices: &[usize]) -> TrialTable {
        TrialTable {
            headers: self.headers.clone(),
            rows: indices
                .iter()
                .filter_map(|&idx| self.rows.get(idx).cloned())
                .collect(),
        }
    }

    /// Parses CSV text with a header row from any reader.
    ///
    /// Records shorter than the header are padded with empty (missing)
    /// cells; records longer than the header are rejected.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StimError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr
            .headers()
            .map_err(|err| csv_error("stim.csv_header", err))?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let width = headers.len();
        let mut table = Self::new(headers);
        for record in rdr.records() {
            let record = record.map_err(|err| csv_error("stim.csv_record", err))?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            if row.len() < width {
                row.resize(width, String::new());
            }
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Writes the header and every row as CSV.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), StimError> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.headers)
            .map_err(|err| csv_error("stim.csv_write", err))?;
        for row in &self.rows {
            wtr.write_record(row)
                .map_err(|err| csv_error("stim.csv_write", err))?;
        }
        wtr.flush().map_err(|err| csv_error("stim.csv_write", err))
    }
}

/// Loads a CSV file into a [`TrialTable`].
pub fn read_csv(path: &Path) -> Result<TrialTable, StimError> {
    let file = File::open(path).map_err(|err| StimError::from_io("stim.csv_open", path, err))?;
    TrialTable::from_reader(file).map_err(|err| with_path(err, path))
}

/// Writes a [`TrialTable`] to `path`, creating parent directories as needed.
pub fn write_csv(table: &TrialTable, path: &Path) -> Result<(), StimError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|err| StimError::from_io("stim.output_dir", parent, err))?;
    }
    let file =
        File::create(path).map_err(|err| StimError::from_io("stim.csv_create", path, err))?;
    table.to_writer(file).map_err(|err| with_path(err, path))
}

fn with_path(err: StimError, path: &Path) -> StimError {
    match err {
        StimError::Csv(info) => StimError::Csv(info.with_context("path", path.display().to_string())),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TrialTable {
        TrialTable::from_reader("id,word\n1,alpha\n2,\n3,gamma\n".as_bytes()).unwrap()
    }

    #[test]
    fn empty_cells_read_as_missing() {
        let table = sample();
        assert_eq!(table.value(0, 1), Some("alpha"));
        assert_eq!(table.value(1, 1), None);
        assert_eq!(table.value(9, 1), None);
    }

    #[test]
    fn set_column_replaces_existing() {
        let mut table = sample();
        table
            .set_column("word", vec!["x".into(), "y".into(), "z".into()])
            .unwrap();
        assert_eq!(table.headers(), ["id", "word"]);
        assert_eq!(table.value(1, 1), Some("y"));
    }

    #[test]
    fn rows_longer_than_header_are_rejected() {
        let err = TrialTable::from_reader("a,b\n1,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, StimError::Csv(_)));
    }
}

//! In-memory CSV table
//!
//! Cells are kept as the raw text read from disk, so columns the forecaster
//! does not touch are written back exactly as they came in.

use crate::error::{ForecastError, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Tokens read as a missing value (the usual data frame NA set)
const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "#N/A", "#N/A N/A", "#NA", "n/a", "NaN", "nan", "-NaN", "-nan",
    "-1.#IND", "-1.#QNAN", "1.#IND", "1.#QNAN", "NULL", "null", "None", "<NA>",
];

/// Header row plus data rows, all as text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self { headers, rows: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by exact header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Index of a column that must be present
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| ForecastError::MissingColumn {
            column: name.to_string(),
        })
    }

    /// Parse one cell of a numeric column
    ///
    /// Missing tokens and NaN give `Ok(None)`; anything else that is not a number
    /// is an error carrying the 1-based data row.
    pub fn numeric_cell(&self, row: usize, col: usize) -> Result<Option<f64>> {
        let raw = self.rows[row][col].as_str();
        parse_numeric(raw).ok_or_else(|| ForecastError::InvalidNumber {
            row: row + 1,
            column: self.headers[col].clone(),
            value: raw.to_string(),
        })
    }

    /// Replace an existing column with `values`, or append it
    ///
    /// `values` must have one entry per row.
    pub fn set_column(&mut self, name: &str, values: Vec<String>) {
        debug_assert_eq!(values.len(), self.rows.len());
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
    }
}

/// `Some(None)` for a missing cell, `Some(Some(x))` for a number, `None` if invalid
fn parse_numeric(raw: &str) -> Option<Option<f64>> {
    let trimmed = raw.trim();
    if MISSING_TOKENS.contains(&trimmed) {
        return Some(None);
    }
    let value: f64 = trimmed.parse().ok()?;
    if value.is_nan() {
        Some(None)
    } else {
        Some(Some(value))
    }
}

/// Format a number the way it is written to the output file
///
/// Shortest round-trip text with at least one fractional digit (`110.0`, `0.1`).
/// Exponents carry a sign and at least two digits (`5e-05`, `1e+16`).
pub fn format_number(value: Option<f64>) -> String {
    let Some(v) = value else {
        return String::new();
    };
    let text = format!("{:?}", v);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

/// Load a CSV file with a header row
pub fn read_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ForecastError::io(path, e))?;
    read_table_from_reader(file)
}

/// Load a CSV table from any reader
///
/// Rows shorter than the header are padded with empty (missing) cells; rows
/// with more fields than the header are rejected.
pub fn read_table_from_reader<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut table = Table::new(headers);

    for result in rdr.records() {
        let record = result?;
        let width = table.headers.len();
        if record.len() > width {
            return Err(ForecastError::RaggedRow {
                row: table.rows.len() + 1,
                expected: width,
                found: record.len(),
            });
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(width, String::new());
        table.rows.push(row);
    }

    Ok(table)
}

/// Serialize a table to CSV, header first, no row index
pub fn write_table_to_writer<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush().map_err(|e| ForecastError::Csv(e.into()))?;
    Ok(())
}

/// Write a table to `path`, replacing any existing file
///
/// The whole file is rendered in memory first so a serialization failure
/// never leaves a half-written output behind.
pub fn write_table(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut buffer = Vec::new();
    write_table_to_writer(table, &mut buffer)?;
    std::fs::write(path, buffer).map_err(|e| ForecastError::io(path, e))
}

//! Loading of packet-level result CSVs.
//!
//! Datasets are kept loosely typed: a header index plus raw string records.
//! Which columns mean anything is decided by schema detection, not by a
//! fixed struct, because the column set varies across experiment
//! generations.

use std::collections::HashMap;
use std::path::Path;

use csv::StringRecord;

use crate::error::EvalError;

/// One loaded tabular dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<StringRecord>,
}

impl Dataset {
    /// Read a CSV file with a header row.
    ///
    /// A missing file is `MissingData`; an unreadable or syntactically broken
    /// file is reported against its path.
    pub fn from_path(path: &Path) -> Result<Self, EvalError> {
        if !path.exists() {
            return Err(EvalError::MissingData { path: path.display().to_string() });
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| EvalError::Csv { path: path.display().to_string(), source: e })?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| EvalError::Csv { path: path.display().to_string(), source: e })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record
                .map_err(|e| EvalError::Csv { path: path.display().to_string(), source: e })?;
            rows.push(record);
        }

        Ok(Self::from_parts(headers, rows))
    }

    /// Build a dataset from already-parsed parts. Used by tests and by any
    /// caller that produces records in memory.
    pub fn from_parts(headers: Vec<String>, rows: Vec<StringRecord>) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), i))
            .collect();
        Self { headers, index, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// Fetch a cell by column name. `None` if the column is unknown or the
    /// row is short (flexible CSVs may have ragged tails).
    pub fn cell<'a>(&self, row: &'a StringRecord, column: &str) -> Option<&'a str> {
        self.index.get(column).and_then(|&i| row.get(i))
    }
}

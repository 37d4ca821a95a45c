use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::error::{PipelineError, Result};

/// Name of the structure column the input table must carry.
pub const SMILES_COLUMN: &str = "SMILES";

/// The raw input table: a header plus data rows kept verbatim as text so
/// passthrough columns are reproduced byte-for-byte in the output. A row's
/// identity is its 0-based position.
#[derive(Debug, Clone)]
pub struct InputTable {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
    smiles_index: usize,
}

impl InputTable {
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PipelineError::InputNotFound(path.display().to_string()));
        }
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads and validates a table: the SMILES column must exist and there
    /// must be at least one data row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect();

        let smiles_index = headers
            .iter()
            .position(|h| h == SMILES_COLUMN)
            .ok_or_else(|| {
                PipelineError::Validation(format!(
                    "input CSV must contain a '{SMILES_COLUMN}' column"
                ))
            })?;

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            rows.push(record?);
        }
        if rows.is_empty() {
            return Err(PipelineError::Validation(
                "input CSV has no data rows".to_string(),
            ));
        }

        Ok(Self {
            headers,
            rows,
            smiles_index,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row(&self, index: usize) -> &StringRecord {
        &self.rows[index]
    }

    /// The structure string of a row; empty when the field is absent.
    pub fn smiles(&self, index: usize) -> &str {
        self.rows[index].get(self.smiles_index).unwrap_or("")
    }

    pub fn smiles_iter(&self) -> impl Iterator<Item = &str> {
        (0..self.rows.len()).map(|i| self.smiles(i))
    }
}

//! # Dataset Reader
//!
//! Reads the batch input format.
//!
//! ## Format
//!
//! ```text
//! 3            # number of datasets, then one line per dataset
//! abNc
//! abcLLx
//! B
//! ```
//!
//! Every line is whitespace-trimmed before it is validated. The count must
//! lie in `[0, max_datasets]` and each dataset line must be between
//! `min_line_length` and `max_line_length` bytes long. A missing dataset
//! line is an error; a final line without a trailing newline is accepted.

use std::io::{self, BufRead};
use terminal_logger::DatasetId;
use thiserror::Error;

/// Dataset reader error types
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("incorrect count line: {0:?}")]
    InvalidCount(String),

    #[error("incorrect data: {what} {value} outside [{min}, {max}]")]
    InvalidDatasetBounds {
        what: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("incorrect input: missing line for {index}")]
    UnexpectedEof { index: DatasetId },

    #[error("incorrect input: {0}")]
    Io(#[from] io::Error),
}

/// Accepted ranges for the batch header and dataset lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetBounds {
    pub max_datasets: usize,
    pub min_line_length: usize,
    pub max_line_length: usize,
}

impl DatasetBounds {
    pub fn check_count(&self, count: usize) -> Result<(), DatasetError> {
        if count > self.max_datasets {
            return Err(DatasetError::InvalidDatasetBounds {
                what: "dataset count",
                value: count,
                min: 0,
                max: self.max_datasets,
            });
        }
        Ok(())
    }

    pub fn check_line(&self, line: &str) -> Result<(), DatasetError> {
        let len = line.len();
        if len < self.min_line_length || len > self.max_line_length {
            return Err(DatasetError::InvalidDatasetBounds {
                what: "line length",
                value: len,
                min: self.min_line_length,
                max: self.max_line_length,
            });
        }
        Ok(())
    }
}

impl Default for DatasetBounds {
    fn default() -> Self {
        Self {
            max_datasets: 10_000,
            min_line_length: 1,
            max_line_length: 100,
        }
    }
}

/// One command stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub id: DatasetId,
    pub content: String,
}

/// Streaming reader over the batch input
///
/// The header is read eagerly by [`DatasetReader::new`]; datasets are read
/// one line at a time through the `Iterator` impl, which stops after the
/// first error.
pub struct DatasetReader<R> {
    reader: R,
    bounds: DatasetBounds,
    declared: usize,
    next_index: usize,
    failed: bool,
}

impl<R: BufRead> DatasetReader<R> {
    /// Reads and validates the count header
    pub fn new(mut reader: R, bounds: DatasetBounds) -> Result<Self, DatasetError> {
        let mut header = String::new();
        reader.read_line(&mut header)?;
        let header = header.trim();

        let declared: usize = header
            .parse()
            .map_err(|_| DatasetError::InvalidCount(header.to_string()))?;
        bounds.check_count(declared)?;

        Ok(Self {
            reader,
            bounds,
            declared,
            next_index: 0,
            failed: false,
        })
    }

    /// Number of datasets announced by the header
    pub fn declared(&self) -> usize {
        self.declared
    }

    /// Number of datasets not yet read
    pub fn remaining(&self) -> usize {
        if self.failed {
            0
        } else {
            self.declared - self.next_index
        }
    }

    fn read_dataset(&mut self) -> Result<Dataset, DatasetError> {
        let id = DatasetId::new(self.next_index);
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(DatasetError::UnexpectedEof { index: id });
        }

        let content = line.trim();
        self.bounds.check_line(content)?;
        Ok(Dataset {
            id,
            content: content.to_string(),
        })
    }
}

impl<R: BufRead> Iterator for DatasetReader<R> {
    type Item = Result<Dataset, DatasetError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 {
            return None;
        }

        let result = self.read_dataset();
        self.next_index += 1;
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

//! Formatting utilities for the asset exporter.
//!
//! This module provides the CSV record production trait used when writing
//! exported data to disk.

use csv::Writer;
use std::io::BufWriter;

/// Error types that can occur during formatting operations
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    /// Error specific to CSV operations
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    /// Error when converting bytes to UTF-8 string
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
    /// Error specific to CSV writer operations
    #[error("CSV writer error: {0}")]
    CsvWriterError(String),
}

/// Trait for producing CSV records from data
pub trait CsvRecordProducer {
    /// Returns the header row for the CSV output
    fn csv_header() -> Vec<String>;

    /// Converts the data into CSV records
    fn as_csv_records(&self) -> Vec<Vec<String>>;

    /// Produces CSV output with a header row
    fn to_csv_with_header(&self) -> Result<String, FormattingError> {
        self.to_csv(true)
    }

    /// Produces CSV output without a header row
    fn to_csv_without_header(&self) -> Result<String, FormattingError> {
        self.to_csv(false)
    }

    /// Produces CSV output with or without a header row based on the parameter
    fn to_csv(&self, with_header: bool) -> Result<String, FormattingError> {
        let buf = BufWriter::new(Vec::new());
        let mut wtr = Writer::from_writer(buf);
        if with_header {
            wtr.write_record(Self::csv_header())?;
        }
        for record in self.as_csv_records() {
            wtr.write_record(&record)?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| FormattingError::CsvWriterError(format!("failed to finalize CSV: {}", e)))?
            .into_inner()
            .map_err(|e| FormattingError::CsvWriterError(format!("failed to flush CSV: {}", e)))?;
        Ok(String::from_utf8(bytes)?)
    }
}

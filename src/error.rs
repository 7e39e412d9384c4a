use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type used across the crate.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Error type returned by the loader, statistics engine, and renderers.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The input file does not exist.
    #[error("input file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// CSV syntax or read error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O error (e.g. unwritable output directory).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A column was referenced by a name the table does not have.
    #[error("column '{0}' does not exist")]
    UnknownColumn(String),

    /// A column was referenced by an out-of-range positional index.
    #[error("column index {index} out of range for table with {width} columns")]
    ColumnIndexOutOfRange { index: usize, width: usize },

    /// No numeric values survived coercion.
    #[error("no numeric data available to compute statistics")]
    EmptyData,

    /// A plot option was outside its valid range (e.g. zero bins).
    #[error("invalid plot option: {0}")]
    InvalidOption(String),

    /// Chart drawing failed. Plotters' error type borrows the backend, so
    /// it is captured here as its message.
    #[error("chart rendering failed: {0}")]
    Render(String),
}

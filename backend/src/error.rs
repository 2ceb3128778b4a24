//! Error types for the tracker data pipeline.
//!
//! This module defines the error hierarchy:
//!
//! - [`TableError`] - Column lookups and table shape errors
//! - [`CsvError`] - Source loading errors
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across stage boundaries.

use thiserror::Error;

// =============================================================================
// Table Errors
// =============================================================================

/// Errors raised by table operations and reshape stages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// A by-name column lookup failed.
    #[error("Column '{0}' not found")]
    MissingColumn(String),

    /// A row did not have as many cells as the table has columns.
    #[error("Row {row} has {found} cells, expected {expected}")]
    ShapeMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

// =============================================================================
// CSV Loading Errors
// =============================================================================

/// Errors while loading the survey export.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvError {
    pub line: usize,
    pub message: String,
}

impl CsvError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for CsvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for CsvError {}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline::run_pipeline`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Source loading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Reshape or lookup error.
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Failed to read the source file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Result type for CSV loading.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

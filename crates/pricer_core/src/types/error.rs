//! Error types for result tables.

use thiserror::Error;

/// Errors raised while building, merging or keying result tables.
///
/// # Examples
/// ```
/// use pricer_core::types::TableError;
///
/// let err = TableError::RowMismatch { expected: 3, found: 2 };
/// assert_eq!(format!("{}", err), "Row count mismatch: expected 3, found 2");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// A column or table does not match the expected number of rows.
    #[error("Row count mismatch: expected {expected}, found {found}")]
    RowMismatch {
        /// Rows required by the receiving table
        expected: usize,
        /// Rows supplied
        found: usize,
    },

    /// A string did not name any known Greek.
    #[error("Unknown Greek: {0}")]
    UnknownGreek(String),
}

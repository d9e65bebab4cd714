use thiserror::Error;

/// Failures that callers can recover from.
///
/// Contract violations (out-of-range indices, mismatched dimensions passed to
/// the kernel) are not represented here: they panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinalgError {
    #[error("Matrix with {rows} rows and {cols} cols is not square")]
    NotSquare { rows: usize, cols: usize },
    #[error("Dimensions not compatible: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("Matrix dimensions must be positive")]
    Empty,
    #[error("Matrix is singular")]
    Singular,
    #[error("Invalid number: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, LinalgError>;

use thiserror::Error;

/// Coarse classification of a [`MatrixError`], for callers that only need to
/// branch on what went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Shape,
    ShapeMismatch,
    DimensionMismatch,
    TypeMismatch,
    Singular,
    Index,
    InvalidArgument,
}

/// Errors raised by matrix construction and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("invalid shape ({rows}, {cols}): a matrix needs at least one row and one column")]
    InvalidShape { rows: usize, cols: usize },

    #[error("invalid shape ({rows}, {cols}) for buffer of length {len}")]
    BufferLength { rows: usize, cols: usize, len: usize },

    #[error("row {row} has {len} elements, expected {expected}")]
    Ragged { row: usize, len: usize, expected: usize },

    #[error("{op} requires a square matrix, got {rows}x{cols}")]
    NotSquare {
        op: &'static str,
        rows: usize,
        cols: usize,
    },

    #[error("{op} requires matrices of the same shape, got {left:?} and {right:?}")]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("cannot multiply: left operand has {left_cols} columns but right operand has {right_rows} rows")]
    DimensionMismatch { left_cols: usize, right_rows: usize },

    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("matrix is singular (determinant is zero)")]
    Singular,

    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl MatrixError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatrixError::InvalidShape { .. }
            | MatrixError::BufferLength { .. }
            | MatrixError::Ragged { .. }
            | MatrixError::NotSquare { .. } => ErrorKind::Shape,
            MatrixError::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            MatrixError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            MatrixError::TypeMismatch(_) => ErrorKind::TypeMismatch,
            MatrixError::Singular => ErrorKind::Singular,
            MatrixError::IndexOutOfBounds { .. } => ErrorKind::Index,
            MatrixError::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatrixError>;

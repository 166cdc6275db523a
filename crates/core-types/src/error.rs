use crate::enums::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("A comparison matrix must have at least one row")]
    EmptyMatrix,

    #[error("Row {row} has {len} entries but the matrix has {expected} rows")]
    NotSquare { row: usize, len: usize, expected: usize },

    #[error("Entry ({row}, {col}) must be a finite positive number, got {value}")]
    InvalidEntry { row: usize, col: usize, value: f64 },
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::EmptyMatrix | CoreError::NotSquare { .. } => ErrorKind::Shape,
            CoreError::InvalidEntry { .. } => ErrorKind::Domain,
        }
    }
}

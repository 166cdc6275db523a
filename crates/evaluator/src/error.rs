use core_types::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluatorError {
    #[error("Declared dimension {declared} does not match the {actual}x{actual} matrix supplied")]
    DimensionMismatch { declared: usize, actual: usize },

    #[error("Dimension {0} is outside the random consistency index table (supported: 2 to 8)")]
    DimensionOutOfRange(usize),

    #[error("Consistency ratio is undefined for a {0}x{0} matrix: the random consistency index is zero")]
    UndefinedConsistency(usize),

    #[error("Eigen-decomposition did not converge: {0}")]
    DecompositionFailed(String),

    #[error("Principal eigenvector is degenerate: {0}")]
    DegenerateEigenvector(String),

    #[error("Calculation error: non-finite value encountered in '{0}'")]
    NonFinite(String),
}

impl EvaluatorError {
    /// Maps the failure onto the domain/shape taxonomy reported to callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvaluatorError::DimensionMismatch { .. } => ErrorKind::Shape,
            _ => ErrorKind::Domain,
        }
    }
}

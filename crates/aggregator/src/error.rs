use core_types::{ErrorKind, MatrixRole};
use evaluator::EvaluatorError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AggregatorError {
    #[error("The {role} is {actual}x{actual} but {expected}x{expected} was declared")]
    Shape {
        role: MatrixRole,
        expected: usize,
        actual: usize,
    },

    #[error("Expected {expected} solutions matrices (one per objective), got {actual}")]
    SolutionsCount { expected: usize, actual: usize },

    #[error("Failed to evaluate the {role}")]
    Evaluation {
        role: MatrixRole,
        #[source]
        source: EvaluatorError,
    },
}

impl AggregatorError {
    /// Maps the failure onto the domain/shape taxonomy reported to callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AggregatorError::Shape { .. } | AggregatorError::SolutionsCount { .. } => {
                ErrorKind::Shape
            }
            AggregatorError::Evaluation { source, .. } => source.kind(),
        }
    }

    /// The matrix that triggered the failure, when a single one did.
    pub fn role(&self) -> Option<MatrixRole> {
        match self {
            AggregatorError::Shape { role, .. } | AggregatorError::Evaluation { role, .. } => {
                Some(*role)
            }
            AggregatorError::SolutionsCount { .. } => None,
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two failure classes every evaluation error falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The computation is undefined for the input (table range, degenerate results).
    Domain,
    /// Supplied matrices do not have the declared dimensions.
    Shape,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Domain => write!(f, "DomainError"),
            ErrorKind::Shape => write!(f, "ShapeError"),
        }
    }
}

/// Identifies one comparison matrix within a decision problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatrixRole {
    Objectives,
    Solutions { objective: usize },
}

impl MatrixRole {
    /// Returns the objective index for a solutions matrix.
    pub fn objective(&self) -> Option<usize> {
        match self {
            MatrixRole::Objectives => None,
            MatrixRole::Solutions { objective } => Some(*objective),
        }
    }
}

impl fmt::Display for MatrixRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixRole::Objectives => write!(f, "objectives matrix"),
            MatrixRole::Solutions { objective } => {
                write!(f, "solutions matrix for objective {}", objective)
            }
        }
    }
}

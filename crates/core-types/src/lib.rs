pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{ErrorKind, MatrixRole};
pub use error::CoreError;
pub use structs::{
    ComparisonMatrix, ConsistencyRatio, DecisionProblem, Labels, Params, PriorityVector,
};

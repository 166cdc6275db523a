use core_types::{ConsistencyRatio, PriorityVector};
use serde::{Deserialize, Serialize};

/// The statistics derived from one comparison matrix.
///
/// This struct is the output of the `MatrixEvaluator` and is embedded, one per
/// matrix, in the aggregated evaluation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixReport {
    /// Declared dimension of the evaluated matrix.
    pub dimension: usize,
    /// Real part of the principal eigenvalue.
    pub lambda_max: f64,
    pub consistency_index: f64,
    pub consistency_ratio: ConsistencyRatio,
    pub priorities: PriorityVector,
}

impl MatrixReport {
    /// Splits the report into the `(CR, PriorityVector)` pair.
    pub fn into_parts(self) -> (ConsistencyRatio, PriorityVector) {
        (self.consistency_ratio, self.priorities)
    }
}

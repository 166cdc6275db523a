use crate::error::CoreError;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// A square matrix of pairwise judgments where entry (i, j) is the judged
/// ratio of importance of item i over item j.
///
/// Construction guarantees a non-empty square shape with finite, strictly
/// positive entries. Reciprocity (a_ji = 1/a_ij) and a unit diagonal are
/// assumed but never enforced; deviation from them is what the consistency
/// ratio measures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct ComparisonMatrix {
    inner: DMatrix<f64>,
}

impl ComparisonMatrix {
    /// Builds a matrix from row-major judgments.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, CoreError> {
        let size = rows.len();
        if size == 0 {
            return Err(CoreError::EmptyMatrix);
        }

        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(CoreError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if !value.is_finite() || value <= 0.0 {
                    return Err(CoreError::InvalidEntry { row, col, value });
                }
            }
        }

        Ok(Self {
            inner: DMatrix::from_fn(size, size, |i, j| rows[i][j]),
        })
    }

    /// Builds the perfectly consistent matrix a_ij = w_i / w_j for a weight vector.
    pub fn from_weights(weights: &[f64]) -> Result<Self, CoreError> {
        let rows = weights
            .iter()
            .map(|wi| weights.iter().map(|wj| wi / wj).collect())
            .collect();
        Self::from_rows(rows)
    }

    /// The number of compared items (Q for a Q×Q matrix).
    pub fn dim(&self) -> usize {
        self.inner.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.inner.get((row, col)).copied()
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.inner
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.inner
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }

    /// Largest `|a_ij * a_ji - 1|` over all pairs, including the diagonal
    /// (where it reads `|a_ii^2 - 1|`). Zero for a perfectly reciprocal matrix.
    pub fn max_reciprocal_deviation(&self) -> f64 {
        let n = self.dim();
        let mut worst = 0.0_f64;
        for i in 0..n {
            for j in i..n {
                let deviation = (self.inner[(i, j)] * self.inner[(j, i)] - 1.0).abs();
                worst = worst.max(deviation);
            }
        }
        worst
    }
}

impl TryFrom<Vec<Vec<f64>>> for ComparisonMatrix {
    type Error = CoreError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<ComparisonMatrix> for Vec<Vec<f64>> {
    fn from(matrix: ComparisonMatrix) -> Self {
        matrix.to_rows()
    }
}

/// Normalized weights derived from a comparison matrix, one per item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityVector(Vec<f64>);

impl PriorityVector {
    pub fn new(weights: Vec<f64>) -> Self {
        Self(weights)
    }

    pub fn weights(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Index of the largest weight; the lowest index wins ties.
    pub fn argmax(&self) -> Option<usize> {
        argmax(&self.0)
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

/// Index of the first maximum in a slice. NaN entries never win.
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, current)) if v <= current || v.is_nan() => {}
            None if v.is_nan() => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// How far a comparison matrix deviates from perfectly consistent judgments.
/// Zero means perfectly consistent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsistencyRatio(f64);

impl ConsistencyRatio {
    /// The customary acceptability bound for a consistency ratio.
    pub const CONVENTIONAL_THRESHOLD: f64 = 0.1;

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_acceptable(&self, threshold: f64) -> bool {
        self.0 <= threshold
    }
}

/// Dimensions of one decision problem, fixed for the lifetime of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// P: number of objectives (criteria).
    #[serde(alias = "p")]
    pub objectives: usize,
    /// N: number of candidate solutions.
    #[serde(alias = "n")]
    pub solutions: usize,
}

impl Params {
    pub fn new(objectives: usize, solutions: usize) -> Self {
        Self {
            objectives,
            solutions,
        }
    }
}

/// Optional display names for objectives and solutions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Labels {
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub solutions: Vec<String>,
}

impl Labels {
    pub fn objective(&self, index: usize) -> String {
        self.objectives
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Objective {}", index + 1))
    }

    pub fn solution(&self, index: usize) -> String {
        self.solutions
            .get(index)
            .cloned()
            .unwrap_or_else(|| format!("Solution {}", index + 1))
    }
}

/// Everything the engine needs for one decision: the objectives matrix (P×P)
/// and one solutions matrix (N×N) per objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionProblem {
    pub params: Params,
    pub objectives: ComparisonMatrix,
    pub solutions: Vec<ComparisonMatrix>,
    #[serde(default)]
    pub labels: Labels,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ErrorKind;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let err = ComparisonMatrix::from_rows(vec![vec![1.0, 2.0], vec![0.5]]).unwrap_err();
        assert_eq!(
            err,
            CoreError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        );
        assert_eq!(err.kind(), ErrorKind::Shape);
    }

    #[test]
    fn test_from_rows_rejects_non_positive_entries() {
        let err = ComparisonMatrix::from_rows(vec![vec![1.0, 0.0], vec![2.0, 1.0]]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidEntry { row: 0, col: 1, .. }));
        assert_eq!(err.kind(), ErrorKind::Domain);

        let err = ComparisonMatrix::from_rows(vec![vec![f64::NAN]]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
    }

    #[test]
    fn test_empty_matrix_is_rejected() {
        assert_eq!(
            ComparisonMatrix::from_rows(vec![]).unwrap_err(),
            CoreError::EmptyMatrix
        );
    }

    #[test]
    fn test_from_weights_is_reciprocal() {
        let matrix = ComparisonMatrix::from_weights(&[4.0, 2.0, 1.0]).unwrap();
        assert_eq!(matrix.dim(), 3);
        assert_relative_eq!(matrix.get(0, 2).unwrap(), 4.0);
        assert_relative_eq!(matrix.get(2, 0).unwrap(), 0.25);
        assert_relative_eq!(matrix.max_reciprocal_deviation(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reciprocal_deviation_detects_bad_pairs() {
        let matrix = ComparisonMatrix::from_rows(vec![
            vec![1.0, 3.0, 1.0],
            vec![3.0, 1.0, 1.0],
            vec![1.0, 1.0, 1.0],
        ])
        .unwrap();
        assert_relative_eq!(matrix.max_reciprocal_deviation(), 8.0);
    }

    #[test]
    fn test_matrix_serializes_as_rows() {
        let rows = vec![vec![1.0, 2.0], vec![0.5, 1.0]];
        let matrix = ComparisonMatrix::from_rows(rows.clone()).unwrap();
        let json = serde_json::to_string(&matrix).unwrap();
        assert_eq!(json, "[[1.0,2.0],[0.5,1.0]]");

        let parsed: ComparisonMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.to_rows(), rows);

        assert!(serde_json::from_str::<ComparisonMatrix>("[[1.0,2.0]]").is_err());
    }

    #[test]
    fn test_argmax_prefers_lowest_index_on_ties() {
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), Some(1));
        assert_eq!(argmax(&[f64::NAN, 0.1]), Some(1));
        assert_eq!(argmax(&[]), None);
        assert_eq!(PriorityVector::new(vec![0.5, 0.3, 0.2]).argmax(), Some(0));
    }

    #[test]
    fn test_consistency_ratio_threshold() {
        let cr = ConsistencyRatio::new(0.08);
        assert!(cr.is_acceptable(ConsistencyRatio::CONVENTIONAL_THRESHOLD));
        assert!(!ConsistencyRatio::new(0.12).is_acceptable(0.1));
    }

    #[test]
    fn test_labels_fall_back_to_numbering() {
        let labels = Labels {
            objectives: vec!["Cost".to_string()],
            solutions: vec![],
        };
        assert_eq!(labels.objective(0), "Cost");
        assert_eq!(labels.objective(1), "Objective 2");
        assert_eq!(labels.solution(2), "Solution 3");
    }
}

use core_types::{ConsistencyRatio, MatrixRole, Params, PriorityVector};
use evaluator::MatrixReport;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// The complete outcome of one decision problem.
///
/// Holds the statistics of every evaluated matrix together with the
/// synthesized overall preference. It is produced once by the `Aggregator`
/// and is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub params: Params,
    /// CR and priority vector of the objectives matrix (P weights).
    pub objectives: MatrixReport,
    /// CR and priority vector of each solutions matrix, one per objective (N weights each).
    pub solutions: Vec<MatrixReport>,
    /// Objective-weighted preference of every solution (N entries).
    pub preference: PriorityVector,
    /// Index of the highest preference; the lowest index wins ties.
    pub best: usize,
}

impl EvaluationResult {
    pub fn objectives_ratio(&self) -> ConsistencyRatio {
        self.objectives.consistency_ratio
    }

    pub fn solution_ratios(&self) -> Vec<ConsistencyRatio> {
        self.solutions.iter().map(|r| r.consistency_ratio).collect()
    }

    pub fn objective_weights(&self) -> &PriorityVector {
        &self.objectives.priorities
    }

    /// Solution indices ordered from most to least preferred.
    pub fn ranking(&self) -> Vec<usize> {
        let weights = self.preference.weights();
        let mut order: Vec<usize> = (0..weights.len()).collect();
        // Stable sort keeps the lower index first on equal scores.
        order.sort_by(|&a, &b| {
            weights[b]
                .partial_cmp(&weights[a])
                .unwrap_or(Ordering::Equal)
        });
        order
    }

    /// Every matrix whose consistency ratio exceeds `threshold`.
    pub fn inconsistent_matrices(&self, threshold: f64) -> Vec<(MatrixRole, ConsistencyRatio)> {
        std::iter::once((MatrixRole::Objectives, self.objectives.consistency_ratio))
            .chain(self.solutions.iter().enumerate().map(|(objective, r)| {
                (MatrixRole::Solutions { objective }, r.consistency_ratio)
            }))
            .filter(|(_, cr)| !cr.is_acceptable(threshold))
            .collect()
    }
}

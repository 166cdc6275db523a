//! # AHP Aggregator
//!
//! Combines the per-objective solution rankings of a decision problem into one
//! overall preference, weighting each objective by its own priority.
//!
//! ## Public API
//!
//! - `Aggregator`: Validates shapes, evaluates all P+1 matrices and synthesizes.
//! - `EvaluationResult`: Every CR and priority vector plus the overall preference.
//! - `AggregatorError`: The specific error types that can be returned from this crate.

use configuration::EngineSettings;
use core_types::{ComparisonMatrix, DecisionProblem, MatrixRole, Params, PriorityVector};
use evaluator::{MatrixEvaluator, MatrixReport};
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

pub mod error;
pub mod result;

pub use error::AggregatorError;
pub use result::EvaluationResult;

/// Largest tolerated `|a_ij * a_ji - 1|` before a matrix is logged as non-reciprocal.
const RECIPROCITY_TOLERANCE: f64 = 0.05;

/// The main synthesis engine.
#[derive(Debug, Clone)]
pub struct Aggregator {
    settings: EngineSettings,
    evaluator: MatrixEvaluator,
}

impl Aggregator {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            evaluator: MatrixEvaluator::new(),
        }
    }

    /// Evaluates a complete decision problem.
    pub fn evaluate(&self, problem: &DecisionProblem) -> Result<EvaluationResult, AggregatorError> {
        self.evaluate_all(&problem.objectives, &problem.solutions, problem.params)
    }

    /// Validates, evaluates and synthesizes one decision problem.
    ///
    /// Any failing matrix fails the whole evaluation; no partial result is
    /// returned. When several matrices fail, the objectives matrix is reported
    /// first, then the lowest objective index, in both sequential and parallel mode.
    #[tracing::instrument(
        name = "evaluate_all",
        skip(self, objectives, solutions),
        fields(p = params.objectives, n = params.solutions)
    )]
    pub fn evaluate_all(
        &self,
        objectives: &ComparisonMatrix,
        solutions: &[ComparisonMatrix],
        params: Params,
    ) -> Result<EvaluationResult, AggregatorError> {
        // 1. Validate
        validate_shapes(objectives, solutions, params)?;
        self.warn_non_reciprocal(objectives, solutions);

        // 2. Evaluate all P+1 matrices
        let (objectives_report, solution_reports) = self.evaluate_matrices(objectives, solutions, params)?;

        // 3. Synthesize
        let preference = synthesize(&objectives_report, &solution_reports);
        // Non-empty: N >= 3 is guaranteed once every solutions matrix evaluated.
        let best = preference.argmax().unwrap_or(0);

        let result = EvaluationResult {
            params,
            objectives: objectives_report,
            solutions: solution_reports,
            preference,
            best,
        };

        for (role, cr) in result.inconsistent_matrices(self.settings.consistency_threshold) {
            tracing::warn!(
                %role,
                consistency_ratio = cr.value(),
                threshold = self.settings.consistency_threshold,
                "Consistency ratio exceeds the acceptable threshold."
            );
        }
        tracing::info!(best = result.best, "Aggregation complete.");

        Ok(result)
    }

    fn evaluate_matrices(
        &self,
        objectives: &ComparisonMatrix,
        solutions: &[ComparisonMatrix],
        params: Params,
    ) -> Result<(MatrixReport, Vec<MatrixReport>), AggregatorError> {
        let evaluate_objectives = || {
            self.evaluator
                .evaluate(objectives, params.objectives)
                .map_err(|source| AggregatorError::Evaluation {
                    role: MatrixRole::Objectives,
                    source,
                })
        };
        let evaluate_solution = |(objective, matrix): (usize, &ComparisonMatrix)| {
            self.evaluator
                .evaluate(matrix, params.solutions)
                .map_err(|source| AggregatorError::Evaluation {
                    role: MatrixRole::Solutions { objective },
                    source,
                })
        };

        if self.settings.parallel {
            // The branches share no mutable state; only the synthesis waits on all of them.
            let (objectives_report, solution_results) = rayon::join(evaluate_objectives, || {
                solutions
                    .par_iter()
                    .enumerate()
                    .map(evaluate_solution)
                    .collect::<Vec<_>>()
            });
            let objectives_report = objectives_report?;
            let solution_reports = solution_results.into_iter().collect::<Result<Vec<_>, _>>()?;
            Ok((objectives_report, solution_reports))
        } else {
            let objectives_report = evaluate_objectives()?;
            let solution_reports = solutions
                .iter()
                .enumerate()
                .map(evaluate_solution)
                .collect::<Result<Vec<_>, _>>()?;
            Ok((objectives_report, solution_reports))
        }
    }

    fn warn_non_reciprocal(&self, objectives: &ComparisonMatrix, solutions: &[ComparisonMatrix]) {
        let roles = std::iter::once((MatrixRole::Objectives, objectives)).chain(
            solutions
                .iter()
                .enumerate()
                .map(|(objective, m)| (MatrixRole::Solutions { objective }, m)),
        );
        for (role, matrix) in roles {
            let deviation = matrix.max_reciprocal_deviation();
            if deviation > RECIPROCITY_TOLERANCE {
                tracing::warn!(%role, deviation, "Matrix is not reciprocal.");
            }
        }
    }
}

/// Checks every supplied matrix against the declared P and N.
fn validate_shapes(
    objectives: &ComparisonMatrix,
    solutions: &[ComparisonMatrix],
    params: Params,
) -> Result<(), AggregatorError> {
    if objectives.dim() != params.objectives {
        return Err(AggregatorError::Shape {
            role: MatrixRole::Objectives,
            expected: params.objectives,
            actual: objectives.dim(),
        });
    }

    if solutions.len() != params.objectives {
        return Err(AggregatorError::SolutionsCount {
            expected: params.objectives,
            actual: solutions.len(),
        });
    }

    for (objective, matrix) in solutions.iter().enumerate() {
        if matrix.dim() != params.solutions {
            return Err(AggregatorError::Shape {
                role: MatrixRole::Solutions { objective },
                expected: params.solutions,
                actual: matrix.dim(),
            });
        }
    }
    Ok(())
}

/// Weights each objective's solution priorities by that objective's priority.
///
/// The happiness matrix has one row per objective and one column per
/// solution; the preference of solution j is `sum_i happiness[i][j] * w[i]`.
fn synthesize(objectives: &MatrixReport, solutions: &[MatrixReport]) -> PriorityVector {
    let p = solutions.len();
    let n = solutions.first().map_or(0, |r| r.priorities.len());

    let happiness = DMatrix::from_fn(p, n, |i, j| solutions[i].priorities.weights()[j]);
    let weights = DVector::from_column_slice(objectives.priorities.weights());
    let preference = happiness.tr_mul(&weights);

    PriorityVector::new(preference.iter().copied().collect())
}

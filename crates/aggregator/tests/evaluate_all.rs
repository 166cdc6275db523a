use aggregator::{Aggregator, AggregatorError, EvaluationResult};
use approx::assert_abs_diff_eq;
use configuration::EngineSettings;
use core_types::{ComparisonMatrix, DecisionProblem, ErrorKind, Labels, MatrixRole, Params};
use evaluator::EvaluatorError;

fn consistent(weights: &[f64]) -> ComparisonMatrix {
    ComparisonMatrix::from_weights(weights).unwrap()
}

fn sequential() -> Aggregator {
    Aggregator::new(EngineSettings {
        parallel: false,
        ..EngineSettings::default()
    })
}

fn parallel() -> Aggregator {
    Aggregator::new(EngineSettings {
        parallel: true,
        ..EngineSettings::default()
    })
}

/// Three objectives weighted 0.5/0.3/0.2 over three solutions.
fn car_problem() -> DecisionProblem {
    DecisionProblem {
        params: Params::new(3, 3),
        objectives: consistent(&[0.5, 0.3, 0.2]),
        solutions: vec![
            consistent(&[0.5, 0.3, 0.2]),
            consistent(&[0.2, 0.3, 0.5]),
            consistent(&[0.25, 0.25, 0.5]),
        ],
        labels: Labels::default(),
    }
}

fn assert_weights(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert_abs_diff_eq!(*a, *e, epsilon = 1e-9);
    }
}

#[test]
fn test_weighted_synthesis_of_consistent_problem() {
    let result = sequential().evaluate(&car_problem()).unwrap();

    assert_weights(result.objective_weights().weights(), &[0.5, 0.3, 0.2]);
    assert_weights(result.solutions[1].priorities.weights(), &[0.2, 0.3, 0.5]);
    assert_weights(result.preference.weights(), &[0.36, 0.29, 0.35]);
    assert_eq!(result.best, 0);
    assert_eq!(result.ranking(), vec![0, 2, 1]);

    assert_abs_diff_eq!(result.objectives_ratio().value(), 0.0, epsilon = 1e-9);
    assert_eq!(result.solution_ratios().len(), 3);
    assert!(result.inconsistent_matrices(0.1).is_empty());
}

#[test]
fn test_preference_is_a_distribution() {
    let result = sequential().evaluate(&car_problem()).unwrap();
    let total: f64 = result.preference.weights().iter().sum();
    assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
}

#[test]
fn test_parallel_matches_sequential() {
    let mut problem = car_problem();
    problem.solutions[2] = ComparisonMatrix::from_rows(vec![
        vec![1.0, 3.0, 5.0],
        vec![1.0 / 3.0, 1.0, 3.0],
        vec![1.0 / 5.0, 1.0 / 3.0, 1.0],
    ])
    .unwrap();

    let a = sequential().evaluate(&problem).unwrap();
    let b = parallel().evaluate(&problem).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_inconsistent_solutions_matrix_is_flagged_not_rejected() {
    let mut problem = DecisionProblem {
        params: Params::new(3, 4),
        objectives: consistent(&[1.0, 1.0, 1.0]),
        solutions: vec![consistent(&[1.0, 2.0, 3.0, 4.0]); 3],
        labels: Labels::default(),
    };
    problem.solutions[2] = ComparisonMatrix::from_rows(vec![
        vec![1.0, 1.0 / 3.0, 1.0 / 5.0, 1.0 / 9.0],
        vec![3.0, 1.0, 5.0, 1.0 / 3.0],
        vec![5.0, 1.0 / 5.0, 1.0, 1.0 / 7.0],
        vec![9.0, 3.0, 7.0, 1.0],
    ])
    .unwrap();

    let result = parallel().evaluate(&problem).unwrap();
    let flagged = result.inconsistent_matrices(0.1);
    assert_eq!(flagged.len(), 1);
    assert_eq!(flagged[0].0, MatrixRole::Solutions { objective: 2 });
    assert_eq!(result.best, 3);
}

#[test]
fn test_solutions_matrix_with_wrong_dimension_is_a_shape_error() {
    let mut problem = car_problem();
    problem.solutions[1] = consistent(&[1.0, 2.0, 3.0, 4.0]);

    for aggregator in [sequential(), parallel()] {
        let err = aggregator.evaluate(&problem).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert_eq!(
            err,
            AggregatorError::Shape {
                role: MatrixRole::Solutions { objective: 1 },
                expected: 3,
                actual: 4,
            }
        );
    }
}

#[test]
fn test_missing_solutions_matrix_is_a_shape_error() {
    let mut problem = car_problem();
    problem.solutions.pop();

    let err = sequential().evaluate(&problem).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Shape);
    assert!(matches!(
        err,
        AggregatorError::SolutionsCount {
            expected: 3,
            actual: 2
        }
    ));
}

#[test]
fn test_two_objectives_cannot_be_evaluated() {
    let problem = DecisionProblem {
        params: Params::new(2, 3),
        objectives: consistent(&[0.6, 0.4]),
        solutions: vec![consistent(&[0.5, 0.3, 0.2]), consistent(&[0.2, 0.3, 0.5])],
        labels: Labels::default(),
    };

    let err = parallel().evaluate(&problem).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(
        err,
        AggregatorError::Evaluation {
            role: MatrixRole::Objectives,
            source: EvaluatorError::UndefinedConsistency(2),
        }
    );
}

#[test]
fn test_domain_error_names_the_first_failing_matrix() {
    let nine = consistent(&[1.0; 9]);
    let problem = DecisionProblem {
        params: Params::new(3, 9),
        objectives: consistent(&[1.0, 2.0, 3.0]),
        solutions: vec![nine.clone(), nine.clone(), nine],
        labels: Labels::default(),
    };

    for aggregator in [sequential(), parallel()] {
        let err = aggregator.evaluate(&problem).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert_eq!(err.role(), Some(MatrixRole::Solutions { objective: 0 }));
    }
}

#[test]
fn test_result_survives_json() {
    let result = sequential().evaluate(&car_problem()).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let parsed: EvaluationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.best, result.best);
    assert_weights(parsed.preference.weights(), result.preference.weights());
}

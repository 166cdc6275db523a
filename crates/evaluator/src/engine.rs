use crate::consistency::random_index;
use crate::error::EvaluatorError;
use crate::report::MatrixReport;
use core_types::{ComparisonMatrix, ConsistencyRatio, PriorityVector};
use nalgebra::linalg::Schur;
use nalgebra::{Complex, DMatrix, DVector};

/// Iteration cap for both the Schur and the SVD decompositions.
const MAX_ITERATIONS: usize = 10_000;

/// A stateless calculator for deriving the priority vector and consistency
/// statistics of a single pairwise-comparison matrix.
#[derive(Debug, Default, Clone, Copy)]
pub struct MatrixEvaluator {}

impl MatrixEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for evaluating one comparison matrix.
    ///
    /// # Arguments
    ///
    /// * `matrix` - The `q`×`q` pairwise-comparison matrix.
    /// * `q` - The declared dimension; must match the matrix and lie in 3..=8.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `MatrixReport` or an `EvaluatorError`.
    ///
    /// The principal eigenvalue is the one with the largest real part; when
    /// several share it, the first one reported by the Schur decomposition wins.
    pub fn evaluate(
        &self,
        matrix: &ComparisonMatrix,
        q: usize,
    ) -> Result<MatrixReport, EvaluatorError> {
        if matrix.dim() != q {
            return Err(EvaluatorError::DimensionMismatch {
                declared: q,
                actual: matrix.dim(),
            });
        }
        let cir = random_index(q)?;

        let a = matrix.as_matrix();
        let eigenvalues = self.eigenvalues(a)?;
        let lambda_max = dominant_eigenvalue(&eigenvalues)?;
        let eigenvector = self.principal_eigenvector(a, lambda_max)?;

        let dimension = q as f64;
        let consistency_index = (lambda_max.re - dimension) / (dimension - 1.0);
        let consistency_ratio = consistency_index / cir;
        if !consistency_ratio.is_finite() {
            return Err(EvaluatorError::NonFinite("consistency_ratio".to_string()));
        }

        let priorities = normalize_priorities(&eigenvector)?;

        tracing::debug!(
            q,
            lambda_max = lambda_max.re,
            consistency_index,
            consistency_ratio,
            "Evaluated comparison matrix"
        );

        Ok(MatrixReport {
            dimension: q,
            lambda_max: lambda_max.re,
            consistency_index,
            consistency_ratio: ConsistencyRatio::new(consistency_ratio),
            priorities,
        })
    }

    /// All eigenvalues of a general real matrix, complex pairs included.
    fn eigenvalues(&self, a: &DMatrix<f64>) -> Result<DVector<Complex<f64>>, EvaluatorError> {
        let schur = Schur::try_new(a.clone(), f64::EPSILON, MAX_ITERATIONS).ok_or_else(|| {
            EvaluatorError::DecompositionFailed("Schur decomposition exceeded its iteration limit".to_string())
        })?;
        Ok(schur.complex_eigenvalues())
    }

    /// Solves `(A - lambda I) v = 0` for the eigenvector belonging to `lambda`.
    ///
    /// The null vector is the right singular vector of the smallest singular
    /// value of the shifted complex matrix.
    fn principal_eigenvector(
        &self,
        a: &DMatrix<f64>,
        lambda: Complex<f64>,
    ) -> Result<DVector<Complex<f64>>, EvaluatorError> {
        let n = a.nrows();
        let mut shifted: DMatrix<Complex<f64>> = a.map(|x| Complex::new(x, 0.0));
        for i in 0..n {
            shifted[(i, i)] -= lambda;
        }

        let svd = shifted
            .try_svd(false, true, f64::EPSILON, MAX_ITERATIONS)
            .ok_or_else(|| {
                EvaluatorError::DecompositionFailed("SVD exceeded its iteration limit".to_string())
            })?;
        let v_t = svd.v_t.ok_or_else(|| {
            EvaluatorError::DecompositionFailed("SVD did not produce right singular vectors".to_string())
        })?;

        let smallest = svd
            .singular_values
            .iter()
            .enumerate()
            .min_by(|(_, x), (_, y)| x.total_cmp(y))
            .map(|(i, _)| i)
            .ok_or_else(|| EvaluatorError::DegenerateEigenvector("no singular values".to_string()))?;

        // Rows of V^H hold the conjugated right singular vectors.
        Ok(DVector::from_iterator(
            n,
            v_t.row(smallest).iter().map(|c| c.conj()),
        ))
    }
}

/// Picks the eigenvalue with the largest real part, keeping the first on ties.
fn dominant_eigenvalue(
    eigenvalues: &DVector<Complex<f64>>,
) -> Result<Complex<f64>, EvaluatorError> {
    let mut dominant: Option<Complex<f64>> = None;
    for &lambda in eigenvalues.iter() {
        if !lambda.re.is_finite() || !lambda.im.is_finite() {
            return Err(EvaluatorError::NonFinite("eigenvalues".to_string()));
        }
        match dominant {
            Some(current) if lambda.re <= current.re => {}
            _ => dominant = Some(lambda),
        }
    }
    dominant.ok_or_else(|| {
        EvaluatorError::DecompositionFailed("matrix produced no eigenvalues".to_string())
    })
}

/// Rotates the eigenvector so its largest component is real and positive,
/// then takes `|Re(v_i)|` and scales the result to sum to one.
fn normalize_priorities(vector: &DVector<Complex<f64>>) -> Result<PriorityVector, EvaluatorError> {
    let pivot = vector
        .iter()
        .copied()
        .max_by(|x, y| x.norm_sqr().total_cmp(&y.norm_sqr()))
        .ok_or_else(|| EvaluatorError::DegenerateEigenvector("empty eigenvector".to_string()))?;

    let pivot_norm = pivot.norm_sqr().sqrt();
    if !pivot_norm.is_finite() || pivot_norm <= 0.0 {
        return Err(EvaluatorError::DegenerateEigenvector(
            "all components are zero".to_string(),
        ));
    }
    let phase = (pivot / pivot_norm).conj();

    let magnitudes: Vec<f64> = vector.iter().map(|c| (*c * phase).re.abs()).collect();
    let total: f64 = magnitudes.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(EvaluatorError::DegenerateEigenvector(format!(
            "absolute real parts sum to {}",
            total
        )));
    }

    Ok(PriorityVector::new(
        magnitudes.into_iter().map(|m| m / total).collect(),
    ))
}

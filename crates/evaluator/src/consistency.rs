use crate::error::EvaluatorError;

/// Random consistency index (CIr) for matrices of dimension 2 through 8,
/// indexed by `q - 2`.
pub const RANDOM_CONSISTENCY_INDEX: [f64; 7] = [0.0, 0.52, 0.90, 1.12, 1.24, 1.32, 1.41];

/// Looks up CIr for a `q`×`q` matrix.
///
/// Dimensions outside the table fail with `DimensionOutOfRange`. The table
/// entry for `q = 2` is zero, which would make the consistency ratio a
/// division by zero, so it fails with `UndefinedConsistency`.
pub fn random_index(q: usize) -> Result<f64, EvaluatorError> {
    let cir = q
        .checked_sub(2)
        .and_then(|i| RANDOM_CONSISTENCY_INDEX.get(i))
        .copied()
        .ok_or(EvaluatorError::DimensionOutOfRange(q))?;

    if cir == 0.0 {
        return Err(EvaluatorError::UndefinedConsistency(q));
    }
    Ok(cir)
}

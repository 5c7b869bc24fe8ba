use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("dimension mismatch for {name}: expected {expected}, found {found}")]
    DimensionMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("the number of steps n must be positive")]
    ZeroSteps,
    #[error("the output stride n_step must be positive")]
    ZeroOutputStride,
    #[error("unknown integration method {0:?}, expected one of ETDRK4, IFRK4")]
    UnknownMethod(String),
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

#[inline]
pub(crate) fn ensure_len(
    name: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), SolverError> {
    if expected != found {
        return Err(SolverError::DimensionMismatch {
            name,
            expected,
            found,
        });
    }
    Ok(())
}

use thiserror::Error;

// Unified error type for ddjacobi. Row indices are stored 1-indexed, as reported.

#[derive(Error, Debug)]
pub enum JacobiError {
    #[error("zero on the main diagonal at row {row}, the reduced matrix cannot be built")]
    ZeroOnDiagonal { row: usize },
    #[error("rows {first} and {second} both need column {column} on the diagonal, diagonal dominance cannot be reached")]
    TransformationInfeasible { first: usize, second: usize, column: usize },
    #[error("row {row} has no coefficient exceeding the sum of the others")]
    NoQualifyingColumn { row: usize },
    #[error("matrix is still not diagonally dominant after the row permutation")]
    TransformationStillNotDominant,
    #[error("iterations diverge: no convergence after {iterations} iterations")]
    ExceededIterationLimit { iterations: usize },
    #[error("system does not converge: error became non-finite at iteration {iteration}")]
    NonConvergentSystem { iteration: usize },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl JacobiError {
    /// Failures raised while searching for a dominant row permutation.
    pub fn is_transformation_failure(&self) -> bool {
        matches!(
            self,
            JacobiError::TransformationInfeasible { .. }
                | JacobiError::NoQualifyingColumn { .. }
                | JacobiError::TransformationStillNotDominant
        )
    }

    /// Failures raised by the fixed-point loop itself.
    pub fn is_iteration_failure(&self) -> bool {
        matches!(
            self,
            JacobiError::ExceededIterationLimit { .. } | JacobiError::NonConvergentSystem { .. }
        )
    }
}

impl From<serde_json::Error> for JacobiError {
    fn from(e: serde_json::Error) -> Self {
        JacobiError::Config(e.to_string())
    }
}

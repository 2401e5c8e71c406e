//! Solve options.
//!
//! `SolveConfig` carries the tolerance, the optional iteration cap, and how
//! the row permutation treats a row with no qualifying dominant column.

use crate::core::traits::Real;
use crate::error::JacobiError;
use crate::utils::convergence::Convergence;
use serde::{Deserialize, Serialize};

/// What to do with a row where no coefficient exceeds the sum of the others.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnFallback {
    /// Fail with `NoQualifyingColumn`.
    #[default]
    Reject,
    /// Assume column 0, as the classic lab program did.
    FirstColumn,
}

/// Tolerance, iteration cap and permutation policy for one solve.
#[derive(Clone, Copy, Debug)]
pub struct SolveConfig<T> {
    /// Stop once the largest per-variable change drops below this.
    pub tolerance: T,
    /// Give up after this many passes (`None`: no cap).
    pub max_iterations: Option<usize>,
    pub column_fallback: ColumnFallback,
}

impl<T: Real> SolveConfig<T> {
    pub fn new(tolerance: T) -> Self {
        Self { tolerance, max_iterations: None, column_fallback: ColumnFallback::Reject }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_column_fallback(mut self, fallback: ColumnFallback) -> Self {
        self.column_fallback = fallback;
        self
    }

    pub fn validate(&self) -> Result<(), JacobiError> {
        if !(self.tolerance.is_finite() && self.tolerance > T::zero()) {
            return Err(JacobiError::InvalidInput(format!(
                "accuracy must be a positive finite number, got {:?}",
                self.tolerance
            )));
        }
        if self.max_iterations == Some(0) {
            return Err(JacobiError::InvalidInput("iteration cap must be at least 1".into()));
        }
        Ok(())
    }

    pub fn convergence(&self) -> Convergence<T> {
        Convergence { tol: self.tolerance, max_iters: self.max_iterations }
    }
}

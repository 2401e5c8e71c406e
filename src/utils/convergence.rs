//! Convergence tracking & tolerance checks for the fixed-point loop.

use crate::core::traits::Real;

/// Stopping criteria.
#[derive(Clone, Copy, Debug)]
pub struct Convergence<T> {
    pub tol: T,
    /// Iteration cap; `None` iterates until the tolerance is met.
    pub max_iters: Option<usize>,
}

/// Verdict after one pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassStatus {
    Continue,
    Converged,
    LimitReached,
    NonFinite,
}

#[derive(Clone, Debug)]
pub struct SolveStats<T> {
    pub iterations: usize,
    pub final_error: T,
    pub converged: bool,
}

impl<T: Real> Convergence<T> {
    /// Classify pass `i` (1-based) that ended with maximum change `abs_err`.
    ///
    /// Checks run in order: non-finite error, tolerance, iteration cap.
    /// An error exactly equal to the tolerance ends the loop as converged.
    pub fn check(&self, abs_err: T, i: usize) -> PassStatus {
        if !abs_err.is_finite() {
            return PassStatus::NonFinite;
        }
        if abs_err < self.tol {
            return PassStatus::Converged;
        }
        if let Some(m) = self.max_iters {
            if i >= m {
                return PassStatus::LimitReached;
            }
        }
        // abs_err == tol: the classic loop stops here without printing a result; treated as converged.
        if abs_err > self.tol { PassStatus::Continue } else { PassStatus::Converged }
    }
}

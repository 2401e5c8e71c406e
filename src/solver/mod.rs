//! Iterative solver interfaces.

use crate::utils::convergence::SolveStats;

/// Common interface for iterative solvers over a prepared system `M`.
pub trait LinearSolver<M, V> {
    type Error;
    type Scalar: Copy + PartialOrd;
    /// Solve the system held by `a`, writing the result into `x`.
    /// Returns iteration stats.
    fn solve(&mut self, a: &M, x: &mut V) -> Result<SolveStats<Self::Scalar>, Self::Error>;
}

pub mod jacobi;
pub use jacobi::{IterationOutcome, IterationRecord, JacobiIterator, JacobiSolver};

//! Core linear-algebra traits for ddjacobi.

use std::fmt::Debug;

use num_traits::Float;

/// Real scalar type the solver pipeline is generic over (`f32`, `f64`).
pub trait Real: Float + Debug + Send + Sync + 'static {}

impl<T: Float + Debug + Send + Sync + 'static> Real for T {}

/// Matrix–vector product: y ← A x.
pub trait MatVec<V: ?Sized> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V);
}

/// Order of a square system (or length for a vector).
pub trait Indexing {
    /// Number of rows.
    fn nrows(&self) -> usize;
}

/// Read access to the `n × n` coefficient block of a square system.
///
/// Implemented by both the augmented matrix (its right-hand side column is
/// never visited) and the extracted coefficient matrix, so the dominance
/// checks run on either.
pub trait Coefficients<T>: Indexing {
    /// Coefficient in row `i`, column `j` (`j < nrows()`).
    fn coeff(&self, i: usize, j: usize) -> T;
}

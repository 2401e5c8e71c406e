//! Row diagonal dominance and the norm criterion for Jacobi convergence.
//!
//! A row is dominant when `|a_ii| >= Σ_{j != i} |a_ij|`. A 1×1 system has an
//! empty sum, so even a zero coefficient counts as dominant here; the zero is
//! caught later by the reducer.

use crate::core::traits::{Coefficients, Real};
use crate::matrix::ReducedSystem;

/// Row-by-row magnitudes behind a dominance verdict.
#[derive(Clone, Debug, PartialEq)]
pub struct DominanceReport<T> {
    /// `|a_ii|` per row.
    pub diagonal: Vec<T>,
    /// `Σ_{j != i} |a_ij|` per row.
    pub off_diagonal_sums: Vec<T>,
}

impl<T: Real> DominanceReport<T> {
    pub fn row_dominant(&self, i: usize) -> bool {
        self.diagonal[i] >= self.off_diagonal_sums[i]
    }

    /// First non-dominant row (0-based), if any.
    pub fn first_failing_row(&self) -> Option<usize> {
        (0..self.diagonal.len()).find(|&i| !self.row_dominant(i))
    }

    pub fn is_dominant(&self) -> bool {
        self.first_failing_row().is_none()
    }
}

/// Collect diagonal magnitudes and off-diagonal sums for every row.
pub fn check<T: Real, M: Coefficients<T>>(matrix: &M) -> DominanceReport<T> {
    let n = matrix.nrows();
    let mut diagonal = Vec::with_capacity(n);
    let mut off_diagonal_sums = Vec::with_capacity(n);
    for i in 0..n {
        diagonal.push(matrix.coeff(i, i).abs());
        let sum = (0..n)
            .filter(|&j| j != i)
            .fold(T::zero(), |acc, j| acc + matrix.coeff(i, j).abs());
        off_diagonal_sums.push(sum);
    }
    DominanceReport { diagonal, off_diagonal_sums }
}

pub fn is_diagonally_dominant<T: Real, M: Coefficients<T>>(matrix: &M) -> bool {
    check(matrix).is_dominant()
}

/// `||C||_inf < 1` for the reduced iteration matrix, the norm-based sufficient condition.
pub fn is_norm_convergent<T: Real>(reduced: &ReducedSystem<T>) -> bool {
    reduced.norm_inf() < T::one()
}

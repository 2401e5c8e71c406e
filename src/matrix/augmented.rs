//! Dense augmented system `[A | b]` on top of Faer.
//!
//! `AugmentedMatrix` owns an `n × (n + 1)` `faer::Mat<T>`. The coefficient block
//! and the right-hand side are extracted as independent copies, so no later
//! pipeline stage aliases the input.

use crate::core::traits::{Coefficients, Indexing, MatVec, Real};
use crate::error::JacobiError;
use faer::Mat;

/// Square system stored row-major as `n` rows of `n + 1` entries.
#[derive(Clone, Debug)]
pub struct AugmentedMatrix<T> {
    data: Mat<T>,
}

impl<T: Real> AugmentedMatrix<T> {
    /// Build from rows; every row must hold `n` coefficients followed by the constant.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, JacobiError> {
        let n = rows.len();
        if n == 0 {
            return Err(JacobiError::InvalidInput("system must have at least one equation".into()));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n + 1 {
                return Err(JacobiError::InvalidInput(format!(
                    "row {} has {} entries, expected {}",
                    i + 1,
                    row.len(),
                    n + 1
                )));
            }
        }
        Ok(Self { data: Mat::from_fn(n, n + 1, |i, j| rows[i][j]) })
    }

    /// Order `n` of the system.
    pub fn order(&self) -> usize {
        self.data.nrows()
    }

    /// Entry at row `i`, column `j` (`j == n` is the right-hand side).
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[(i, j)]
    }

    /// Copy of row `i`, constant included.
    pub fn row(&self, i: usize) -> Vec<T> {
        (0..=self.order()).map(|j| self.data[(i, j)]).collect()
    }

    /// All rows, constants included.
    pub fn rows(&self) -> Vec<Vec<T>> {
        (0..self.order()).map(|i| self.row(i)).collect()
    }

    /// Owned copy of the `n × n` coefficient block.
    pub fn coefficients(&self) -> CoefficientMatrix<T> {
        let n = self.order();
        CoefficientMatrix { data: Mat::from_fn(n, n, |i, j| self.data[(i, j)]) }
    }

    /// Owned copy of the right-hand side column.
    pub fn rhs(&self) -> Vec<T> {
        let n = self.order();
        (0..n).map(|i| self.data[(i, n)]).collect()
    }

    /// Move whole rows: the row at index `i` lands at `destination[i]`.
    ///
    /// `destination` must be a permutation of `0..n`.
    pub fn permute_rows(&self, destination: &[usize]) -> Self {
        let n = self.order();
        debug_assert_eq!(destination.len(), n);
        let mut source = vec![0; n];
        for (i, &d) in destination.iter().enumerate() {
            source[d] = i;
        }
        Self { data: Mat::from_fn(n, n + 1, |i, j| self.data[(source[i], j)]) }
    }

    /// Per-equation residuals `b_i - Σ_j A[i][j] x_j`.
    pub fn residuals(&self, x: &[T]) -> Result<Vec<T>, JacobiError> {
        let n = self.order();
        if x.len() != n {
            return Err(JacobiError::InvalidInput(format!(
                "solution vector has {} entries, expected {}",
                x.len(),
                n
            )));
        }
        let mut ax = vec![T::zero(); n];
        self.coefficients().matvec(x, &mut ax[..]);
        Ok(ax.iter().enumerate().map(|(i, &v)| self.data[(i, n)] - v).collect())
    }
}

impl<T> Indexing for AugmentedMatrix<T> {
    fn nrows(&self) -> usize {
        self.data.nrows()
    }
}

impl<T: Real> Coefficients<T> for AugmentedMatrix<T> {
    fn coeff(&self, i: usize, j: usize) -> T {
        self.data[(i, j)]
    }
}

/// Owned `n × n` coefficient block, detached from its augmented source.
#[derive(Clone, Debug)]
pub struct CoefficientMatrix<T> {
    data: Mat<T>,
}

impl<T> Indexing for CoefficientMatrix<T> {
    fn nrows(&self) -> usize {
        self.data.nrows()
    }
}

impl<T: Real> Coefficients<T> for CoefficientMatrix<T> {
    fn coeff(&self, i: usize, j: usize) -> T {
        self.data[(i, j)]
    }
}

/// Computes `y = A * x` for the coefficient block.
///
/// Rows are independent, so with the `rayon` feature they are evaluated in parallel.
impl<T: Real> MatVec<[T]> for CoefficientMatrix<T> {
    fn matvec(&self, x: &[T], y: &mut [T]) {
        let n = self.data.nrows();
        assert_eq!(n, y.len(), "Output vector y has incorrect length");
        assert_eq!(n, x.len(), "Input vector x has incorrect length");
        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;
            y.par_iter_mut().enumerate().for_each(|(i, yi)| {
                *yi = (0..n).fold(T::zero(), |acc, j| acc + self.data[(i, j)] * x[j]);
            });
        }
        #[cfg(not(feature = "rayon"))]
        {
            for (i, yi) in y.iter_mut().enumerate() {
                *yi = (0..n).fold(T::zero(), |acc, j| acc + self.data[(i, j)] * x[j]);
            }
        }
    }
}

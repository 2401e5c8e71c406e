//! Reduction of `A x = b` into Jacobi iteration form `x = b' - C x`.
//!
//! Each row is divided by its diagonal entry: `C[i][j] = A[i][j] / A[i][i]` for
//! `j != i`, `C[i][i] = 0`, and `b'[i] = b[i] / A[i][i]`. The reduction is
//! undefined as soon as one diagonal entry is exactly zero.

use crate::core::traits::{Coefficients, Indexing, Real};
use crate::error::JacobiError;
use crate::matrix::AugmentedMatrix;
use faer::Mat;

/// Iteration matrix `C` with a zero diagonal, plus the scaled right-hand side.
#[derive(Clone, Debug)]
pub struct ReducedSystem<T> {
    coeff: Mat<T>,
    rhs: Vec<T>,
}

impl<T: Real> ReducedSystem<T> {
    /// Reduce an augmented matrix, failing on the first zero diagonal entry.
    pub fn reduce(matrix: &AugmentedMatrix<T>) -> Result<Self, JacobiError> {
        let n = matrix.order();
        if let Some(i) = (0..n).find(|&i| matrix.get(i, i) == T::zero()) {
            return Err(JacobiError::ZeroOnDiagonal { row: i + 1 });
        }
        let coeff = Mat::from_fn(n, n, |i, j| {
            if i == j { T::zero() } else { matrix.get(i, j) / matrix.get(i, i) }
        });
        let rhs = (0..n).map(|i| matrix.get(i, n) / matrix.get(i, i)).collect();
        Ok(Self { coeff, rhs })
    }

    /// Build directly from an iteration matrix and right-hand side.
    pub fn from_parts(coeff: Mat<T>, rhs: Vec<T>) -> Result<Self, JacobiError> {
        if coeff.nrows() != coeff.ncols() || coeff.nrows() != rhs.len() {
            return Err(JacobiError::InvalidInput(format!(
                "reduced system shape mismatch: {}x{} matrix, rhs of length {}",
                coeff.nrows(),
                coeff.ncols(),
                rhs.len()
            )));
        }
        Ok(Self { coeff, rhs })
    }

    pub fn order(&self) -> usize {
        self.rhs.len()
    }

    pub fn coeff_matrix(&self) -> &Mat<T> {
        &self.coeff
    }

    pub fn rhs(&self) -> &[T] {
        &self.rhs
    }

    /// Infinity norm of the iteration matrix: `max_i Σ_j |C[i][j]|`.
    pub fn norm_inf(&self) -> T {
        let n = self.order();
        (0..n)
            .map(|i| (0..n).fold(T::zero(), |acc, j| acc + self.coeff[(i, j)].abs()))
            .fold(T::zero(), T::max)
    }

    /// Rows of `[C | b']`, for dumps.
    pub fn rows(&self) -> Vec<Vec<T>> {
        let n = self.order();
        (0..n)
            .map(|i| (0..n).map(|j| self.coeff[(i, j)]).chain(std::iter::once(self.rhs[i])).collect())
            .collect()
    }
}

impl<T> Indexing for ReducedSystem<T> {
    fn nrows(&self) -> usize {
        self.rhs.len()
    }
}

impl<T: Real> Coefficients<T> for ReducedSystem<T> {
    fn coeff(&self, i: usize, j: usize) -> T {
        self.coeff[(i, j)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divides_rows_by_diagonal() {
        let a = AugmentedMatrix::from_rows(&[vec![4.0, 1.0, 5.0], vec![1.0, 2.0, 6.0]]).unwrap();
        let r = ReducedSystem::reduce(&a).unwrap();
        assert_eq!(r.coeff(0, 0), 0.0);
        assert_eq!(r.coeff(1, 1), 0.0);
        assert_eq!(r.coeff(0, 1), 0.25);
        assert_eq!(r.coeff(1, 0), 0.5);
        assert_eq!(r.rhs(), &[1.25, 3.0]);
    }

    #[test]
    fn zero_diagonal_names_first_row() {
        let a = AugmentedMatrix::from_rows(&[vec![0.0, 1.0, 5.0], vec![1.0, 0.0, 5.0]]).unwrap();
        match ReducedSystem::reduce(&a) {
            Err(JacobiError::ZeroOnDiagonal { row }) => assert_eq!(row, 1),
            other => panic!("expected ZeroOnDiagonal, got {:?}", other),
        }
    }

    #[test]
    fn zero_diagonal_later_row() {
        let a = AugmentedMatrix::from_rows(&[vec![2.0, 1.0, 5.0], vec![1.0, 0.0, 5.0]]).unwrap();
        assert!(matches!(ReducedSystem::reduce(&a), Err(JacobiError::ZeroOnDiagonal { row: 2 })));
    }

    #[test]
    fn reduction_is_deterministic() {
        let a = AugmentedMatrix::<f64>::from_rows(&[
            vec![3.0, 0.1, 0.7, 1.0],
            vec![0.3, 7.0, 1.1, 2.0],
            vec![0.9, 0.2, 9.0, 3.0],
        ])
        .unwrap();
        let r1 = ReducedSystem::reduce(&a).unwrap();
        let r2 = ReducedSystem::reduce(&a).unwrap();
        for (row1, row2) in r1.rows().iter().zip(r2.rows().iter()) {
            for (v1, v2) in row1.iter().zip(row2) {
                assert_eq!(v1.to_bits(), v2.to_bits());
            }
        }
    }

    #[test]
    fn from_parts_checks_shape() {
        let c = Mat::from_fn(2, 2, |i, j| if i == j { 0.0 } else { 0.25 });
        let r = ReducedSystem::from_parts(c.clone(), vec![1.0, 2.0]).unwrap();
        assert_eq!(r.order(), 2);
        assert_eq!(r.norm_inf(), 0.25);
        assert!(matches!(
            ReducedSystem::from_parts(c, vec![1.0]),
            Err(JacobiError::InvalidInput(_))
        ));
        let wide = Mat::from_fn(2, 3, |_, _| 0.0);
        assert!(ReducedSystem::from_parts(wide, vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn infinity_norm() {
        let a = AugmentedMatrix::from_rows(&[vec![4.0, -1.0, 0.0], vec![2.0, 4.0, 0.0]]).unwrap();
        let r = ReducedSystem::reduce(&a).unwrap();
        assert_eq!(r.norm_inf(), 0.5);
    }
}

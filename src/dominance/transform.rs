//! Row permutation towards diagonal dominance.
//!
//! For every row we look for a column whose coefficient is strictly larger in
//! magnitude than the sum of the row's other coefficients. When several
//! columns qualify, the last one scanned wins. Each row is then moved so its
//! qualifying column lands on the diagonal. Two rows needing the same column
//! make the permutation impossible.
//!
//! The result is not guaranteed dominant; callers re-run the checker.

use crate::config::ColumnFallback;
use crate::core::traits::Real;
use crate::error::JacobiError;
use crate::matrix::AugmentedMatrix;
use crate::utils::trace::{TraceEvent, TraceSink};

/// A permuted system and where each original row went.
#[derive(Clone, Debug)]
pub struct Transformation<T> {
    pub matrix: AugmentedMatrix<T>,
    /// `destination[i]` is the new index of original row `i`.
    pub destination: Vec<usize>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DominanceTransformer {
    pub fallback: ColumnFallback,
}

impl DominanceTransformer {
    pub fn new(fallback: ColumnFallback) -> Self {
        Self { fallback }
    }

    /// Per row, the last column `j` with `|a_ij| > Σ_{k != j} |a_ik|`.
    pub fn dominant_columns<T: Real>(matrix: &AugmentedMatrix<T>) -> Vec<Option<usize>> {
        let n = matrix.order();
        (0..n)
            .map(|i| {
                let mut found = None;
                for j in 0..n {
                    let rest = (0..n)
                        .filter(|&k| k != j)
                        .fold(T::zero(), |acc, k| acc + matrix.get(i, k).abs());
                    if matrix.get(i, j).abs() > rest {
                        found = Some(j);
                    }
                }
                found
            })
            .collect()
    }

    /// Permute rows so every row's dominant column sits on the diagonal.
    pub fn transform<T: Real>(
        &self,
        matrix: &AugmentedMatrix<T>,
        sink: &mut dyn TraceSink<T>,
    ) -> Result<Transformation<T>, JacobiError> {
        let n = matrix.order();
        let mut destination = Vec::with_capacity(n);
        for (i, column) in Self::dominant_columns(matrix).into_iter().enumerate() {
            let column = match (column, self.fallback) {
                (Some(j), _) => j,
                (None, ColumnFallback::Reject) => {
                    return Err(JacobiError::NoQualifyingColumn { row: i + 1 });
                }
                (None, ColumnFallback::FirstColumn) => {
                    sink.record(TraceEvent::ColumnFallback { row: i + 1 });
                    0
                }
            };
            destination.push(column);
        }

        let mut owner: Vec<Option<usize>> = vec![None; n];
        for (i, &column) in destination.iter().enumerate() {
            if let Some(first) = owner[column] {
                return Err(JacobiError::TransformationInfeasible {
                    first: first + 1,
                    second: i + 1,
                    column: column + 1,
                });
            }
            owner[column] = Some(i);
        }

        sink.record(TraceEvent::PermutationFound { destination: destination.clone() });
        Ok(Transformation { matrix: matrix.permute_rows(&destination), destination })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dominance::is_diagonally_dominant;

    fn aug(rows: &[Vec<f64>]) -> AugmentedMatrix<f64> {
        AugmentedMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn swaps_rows_into_dominant_order() {
        let m = aug(&[vec![1.0, 5.0, 7.0], vec![5.0, 1.0, 11.0]]);
        assert_eq!(DominanceTransformer::dominant_columns(&m), vec![Some(1), Some(0)]);
        let t = DominanceTransformer::default().transform(&m, &mut ()).unwrap();
        assert_eq!(t.destination, vec![1, 0]);
        assert_eq!(t.matrix.row(0), vec![5.0, 1.0, 11.0]);
        assert_eq!(t.matrix.row(1), vec![1.0, 5.0, 7.0]);
        assert!(is_diagonally_dominant(&t.matrix));
    }

    #[test]
    fn competing_rows_are_infeasible() {
        let m = aug(&[vec![5.0, 1.0, 1.0], vec![4.0, 1.0, 2.0]]);
        match DominanceTransformer::default().transform(&m, &mut ()) {
            Err(JacobiError::TransformationInfeasible { first, second, column }) => {
                assert_eq!((first, second, column), (1, 2, 1));
            }
            other => panic!("expected TransformationInfeasible, got {:?}", other.map(|t| t.destination)),
        }
    }

    #[test]
    fn missing_column_rejected_by_default() {
        let m = aug(&[vec![1.0, 1.0, 1.0, 0.0], vec![1.0, 5.0, 1.0, 0.0], vec![1.0, 1.0, 5.0, 0.0]]);
        assert_eq!(DominanceTransformer::dominant_columns(&m)[0], None);
        let err = DominanceTransformer::default().transform(&m, &mut ()).unwrap_err();
        assert!(matches!(err, JacobiError::NoQualifyingColumn { row: 1 }));
    }

    #[test]
    fn first_column_fallback_is_traced() {
        let m = aug(&[vec![1.0, 1.0, 1.0, 0.0], vec![1.0, 5.0, 1.0, 0.0], vec![1.0, 1.0, 5.0, 0.0]]);
        let mut events: Vec<TraceEvent<f64>> = Vec::new();
        let t = DominanceTransformer::new(ColumnFallback::FirstColumn)
            .transform(&m, &mut events)
            .unwrap();
        assert_eq!(t.destination, vec![0, 1, 2]);
        assert!(matches!(events[0], TraceEvent::ColumnFallback { row: 1 }));
        assert!(!is_diagonally_dominant(&t.matrix));
    }

    #[test]
    fn three_by_three_cycle() {
        let m = aug(&[
            vec![1.0, 1.0, 6.0, 8.0],
            vec![7.0, 2.0, 1.0, 10.0],
            vec![1.0, 9.0, 2.0, 12.0],
        ]);
        let t = DominanceTransformer::default().transform(&m, &mut ()).unwrap();
        assert_eq!(t.destination, vec![2, 0, 1]);
        assert_eq!(t.matrix.row(0), vec![7.0, 2.0, 1.0, 10.0]);
        assert!(is_diagonally_dominant(&t.matrix));
    }
}

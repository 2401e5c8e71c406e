//! JSON problem description.
//!
//! ```json
//! { "matrixOrder": 2, "matrix": [[4, 1, 5], [1, 3, 6]], "accuracy": 1e-6, "M": 100 }
//! ```
//!
//! Integer and real entries are both read as `f64`. `M` may be omitted.

use crate::config::options::{ColumnFallback, SolveConfig};
use crate::error::JacobiError;
use crate::matrix::AugmentedMatrix;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemDescription {
    /// Number of unknowns `n`.
    pub matrix_order: usize,
    /// `n` rows of `n + 1` numbers, the last being the constant term.
    pub matrix: Vec<Vec<f64>>,
    /// Tolerance on the largest per-variable change.
    pub accuracy: f64,
    /// Optional iteration cap.
    #[serde(rename = "M", default, skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<usize>,
    #[serde(default)]
    pub column_fallback: ColumnFallback,
}

impl ProblemDescription {
    pub fn from_json_str(s: &str) -> Result<Self, JacobiError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, JacobiError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn to_json(&self) -> Result<String, JacobiError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate and split into the system and its solve options.
    pub fn into_parts(self) -> Result<(AugmentedMatrix<f64>, SolveConfig<f64>), JacobiError> {
        let n = self.matrix_order;
        if n == 0 {
            return Err(JacobiError::Config("matrixOrder must be at least 1".into()));
        }
        if self.matrix.len() != n {
            return Err(JacobiError::Config(format!(
                "matrixOrder is {} but the matrix has {} rows",
                n,
                self.matrix.len()
            )));
        }
        if let Some((i, j)) = self
            .matrix
            .iter()
            .enumerate()
            .find_map(|(i, row)| row.iter().position(|v| !v.is_finite()).map(|j| (i, j)))
        {
            return Err(JacobiError::Config(format!("entry ({}, {}) is not finite", i + 1, j + 1)));
        }
        let matrix = AugmentedMatrix::from_rows(&self.matrix)?;
        let mut config = SolveConfig::new(self.accuracy).with_column_fallback(self.column_fallback);
        config.max_iterations = self.max_iterations;
        config.validate()?;
        Ok((matrix, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_numbers() {
        let p = ProblemDescription::from_json_str(
            r#"{"matrixOrder": 2, "matrix": [[4, 1.5, 5], [1, 3, 6]], "accuracy": 0.001, "M": 10}"#,
        )
        .unwrap();
        assert_eq!(p.matrix[0][1], 1.5);
        assert_eq!(p.max_iterations, Some(10));
        let (m, cfg) = p.into_parts().unwrap();
        assert_eq!(m.order(), 2);
        assert_eq!(m.get(1, 2), 6.0);
        assert_eq!(cfg.tolerance, 0.001);
        assert_eq!(cfg.max_iterations, Some(10));
    }

    #[test]
    fn cap_is_optional() {
        let p = ProblemDescription::from_json_str(
            r#"{"matrixOrder": 1, "matrix": [[2, 4]], "accuracy": 0.1}"#,
        )
        .unwrap();
        assert_eq!(p.max_iterations, None);
        assert_eq!(p.column_fallback, ColumnFallback::Reject);
        let (_, cfg) = p.into_parts().unwrap();
        assert_eq!(cfg.max_iterations, None);
    }

    #[test]
    fn rejects_shape_mismatch() {
        let p = ProblemDescription::from_json_str(
            r#"{"matrixOrder": 3, "matrix": [[1, 2, 3], [4, 5, 6]], "accuracy": 0.1}"#,
        )
        .unwrap();
        assert!(matches!(p.into_parts(), Err(JacobiError::Config(_))));
        let p = ProblemDescription::from_json_str(
            r#"{"matrixOrder": 2, "matrix": [[1, 2], [4, 5, 6]], "accuracy": 0.1}"#,
        )
        .unwrap();
        assert!(matches!(p.into_parts(), Err(JacobiError::InvalidInput(_))));
    }

    #[test]
    fn rejects_bad_accuracy_and_json() {
        let p = ProblemDescription::from_json_str(
            r#"{"matrixOrder": 1, "matrix": [[2, 4]], "accuracy": -1.0}"#,
        )
        .unwrap();
        assert!(p.into_parts().is_err());
        assert!(matches!(
            ProblemDescription::from_json_str("{\"matrixOrder\": 1"),
            Err(JacobiError::Config(_))
        ));
    }

    #[test]
    fn round_trips_through_json() {
        let p = ProblemDescription {
            matrix_order: 1,
            matrix: vec![vec![2.0, 4.0]],
            accuracy: 0.5,
            max_iterations: None,
            column_fallback: ColumnFallback::FirstColumn,
        };
        let s = p.to_json().unwrap();
        assert!(s.contains("\"matrixOrder\""));
        assert!(s.contains("\"first-column\""));
        assert!(!s.contains("\"M\""));
    }
}

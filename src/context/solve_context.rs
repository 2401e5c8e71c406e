//! Solve pipeline for `A x = b` by Jacobi iteration.
//!
//! `SolveContext` sequences the stages:
//!
//! 1. try to reduce the original matrix (a zero diagonal is only traced here),
//! 2. check row diagonal dominance of the original matrix,
//! 3. dominant: reduce and iterate directly,
//! 4. otherwise: permute rows, re-check dominance, reduce, iterate.
//!
//! Every failure is terminal for the solve and comes back as a `JacobiError`;
//! the branch decisions and intermediate matrices go to the trace sink.

use crate::config::SolveConfig;
use crate::core::traits::Real;
use crate::dominance::{self, DominanceTransformer};
use crate::error::JacobiError;
use crate::matrix::{AugmentedMatrix, ReducedSystem};
use crate::solver::JacobiIterator;
use crate::utils::trace::{MatrixStage, SolveOutcome, TraceEvent, TraceSink};

/// Path the pipeline took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// The input was dominant and was iterated as given.
    Direct,
    /// The rows were permuted first.
    Transformed,
    /// The solve stopped with an error.
    Failed,
}

/// Converged solve.
#[derive(Clone, Debug)]
pub struct Solution<T> {
    pub x: Vec<T>,
    /// Last-pass change per variable.
    pub errors: Vec<T>,
    /// `b_i - Σ_j A[i][j] x_j` against the matrix that was iterated.
    pub residuals: Vec<T>,
    pub iterations: usize,
    pub branch: Branch,
    /// `permutation[i]` is the new position of original row `i` (transformed branch only).
    pub permutation: Option<Vec<usize>>,
}

pub struct SolveContext<T> {
    pub config: SolveConfig<T>,
}

impl<T: Real> SolveContext<T> {
    pub fn new(config: SolveConfig<T>) -> Self {
        Self { config }
    }

    /// Solve the system, reporting every stage to `sink`.
    pub fn solve(
        &self,
        matrix: &AugmentedMatrix<T>,
        sink: &mut dyn TraceSink<T>,
    ) -> Result<Solution<T>, JacobiError> {
        let result = self.run_pipeline(matrix, sink);
        let outcome = match &result {
            Ok(sol) => SolveOutcome::Solved { branch: sol.branch, iterations: sol.iterations },
            Err(e) => {
                log::warn!("solve failed: {}", e);
                sink.record(TraceEvent::BranchTaken(Branch::Failed));
                SolveOutcome::Failed { reason: e.to_string() }
            }
        };
        sink.record(TraceEvent::Finished { outcome });
        result
    }

    fn run_pipeline(
        &self,
        matrix: &AugmentedMatrix<T>,
        sink: &mut dyn TraceSink<T>,
    ) -> Result<Solution<T>, JacobiError> {
        self.config.validate()?;

        let reduced = ReducedSystem::reduce(matrix);
        if let Err(JacobiError::ZeroOnDiagonal { row }) = &reduced {
            sink.record(TraceEvent::ReductionUnavailable { row: *row });
        }

        let report = dominance::check(matrix);
        let dominant = report.is_dominant();
        sink.record(TraceEvent::DominanceChecked { stage: MatrixStage::Original, report });
        if dominant {
            log::info!("original matrix is diagonally dominant");
            let reduced = reduced?;
            sink.record(TraceEvent::BranchTaken(Branch::Direct));
            return self.iterate(matrix, &reduced, Branch::Direct, None, sink);
        }

        log::info!("original matrix is not diagonally dominant, searching for a row permutation");
        sink.record(TraceEvent::MatrixSnapshot { stage: MatrixStage::Original, rows: matrix.rows() });
        let transformation =
            DominanceTransformer::new(self.config.column_fallback).transform(matrix, sink)?;
        let transformed = &transformation.matrix;
        sink.record(TraceEvent::MatrixSnapshot {
            stage: MatrixStage::Transformed,
            rows: transformed.rows(),
        });

        let report = dominance::check(transformed);
        let dominant = report.is_dominant();
        sink.record(TraceEvent::DominanceChecked { stage: MatrixStage::Transformed, report });
        if !dominant {
            return Err(JacobiError::TransformationStillNotDominant);
        }

        let reduced = ReducedSystem::reduce(transformed)?;
        sink.record(TraceEvent::BranchTaken(Branch::Transformed));
        self.iterate(
            transformed,
            &reduced,
            Branch::Transformed,
            Some(transformation.destination.clone()),
            sink,
        )
    }

    fn iterate(
        &self,
        matrix: &AugmentedMatrix<T>,
        reduced: &ReducedSystem<T>,
        branch: Branch,
        permutation: Option<Vec<usize>>,
        sink: &mut dyn TraceSink<T>,
    ) -> Result<Solution<T>, JacobiError> {
        sink.record(TraceEvent::MatrixSnapshot { stage: MatrixStage::Reduced, rows: reduced.rows() });
        let norm = reduced.norm_inf();
        if !dominance::is_norm_convergent(reduced) {
            log::debug!("||C||_inf = {:?} is not below 1", norm);
        }
        sink.record(TraceEvent::NormChecked { norm });

        let out = JacobiIterator::new(reduced, self.config.convergence()).run(sink)?;
        let residuals = matrix.residuals(&out.x)?;
        Ok(Solution {
            x: out.x,
            errors: out.errors,
            residuals,
            iterations: out.iterations,
            branch,
            permutation,
        })
    }
}

/// Solve `matrix` with `config`, discarding the trace.
pub fn solve<T: Real>(
    matrix: &AugmentedMatrix<T>,
    config: SolveConfig<T>,
) -> Result<Solution<T>, JacobiError> {
    SolveContext::new(config).solve(matrix, &mut ())
}

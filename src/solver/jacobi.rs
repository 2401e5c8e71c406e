//! Fixed-point iteration `x ← b' - C x` on a reduced system.
//!
//! The starting guess is the reduced right-hand side `b'`. A pass walks the
//! rows in order and overwrites `x[i]` as soon as row `i` is done, so row `i`
//! already sees the values rows `< i` produced in the same pass. The error of
//! a pass is the largest per-variable change.
//!
//! [`JacobiIterator`] is an `Iterator` over pass records: it stops after the
//! pass that converged, hit the cap, or produced a non-finite error. Call
//! [`JacobiIterator::reset`] to run it again from the initial guess.

use crate::core::traits::Real;
use crate::error::JacobiError;
use crate::matrix::ReducedSystem;
use crate::solver::LinearSolver;
use crate::utils::convergence::{Convergence, PassStatus, SolveStats};
use crate::utils::trace::{TraceEvent, TraceSink};

/// Snapshot taken after a pass.
#[derive(Clone, Debug, PartialEq)]
pub struct IterationRecord<T> {
    pub iteration: usize,
    pub x: Vec<T>,
    pub abs_err: T,
}

/// Final state of a converged run.
#[derive(Clone, Debug)]
pub struct IterationOutcome<T> {
    pub x: Vec<T>,
    /// Last-pass change per variable.
    pub errors: Vec<T>,
    pub iterations: usize,
    pub abs_err: T,
}

pub struct JacobiIterator<'a, T> {
    system: &'a ReducedSystem<T>,
    conv: Convergence<T>,
    x: Vec<T>,
    errors: Vec<T>,
    iteration: usize,
    abs_err: T,
    status: PassStatus,
}

impl<'a, T: Real> JacobiIterator<'a, T> {
    pub fn new(system: &'a ReducedSystem<T>, conv: Convergence<T>) -> Self {
        let n = system.order();
        Self {
            system,
            conv,
            x: system.rhs().to_vec(),
            errors: vec![T::zero(); n],
            iteration: 0,
            abs_err: T::zero(),
            status: PassStatus::Continue,
        }
    }

    /// Back to the initial guess, pass counter at zero.
    pub fn reset(&mut self) {
        self.x.copy_from_slice(self.system.rhs());
        self.errors.iter_mut().for_each(|e| *e = T::zero());
        self.iteration = 0;
        self.abs_err = T::zero();
        self.status = PassStatus::Continue;
    }

    pub fn x(&self) -> &[T] {
        &self.x
    }

    pub fn errors(&self) -> &[T] {
        &self.errors
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn status(&self) -> PassStatus {
        self.status
    }

    fn sweep(&mut self) {
        let c = self.system.coeff_matrix();
        let b = self.system.rhs();
        let n = b.len();
        let mut abs_err = T::zero();
        for i in 0..n {
            let s = (0..n)
                .filter(|&j| j != i)
                .fold(T::zero(), |acc, j| acc + c[(i, j)] * self.x[j]);
            let new_val = b[i] - s;
            let d = (new_val - self.x[i]).abs();
            self.errors[i] = d;
            if d > abs_err || d.is_nan() {
                abs_err = d;
            }
            self.x[i] = new_val;
        }
        self.abs_err = abs_err;
    }

    /// Verdict once the iterator is exhausted; `None` while passes remain.
    pub fn outcome(&self) -> Option<Result<IterationOutcome<T>, JacobiError>> {
        match self.status {
            PassStatus::Continue => None,
            PassStatus::Converged => Some(Ok(IterationOutcome {
                x: self.x.clone(),
                errors: self.errors.clone(),
                iterations: self.iteration,
                abs_err: self.abs_err,
            })),
            PassStatus::LimitReached => {
                Some(Err(JacobiError::ExceededIterationLimit { iterations: self.iteration }))
            }
            PassStatus::NonFinite => {
                Some(Err(JacobiError::NonConvergentSystem { iteration: self.iteration }))
            }
        }
    }

    /// Run every remaining pass, reporting pass 0 and each pass to `sink`.
    pub fn run(&mut self, sink: &mut dyn TraceSink<T>) -> Result<IterationOutcome<T>, JacobiError> {
        if self.iteration == 0 {
            sink.record(TraceEvent::IterationStarted { x: self.x.clone() });
        }
        while let Some(record) = self.next() {
            sink.record(TraceEvent::Pass(record));
        }
        match self.outcome() {
            Some(result) => {
                if let Ok(out) = &result {
                    log::info!("converged after {} iterations", out.iterations);
                }
                result
            }
            None => unreachable!("iterator exhausted while passes remain"),
        }
    }
}

impl<T: Real> Iterator for JacobiIterator<'_, T> {
    type Item = IterationRecord<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.status != PassStatus::Continue {
            return None;
        }
        self.sweep();
        self.iteration += 1;
        self.status = self.conv.check(self.abs_err, self.iteration);
        Some(IterationRecord { iteration: self.iteration, x: self.x.clone(), abs_err: self.abs_err })
    }
}

/// Jacobi solver over reduced systems.
pub struct JacobiSolver<T> {
    pub conv: Convergence<T>,
    /// Last-pass changes from the most recent `solve`.
    pub errors: Vec<T>,
}

impl<T: Real> JacobiSolver<T> {
    pub fn new(tol: T, max_iters: Option<usize>) -> Self {
        Self { conv: Convergence { tol, max_iters }, errors: Vec::new() }
    }

    pub fn iterate<'a>(&self, system: &'a ReducedSystem<T>) -> JacobiIterator<'a, T> {
        JacobiIterator::new(system, self.conv)
    }
}

impl<T: Real> LinearSolver<ReducedSystem<T>, Vec<T>> for JacobiSolver<T> {
    type Error = JacobiError;
    type Scalar = T;

    fn solve(&mut self, a: &ReducedSystem<T>, x: &mut Vec<T>) -> Result<SolveStats<T>, JacobiError> {
        let out = self.iterate(a).run(&mut ())?;
        *x = out.x;
        self.errors = out.errors;
        Ok(SolveStats { iterations: out.iterations, final_error: out.abs_err, converged: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::AugmentedMatrix;

    fn reduced(rows: &[Vec<f64>]) -> ReducedSystem<f64> {
        ReducedSystem::reduce(&AugmentedMatrix::from_rows(rows).unwrap()).unwrap()
    }

    #[test]
    fn identity_converges_in_one_pass() {
        let r = reduced(&[vec![1.0, 0.0, 3.0], vec![0.0, 1.0, -2.0]]);
        let mut it = JacobiIterator::new(&r, Convergence { tol: 1e-9, max_iters: None });
        let records: Vec<_> = it.by_ref().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].abs_err, 0.0);
        let out = it.outcome().unwrap().unwrap();
        assert_eq!(out.x, vec![3.0, -2.0]);
        assert_eq!(out.iterations, 1);
    }

    #[test]
    fn sweep_updates_in_place() {
        // C = [[0, 0.5], [0.5, 0]], b' = [1, 1]; x0 = [1, 1].
        // Row 0: 1 - 0.5 * 1 = 0.5. Row 1 sees the new x0: 1 - 0.5 * 0.5 = 0.75.
        let r = reduced(&[vec![2.0, 1.0, 2.0], vec![1.0, 2.0, 2.0]]);
        let mut it = JacobiIterator::new(&r, Convergence { tol: 1e-12, max_iters: Some(1) });
        assert_eq!(it.status(), PassStatus::Continue);
        let rec = it.next().unwrap();
        assert_eq!(it.iteration(), 1);
        assert_eq!(it.status(), PassStatus::LimitReached);
        assert_eq!(rec.x, vec![0.5, 0.75]);
        assert_eq!(rec.abs_err, 0.5);
        assert_eq!(it.errors(), &[0.5, 0.25]);
        assert!(it.next().is_none());
        assert!(matches!(
            it.outcome(),
            Some(Err(JacobiError::ExceededIterationLimit { iterations: 1 }))
        ));
    }

    #[test]
    fn reset_restarts_from_initial_guess() {
        let r = reduced(&[vec![4.0, 1.0, 5.0], vec![1.0, 3.0, 6.0]]);
        let mut it = JacobiIterator::new(&r, Convergence { tol: 1e-10, max_iters: Some(100) });
        let first: Vec<_> = it.by_ref().collect();
        assert!(it.next().is_none());
        assert_eq!(it.status(), PassStatus::Converged);
        it.reset();
        assert_eq!(it.iteration(), 0);
        assert_eq!(it.status(), PassStatus::Continue);
        assert_eq!(it.x(), r.rhs());
        let second: Vec<_> = it.by_ref().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn exploding_system_is_non_convergent() {
        let r = reduced(&[vec![1.0, 2.0, 1.0], vec![2.0, 1.0, 1.0]]);
        let err = JacobiSolver::new(1e-6, None).solve(&r, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, JacobiError::NonConvergentSystem { .. }));
    }

    #[test]
    fn iterates_system_built_from_parts() {
        // x = [1, 1] - [[0, 0.5], [0.5, 0]] x has the fixed point [2/3, 2/3].
        let c = faer::Mat::from_fn(2, 2, |i, j| if i == j { 0.0 } else { 0.5 });
        let r = ReducedSystem::from_parts(c, vec![1.0, 1.0]).unwrap();
        let mut x: Vec<f64> = Vec::new();
        JacobiSolver::new(1e-12, Some(200)).solve(&r, &mut x).unwrap();
        assert!((x[0] - 2.0 / 3.0).abs() < 1e-10);
        assert!((x[1] - 2.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn solver_trait_reports_stats() {
        let r = reduced(&[vec![4.0, 1.0, 5.0], vec![1.0, 3.0, 6.0]]);
        let mut solver = JacobiSolver::new(1e-10, Some(200));
        let mut x = Vec::new();
        let stats = solver.solve(&r, &mut x).unwrap();
        assert!(stats.converged);
        assert!(stats.final_error < 1e-10);
        assert!((x[0] - 9.0 / 11.0).abs() < 1e-9);
        assert!((x[1] - 19.0 / 11.0).abs() < 1e-9);
        assert_eq!(solver.errors.len(), 2);
    }
}

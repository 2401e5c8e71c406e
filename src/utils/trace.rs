//! Structured trace events emitted by the solve pipeline.
//!
//! Components never print. They hand events to a [`TraceSink`], and the
//! reporting side decides what to render. Sinks are provided for collecting
//! into a `Vec`, discarding (`()`), and forwarding to the `log` facade.

use crate::context::Branch;
use crate::core::traits::Real;
use crate::dominance::DominanceReport;
use crate::solver::IterationRecord;

/// Which matrix a snapshot or dominance check refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixStage {
    Original,
    Transformed,
    Reduced,
}

/// Final verdict of a solve.
#[derive(Clone, Debug, PartialEq)]
pub enum SolveOutcome {
    Solved { branch: Branch, iterations: usize },
    Failed { reason: String },
}

#[derive(Clone, Debug)]
pub enum TraceEvent<T> {
    /// The untransformed matrix has a zero on its diagonal (1-indexed row).
    ReductionUnavailable { row: usize },
    DominanceChecked { stage: MatrixStage, report: DominanceReport<T> },
    MatrixSnapshot { stage: MatrixStage, rows: Vec<Vec<T>> },
    /// No column qualified in this row (1-indexed); column 1 was assumed.
    ColumnFallback { row: usize },
    /// Destination index of every original row.
    PermutationFound { destination: Vec<usize> },
    /// Infinity norm of the reduced iteration matrix.
    NormChecked { norm: T },
    BranchTaken(Branch),
    /// Initial guess, reported as pass 0.
    IterationStarted { x: Vec<T> },
    Pass(IterationRecord<T>),
    /// Always the last event of a solve.
    Finished { outcome: SolveOutcome },
}

/// Receiver of trace events.
pub trait TraceSink<T> {
    fn record(&mut self, event: TraceEvent<T>);
}

impl<T> TraceSink<T> for Vec<TraceEvent<T>> {
    fn record(&mut self, event: TraceEvent<T>) {
        self.push(event);
    }
}

/// Discards every event.
impl<T> TraceSink<T> for () {
    fn record(&mut self, _event: TraceEvent<T>) {}
}

/// Forwards events to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl<T: Real> TraceSink<T> for LogSink {
    fn record(&mut self, event: TraceEvent<T>) {
        match event {
            TraceEvent::ReductionUnavailable { row } => {
                log::warn!("zero on the diagonal at row {}, original matrix cannot be reduced", row)
            }
            TraceEvent::DominanceChecked { stage, report } => log::debug!(
                "{:?} dominance: |a_ii| = {:?}, sums = {:?}, dominant = {}",
                stage,
                report.diagonal,
                report.off_diagonal_sums,
                report.is_dominant()
            ),
            TraceEvent::MatrixSnapshot { stage, rows } => log::debug!("{:?} matrix: {:?}", stage, rows),
            TraceEvent::ColumnFallback { row } => {
                log::warn!("row {} has no qualifying column, assuming column 1", row)
            }
            TraceEvent::PermutationFound { destination } => {
                log::debug!("row permutation: {:?}", destination)
            }
            TraceEvent::NormChecked { norm } => log::debug!("||C||_inf = {:?}", norm),
            TraceEvent::BranchTaken(branch) => log::info!("branch: {:?}", branch),
            TraceEvent::IterationStarted { x } => log::debug!("k = 0: x = {:?}", x),
            TraceEvent::Pass(rec) => {
                log::debug!("k = {}: x = {:?}, error = {:?}", rec.iteration, rec.x, rec.abs_err)
            }
            TraceEvent::Finished { outcome: SolveOutcome::Solved { branch, iterations } } => {
                log::info!("solved ({:?}) after {} iterations", branch, iterations)
            }
            TraceEvent::Finished { outcome: SolveOutcome::Failed { reason } } => {
                log::info!("no solution: {}", reason)
            }
        }
    }
}

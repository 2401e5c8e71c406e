//! Convergence bookkeeping and trace plumbing.

pub mod convergence;
pub mod trace;

pub use convergence::{Convergence, PassStatus, SolveStats};
pub use trace::{LogSink, MatrixStage, SolveOutcome, TraceEvent, TraceSink};

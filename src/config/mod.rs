//! Configuration: solve options and the JSON problem description.

pub mod options;
pub mod problem;

pub use options::{ColumnFallback, SolveConfig};
pub use problem::ProblemDescription;

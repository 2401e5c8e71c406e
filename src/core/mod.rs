//! Core traits shared by every stage of the pipeline.

pub mod traits;
pub use traits::{Coefficients, Indexing, MatVec, Real};

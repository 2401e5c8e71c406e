//! ddjacobi: Jacobi fixed-point solver with diagonal-dominance conditioning.
//!
//! The pipeline checks row diagonal dominance of `[A | b]`, permutes rows to
//! move each row's dominant coefficient onto the diagonal when needed,
//! reduces the system to iteration form `x = b' - C x`, and iterates until the
//! largest per-variable change drops below the requested accuracy.

pub mod config;
pub mod context;
pub mod core;
pub mod dominance;
pub mod error;
pub mod matrix;
pub mod report;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use context::*;
pub use crate::core::*;
pub use dominance::*;
pub use error::*;
pub use matrix::*;
pub use solver::*;
pub use utils::*;

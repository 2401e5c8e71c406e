//! Solve context: sequences the dominance check, the row permutation, the
//! reduction and the fixed-point loop.
//!
//! Modules:
//! - [`solve_context`]: the `SolveContext` orchestrator and its `Solution`.

pub mod solve_context;
pub use solve_context::{solve, Branch, Solution, SolveContext};

//! Diagonal dominance: the check, and the row permutation that tries to reach it.

pub mod checker;
pub mod transform;

pub use checker::{check, is_diagonally_dominant, is_norm_convergent, DominanceReport};
pub use transform::{DominanceTransformer, Transformation};

//! Matrix module: the augmented input system and its reduced iteration form.

pub mod augmented;
pub use augmented::{AugmentedMatrix, CoefficientMatrix};
pub mod reduced;
pub use reduced::ReducedSystem;

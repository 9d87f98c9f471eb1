//! Assignment problem solver
//!
//! Optimal one-to-one pairing between tracks (rows) and detections (columns).

pub mod engine;
pub mod matching;
pub mod matrix;
pub mod result;
pub mod solver;

pub use engine::{Potentials, SolveStats};
pub use matching::Matching;
pub use matrix::{CostMatrix, Mode};
pub use result::Assignment;
pub use solver::{assign, assign_gated, Solver, SolverConfig};

//! trackmatch: exact assignment solver for multi-target tracking
//!
//! Matches previously tracked identities to newly observed detections by
//! solving the linear assignment problem with the Kuhn-Munkres algorithm.
//!
//! # Features
//!
//! - **Exact**: always returns an optimal assignment, certified by dual potentials
//! - **Deterministic**: ties are broken by lowest column index
//! - **Rectangular**: any `m x n` shape, the smaller side is matched completely
//! - **Typed Lifecycle**: results are only reachable from a solved solver
//! - **no_std Support**: works with `alloc` only

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod assignment;
pub mod types;

pub use assignment::{assign, assign_gated, Assignment, CostMatrix, Mode, Solver, SolverConfig};

pub mod prelude {
    pub use crate::assignment::*;
    pub use crate::types::phase::*;
    pub use crate::{AssignError, InvalidInput};
}

/// Reasons an assignment problem is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    /// Value buffer length differs from `rows * cols`
    LengthMismatch { expected: usize, found: usize },
    /// `rows * cols` does not fit in `usize`
    DimensionOverflow { rows: usize, cols: usize },
    /// Value at `(row, col)` is NaN or infinite
    NonFinite { row: usize, col: usize },
    /// Gating threshold is NaN or infinite
    NonFiniteGate,
}

impl ::core::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        match self {
            InvalidInput::LengthMismatch { expected, found } => {
                write!(f, "expected {} values, found {}", expected, found)
            }
            InvalidInput::DimensionOverflow { rows, cols } => {
                write!(f, "dimensions {}x{} overflow", rows, cols)
            }
            InvalidInput::NonFinite { row, col } => {
                write!(f, "value at ({}, {}) is not finite", row, col)
            }
            InvalidInput::NonFiniteGate => write!(f, "gate is not finite"),
        }
    }
}

/// Error types for the library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignError {
    /// Problem data is malformed; nothing was solved
    InvalidInput(InvalidInput),
}

impl AssignError {
    /// Returns true if the error was caused by malformed input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AssignError::InvalidInput(_))
    }
}

impl From<InvalidInput> for AssignError {
    fn from(err: InvalidInput) -> Self {
        AssignError::InvalidInput(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AssignError {}

impl ::core::fmt::Display for AssignError {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        match self {
            AssignError::InvalidInput(reason) => write!(f, "Invalid input: {}", reason),
        }
    }
}

pub type Result<T> = ::core::result::Result<T, AssignError>;

//! Cost matrix for assignment problems
//!
//! Holds the caller's values in their original orientation alongside the
//! internal minimization matrix the engine works on. The internal matrix is
//! derived once at construction: transposed so that it never has more rows
//! than columns, negated for maximization, and penalized where a gate forbids
//! a pair.

use alloc::vec::Vec;

use nalgebra::{DMatrix, RealField};
use num_traits::Float;

use crate::{AssignError, InvalidInput};

// ============================================================================
// Mode
// ============================================================================

/// Optimization sense of an assignment problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Minimize the total cost of matched pairs.
    #[default]
    Minimize,
    /// Maximize the total utility of matched pairs.
    Maximize,
}

impl Mode {
    /// Maps an original value into the internal minimization sense.
    #[inline]
    pub fn to_internal<T: RealField + Copy>(self, value: T) -> T {
        match self {
            Mode::Minimize => value,
            Mode::Maximize => -value,
        }
    }

    /// Maps an internal minimization value back into the original sense.
    #[inline]
    pub fn from_internal<T: RealField + Copy>(self, value: T) -> T {
        // Negation is its own inverse.
        self.to_internal(value)
    }

    /// Returns true if `value` does not lie beyond `gate` for this mode.
    #[inline]
    pub fn admits<T: RealField + Copy>(self, value: T, gate: T) -> bool {
        match self {
            Mode::Minimize => value <= gate,
            Mode::Maximize => value >= gate,
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Mode::Minimize => write!(f, "minimize"),
            Mode::Maximize => write!(f, "maximize"),
        }
    }
}

// ============================================================================
// Cost Matrix
// ============================================================================

/// Cost (or utility) matrix of an assignment problem.
///
/// Rows are typically existing tracks and columns new detections, but the
/// solver makes no assumption about which side is larger.
#[derive(Debug, Clone)]
pub struct CostMatrix<T: RealField> {
    /// Values exactly as supplied, `rows x cols`
    original: DMatrix<T>,
    /// Minimization matrix with `nrows() <= ncols()`
    internal: DMatrix<T>,
    /// Whether `internal` is the transpose of `original`
    transposed: bool,
    mode: Mode,
    gate: Option<T>,
}

impl<T: RealField + Float + Copy> CostMatrix<T> {
    /// Creates a cost matrix from row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if `values.len() != rows * cols`, if the
    /// product overflows, or if any value is NaN or infinite.
    pub fn from_row_slice(
        values: &[T],
        rows: usize,
        cols: usize,
        mode: Mode,
    ) -> Result<Self, AssignError> {
        Self::build(values, rows, cols, mode, None)
    }

    /// Creates a gated cost matrix from row-major values.
    ///
    /// Pairs whose value lies beyond `gate` (above it when minimizing, below
    /// it when maximizing) are never reported as matched.
    pub fn gated(
        values: &[T],
        rows: usize,
        cols: usize,
        mode: Mode,
        gate: T,
    ) -> Result<Self, AssignError> {
        Self::build(values, rows, cols, mode, Some(gate))
    }

    /// Creates a cost matrix from an nalgebra matrix.
    pub fn from_dmatrix(
        values: &DMatrix<T>,
        mode: Mode,
        gate: Option<T>,
    ) -> Result<Self, AssignError> {
        check_finite(values.nrows(), values.ncols(), |i, j| values[(i, j)])?;
        check_gate(gate)?;
        Ok(Self::normalize(values.clone(), mode, gate))
    }

    fn build(
        values: &[T],
        rows: usize,
        cols: usize,
        mode: Mode,
        gate: Option<T>,
    ) -> Result<Self, AssignError> {
        let expected = rows
            .checked_mul(cols)
            .ok_or(InvalidInput::DimensionOverflow { rows, cols })?;
        if values.len() != expected {
            return Err(InvalidInput::LengthMismatch {
                expected,
                found: values.len(),
            }
            .into());
        }
        check_finite(rows, cols, |i, j| values[i * cols + j])?;
        check_gate(gate)?;

        Ok(Self::normalize(
            DMatrix::from_row_slice(rows, cols, values),
            mode,
            gate,
        ))
    }

    /// Derives the internal minimization matrix from validated values.
    fn normalize(original: DMatrix<T>, mode: Mode, gate: Option<T>) -> Self {
        let transposed = original.nrows() > original.ncols();
        let oriented = if transposed {
            original.transpose()
        } else {
            original.clone()
        };

        let mut internal = oriented.map(|value| mode.to_internal(value));

        if let Some(gate) = gate {
            let admissible = oriented.map(|value| mode.admits(value, gate));
            let spread = internal
                .iter()
                .zip(admissible.iter())
                .filter(|(_, ok)| **ok)
                .fold(T::zero(), |acc, (&c, _)| acc + Float::abs(c));
            let penalty = T::one() + spread + spread;

            for (c, &ok) in internal.iter_mut().zip(admissible.iter()) {
                if !ok {
                    *c = penalty;
                }
            }
        }

        Self {
            original,
            internal,
            transposed,
            mode,
            gate,
        }
    }

    /// Returns the number of rows as supplied.
    #[inline]
    pub fn rows(&self) -> usize {
        self.original.nrows()
    }

    /// Returns the number of columns as supplied.
    #[inline]
    pub fn cols(&self) -> usize {
        self.original.ncols()
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    /// Returns the optimization sense.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the gate, if any.
    #[inline]
    pub fn gate(&self) -> Option<T> {
        self.gate
    }

    /// Returns `true` if the engine works on the transpose of the input.
    #[inline]
    pub fn is_transposed(&self) -> bool {
        self.transposed
    }

    /// Original value at `(row, col)` in caller orientation.
    #[inline]
    pub fn value(&self, row: usize, col: usize) -> T {
        self.original[(row, col)]
    }

    /// Returns `true` if `(row, col)` in caller orientation may be matched.
    #[inline]
    pub fn is_admissible(&self, row: usize, col: usize) -> bool {
        match self.gate {
            Some(gate) => self.mode.admits(self.value(row, col), gate),
            None => true,
        }
    }

    /// Returns a view of the values as supplied.
    #[inline]
    pub fn as_dmatrix(&self) -> &DMatrix<T> {
        &self.original
    }

    /// Number of internal rows, `min(rows, cols)`.
    #[inline]
    pub(crate) fn internal_rows(&self) -> usize {
        self.internal.nrows()
    }

    /// Number of internal columns, `max(rows, cols)`.
    #[inline]
    pub(crate) fn internal_cols(&self) -> usize {
        self.internal.ncols()
    }

    /// Internal minimization cost at `(i, j)`.
    #[inline]
    pub(crate) fn cost(&self, i: usize, j: usize) -> T {
        self.internal[(i, j)]
    }

    /// Converts an internal `(i, j)` pair into caller `(row, col)`.
    #[inline]
    pub(crate) fn to_original(&self, i: usize, j: usize) -> (usize, usize) {
        if self.transposed {
            (j, i)
        } else {
            (i, j)
        }
    }

    /// Row-wise minima of the internal matrix.
    pub(crate) fn internal_row_minima(&self) -> Vec<T> {
        self.internal
            .row_iter()
            .map(|row| {
                row.iter()
                    .fold(Float::infinity(), |acc: T, &c| if c < acc { c } else { acc })
            })
            .collect()
    }
}

fn check_finite<T, F>(rows: usize, cols: usize, value: F) -> Result<(), AssignError>
where
    T: Float,
    F: Fn(usize, usize) -> T,
{
    for row in 0..rows {
        for col in 0..cols {
            if !Float::is_finite(value(row, col)) {
                return Err(InvalidInput::NonFinite { row, col }.into());
            }
        }
    }
    Ok(())
}

fn check_gate<T: Float>(gate: Option<T>) -> Result<(), AssignError> {
    match gate {
        Some(g) if !Float::is_finite(g) => Err(InvalidInput::NonFiniteGate.into()),
        _ => Ok(()),
    }
}

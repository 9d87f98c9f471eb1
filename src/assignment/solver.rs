//! Solver facade
//!
//! A [`Solver`] walks through two phases encoded in its type:
//! `Solver<T, Pending>` after construction and `Solver<T, Solved>` after
//! [`Solver::solve`]. Results can only be read from a solved solver, and
//! [`Solver::finalize`] consumes the solver so it cannot be used afterwards.

use core::marker::PhantomData;

use alloc::vec;

use log::debug;
use nalgebra::{DMatrix, RealField};
use num_traits::Float;

use super::engine::{Engine, Potentials, SolveStats};
use super::matching::Matching;
use super::matrix::{CostMatrix, Mode};
use super::result::Assignment;
use crate::types::phase::{Pending, Solved};
use crate::AssignError;

// ============================================================================
// Configuration
// ============================================================================

/// Solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T> {
    /// Optimization sense
    pub mode: Mode,
    /// Pairs whose value lies beyond this threshold are never matched
    pub gate: Option<T>,
}

impl<T> SolverConfig<T> {
    /// Minimize total cost, no gate.
    pub fn minimize() -> Self {
        Self {
            mode: Mode::Minimize,
            gate: None,
        }
    }

    /// Maximize total utility, no gate.
    pub fn maximize() -> Self {
        Self {
            mode: Mode::Maximize,
            gate: None,
        }
    }

    /// Sets the gating threshold.
    ///
    /// When minimizing, pairs with cost above `gate` are forbidden. When
    /// maximizing, pairs with utility below `gate` are forbidden.
    pub fn with_gate(mut self, gate: T) -> Self {
        self.gate = Some(gate);
        self
    }
}

impl<T> Default for SolverConfig<T> {
    fn default() -> Self {
        Self::minimize()
    }
}

impl<T> From<Mode> for SolverConfig<T> {
    fn from(mode: Mode) -> Self {
        Self { mode, gate: None }
    }
}

// ============================================================================
// Solver
// ============================================================================

/// Exact Kuhn-Munkres assignment solver.
///
/// # Type Parameters
///
/// - `T`: The scalar type (typically `f32` or `f64`)
/// - `P`: Lifecycle phase, [`Pending`] or [`Solved`]
///
/// # Example
///
/// ```
/// use trackmatch::prelude::*;
///
/// let solver = Solver::new(&[1.0, 2.0, 2.0, 1.0], 2, 2, Mode::Maximize).unwrap();
/// let result = solver.solve().result();
///
/// assert_eq!(result.mapping, vec![Some(1), Some(0)]);
/// assert_eq!(result.objective, 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct Solver<T: RealField, P = Pending> {
    matrix: CostMatrix<T>,
    potentials: Potentials<T>,
    matching: Matching,
    stats: SolveStats,
    _phase: PhantomData<P>,
}

impl<T: RealField + Float + Copy> Solver<T, Pending> {
    /// Creates a solver from row-major values.
    ///
    /// # Errors
    ///
    /// Returns [`AssignError::InvalidInput`] if the buffer length does not
    /// match `rows * cols` or any value is not finite.
    pub fn new(values: &[T], rows: usize, cols: usize, mode: Mode) -> Result<Self, AssignError> {
        Self::with_config(values, rows, cols, &SolverConfig::from(mode))
    }

    /// Creates a solver from row-major values and a configuration.
    pub fn with_config(
        values: &[T],
        rows: usize,
        cols: usize,
        config: &SolverConfig<T>,
    ) -> Result<Self, AssignError> {
        let matrix = match config.gate {
            Some(gate) => CostMatrix::gated(values, rows, cols, config.mode, gate)?,
            None => CostMatrix::from_row_slice(values, rows, cols, config.mode)?,
        };
        Ok(Self::from_cost_matrix(matrix))
    }

    /// Creates a solver from an nalgebra matrix.
    pub fn from_matrix(
        values: &DMatrix<T>,
        config: &SolverConfig<T>,
    ) -> Result<Self, AssignError> {
        let matrix = CostMatrix::from_dmatrix(values, config.mode, config.gate)?;
        Ok(Self::from_cost_matrix(matrix))
    }

    /// Creates a solver from an already validated cost matrix.
    pub fn from_cost_matrix(matrix: CostMatrix<T>) -> Self {
        let potentials = Potentials::initial(&matrix);
        let matching = Matching::new(matrix.internal_rows(), matrix.internal_cols());
        Self {
            matrix,
            potentials,
            matching,
            stats: SolveStats::default(),
            _phase: PhantomData,
        }
    }

    /// Runs the augmenting-path engine until every row of the smaller
    /// dimension is matched.
    pub fn solve(mut self) -> Solver<T, Solved> {
        debug!(
            "solving {}x{} assignment ({}), transposed={}",
            self.matrix.rows(),
            self.matrix.cols(),
            self.matrix.mode(),
            self.matrix.is_transposed()
        );

        let mut engine = Engine::new(self.matrix.internal_cols());
        engine.run(
            &self.matrix,
            &mut self.potentials,
            &mut self.matching,
            &mut self.stats,
        );

        debug!(
            "assignment solved: {} phases, {} dual updates, {} columns scanned",
            self.stats.phases, self.stats.dual_updates, self.stats.columns_scanned
        );

        Solver {
            matrix: self.matrix,
            potentials: self.potentials,
            matching: self.matching,
            stats: self.stats,
            _phase: PhantomData,
        }
    }
}

impl<T: RealField + Float + Copy> Solver<T, Solved> {
    /// Solving again is a no-op.
    pub fn solve(self) -> Self {
        self
    }

    /// Returns the optimal assignment in caller orientation.
    ///
    /// Rows beyond the smaller dimension, and rows whose only option was a
    /// gated pair, map to `None`. The objective sums the original values of
    /// the reported pairs.
    pub fn result(&self) -> Assignment<T> {
        let mode = self.matrix.mode();
        let mut mapping = vec![None; self.matrix.rows()];
        let mut objective = T::zero();

        for (i, j) in self.matching.pairs() {
            let (row, col) = self.matrix.to_original(i, j);
            if self.matrix.is_admissible(row, col) {
                mapping[row] = Some(col);
                objective += self.matrix.value(row, col);
            }
        }

        Assignment::new(mapping, objective, mode)
    }

    /// Sum of all dual potentials, in the original sense.
    ///
    /// Equals the optimal objective when no pair is gated. With a gate it
    /// bounds the penalized problem instead.
    pub fn dual_bound(&self) -> T {
        self.matrix.mode().from_internal(self.potentials.total())
    }

    /// Potentials of the caller's rows, in the internal minimization sense.
    pub fn row_potentials(&self) -> &[T] {
        if self.matrix.is_transposed() {
            &self.potentials.cols
        } else {
            &self.potentials.rows
        }
    }

    /// Potentials of the caller's columns, in the internal minimization sense.
    pub fn col_potentials(&self) -> &[T] {
        if self.matrix.is_transposed() {
            &self.potentials.rows
        } else {
            &self.potentials.cols
        }
    }

    /// Counters collected while solving.
    pub fn stats(&self) -> SolveStats {
        self.stats
    }
}

impl<T: RealField, P> Solver<T, P> {
    /// Returns the cost matrix.
    pub fn cost_matrix(&self) -> &CostMatrix<T> {
        &self.matrix
    }

    /// Releases the solver and all of its storage.
    pub fn finalize(self) {}
}

// ============================================================================
// One-shot helpers
// ============================================================================

/// Solves the assignment problem for row-major `values`.
///
/// # Example
///
/// ```
/// use trackmatch::{assign, Mode};
///
/// let result = assign(&[5.0, 1.0, 9.0], 1, 3, Mode::Minimize).unwrap();
/// assert_eq!(result.mapping, vec![Some(1)]);
/// assert_eq!(result.objective, 1.0);
/// ```
pub fn assign<T: RealField + Float + Copy>(
    values: &[T],
    rows: usize,
    cols: usize,
    mode: Mode,
) -> Result<Assignment<T>, AssignError> {
    Ok(Solver::new(values, rows, cols, mode)?.solve().result())
}

/// Solves the assignment problem with a gating threshold.
///
/// Assignments beyond the threshold are not made.
pub fn assign_gated<T: RealField + Float + Copy>(
    values: &[T],
    rows: usize,
    cols: usize,
    mode: Mode,
    gate: T,
) -> Result<Assignment<T>, AssignError> {
    let config = SolverConfig::from(mode).with_gate(gate);
    Ok(Solver::with_config(values, rows, cols, &config)?
        .solve()
        .result())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_minimize_scenario() {
        let result = assign(&[1.0, 2.0, 2.0, 1.0], 2, 2, Mode::Minimize).unwrap();

        assert_eq!(result.mapping, vec![Some(0), Some(1)]);
        assert_eq!(result.objective, 2.0);
        assert_eq!(result.mode, Mode::Minimize);
    }

    #[test]
    fn test_maximize_scenario() {
        let result = assign(&[1.0, 2.0, 2.0, 1.0], 2, 2, Mode::Maximize).unwrap();

        assert_eq!(result.mapping, vec![Some(1), Some(0)]);
        assert_eq!(result.objective, 4.0);
    }

    #[test]
    fn test_single_row() {
        let result = assign(&[5.0, 1.0, 9.0], 1, 3, Mode::Minimize).unwrap();

        assert_eq!(result.mapping, vec![Some(1)]);
        assert_eq!(result.objective, 1.0);
    }

    #[test]
    fn test_empty_problems() {
        for (rows, cols) in [(0, 0), (0, 4), (3, 0)] {
            let result = assign::<f64>(&[], rows, cols, Mode::Minimize).unwrap();
            assert_eq!(result.num_rows(), rows);
            assert_eq!(result.num_assigned(), 0);
            assert_eq!(result.objective, 0.0);
        }
    }

    #[test]
    fn test_hungarian_simple() {
        let values: [f64; 9] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let result = assign(&values, 3, 3, Mode::Minimize).unwrap();

        // Every permutation of this matrix costs 15
        assert_eq!(result.num_assigned(), 3);
        assert!(
            (result.objective - 15.0).abs() < 0.01,
            "Expected cost 15.0, got {}",
            result.objective
        );
    }

    #[test]
    fn test_hungarian_asymmetric() {
        let values: [f64; 9] = [10.0, 5.0, 13.0, 3.0, 15.0, 8.0, 7.0, 4.0, 12.0];
        let result = assign(&values, 3, 3, Mode::Minimize).unwrap();

        // Optimal: 0->1 (5), 1->0 (3), 2->2 (12) = 20
        // or: 0->2 (13), 1->0 (3), 2->1 (4) = 20
        assert_eq!(result.num_assigned(), 3);
        assert!(
            (result.objective - 20.0).abs() < 0.01,
            "Expected cost 20.0, got {}",
            result.objective
        );
    }

    #[test]
    fn test_tall_matrix_maps_back() {
        // More rows than columns: rows 1 and 2 compete for the two columns
        let values = [9.0, 9.0, 1.0, 8.0, 7.0, 2.0];
        let solver = Solver::new(&values, 3, 2, Mode::Minimize).unwrap().solve();
        let result = solver.result();

        assert!(solver.cost_matrix().is_transposed());
        assert_eq!(result.num_assigned(), 2);
        assert_eq!(result.mapping, vec![None, Some(0), Some(1)]);
        assert_eq!(result.objective, 3.0);
        assert_eq!(solver.row_potentials().len(), 3);
        assert_eq!(solver.col_potentials().len(), 2);
    }

    #[test]
    fn test_solve_twice_is_noop() {
        let values = [4.0, 1.0, 3.0, 2.0, 0.0, 5.0, 3.0, 2.0, 2.0];
        let first = Solver::new(&values, 3, 3, Mode::Minimize).unwrap().solve();
        let result = first.result();
        let stats = first.stats();

        let second = first.solve();
        assert_eq!(second.result(), result);
        assert_eq!(second.stats(), stats);
    }

    #[test]
    fn test_dual_bound_matches_objective() {
        let values: [f64; 12] = [7.0, 2.0, 9.0, 4.0, 3.0, 6.0, 1.0, 8.0, 5.0, 0.0, 2.0, 4.0];
        for mode in [Mode::Minimize, Mode::Maximize] {
            let solver = Solver::new(&values, 4, 3, mode).unwrap().solve();
            let result = solver.result();
            assert!(
                (solver.dual_bound() - result.objective).abs() < 1e-9,
                "{}: dual {} vs primal {}",
                mode,
                solver.dual_bound(),
                result.objective
            );
        }
    }

    #[test]
    fn test_gated() {
        let result = assign_gated(&[1.0_f64, 100.0, 100.0, 2.0], 2, 2, Mode::Minimize, 10.0).unwrap();

        // Both assignments should be made (1.0 and 2.0 are below threshold)
        assert_eq!(result.num_assigned(), 2);
        assert!((result.objective - 3.0).abs() < 0.1);
    }

    #[test]
    fn test_gated_drops_forbidden_pairs() {
        // Row 1 can only reach column 0, which row 0 needs more.
        let values = [1.0, 50.0, 2.0, 60.0];
        let result = assign_gated(&values, 2, 2, Mode::Minimize, 10.0).unwrap();

        assert_eq!(result.num_assigned(), 1);
        assert!(result.pairs().all(|(r, c)| values[r * 2 + c] <= 10.0));
        assert_eq!(result.objective, 1.0);
    }

    #[test]
    fn test_gated_prefers_more_admissible_pairs() {
        // Greedy on cost would take (0,0) and leave row 1 with a gated pair.
        let values = [0.0, 3.0, 1.0, 99.0];
        let result = assign_gated(&values, 2, 2, Mode::Minimize, 5.0).unwrap();

        assert_eq!(result.mapping, vec![Some(1), Some(0)]);
        assert_eq!(result.objective, 4.0);
    }

    #[test]
    fn test_gated_maximize() {
        let values = [0.9, 0.1, 0.8, 0.2];
        let result = assign_gated(&values, 2, 2, Mode::Maximize, 0.5).unwrap();

        assert_eq!(result.num_assigned(), 1);
        let (row, col) = result.pairs().next().unwrap();
        assert!(values[row * 2 + col] >= 0.5);
    }

    #[test]
    fn test_everything_gated() {
        let result = assign_gated(&[5.0, 6.0, 7.0, 8.0], 2, 2, Mode::Minimize, 1.0).unwrap();

        assert_eq!(result.num_assigned(), 0);
        assert_eq!(result.objective, 0.0);
    }

    #[test]
    fn test_from_matrix() {
        let d = DMatrix::from_row_slice(2, 3, &[3.0_f32, 1.0, 4.0, 1.0, 5.0, 9.0]);
        let solver = Solver::from_matrix(&d, &SolverConfig::minimize())
            .unwrap()
            .solve();
        let result = solver.result();

        assert_eq!(result.mapping, vec![Some(1), Some(0)]);
        assert_eq!(result.objective, 2.0);
    }

    #[test]
    fn test_invalid_input() {
        let err = Solver::new(&[1.0, f64::NAN], 1, 2, Mode::Minimize).unwrap_err();
        assert!(err.is_invalid_input());

        let err = Solver::new(&[1.0, 2.0, 3.0], 2, 2, Mode::Minimize).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_stats() {
        let solver = Solver::new(&[1.0, 4.0, 2.0, 8.0, 3.0, 3.0], 2, 3, Mode::Minimize)
            .unwrap()
            .solve();

        assert_eq!(solver.stats().phases, 2);
        assert!(solver.stats().columns_scanned >= 2);
    }

    #[test]
    fn test_config_defaults() {
        let config = SolverConfig::<f64>::default();
        assert_eq!(config.mode, Mode::Minimize);
        assert_eq!(config.gate, None);

        let config = SolverConfig::maximize().with_gate(0.3);
        assert_eq!(config.mode, Mode::Maximize);
        assert_eq!(config.gate, Some(0.3));
    }

    #[test]
    fn test_finalize() {
        let solver = Solver::new(&[1.0_f64], 1, 1, Mode::Minimize).unwrap();
        let pairs: Vec<_> = solver.clone().solve().result().pairs().collect();
        assert_eq!(pairs, vec![(0, 0)]);
        solver.finalize();
    }
}

//! Augmenting-path engine (Kuhn-Munkres with shortest augmenting paths)
//!
//! Each phase grows the matching by one pair, starting from a free row and
//! searching the equality subgraph with a Dijkstra-like slack scan. When no
//! tight edge leaves the visited set, the duals are shifted by the smallest
//! slack, which makes at least one new edge tight without breaking
//! `u[i] + v[j] <= cost(i, j)`.
//!
//! All per-phase state lives in index arrays sized once per solve, so the
//! path is rebuilt from a parent array rather than linked nodes.

use alloc::vec;
use alloc::vec::Vec;

use log::trace;
use nalgebra::RealField;
use num_traits::Float;

use super::matching::Matching;
use super::matrix::CostMatrix;

// ============================================================================
// Potentials
// ============================================================================

/// Dual potentials of the internal minimization problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Potentials<T> {
    /// One potential per internal row
    pub rows: Vec<T>,
    /// One potential per internal column
    pub cols: Vec<T>,
}

impl<T: RealField + Float + Copy> Potentials<T> {
    /// Feasible starting duals: each row at its minimum cost, columns at zero.
    pub fn initial(cost: &CostMatrix<T>) -> Self {
        Self {
            rows: cost.internal_row_minima(),
            cols: vec![T::zero(); cost.internal_cols()],
        }
    }

    /// Reduced cost `cost(i, j) - u[i] - v[j]`.
    #[inline]
    pub fn slack(&self, cost: &CostMatrix<T>, i: usize, j: usize) -> T {
        cost.cost(i, j) - self.rows[i] - self.cols[j]
    }

    /// Sum of all potentials.
    pub fn total(&self) -> T {
        self.rows
            .iter()
            .chain(self.cols.iter())
            .fold(T::zero(), |acc, &p| acc + p)
    }
}

// ============================================================================
// Solve Statistics
// ============================================================================

/// Counters collected while solving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Number of augmenting phases run (one per matched pair)
    pub phases: usize,
    /// Number of dual updates with a strictly positive step
    pub dual_updates: usize,
    /// Number of columns added to a visited set
    pub columns_scanned: usize,
}

// ============================================================================
// Engine
// ============================================================================

/// Scratch arena for the phase loop.
#[derive(Debug, Clone)]
pub(crate) struct Engine<T> {
    /// Minimum slack from any visited row, per column
    slack: Vec<T>,
    /// Visited row achieving `slack[j]`
    parent: Vec<usize>,
    visited_cols: Vec<bool>,
    /// Visited columns in visit order
    col_order: Vec<usize>,
    /// Visited rows in visit order
    row_order: Vec<usize>,
}

impl<T: RealField + Float + Copy> Engine<T> {
    pub(crate) fn new(cols: usize) -> Self {
        Self {
            slack: vec![Float::infinity(); cols],
            parent: vec![0; cols],
            visited_cols: vec![false; cols],
            col_order: Vec::with_capacity(cols),
            row_order: Vec::new(),
        }
    }

    /// Runs phases until every internal row is matched.
    ///
    /// Free rows are processed in ascending order. Already matched rows are
    /// left alone, so running on a complete matching does nothing.
    pub(crate) fn run(
        &mut self,
        cost: &CostMatrix<T>,
        potentials: &mut Potentials<T>,
        matching: &mut Matching,
        stats: &mut SolveStats,
    ) {
        loop {
            let Some(root) = matching.free_rows().next() else {
                break;
            };
            self.phase(cost, potentials, matching, root, stats);
            stats.phases += 1;
        }
    }

    /// Grows the matching by one pair starting from the free row `root`.
    fn phase(
        &mut self,
        cost: &CostMatrix<T>,
        potentials: &mut Potentials<T>,
        matching: &mut Matching,
        root: usize,
        stats: &mut SolveStats,
    ) {
        let n_cols = cost.internal_cols();

        self.slack.fill(Float::infinity());
        self.visited_cols.fill(false);
        self.col_order.clear();
        self.row_order.clear();
        self.row_order.push(root);

        let mut row = root;
        let end_col = loop {
            // Relax from the newest visited row
            for j in 0..n_cols {
                if self.visited_cols[j] {
                    continue;
                }
                let s = potentials.slack(cost, row, j);
                if s < self.slack[j] {
                    self.slack[j] = s;
                    self.parent[j] = row;
                }
            }

            // Lowest-index unvisited column with minimum slack
            let mut best: Option<(usize, T)> = None;
            for j in 0..n_cols {
                if self.visited_cols[j] {
                    continue;
                }
                match best {
                    Some((_, s)) if self.slack[j] >= s => {}
                    _ => best = Some((j, self.slack[j])),
                }
            }
            let (col, delta) = best.expect("fewer visited columns than internal columns");

            if delta > T::zero() {
                for &i in &self.row_order {
                    potentials.rows[i] += delta;
                }
                for &j in &self.col_order {
                    potentials.cols[j] -= delta;
                }
                for j in 0..n_cols {
                    if !self.visited_cols[j] {
                        self.slack[j] -= delta;
                    }
                }
                stats.dual_updates += 1;
                trace!("phase root={} dual step {}", root, delta);
            }

            self.visited_cols[col] = true;
            self.col_order.push(col);
            stats.columns_scanned += 1;

            match matching.col_match(col) {
                None => break col,
                Some(owner) => {
                    self.row_order.push(owner);
                    row = owner;
                }
            }
        };

        matching.augment(root, end_col, &self.parent);
        trace!(
            "phase root={} matched column {} after visiting {} rows",
            root,
            end_col,
            self.row_order.len()
        );
    }
}

//! Assignment results

use alloc::vec::Vec;

use nalgebra::RealField;

use super::matrix::Mode;

/// Result of an assignment problem.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment<T: RealField> {
    /// Assignment mapping: row i is assigned to column `mapping[i]`.
    /// None means the row is unassigned.
    pub mapping: Vec<Option<usize>>,
    /// Sum of the original values of all assigned pairs
    pub objective: T,
    /// Sense the objective was optimized in
    pub mode: Mode,
}

impl<T: RealField + Copy> Assignment<T> {
    /// Creates a new assignment with the given mapping and objective.
    pub fn new(mapping: Vec<Option<usize>>, objective: T, mode: Mode) -> Self {
        Self {
            mapping,
            objective,
            mode,
        }
    }

    /// Creates the assignment of a problem with no rows or no columns.
    pub fn empty(rows: usize, mode: Mode) -> Self {
        Self::new(alloc::vec![None; rows], T::zero(), mode)
    }

    /// Returns the number of rows in the problem.
    pub fn num_rows(&self) -> usize {
        self.mapping.len()
    }

    /// Returns the number of assigned pairs.
    pub fn num_assigned(&self) -> usize {
        self.mapping.iter().filter(|x| x.is_some()).count()
    }

    /// Returns an iterator over (row, col) pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mapping
            .iter()
            .enumerate()
            .filter_map(|(row, col)| col.map(|c| (row, c)))
    }

    /// Column assigned to `row`, if any.
    pub fn column_of(&self, row: usize) -> Option<usize> {
        self.mapping.get(row).copied().flatten()
    }

    /// Row assigned to `col`, if any.
    pub fn row_of(&self, col: usize) -> Option<usize> {
        self.mapping.iter().position(|&c| c == Some(col))
    }

    /// Iterates over rows left without a column.
    pub fn unassigned_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.mapping
            .iter()
            .enumerate()
            .filter_map(|(row, col)| col.is_none().then_some(row))
    }
}

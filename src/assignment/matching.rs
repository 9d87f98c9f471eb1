//! Partial matching between internal rows and columns
//!
//! The matching is only ever changed by [`Matching::augment`], which flips an
//! alternating path and grows the matching by exactly one pair.

use alloc::vec;
use alloc::vec::Vec;

/// A partial injective mapping between rows and columns, with its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    row_match: Vec<Option<usize>>,
    col_match: Vec<Option<usize>>,
    matched: usize,
}

impl Matching {
    /// Creates an empty matching over `rows x cols`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            row_match: vec![None; rows],
            col_match: vec![None; cols],
            matched: 0,
        }
    }

    /// Returns the number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.row_match.len()
    }

    /// Returns the number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.col_match.len()
    }

    /// Column matched to `row`, if any.
    #[inline]
    pub fn row_match(&self, row: usize) -> Option<usize> {
        self.row_match[row]
    }

    /// Row matched to `col`, if any.
    #[inline]
    pub fn col_match(&self, col: usize) -> Option<usize> {
        self.col_match[col]
    }

    /// Number of matched pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.matched
    }

    /// Returns `true` if nothing is matched.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.matched == 0
    }

    /// Returns `true` once every row is matched.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.matched == self.row_match.len()
    }

    /// Iterates over unmatched rows in ascending order.
    pub fn free_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.row_match
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.is_none().then_some(i))
    }

    /// Iterates over matched `(row, col)` pairs in row order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.row_match
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.map(|j| (i, j)))
    }

    /// Flips the alternating path from the unmatched `root` row to the
    /// unmatched `end_col`.
    ///
    /// `parent[j]` is the row through which column `j` was reached. Walking
    /// back from `end_col`, each parent row takes the column it reached and
    /// releases its previous column, which is the next column on the path.
    /// The walk stops at `root`, which had no previous column.
    ///
    /// # Panics
    ///
    /// Panics if `root` is already matched or `end_col` is not free.
    pub fn augment(&mut self, root: usize, end_col: usize, parent: &[usize]) {
        assert!(self.row_match[root].is_none(), "augmenting from a matched row");
        assert!(self.col_match[end_col].is_none(), "augmenting into a matched column");

        let mut col = end_col;
        loop {
            let row = parent[col];
            let released = self.row_match[row];
            self.row_match[row] = Some(col);
            self.col_match[col] = Some(row);

            match released {
                Some(prev) => col = prev,
                None => {
                    debug_assert_eq!(row, root);
                    break;
                }
            }
        }
        self.matched += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_consistent(m: &Matching) {
        for (i, j) in m.pairs() {
            assert_eq!(m.col_match(j), Some(i));
        }
        let from_cols = (0..m.cols()).filter(|&j| m.col_match(j).is_some()).count();
        assert_eq!(from_cols, m.len());
    }

    #[test]
    fn test_new_is_empty() {
        let m = Matching::new(2, 3);
        assert!(m.is_empty());
        assert!(!m.is_complete());
        assert_eq!(m.free_rows().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_direct_augment() {
        let mut m = Matching::new(2, 2);
        let parent = [0, 0];
        m.augment(0, 1, &parent);

        assert_eq!(m.len(), 1);
        assert_eq!(m.row_match(0), Some(1));
        assert_eq!(m.col_match(1), Some(0));
        assert_eq!(m.free_rows().collect::<Vec<_>>(), vec![1]);
        assert_consistent(&m);
    }

    #[test]
    fn test_augment_rewires_path() {
        // Row 0 holds column 0. Row 1 reaches column 0, whose owner (row 0)
        // reaches column 1, which is free.
        let mut m = Matching::new(2, 2);
        m.augment(0, 0, &[0, 0]);

        let parent = [1, 0];
        m.augment(1, 1, &parent);

        assert_eq!(m.len(), 2);
        assert!(m.is_complete());
        assert_eq!(m.row_match(0), Some(1));
        assert_eq!(m.row_match(1), Some(0));
        assert_consistent(&m);
    }

    #[test]
    #[should_panic(expected = "augmenting into a matched column")]
    fn test_augment_rejects_matched_end() {
        let mut m = Matching::new(2, 2);
        m.augment(0, 0, &[0, 0]);
        m.augment(1, 0, &[1, 1]);
    }
}

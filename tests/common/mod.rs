//! Common test helpers for assignment integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trackmatch::Assignment;

/// Installs a test logger so `RUST_LOG=trace` shows solver output.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a seeded RNG so failures are reproducible.
pub fn make_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Row-major matrix of uniform values in `[lo, hi)`.
pub fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize, lo: f64, hi: f64) -> Vec<f64> {
    (0..rows * cols).map(|_| rng.random_range(lo..hi)).collect()
}

/// Row-major matrix of small integers, so ties are common.
pub fn random_int_matrix(rng: &mut StdRng, rows: usize, cols: usize, max: i32) -> Vec<f64> {
    (0..rows * cols)
        .map(|_| f64::from(rng.random_range(0..=max)))
        .collect()
}

/// Best objective over every maximum-size matching, by exhaustive search.
pub fn brute_force(values: &[f64], rows: usize, cols: usize, maximize: bool) -> f64 {
    if rows == 0 || cols == 0 {
        return 0.0;
    }

    // Enumerate injections from the smaller side into the larger side
    let (small, large) = if rows <= cols { (rows, cols) } else { (cols, rows) };
    let at = |s: usize, l: usize| {
        if rows <= cols {
            values[s * cols + l]
        } else {
            values[l * cols + s]
        }
    };

    #[allow(clippy::too_many_arguments)]
    fn search<F: Fn(usize, usize) -> f64>(
        s: usize,
        small: usize,
        large: usize,
        used: &mut [bool],
        acc: f64,
        at: &F,
        maximize: bool,
        best: &mut Option<f64>,
    ) {
        if s == small {
            let replace = match *best {
                None => true,
                Some(b) if maximize => acc > b,
                Some(b) => acc < b,
            };
            if replace {
                *best = Some(acc);
            }
            return;
        }
        for l in 0..large {
            if !used[l] {
                used[l] = true;
                search(s + 1, small, large, used, acc + at(s, l), at, maximize, best);
                used[l] = false;
            }
        }
    }

    let mut best = None;
    let mut used = vec![false; large];
    search(0, small, large, &mut used, 0.0, &at, maximize, &mut best);
    best.unwrap()
}

/// Asserts no row or column is used twice and all indices are in range.
pub fn assert_valid_injection(result: &Assignment<f64>, rows: usize, cols: usize) {
    assert_eq!(result.mapping.len(), rows);
    let mut cols_used = vec![false; cols];
    for (row, col) in result.pairs() {
        assert!(col < cols, "row {} mapped to out-of-range column {}", row, col);
        assert!(!cols_used[col], "column {} assigned twice", col);
        cols_used[col] = true;
    }
}

/// Sum of `values` over the pairs of `result`.
pub fn objective_of(result: &Assignment<f64>, values: &[f64], cols: usize) -> f64 {
    result.pairs().map(|(r, c)| values[r * cols + c]).sum()
}

#![forbid(unsafe_code)]

//! Attention matrices.
//!
//! An [`AttentionMatrix`] is an N×N grid of weights: entry (i, j) is the
//! attention token i pays to token j. Weights arrive from an external
//! scoring service and are assumed non-negative; the only validation
//! performed here is the shape check at construction. After construction
//! lookups are plain index math with no defensive re-checks.

/// N×N attention weights, stored row-major in a flat buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct AttentionMatrix {
    n: usize,
    weights: Vec<f64>,
}

impl AttentionMatrix {
    /// Build a matrix from nested rows, validating the shape once.
    ///
    /// The input must be square: every row's length must equal the number
    /// of rows. Ragged or rectangular input is rejected with [`ShapeError`].
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, ShapeError> {
        let n = rows.len();
        let mut weights = Vec::with_capacity(n * n);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(ShapeError {
                    row: index,
                    len: row.len(),
                    expected: n,
                });
            }
            weights.extend(row);
        }
        Ok(Self { n, weights })
    }

    /// An empty 0×0 matrix.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            n: 0,
            weights: Vec::new(),
        }
    }

    /// Side length N.
    #[must_use]
    pub const fn n(&self) -> usize {
        self.n
    }

    /// The weight token `from` pays to token `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range; callers hold the invariant
    /// that selection indices are valid token indices.
    #[must_use]
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        assert!(from < self.n && to < self.n, "index out of range");
        self.weights[from * self.n + to]
    }

    /// One token's full outgoing attention row.
    #[must_use]
    pub fn row(&self, from: usize) -> &[f64] {
        &self.weights[from * self.n..(from + 1) * self.n]
    }
}

/// A row whose length does not match the number of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeError {
    /// Index of the offending row.
    pub row: usize,
    /// Its observed length.
    pub len: usize,
    /// The expected length (the number of rows).
    pub expected: usize,
}

impl std::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "attention row {} has {} entries, expected {}",
            self.row, self.len, self.expected
        )
    }
}

impl std::error::Error for ShapeError {}

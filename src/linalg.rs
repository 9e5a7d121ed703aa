//! Incremental GF(2) linear algebra.
//!
//! Rows arrive one at a time as relations are collected. Each incoming
//! parity row is reduced against the stored pivot rows; a row that cancels
//! completely yields a dependency (its combination vector names the
//! relations whose parity rows XOR to zero), anything else becomes a new
//! pivot. This keeps the pivot set in echelon form at all times: pivot
//! columns are pairwise distinct, and no stored row has a bit set at an
//! earlier pivot's column.

use crate::bitvec::BitVec;
use crate::SnfsError;

/// Outcome of inserting one row into the matrix.
#[derive(Debug)]
pub enum Insert {
    /// The row was independent and is now a pivot.
    Pivot,
    /// The row cancelled to zero; the combination vector selects the
    /// relation indices forming the dependency.
    Dependency(BitVec),
}

#[derive(Debug, Clone)]
struct PivotRow {
    row: BitVec,
    combo: BitVec,
    col: usize,
}

/// Incremental GF(2) elimination engine, scoped to one factorization attempt.
#[derive(Debug)]
pub struct GfMatrix {
    num_cols: usize,
    combo_width: usize,
    max_rows: usize,
    pivots: Vec<PivotRow>,
}

impl GfMatrix {
    /// Create an engine over `num_cols` parity columns and `combo_width`
    /// relation-index columns, holding at most `max_rows` pivots.
    pub fn new(num_cols: usize, combo_width: usize, max_rows: usize) -> Self {
        Self {
            num_cols,
            combo_width,
            max_rows,
            pivots: Vec::new(),
        }
    }

    /// Number of stored pivot rows.
    pub fn rows(&self) -> usize {
        self.pivots.len()
    }

    /// Reduce `row`/`combo` in place against the stored pivots, in insertion
    /// order.
    pub fn reduce(&self, row: &mut BitVec, combo: &mut BitVec) {
        for pivot in &self.pivots {
            if row.test(pivot.col) {
                row.xor_assign(&pivot.row);
                combo.xor_assign(&pivot.combo);
            }
        }
    }

    /// Insert one parity row with its combination vector.
    ///
    /// Returns `Insert::Dependency` when the reduced row is all-zero,
    /// otherwise installs the reduced row as a pivot at its lowest set bit.
    /// Exceeding the row bound or inserting a mis-sized row is a fatal
    /// resource error, never a silent truncation.
    pub fn insert(&mut self, mut row: BitVec, mut combo: BitVec) -> Result<Insert, SnfsError> {
        if row.len() != self.num_cols || combo.len() != self.combo_width {
            return Err(SnfsError::ResourceExhausted {
                what: "matrix row width",
                limit: self.num_cols,
            });
        }

        self.reduce(&mut row, &mut combo);

        if row.is_zero() {
            return Ok(Insert::Dependency(combo));
        }

        if self.pivots.len() >= self.max_rows {
            return Err(SnfsError::ResourceExhausted {
                what: "matrix pivot rows",
                limit: self.max_rows,
            });
        }

        // first_set_bit is Some here since the row is nonzero.
        let col = row.first_set_bit().expect("nonzero row has a set bit");
        self.pivots.push(PivotRow { row, combo, col });
        Ok(Insert::Pivot)
    }

    /// Pivot columns in insertion order, for invariant checks.
    pub fn pivot_columns(&self) -> Vec<usize> {
        self.pivots.iter().map(|p| p.col).collect()
    }

    /// Check the echelon invariant: pivot columns are pairwise distinct and
    /// no stored row has a bit set at an earlier pivot's column.
    pub fn echelon_invariant_holds(&self) -> bool {
        for (i, p) in self.pivots.iter().enumerate() {
            for earlier in &self.pivots[..i] {
                if p.col == earlier.col || p.row.test(earlier.col) {
                    return false;
                }
            }
        }
        true
    }
}

//! Factor base and smooth-relation collection.
//!
//! A relation records the full factorization of one polynomial value
//! v = (m + k)^d + 1 over the factor base. The factor base may grow during
//! collection when a prime cofactor below the large-prime bound is admitted
//! as a fresh column; the column budget is frozen up front so rows sized
//! before such growth never have to be reallocated or re-indexed.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::bitvec::BitVec;
use crate::sieve::{is_prime_u64, sieve_primes};

/// Ordered factor base with a frozen column budget.
///
/// Columns `[0, base_len)` hold the Eratosthenes primes up to the bound;
/// columns `[base_len, capacity)` form the large-prime block, filled in
/// admission order. A prime's column index never changes once assigned.
#[derive(Debug, Clone)]
pub struct FactorBase {
    primes: Vec<u64>,
    base_len: usize,
    capacity: usize,
}

impl FactorBase {
    /// Build the factor base for primes up to `bound`.
    ///
    /// The column budget is `4 * base_len + 64`: generous enough that
    /// large-prime admission is effectively never the limiting factor for
    /// toy parameter sizes, yet fixed before any row is sized.
    pub fn build(bound: u64, max_base_primes: usize) -> Self {
        let primes = sieve_primes(bound, max_base_primes);
        let base_len = primes.len();
        let capacity = 4 * base_len + 64;
        Self {
            primes,
            base_len,
            capacity,
        }
    }

    /// Current number of columns (base primes plus admitted large primes).
    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    /// Number of primes that came from the Eratosthenes sieve.
    pub fn base_len(&self) -> usize {
        self.base_len
    }

    /// Frozen column budget; parity rows are allocated at this width.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn primes(&self) -> &[u64] {
        &self.primes
    }

    pub fn prime(&self, col: usize) -> u64 {
        self.primes[col]
    }

    /// Admit a large prime as a factor-base column.
    ///
    /// Returns the column index, reusing the existing column if `p` was
    /// admitted before, or `None` if the column budget is full.
    pub fn admit_large_prime(&mut self, p: u64) -> Option<usize> {
        if let Some(col) = self.primes[self.base_len..]
            .iter()
            .position(|&q| q == p)
        {
            return Some(self.base_len + col);
        }
        if self.primes.len() >= self.capacity {
            return None;
        }
        self.primes.push(p);
        Some(self.primes.len() - 1)
    }
}

/// A smooth relation: offset k and the full exponent vector of
/// v = (m + k)^d + 1 over the factor-base columns.
///
/// The exponent vector is allocated at the frozen column capacity, so it
/// stays valid as the factor base grows behind it. Exponents saturate at
/// 255, a ceiling no 128-bit value can reach.
#[derive(Debug, Clone)]
pub struct Relation {
    pub offset: u64,
    exponents: Vec<u8>,
}

impl Relation {
    pub fn exponent(&self, col: usize) -> u8 {
        self.exponents.get(col).copied().unwrap_or(0)
    }

    /// Build the exponent-parity row over `width` columns.
    pub fn parity_row(&self, width: usize) -> BitVec {
        let mut row = BitVec::zeros(width);
        for (col, &e) in self.exponents.iter().enumerate().take(width) {
            if e % 2 == 1 {
                row.set(col);
            }
        }
        row
    }

    /// Reconstruct the sieved value from the stored exponents.
    pub fn reconstruct_value(&self, factor_base: &FactorBase) -> BigUint {
        let mut v = BigUint::one();
        for (col, &e) in self.exponents.iter().enumerate() {
            for _ in 0..e {
                v *= BigUint::from(factor_base.prime(col));
            }
        }
        v
    }
}

/// Trial-divide `v` over the current factor base and accept it as a relation
/// if the residual cofactor is 1 or an admissible large prime.
///
/// Returns `None` for non-smooth candidates; skipping a candidate is the
/// normal case, not an error. May grow the factor base as a side effect.
pub fn try_factor_candidate(
    offset: u64,
    v: &BigUint,
    factor_base: &mut FactorBase,
    large_prime_bound: u64,
) -> Option<Relation> {
    let mut exponents = vec![0u8; factor_base.capacity()];
    let mut remaining = v.clone();

    for col in 0..factor_base.len() {
        let p = BigUint::from(factor_base.prime(col));
        while (&remaining % &p).is_zero() {
            remaining /= &p;
            exponents[col] = exponents[col].saturating_add(1);
        }
    }

    if remaining.is_one() {
        return Some(Relation { offset, exponents });
    }

    // Large-prime variant: one extra prime cofactor becomes a new column.
    let cofactor = remaining.to_u64()?;
    if cofactor <= large_prime_bound && is_prime_u64(cofactor) {
        let col = factor_base.admit_large_prime(cofactor)?;
        exponents[col] = 1;
        return Some(Relation { offset, exponents });
    }

    None
}

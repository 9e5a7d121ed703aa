//! Congruence-of-squares factor extraction.
//!
//! A dependency guarantees that the combined exponents of its relations are
//! all even, so the product of the sieved values is a perfect square. Only
//! one polynomial side is sieved in this toy, so the fixed side contributes
//! the constant 1; the extraction then tries gcd(|x - y|, n) and
//! gcd((x + y) mod n, n) for a nontrivial factor.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;

use crate::bitvec::BitVec;
use crate::relation::{FactorBase, Relation};

/// Outcome of one extraction attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A nontrivial factor g with 1 < g < n.
    Factor(BigUint),
    /// The congruence was trivial (x ≡ ±y mod n); try further dependencies.
    Trivial,
}

/// Convert a dependency into two candidate square roots mod n and test
/// gcd-based extraction.
pub fn extract_factor(
    dependency: &BitVec,
    relations: &[Relation],
    factor_base: &FactorBase,
    n: &BigUint,
) -> Extraction {
    let one = BigUint::one();

    // Sum the full exponents of the contributing relations per column.
    let mut total = vec![0u64; factor_base.len()];
    for idx in dependency.iter_ones() {
        let rel = &relations[idx];
        for (col, t) in total.iter_mut().enumerate() {
            *t += rel.exponent(col) as u64;
        }
    }
    debug_assert!(
        total.iter().all(|&e| e % 2 == 0),
        "dependency must leave every summed exponent even"
    );

    // Fixed side: the un-sieved polynomial side is the constant 1, so its
    // square root is 1. Sieved side: halve each exponent and rebuild mod n.
    let x = one.clone();
    let mut y = BigUint::one();
    for (col, &e) in total.iter().enumerate() {
        if e > 0 {
            let p = BigUint::from(factor_base.prime(col));
            y = (y * p.modpow(&BigUint::from(e / 2), n)) % n;
        }
    }

    let diff = if x >= y { &x - &y } else { &y - &x };
    if let Some(g) = nontrivial_gcd(&diff, n) {
        return Extraction::Factor(g);
    }

    let sum = (&x + &y) % n;
    if let Some(g) = nontrivial_gcd(&sum, n) {
        return Extraction::Factor(g);
    }

    Extraction::Trivial
}

fn nontrivial_gcd(a: &BigUint, n: &BigUint) -> Option<BigUint> {
    let g = a.gcd(n);
    if g > BigUint::one() && g < *n {
        Some(g)
    } else {
        None
    }
}

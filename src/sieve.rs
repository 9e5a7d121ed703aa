//! Prime generation and basic number-theoretic helpers.
//!
//! The factor base is seeded from a classic sieve of Eratosthenes. The
//! trial-division primality test validates large-prime cofactors, and the
//! integer d-th root picks the base point m for the special-form polynomial.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Generate primes up to `bound` using the sieve of Eratosthenes, truncated
/// at `capacity` entries.
pub fn sieve_primes(bound: u64, capacity: usize) -> Vec<u64> {
    if bound < 2 || capacity == 0 {
        return Vec::new();
    }
    let limit = bound as usize;
    let mut is_prime = vec![true; limit + 1];
    is_prime[0] = false;
    if limit >= 1 {
        is_prime[1] = false;
    }
    let mut p = 2usize;
    while p * p <= limit {
        if is_prime[p] {
            let mut multiple = p * p;
            while multiple <= limit {
                is_prime[multiple] = false;
                multiple += p;
            }
        }
        p += 1;
    }
    (2..=limit)
        .filter(|&i| is_prime[i])
        .map(|i| i as u64)
        .take(capacity)
        .collect()
}

/// Primality by trial division up to the square root.
///
/// Used to validate large-prime cofactors, which are bounded well below
/// 2^64, so the quadratic cost is acceptable here.
pub fn is_prime_u64(x: u64) -> bool {
    if x < 2 {
        return false;
    }
    if x % 2 == 0 {
        return x == 2;
    }
    let mut i = 3u64;
    while i * i <= x {
        if x % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Compute base^exp by binary exponentiation.
pub fn pow_biguint(base: &BigUint, exp: u32) -> BigUint {
    if exp == 0 {
        return BigUint::one();
    }
    let mut result = BigUint::one();
    let mut b = base.clone();
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result *= &b;
        }
        b = &b * &b;
        e >>= 1;
    }
    result
}

/// Compute floor(n^(1/d)) — the largest x with x^d <= n.
pub fn int_root(n: &BigUint, d: u32) -> BigUint {
    if n.is_zero() || d == 0 {
        return BigUint::zero();
    }
    if d == 1 {
        return n.clone();
    }

    // Newton's method: x_{i+1} = ((d-1)*x_i + n / x_i^(d-1)) / d,
    // seeded from the bit length so the iteration converges downward.
    let d_big = BigUint::from(d);
    let d_minus_1 = BigUint::from(d - 1);
    let init_bits = (n.bits() / d as u64).max(1);
    let mut x = BigUint::one() << init_bits as usize;

    loop {
        let x_pow = pow_biguint(&x, d - 1);
        if x_pow.is_zero() {
            return BigUint::one();
        }
        let x_new = (&d_minus_1 * &x + n / &x_pow) / &d_big;
        if x_new >= x {
            break;
        }
        x = x_new;
    }

    // Newton on integers can land one off; nudge to the exact floor.
    while pow_biguint(&(&x + BigUint::one()), d) <= *n {
        x += BigUint::one();
    }
    while !x.is_zero() && pow_biguint(&x, d) > *n {
        x -= BigUint::one();
    }

    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sieve_primes_small() {
        assert_eq!(sieve_primes(30, 100), vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(sieve_primes(1, 100).is_empty());
        assert_eq!(sieve_primes(2, 100), vec![2]);
    }

    #[test]
    fn test_sieve_primes_truncated_at_capacity() {
        let primes = sieve_primes(1000, 5);
        assert_eq!(primes, vec![2, 3, 5, 7, 11]);
    }

    #[test]
    fn test_is_prime_u64() {
        assert!(is_prime_u64(2));
        assert!(is_prime_u64(3));
        assert!(is_prime_u64(32771));
        assert!(is_prime_u64(33773));
        assert!(!is_prime_u64(0));
        assert!(!is_prime_u64(1));
        assert!(!is_prime_u64(33772));
        assert!(!is_prime_u64(32771 * 3));
    }

    #[test]
    fn test_int_root_exact() {
        // 13^8 = 815730721
        let n = BigUint::from(815_730_721u64);
        assert_eq!(int_root(&n, 8), BigUint::from(13u32));
    }

    #[test]
    fn test_int_root_floor() {
        // floor((13^8 + 5)^(1/8)) is still 13
        let n = BigUint::from(815_730_726u64);
        assert_eq!(int_root(&n, 8), BigUint::from(13u32));
        // floor(26^(1/3)) = 2, floor(27^(1/3)) = 3
        assert_eq!(int_root(&BigUint::from(26u32), 3), BigUint::from(2u32));
        assert_eq!(int_root(&BigUint::from(27u32), 3), BigUint::from(3u32));
    }

    #[test]
    fn test_pow_biguint() {
        let b = BigUint::from(13u32);
        assert_eq!(pow_biguint(&b, 0), BigUint::one());
        assert_eq!(pow_biguint(&b, 8), BigUint::from(815_730_721u64));
    }
}

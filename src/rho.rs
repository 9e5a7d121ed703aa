//! Bounded Pollard's rho fallback.
//!
//! Invoked when the sieve pipeline exhausts its window without producing a
//! factor. Unlike a general-purpose rho this one is fully deterministic: it
//! walks a fixed sequence of polynomial constants with a hard iteration cap
//! per constant, so two attempts on the same n always agree.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;

/// Polynomial constants for f(x) = x^2 + c mod n, tried in order.
pub const RHO_CONSTANTS: [u32; 5] = [1, 3, 5, 7, 9];

/// Iteration cap per constant.
pub const RHO_MAX_ITERATIONS: u32 = 200_000;

/// Floyd cycle-detection factorization with f(x) = x^2 + c mod n.
///
/// Returns a nontrivial factor, or `None` when every constant exhausts its
/// iteration budget. Arithmetic goes through `BigUint`, so n wider than the
/// native word is handled without overflow.
pub fn pollard_rho(n: &BigUint) -> Option<BigUint> {
    let one = BigUint::one();
    let two = BigUint::from(2u32);

    if n <= &one {
        return None;
    }
    if n.is_even() {
        return Some(two);
    }

    for c in RHO_CONSTANTS {
        let c = BigUint::from(c);
        let step = |x: &BigUint| -> BigUint { (x * x + &c) % n };

        let mut x = BigUint::from(2u32);
        let mut y = BigUint::from(2u32);

        for _ in 0..RHO_MAX_ITERATIONS {
            x = step(&x);
            y = step(&step(&y));

            let diff = if x > y { &x - &y } else { &y - &x };
            let d = diff.gcd(n);

            if d == one {
                continue;
            }
            if d == *n {
                // Tortoise met hare; this constant is spent.
                break;
            }
            return Some(d);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    #[test]
    fn test_rho_even() {
        let n = BigUint::from(815_730_722u64);
        assert_eq!(pollard_rho(&n), Some(BigUint::from(2u32)));
    }

    #[test]
    fn test_rho_semiprime() {
        // 1106774983 = 32771 * 33773
        let n = BigUint::from(1_106_774_983u64);
        let f = pollard_rho(&n).expect("rho must split this semiprime");
        assert!((&n % &f).is_zero());
        assert!(f == BigUint::from(32771u32) || f == BigUint::from(33773u32));
    }

    #[test]
    fn test_rho_deterministic() {
        let n = BigUint::from(1_106_774_983u64);
        assert_eq!(pollard_rho(&n), pollard_rho(&n));
        // The fixed constant sequence starts at c = 1 from x = y = 2,
        // which reaches 32771 first.
        assert_eq!(pollard_rho(&n), Some(BigUint::from(32771u32)));
    }

    #[test]
    fn test_rho_small_composites() {
        for (n, _p, _q) in [(15u64, 3u64, 5u64), (77, 7, 11), (10403, 101, 103)] {
            let n = BigUint::from(n);
            let f = pollard_rho(&n).expect("rho must split small semiprimes");
            assert!((&n % &f).is_zero());
            assert!(f > BigUint::one());
            assert!(f < n);
        }
    }

    #[test]
    fn test_rho_rejects_unit() {
        assert_eq!(pollard_rho(&BigUint::one()), None);
    }
}

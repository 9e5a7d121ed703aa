//! End-to-end factorization scenarios through the full attempt state
//! machine: sieve, matrix, extraction, and the Pollard rho fallback.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use snfs_toy::sieve::{int_root, pow_biguint};
use snfs_toy::{factor_snfs, factor_snfs_with_stats, SnfsParams, SnfsSession};

fn assert_nontrivial_factor(n: &BigUint, f: &BigUint) {
    assert!((n % f).is_zero(), "{} must divide {}", f, n);
    assert!(*f > BigUint::one(), "factor must be > 1");
    assert!(f < n, "factor must be < n");
}

#[test]
fn test_special_form_13_pow_8_plus_1() {
    // 815730722 = 13^8 + 1 = 2 * 407865361, with the demo parameters.
    let n = BigUint::from(815_730_722u64);
    let f = factor_snfs(&n).expect("attempt must produce a factor");
    assert_nontrivial_factor(&n, &f);
    assert!(
        f == BigUint::from(2u32) || f == BigUint::from(407_865_361u64),
        "expected a prime factor of n, got {}",
        f
    );
}

#[test]
fn test_fallback_splits_balanced_semiprime() {
    // 1106774983 = 32771 * 33773. Degree-8 polynomial values are never
    // smooth over B = 200, so the sieve exhausts and rho must deliver.
    let n = BigUint::from(1_106_774_983u64);
    let (result, stats) = factor_snfs_with_stats(&n, &SnfsParams::default());
    let f = result.expect("fallback must split this semiprime");
    assert!(stats.fallback_used);
    assert!(f == BigUint::from(32771u32) || f == BigUint::from(33773u32));
}

#[test]
fn test_boundary_no_relation_below_least_prime_factor() {
    // With B = 3 the factor base is {2, 3}; every (m+k)^8 + 1 in the window
    // keeps a cofactor above the large-prime bound, so no relation is ever
    // accepted and the fallback is invoked.
    let n = BigUint::from(1_106_774_983u64);
    let params = SnfsParams {
        factor_base_bound: 3,
        ..SnfsParams::default()
    };
    let (result, stats) = factor_snfs_with_stats(&n, &params);
    assert_eq!(stats.relations, 0, "no candidate can be smooth over {{2, 3}}");
    assert!(stats.fallback_used);
    let f = result.expect("fallback still splits n");
    assert_nontrivial_factor(&n, &f);
}

#[test]
fn test_sieve_path_end_to_end() {
    // 2279 = 43 * 53 with degree 3: the sieve pipeline itself produces the
    // factor, after retrying past trivial congruences.
    let n = BigUint::from(2279u32);
    let params = SnfsParams {
        degree: 3,
        factor_base_bound: 50,
        search_window: 2000,
        ..SnfsParams::default()
    };
    let (result, stats) = factor_snfs_with_stats(&n, &params);
    assert_eq!(result, Ok(BigUint::from(43u32)));
    assert!(!stats.fallback_used);
    assert!(stats.trivial_congruences > 0);
}

#[test]
fn test_smoothness_invariant_of_stored_relations() {
    // Every stored relation must reconstruct its sieved value exactly,
    // large-prime columns included.
    let n = BigUint::from(2279u32);
    let params = SnfsParams {
        degree: 3,
        factor_base_bound: 50,
        search_window: 2000,
        ..SnfsParams::default()
    };
    let mut session = SnfsSession::new(&n, params.clone()).unwrap();
    let _ = session.run();

    let m = int_root(&(&n - BigUint::one()), params.degree);
    assert!(!session.relations().is_empty());
    for rel in session.relations() {
        let a = &m + BigUint::from(rel.offset);
        let v = pow_biguint(&a, params.degree) + BigUint::one();
        assert_eq!(
            rel.reconstruct_value(session.factor_base()),
            v,
            "relation at k = {} must reconstruct (m+k)^d + 1",
            rel.offset
        );
    }
}

#[test]
fn test_determinism_across_fresh_sessions() {
    for (n, params) in [
        (BigUint::from(2279u32), SnfsParams {
            degree: 3,
            factor_base_bound: 50,
            search_window: 2000,
            ..SnfsParams::default()
        }),
        (BigUint::from(1_106_774_983u64), SnfsParams::default()),
    ] {
        let (r1, s1) = factor_snfs_with_stats(&n, &params);
        let (r2, s2) = factor_snfs_with_stats(&n, &params);
        assert_eq!(r1, r2, "fresh sessions must agree on {}", n);
        assert_eq!(s1, s2, "fresh sessions must gather identical stats");
    }
}

#[test]
fn test_small_semiprimes_through_full_attempt() {
    for (n, p, q) in [
        (3233u64, 53u64, 61u64),
        (10403, 101, 103),
        (19043, 137, 139),
        (129834181, 5573, 23297),
    ] {
        let n = BigUint::from(n);
        let f = factor_snfs(&n).unwrap_or_else(|e| panic!("failed on {}: {}", n, e));
        assert_nontrivial_factor(&n, &f);
        assert!(f == BigUint::from(p) || f == BigUint::from(q));
    }
}

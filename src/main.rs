//! snfs CLI: toy Special Number Field Sieve factorization.
//!
//! Usage:
//!   snfs <n> [e] [degree] [B] [K]
//!   snfs --demo
//!
//! Defaults: e=3, degree=8, B=200 (factor base bound), K=5000 (search
//! window). After factoring n = p * q, derives the RSA-style private
//! exponent d = e^-1 mod phi(n) when e is coprime to phi(n).

use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed};

use snfs_toy::{factor_snfs_with_stats, SnfsParams};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <n> [e] [degree] [B] [K]", args[0]);
        eprintln!("       {} --demo", args[0]);
        return ExitCode::FAILURE;
    }

    if args[1] == "--demo" {
        return run_demo();
    }

    let Ok(n) = BigUint::from_str(&args[1]) else {
        eprintln!("Error: n must be a decimal integer");
        return ExitCode::FAILURE;
    };
    let e = args
        .get(2)
        .and_then(|s| BigUint::from_str(s).ok())
        .unwrap_or_else(|| BigUint::from(3u32));
    let degree = args
        .get(3)
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(8);
    let factor_base_bound = args
        .get(4)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(200);
    let search_window = args
        .get(5)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(5000);

    if !(3..=12).contains(&degree) {
        eprintln!("Degree must be between 3 and 12 for this toy.");
        return ExitCode::FAILURE;
    }

    println!("SNFS (toy) Factorization");
    println!("n = {}", n);
    println!("e = {}", e);
    println!("degree = {}, B = {}, K = {}\n", degree, factor_base_bound, search_window);

    let params = SnfsParams {
        degree,
        factor_base_bound,
        search_window,
        ..SnfsParams::default()
    };

    let start = Instant::now();
    let (result, stats) = factor_snfs_with_stats(&n, &params);
    let elapsed = start.elapsed();

    let p = match result {
        Ok(p) => p,
        Err(err) => {
            eprintln!("Failed to factor: {} (try increasing B or K)", err);
            return ExitCode::FAILURE;
        }
    };
    let q = &n / &p;

    println!("Factors found:");
    println!("  p = {}", p);
    println!("  q = {}", q);
    println!(
        "relations = {}, dependencies tried = {}, fallback = {}",
        stats.relations, stats.dependencies_tried, stats.fallback_used
    );
    println!("time: {:.4}s\n", elapsed.as_secs_f64());

    // RSA-style downstream: derive the private exponent from (p, q).
    let phi = (&p - BigUint::one()) * (&q - BigUint::one());
    if e.gcd(&phi).is_one() {
        match mod_inverse(&e, &phi) {
            Some(d) => {
                println!("phi(n) = {}", phi);
                println!("private exponent d = {}", d);
            }
            None => println!("e not invertible mod phi(n), skipping d."),
        }
    } else {
        println!("e not coprime to phi(n), skipping d.");
    }

    ExitCode::SUCCESS
}

fn run_demo() -> ExitCode {
    // 13^8 + 1: small enough to finish fast.
    let n = BigUint::from(815_730_722u64);
    let params = SnfsParams::default();

    println!(
        "SNFS Demo (toy) on n = {} (degree={}, B={}, K={})\n",
        n, params.degree, params.factor_base_bound, params.search_window
    );

    let start = Instant::now();
    let (result, stats) = factor_snfs_with_stats(&n, &params);
    let elapsed = start.elapsed();

    match result {
        Ok(p) => {
            let q = &n / &p;
            println!("Factors:");
            println!("  p = {}", p);
            println!("  q = {}", q);
            if stats.fallback_used {
                println!("(sieve exhausted; factor came from the Pollard rho fallback)");
            }
            println!(
                "candidates = {}, relations = {}, dependencies tried = {}",
                stats.candidates_tried, stats.relations, stats.dependencies_tried
            );
            println!("total time: {:.4}s", elapsed.as_secs_f64());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Failed to factor: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Modular inverse via the extended Euclidean algorithm.
fn mod_inverse(e: &BigUint, phi: &BigUint) -> Option<BigUint> {
    let e = BigInt::from(e.clone());
    let phi = BigInt::from(phi.clone());
    let ext = e.extended_gcd(&phi);
    if !ext.gcd.is_one() {
        return None;
    }
    let mut t = ext.x % &phi;
    if t.is_negative() {
        t += &phi;
    }
    t.to_biguint()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_inverse() {
        // 3 * 7 = 21 ≡ 1 (mod 20)
        let d = mod_inverse(&BigUint::from(3u32), &BigUint::from(20u32)).unwrap();
        assert_eq!(d, BigUint::from(7u32));
        // 2 has no inverse mod 20
        assert!(mod_inverse(&BigUint::from(2u32), &BigUint::from(20u32)).is_none());
    }
}

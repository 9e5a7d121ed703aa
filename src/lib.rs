//! Toy Special Number Field Sieve for semiprimes of the form n ≈ m^d + 1.
//!
//! Educational factorization engine, not a production NFS. The pipeline:
//! 1. Factor-base generation (sieve of Eratosthenes)
//! 2. Relation collection over the special-form polynomial v = (m+k)^d + 1
//!    (with the single-large-prime variation)
//! 3. Incremental GF(2) elimination discovering dependencies as rows arrive
//! 4. Congruence-of-squares factor extraction
//! 5. Bounded, deterministic Pollard's rho fallback
//!
//! # Modules
//!
//! - [`bitvec`] - Packed GF(2) bit vectors
//! - [`sieve`] - Prime generation, primality, integer roots
//! - [`relation`] - Factor base and smooth-relation collection
//! - [`linalg`] - Incremental GF(2) matrix engine
//! - [`factor`] - Congruence-of-squares extraction
//! - [`rho`] - Pollard's rho fallback
//! - [`pipeline`] - Per-attempt session and orchestration

pub mod bitvec;
pub mod factor;
pub mod linalg;
pub mod pipeline;
pub mod relation;
pub mod rho;
pub mod sieve;

pub use factor::Extraction;
pub use pipeline::{factor_snfs, factor_snfs_with_params, factor_snfs_with_stats};
pub use pipeline::{SnfsParams, SnfsSession, SnfsStats};
pub use rho::pollard_rho;

use num_bigint::BigUint;

/// Errors surfaced by a factorization attempt.
///
/// Non-smooth candidates, trivial congruences, and an exhausted sieve window
/// are ordinary control flow, not errors; only invalid inputs, capacity
/// violations, and a fully exhausted attempt reach the caller here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnfsError {
    #[error("n must be at least 4, got {0}")]
    InvalidInput(BigUint),

    #[error("degree must be between 3 and 12, got {0}")]
    InvalidDegree(u32),

    #[error("capacity exceeded for {what} (limit {limit})")]
    ResourceExhausted { what: &'static str, limit: usize },

    #[error("no nontrivial factor found within the search and fallback bounds")]
    Exhausted,
}

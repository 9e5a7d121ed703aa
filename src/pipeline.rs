//! Per-attempt orchestration: collection, reduction, extraction, fallback.
//!
//! All mutable state (factor base, relation store, matrix pivots) lives in
//! one [`SnfsSession`] built per attempt, so repeated or concurrent attempts
//! never share state. An attempt runs COLLECTING ⇄ REDUCING, extracting on
//! every dependency the matrix reports; a trivial congruence resumes
//! collection rather than ending the attempt. Exhausting the window hands
//! off to the Pollard rho fallback.

use log::{debug, info};
use num_bigint::BigUint;

use crate::bitvec::BitVec;
use crate::factor::{extract_factor, Extraction};
use crate::linalg::{GfMatrix, Insert};
use crate::relation::{try_factor_candidate, FactorBase, Relation};
use crate::rho::pollard_rho;
use crate::sieve::{int_root, pow_biguint};
use crate::SnfsError;

/// Cap on the number of Eratosthenes primes seeding the factor base.
const MAX_BASE_PRIMES: usize = 4096;

/// Parameters for one factorization attempt.
#[derive(Debug, Clone)]
pub struct SnfsParams {
    /// Polynomial degree d in v = (m+k)^d + 1; must be in 3..=12.
    pub degree: u32,
    /// Factor base bound B.
    pub factor_base_bound: u64,
    /// Search window K for the offset k.
    pub search_window: u64,
    /// Largest admissible prime cofactor.
    pub large_prime_bound: u64,
    /// Relations collected beyond the factor-base size before stopping.
    pub overshoot: usize,
    /// Hard cap on stored relations (also the combination-vector width).
    pub max_relations: usize,
}

impl Default for SnfsParams {
    fn default() -> Self {
        Self {
            degree: 8,
            factor_base_bound: 200,
            search_window: 5000,
            large_prime_bound: 100_000_000,
            overshoot: 16,
            max_relations: 4096,
        }
    }
}

/// Counters from one attempt, for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnfsStats {
    /// Primes seeded from the Eratosthenes sieve.
    pub base_primes: usize,
    /// Factor-base columns after large-prime growth.
    pub final_columns: usize,
    /// Candidates k whose polynomial value was trial-divided.
    pub candidates_tried: u64,
    /// Relations accepted into the store.
    pub relations: usize,
    /// Pivot rows held by the matrix engine.
    pub matrix_pivots: usize,
    /// Dependencies handed to the extractor.
    pub dependencies_tried: usize,
    /// Dependencies that produced x ≡ ±y (mod n).
    pub trivial_congruences: usize,
    /// Whether the Pollard rho fallback produced the result.
    pub fallback_used: bool,
}

/// State for one factorization attempt.
///
/// Created per attempt and discarded afterwards; nothing here is shared
/// process-wide.
#[derive(Debug)]
pub struct SnfsSession {
    n: BigUint,
    params: SnfsParams,
    factor_base: FactorBase,
    relations: Vec<Relation>,
    matrix: GfMatrix,
    stats: SnfsStats,
}

impl SnfsSession {
    /// Build a session for factoring `n`, validating the inputs.
    pub fn new(n: &BigUint, params: SnfsParams) -> Result<Self, SnfsError> {
        if !(3..=12).contains(&params.degree) {
            return Err(SnfsError::InvalidDegree(params.degree));
        }
        if *n < BigUint::from(4u32) {
            return Err(SnfsError::InvalidInput(n.clone()));
        }

        let factor_base = FactorBase::build(params.factor_base_bound, MAX_BASE_PRIMES);
        let matrix = GfMatrix::new(
            factor_base.capacity(),
            params.max_relations,
            factor_base.capacity(),
        );

        let stats = SnfsStats {
            base_primes: factor_base.base_len(),
            ..SnfsStats::default()
        };

        Ok(Self {
            n: n.clone(),
            params,
            factor_base,
            relations: Vec::new(),
            matrix,
            stats,
        })
    }

    /// Statistics gathered so far.
    pub fn stats(&self) -> &SnfsStats {
        &self.stats
    }

    /// Relations accepted so far.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// The session's factor base.
    pub fn factor_base(&self) -> &FactorBase {
        &self.factor_base
    }

    /// Run the attempt to completion.
    ///
    /// Returns a nontrivial factor of n, or `SnfsError::Exhausted` once both
    /// the sieve window and every fallback constant are spent.
    pub fn run(&mut self) -> Result<BigUint, SnfsError> {
        let sieve_result = self.collect_and_reduce();
        self.stats.final_columns = self.factor_base.len();
        if let Some(factor) = sieve_result? {
            return Ok(factor);
        }

        info!(
            "sieve exhausted after {} relations over {} candidates, falling back to Pollard rho",
            self.stats.relations, self.stats.candidates_tried
        );
        self.stats.fallback_used = true;

        match pollard_rho(&self.n) {
            Some(factor) => Ok(factor),
            None => Err(SnfsError::Exhausted),
        }
    }

    /// The sieve pipeline: collect relations, reduce each into the matrix,
    /// and extract on every dependency.
    ///
    /// Returns `Ok(None)` when the window or relation bounds are exhausted
    /// without a nontrivial factor (the recoverable search-exhausted case).
    fn collect_and_reduce(&mut self) -> Result<Option<BigUint>, SnfsError> {
        let degree = self.params.degree;
        let m = int_root(&(&self.n - BigUint::from(1u32)), degree);
        let one = BigUint::from(1u32);

        debug!(
            "collecting: m = {}, degree = {}, {} base primes, window {}",
            m,
            degree,
            self.factor_base.base_len(),
            self.params.search_window
        );

        for k in 1..=self.params.search_window {
            // The target tracks the current factor-base size so large-prime
            // columns admitted mid-collection still get covered by rank.
            if self.relations.len() >= self.params.max_relations
                || self.relations.len() >= self.factor_base.len() + self.params.overshoot
            {
                break;
            }

            let a = &m + BigUint::from(k);
            let v = pow_biguint(&a, degree) + &one;
            self.stats.candidates_tried += 1;

            let Some(rel) = try_factor_candidate(
                k,
                &v,
                &mut self.factor_base,
                self.params.large_prime_bound,
            ) else {
                continue;
            };

            let idx = self.relations.len();
            if idx >= self.params.max_relations {
                return Err(SnfsError::ResourceExhausted {
                    what: "relation store",
                    limit: self.params.max_relations,
                });
            }

            let row = rel.parity_row(self.factor_base.capacity());
            let mut combo = BitVec::zeros(self.params.max_relations);
            combo.set(idx);
            self.relations.push(rel);
            self.stats.relations = self.relations.len();
            debug!("relation {} at k = {}", idx, k);

            match self.matrix.insert(row, combo)? {
                Insert::Pivot => {
                    self.stats.matrix_pivots = self.matrix.rows();
                }
                Insert::Dependency(dep) => {
                    self.stats.dependencies_tried += 1;
                    debug!(
                        "dependency over {} relations at k = {}",
                        dep.count_ones(),
                        k
                    );
                    match extract_factor(&dep, &self.relations, &self.factor_base, &self.n) {
                        Extraction::Factor(g) => {
                            info!("sieve found factor {} after {} relations", g, idx + 1);
                            return Ok(Some(g));
                        }
                        Extraction::Trivial => {
                            self.stats.trivial_congruences += 1;
                            debug!("trivial congruence, resuming collection");
                        }
                    }
                }
            }
        }

        Ok(None)
    }
}

/// Factor n with default parameters (degree 8, B = 200, K = 5000).
pub fn factor_snfs(n: &BigUint) -> Result<BigUint, SnfsError> {
    factor_snfs_with_params(n, &SnfsParams::default())
}

/// Factor n with explicit parameters.
pub fn factor_snfs_with_params(n: &BigUint, params: &SnfsParams) -> Result<BigUint, SnfsError> {
    SnfsSession::new(n, params.clone())?.run()
}

/// Factor n and return the attempt statistics alongside the result.
pub fn factor_snfs_with_stats(
    n: &BigUint,
    params: &SnfsParams,
) -> (Result<BigUint, SnfsError>, SnfsStats) {
    match SnfsSession::new(n, params.clone()) {
        Ok(mut session) => {
            let result = session.run();
            let stats = session.stats().clone();
            (result, stats)
        }
        Err(e) => (Err(e), SnfsStats::default()),
    }
}

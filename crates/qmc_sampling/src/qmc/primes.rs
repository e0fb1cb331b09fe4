//! Prime table for Halton bases.
//!
//! Dimension `d` of a Halton point uses the `d`-th prime as its radical
//! inverse base.

use lazy_static::lazy_static;

/// Number of primes in [`PRIMES`].
pub const PRIME_TABLE_SIZE: usize = 1000;

/// Upper sieve bound; the 1000th prime is 7919.
const SIEVE_LIMIT: usize = 7920;

lazy_static! {
    /// The first [`PRIME_TABLE_SIZE`] primes in ascending order, starting at 2.
    pub static ref PRIMES: Vec<u64> = sieve_primes(PRIME_TABLE_SIZE);
}

/// Returns the first `count` primes using a sieve of Eratosthenes.
fn sieve_primes(count: usize) -> Vec<u64> {
    let mut composite = vec![false; SIEVE_LIMIT];
    let mut primes = Vec::with_capacity(count);

    for n in 2..SIEVE_LIMIT {
        if composite[n] {
            continue;
        }
        primes.push(n as u64);
        if primes.len() == count {
            break;
        }
        let mut multiple = n * n;
        while multiple < SIEVE_LIMIT {
            composite[multiple] = true;
            multiple += n;
        }
    }

    debug_assert_eq!(primes.len(), count);
    primes
}

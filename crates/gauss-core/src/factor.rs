// crates/gauss-core/src/factor.rs
//
// Integer factorization entropy: describe each integer by the exponents of
// its prime factors, then rank integers by self-entropy of that table.
//
// Column 0 is the unit factor 1 (present in every positive integer).
// Prime factors at or above `limit` have no column and are dropped.

use crate::config::FactorConfig;
use crate::entropy::{self_entropy_of, stack_rows};
use crate::error::Result;

#[derive(Clone, Debug, PartialEq)]
pub struct IntegerEntropy {
    pub integer: u64,
    pub factors: Vec<f64>,
    pub entropy: f64,
}

/// `[1, 2, 3, 5, 7, ...]` with every prime below `limit`.
pub fn primes_upto(limit: u64) -> Vec<u64> {
    let mut primes = vec![1u64];
    'search: for n in 2..limit {
        for &p in primes.iter().skip(1) {
            if p * p > n {
                break;
            }
            if n % p == 0 {
                continue 'search;
            }
        }
        primes.push(n);
    }
    primes
}

pub fn factor_vector(n: u64, primes: &[u64]) -> Vec<f64> {
    let mut row = vec![0.0; primes.len()];
    if n == 0 {
        return row;
    }
    let mut rest = n;
    for (slot, &p) in row.iter_mut().zip(primes) {
        if p == 1 {
            *slot = 1.0;
            continue;
        }
        while rest % p == 0 {
            *slot += 1.0;
            rest /= p;
        }
        if rest == 1 {
            break;
        }
    }
    row
}

/// Integers `0..count`, ascending by self-entropy (ties keep numeric order).
pub fn rank_integers(cfg: &FactorConfig) -> Result<Vec<IntegerEntropy>> {
    cfg.validate()?;

    let primes = primes_upto(cfg.limit);
    let rows: Vec<Vec<f64>> = (0..cfg.count).map(|n| factor_vector(n, &primes)).collect();
    let entropy = self_entropy_of(&stack_rows(&rows)?)?;

    let mut ranked: Vec<IntegerEntropy> = rows
        .into_iter()
        .zip(entropy)
        .enumerate()
        .map(|(n, (factors, entropy))| IntegerEntropy {
            integer: n as u64,
            factors,
            entropy,
        })
        .collect();
    ranked.sort_by(|a, b| a.entropy.total_cmp(&b.entropy));
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primes_start_with_unit_column() {
        assert_eq!(primes_upto(20), vec![1, 2, 3, 5, 7, 11, 13, 17, 19]);
        assert_eq!(primes_upto(2), vec![1]);
    }

    #[test]
    fn exponents_cover_the_full_factorization() {
        let primes = primes_upto(20);
        // 360 = 2^3 * 3^2 * 5
        assert_eq!(factor_vector(360, &primes), vec![1.0, 3.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(factor_vector(0, &primes), vec![0.0; primes.len()]);
        assert_eq!(factor_vector(1, &primes)[0], 1.0);
    }
}

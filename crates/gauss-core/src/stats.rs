// crates/gauss-core/src/stats.rs
//
// Cipher statistics: over many keystream seeds, compare the mean
// self-entropy of the one-hot ciphertext with that of the one-hot key.
// Trials are independent and run across rayon workers; results come back
// in seed order.

use rayon::prelude::*;

use crate::cipher::encrypt;
use crate::config::CipherStatsConfig;
use crate::entropy::{one_hot_rows, self_entropy_of};
use crate::error::{GaussError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrialEntropy {
    pub seed: u64,
    pub cipher_mean: f64,
    pub key_mean: f64,
}

#[derive(Clone, Debug)]
pub struct CipherStatsReport {
    pub trials: Vec<TrialEntropy>,
    /// Trials where the ciphertext mean exceeded the key mean.
    pub greater: usize,
    pub less_or_equal: usize,
}

pub fn mean_self_entropy(bytes: &[u8]) -> Result<f64> {
    if bytes.is_empty() {
        return Err(GaussError::Validation("cannot take the mean entropy of zero bytes".into()));
    }
    let e = self_entropy_of(&one_hot_rows(bytes))?;
    Ok(e.iter().sum::<f64>() / e.len() as f64)
}

pub fn cipher_stats(plain: &[u8], cfg: &CipherStatsConfig) -> Result<CipherStatsReport> {
    cfg.validate()?;
    if plain.is_empty() {
        return Err(GaussError::Validation("plaintext is empty".into()));
    }

    let trials = (cfg.first_seed..cfg.first_seed + cfg.trials)
        .into_par_iter()
        .map(|seed| -> Result<TrialEntropy> {
            let (cipher, key) = encrypt(plain, seed);
            Ok(TrialEntropy {
                seed,
                cipher_mean: mean_self_entropy(&cipher)?,
                key_mean: mean_self_entropy(&key)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let greater = trials.iter().filter(|t| t.cipher_mean > t.key_mean).count();
    Ok(CipherStatsReport {
        less_or_equal: trials.len() - greater,
        greater,
        trials,
    })
}

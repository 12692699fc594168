use std::path::PathBuf;

use clap::Args;
use gauss_core::cipher::{encrypt, render_text};
use gauss_core::config::SearchConfig;
use gauss_core::fingerprint::{blake3_16_hex, crc32};
use gauss_core::run_search;

use crate::cmd::{load_plaintext, Inputs};

/// Seed of the demo keystream.
const DEFAULT_KEY_SEED: u64 = 1;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Optimizer RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Keystream seed used to build the ciphertext
    #[arg(long)]
    pub key_seed: Option<u64>,

    /// Candidates per iteration
    #[arg(long)]
    pub population: Option<usize>,

    /// Candidates that steer the next iteration
    #[arg(long)]
    pub elite: Option<usize>,

    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Hard iteration ceiling
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Converged once the best cost moves by less than this
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Consecutive settled iterations before stopping
    #[arg(long)]
    pub patience: Option<usize>,

    /// Plaintext file (defaults to the built-in passage)
    #[arg(long)]
    pub text: Option<PathBuf>,
}

impl SearchArgs {
    /// True when any flag was given on the command line.
    pub fn any_set(&self) -> bool {
        self.seed.is_some()
            || self.key_seed.is_some()
            || self.population.is_some()
            || self.elite.is_some()
            || self.learning_rate.is_some()
            || self.max_iterations.is_some()
            || self.tolerance.is_some()
            || self.patience.is_some()
            || self.text.is_some()
    }

    pub fn config(&self) -> SearchConfig {
        let mut cfg = SearchConfig::default();
        if let Some(v) = self.seed {
            cfg.optimizer.seed = v;
        }
        if let Some(v) = self.population {
            cfg.optimizer.population = v;
        }
        if let Some(v) = self.elite {
            cfg.optimizer.elite = v;
        }
        if let Some(v) = self.learning_rate {
            cfg.optimizer.learning_rate = v;
        }
        if let Some(v) = self.max_iterations {
            cfg.max_iterations = v;
        }
        if let Some(v) = self.tolerance {
            cfg.tolerance = v;
        }
        if let Some(v) = self.patience {
            cfg.patience = v;
        }
        cfg
    }

    pub fn inputs(&self) -> Inputs {
        Inputs {
            text: self.text.clone(),
            key_seed: self.key_seed.unwrap_or(DEFAULT_KEY_SEED),
            ..Inputs::default()
        }
    }
}

pub fn run(cfg: &SearchConfig, inputs: &Inputs) -> anyhow::Result<()> {
    let plain = load_plaintext(inputs)?;
    let (cipher, _key) = encrypt(&plain, inputs.key_seed);

    eprintln!("bytes       = {}", cipher.len());
    eprintln!("dims        = {}", cipher.len() * 8);
    eprintln!("population  = {}", cfg.optimizer.population);
    eprintln!("cipher_crc  = {:08x}", crc32(&cipher));
    eprintln!("cipher_id   = {}", blake3_16_hex(&cipher));

    let out = run_search(&cipher, cfg, |p| {
        println!("{}", p.cost);
        println!("{}", render_text(p.plaintext));
    })?;

    let recovered = out
        .decoded
        .plaintext
        .iter()
        .zip(plain.iter())
        .filter(|(a, b)| a == b)
        .count();

    eprintln!("--- result ---");
    eprintln!("iterations  = {}", out.iterations);
    eprintln!("converged   = {}", out.converged);
    eprintln!("best_cost   = {}", out.best.cost);
    eprintln!("recovered   = {}/{} bytes", recovered, plain.len());

    Ok(())
}

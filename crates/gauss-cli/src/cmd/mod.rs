// crates/gauss-cli/src/cmd/mod.rs

pub mod cipher_stats;
pub mod cluster;
pub mod factor;
pub mod search;

use std::path::PathBuf;

use gauss_core::RunMode;

use crate::Commands;

/// File/seed plumbing that stays on the CLI side of the run mode.
#[derive(Clone, Debug, Default)]
pub struct Inputs {
    /// Labeled CSV for `cluster`.
    pub dataset: Option<PathBuf>,
    /// Plaintext file; the built-in passage when absent.
    pub text: Option<PathBuf>,
    /// Keystream seed for the search ciphertext.
    pub key_seed: u64,
    pub zstd_level: i32,
}

pub fn resolve(command: Commands) -> (RunMode, Inputs) {
    match command {
        Commands::Cluster(args) => (RunMode::Cluster(args.config()), args.inputs()),
        Commands::Factor(args) => (RunMode::FactorEntropy(args.config()), Inputs::default()),
        Commands::CipherStats(args) => (RunMode::CipherStats(args.config()), args.inputs()),
        Commands::Search(args) => (RunMode::CipherSearch(args.config()), args.inputs()),
    }
}

/// Plaintext for the cipher modes.
pub fn load_plaintext(inputs: &Inputs) -> anyhow::Result<Vec<u8>> {
    match inputs.text.as_deref() {
        Some(path) => crate::io::text::load(path),
        None => Ok(gauss_core::cipher::DEMO_PLAINTEXT.as_bytes().to_vec()),
    }
}

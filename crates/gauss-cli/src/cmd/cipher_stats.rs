use std::io::Cursor;
use std::path::PathBuf;

use clap::Args;
use gauss_core::cipher::encrypt;
use gauss_core::config::CipherStatsConfig;
use gauss_core::stats::cipher_stats;

use crate::cmd::{load_plaintext, Inputs};

#[derive(Args, Debug)]
pub struct CipherStatsArgs {
    /// Number of keystream seeds to try
    #[arg(long)]
    pub trials: Option<u64>,

    /// First keystream seed (seeds run first_seed..first_seed+trials)
    #[arg(long)]
    pub first_seed: Option<u64>,

    /// Plaintext file (defaults to the built-in passage)
    #[arg(long)]
    pub text: Option<PathBuf>,

    /// Zstd level for the compressibility scoreboard
    #[arg(long, default_value_t = 3)]
    pub zstd_level: i32,
}

impl CipherStatsArgs {
    pub fn config(&self) -> CipherStatsConfig {
        let d = CipherStatsConfig::default();
        CipherStatsConfig {
            first_seed: self.first_seed.unwrap_or(d.first_seed),
            trials: self.trials.unwrap_or(d.trials),
        }
    }

    pub fn inputs(&self) -> Inputs {
        Inputs {
            text: self.text.clone(),
            zstd_level: self.zstd_level,
            ..Inputs::default()
        }
    }
}

pub fn run(cfg: &CipherStatsConfig, inputs: &Inputs) -> anyhow::Result<()> {
    let plain = load_plaintext(inputs)?;
    eprintln!("bytes       = {}", plain.len());
    eprintln!("seeds       = {}..{}", cfg.first_seed, cfg.first_seed + cfg.trials);

    let report = cipher_stats(&plain, cfg)?;
    for t in &report.trials {
        println!("{:.9} {:.9}", t.cipher_mean, t.key_mean);
    }
    println!("{} {}", report.greater, report.less_or_equal);

    // Compressibility scoreboard for the first seed's ciphertext.
    let (cipher, _key) = encrypt(&plain, cfg.first_seed);
    let zp = zstd_size(&plain, inputs.zstd_level)?;
    let zc = zstd_size(&cipher, inputs.zstd_level)?;
    eprintln!("--- zstd ---");
    eprintln!("zstd_level      = {}", inputs.zstd_level);
    eprintln!("plain_zstd      = {} ({:.4}x)", zp, ratio(plain.len(), zp));
    eprintln!("cipher_zstd     = {} ({:.4}x)", zc, ratio(cipher.len(), zc));
    eprintln!("greater         = {}", report.greater);
    eprintln!("less_or_equal   = {}", report.less_or_equal);

    Ok(())
}

fn zstd_size(bytes: &[u8], level: i32) -> anyhow::Result<usize> {
    let out = zstd::stream::encode_all(Cursor::new(bytes), level)?;
    Ok(out.len())
}

fn ratio(raw: usize, packed: usize) -> f64 {
    if packed == 0 {
        0.0
    } else {
        raw as f64 / packed as f64
    }
}

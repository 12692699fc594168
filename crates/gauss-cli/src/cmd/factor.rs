use clap::Args;
use gauss_core::config::FactorConfig;
use gauss_core::factor::{primes_upto, rank_integers};

#[derive(Args, Debug)]
pub struct FactorArgs {
    /// Primes below this get a factor column
    #[arg(long)]
    pub limit: Option<u64>,

    /// Rank the integers 0..count
    #[arg(long)]
    pub count: Option<u64>,
}

impl FactorArgs {
    pub fn config(&self) -> FactorConfig {
        let d = FactorConfig::default();
        FactorConfig {
            limit: self.limit.unwrap_or(d.limit),
            count: self.count.unwrap_or(d.count),
        }
    }
}

pub fn run(cfg: &FactorConfig) -> anyhow::Result<()> {
    let primes = primes_upto(cfg.limit);
    eprintln!("primes      = {:?}", primes);
    eprintln!("integers    = {}", cfg.count);

    for r in rank_integers(cfg)? {
        println!("{:?} {} {:.9}", r.factors, r.integer, r.entropy);
    }
    Ok(())
}

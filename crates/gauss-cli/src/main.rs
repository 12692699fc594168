// crates/gauss-cli/src/main.rs

use clap::{Parser, Subcommand};
use gauss_core::RunMode;
use tracing_subscriber::EnvFilter;

mod cmd;
mod io;

#[derive(Parser)]
#[command(name = "gauss-cli")]
#[command(about = "Self-entropy experiments: clustering, factor entropy, cipher search", long_about = None)]
pub struct Cli {
    /// Library diagnostics at debug level (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Search flags, used when no subcommand is given (rejected before one)
    #[command(flatten)]
    pub search: cmd::search::SearchArgs,

    #[command(subcommand)]
    pub cmd: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Peel groups off a labeled CSV dataset by entropy gap
    Cluster(cmd::cluster::ClusterArgs),

    /// Rank integers by self-entropy of their prime factor exponents
    Factor(cmd::factor::FactorArgs),

    /// Compare ciphertext vs key self-entropy over many keystream seeds
    CipherStats(cmd::cipher_stats::CipherStatsArgs),

    /// Recover a known-plaintext XOR stream by entropy-minimizing search (default)
    Search(cmd::search::SearchArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = match cli.cmd {
        Some(_) if cli.search.any_set() => {
            anyhow::bail!("search flags go after `search` or without a subcommand, not before another subcommand")
        }
        Some(command) => command,
        None => Commands::Search(cli.search),
    };
    let (mode, inputs) = cmd::resolve(command);
    mode.validate()?;

    eprintln!("--- {} ---", mode.name());
    match mode {
        RunMode::Cluster(cfg) => cmd::cluster::run(&cfg, &inputs),
        RunMode::FactorEntropy(cfg) => cmd::factor::run(&cfg),
        RunMode::CipherStats(cfg) => cmd::cipher_stats::run(&cfg, &inputs),
        RunMode::CipherSearch(cfg) => cmd::search::run(&cfg, &inputs),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// crates/gauss-core/src/config.rs
//
// Start-up configuration. One variant per experiment, each carrying only
// its own parameters. Defaults are the constants the experiments were
// tuned with.

use crate::error::{GaussError, Result};
use crate::optimizer::OptimizerConfig;

#[derive(Clone, Debug)]
pub enum RunMode {
    Cluster(ClusterConfig),
    FactorEntropy(FactorConfig),
    CipherStats(CipherStatsConfig),
    CipherSearch(SearchConfig),
}

impl RunMode {
    pub fn name(&self) -> &'static str {
        match self {
            RunMode::Cluster(_) => "cluster",
            RunMode::FactorEntropy(_) => "factor",
            RunMode::CipherStats(_) => "cipher-stats",
            RunMode::CipherSearch(_) => "search",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            RunMode::Cluster(c) => c.validate(),
            RunMode::FactorEntropy(c) => c.validate(),
            RunMode::CipherStats(c) => c.validate(),
            RunMode::CipherSearch(c) => c.validate(),
        }
    }
}

impl Default for RunMode {
    fn default() -> Self {
        RunMode::CipherSearch(SearchConfig::default())
    }
}

#[derive(Clone, Debug, Default)]
pub struct ClusterConfig {
    /// Stop peeling once this many groups exist (the last one is the
    /// unsplit remainder). `None` peels until one point or none is left.
    pub max_groups: Option<usize>,
}

impl ClusterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_groups == Some(0) {
            return Err(GaussError::Validation("max_groups must be >= 1".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct FactorConfig {
    /// Candidate primes are taken from `2..limit` (plus the unit column).
    pub limit: u64,
    /// Integers `0..count` are ranked.
    pub count: u64,
}

impl Default for FactorConfig {
    fn default() -> Self {
        Self { limit: 258, count: 258 }
    }
}

impl FactorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(GaussError::Validation("count must be > 0".into()));
        }
        if self.limit < 2 {
            return Err(GaussError::Validation("limit must be >= 2".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct CipherStatsConfig {
    pub first_seed: u64,
    pub trials: u64,
}

impl Default for CipherStatsConfig {
    fn default() -> Self {
        Self {
            first_seed: 1,
            trials: 8 * 1024 - 1,
        }
    }
}

impl CipherStatsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.trials == 0 {
            return Err(GaussError::Validation("trials must be > 0".into()));
        }
        if self.first_seed.checked_add(self.trials).is_none() {
            return Err(GaussError::Validation("seed range overflows u64".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub optimizer: OptimizerConfig,
    /// Converged once the best cost moves by less than this.
    pub tolerance: f64,
    /// Consecutive below-tolerance iterations required to stop.
    pub patience: usize,
    /// Hard ceiling; an oscillating search stops here unconverged.
    pub max_iterations: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            optimizer: OptimizerConfig::default(),
            tolerance: 1e-9,
            patience: 1,
            max_iterations: 4096,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        self.optimizer.validate()?;
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(GaussError::Validation(format!(
                "tolerance must be > 0, got {}",
                self.tolerance
            )));
        }
        if self.patience == 0 {
            return Err(GaussError::Validation("patience must be >= 1".into()));
        }
        if self.max_iterations == 0 {
            return Err(GaussError::Validation("max_iterations must be >= 1".into()));
        }
        Ok(())
    }
}

// crates/gauss-core/src/optimizer.rs
//
// Sampling-based population optimizer over fixed-length real vectors.
//
// Per iteration:
//   1. draw `population` candidates x = mean + sigma * z, z ~ N(0, 1),
//      sequentially from one seeded RNG (so runs are reproducible);
//   2. score every candidate in parallel (rayon), joining before going on;
//   3. move mean/sigma toward the `elite` best candidates by `learning_rate`;
//   4. return the best candidate of this generation.
//
// Returned costs move up and down from one generation to the next; callers
// that want a running best keep it themselves.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;
use rayon::prelude::*;
use tracing::debug;

use crate::error::{GaussError, Result};

#[derive(Clone, Debug)]
pub struct OptimizerConfig {
    pub population: usize,
    /// Candidates per iteration that steer the next distribution.
    pub elite: usize,
    /// Std-dev of the initial mean around zero.
    pub init_scale: f64,
    pub init_sigma: f64,
    pub learning_rate: f64,
    /// Per-dimension spread never collapses below this.
    pub min_sigma: f64,
    pub seed: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population: 16,
            elite: 4,
            init_scale: 0.1,
            init_sigma: 1.0,
            learning_rate: 0.5,
            min_sigma: 0.05,
            seed: 1,
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.population < 2 {
            return Err(GaussError::Validation("population must be >= 2".into()));
        }
        if self.elite == 0 || self.elite > self.population {
            return Err(GaussError::Validation(format!(
                "elite must be in 1..={}, got {}",
                self.population, self.elite
            )));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(GaussError::Validation(format!(
                "learning_rate must be in (0, 1], got {}",
                self.learning_rate
            )));
        }
        for (name, v) in [
            ("init_scale", self.init_scale),
            ("init_sigma", self.init_sigma),
            ("min_sigma", self.min_sigma),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(GaussError::Validation(format!("{} must be finite and >= 0, got {}", name, v)));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub vector: Vec<f64>,
    pub cost: f64,
}

pub trait Optimizer {
    /// Run one generation and return its best candidate.
    fn iterate(&mut self) -> Result<Sample>;
}

/// Cost functions are shared by reference across rayon workers, hence `Sync`.
pub struct GaussianSearch<F> {
    cfg: OptimizerConfig,
    mean: Vec<f64>,
    sigma: Vec<f64>,
    rng: ChaCha8Rng,
    cost: F,
    generation: usize,
}

impl<F> GaussianSearch<F>
where
    F: Fn(&[f64]) -> Result<f64> + Sync,
{
    pub fn new(dim: usize, cfg: OptimizerConfig, cost: F) -> Result<Self> {
        cfg.validate()?;
        if dim == 0 {
            return Err(GaussError::Validation("optimizer dimension must be > 0".into()));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);
        let mean = (0..dim)
            .map(|_| cfg.init_scale * rng.sample::<f64, _>(StandardNormal))
            .collect();
        let sigma = vec![cfg.init_sigma; dim];

        Ok(Self {
            cfg,
            mean,
            sigma,
            rng,
            cost,
            generation: 0,
        })
    }

    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    fn draw(&mut self) -> Vec<f64> {
        let rng = &mut self.rng;
        self.mean
            .iter()
            .zip(self.sigma.iter())
            .map(|(m, s)| m + s * rng.sample::<f64, _>(StandardNormal))
            .collect()
    }

    fn refit(&mut self, candidates: &[Vec<f64>], elite: &[usize]) {
        let lr = self.cfg.learning_rate;
        let k = elite.len() as f64;
        for d in 0..self.mean.len() {
            let mu = elite.iter().map(|&i| candidates[i][d]).sum::<f64>() / k;
            let var = elite
                .iter()
                .map(|&i| {
                    let x = candidates[i][d] - mu;
                    x * x
                })
                .sum::<f64>()
                / k;
            self.mean[d] = (1.0 - lr) * self.mean[d] + lr * mu;
            self.sigma[d] = ((1.0 - lr) * self.sigma[d] + lr * var.sqrt()).max(self.cfg.min_sigma);
        }
    }
}

impl<F> Optimizer for GaussianSearch<F>
where
    F: Fn(&[f64]) -> Result<f64> + Sync,
{
    fn iterate(&mut self) -> Result<Sample> {
        let candidates: Vec<Vec<f64>> = (0..self.cfg.population).map(|_| self.draw()).collect();

        let cost = &self.cost;
        let costs = candidates
            .par_iter()
            .map(|v| cost(v.as_slice()))
            .collect::<Result<Vec<f64>>>()?;

        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| costs[a].total_cmp(&costs[b]));

        let top = order[0];
        let best = Sample {
            vector: candidates[top].clone(),
            cost: costs[top],
        };

        self.refit(&candidates, &order[..self.cfg.elite]);
        self.generation += 1;

        debug!(
            generation = self.generation,
            cost = best.cost,
            "optimizer iteration"
        );
        Ok(best)
    }
}

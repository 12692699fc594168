// crates/gauss-core/src/search.rs
//
// Driver loop for the cryptanalysis search: poll the optimizer once per
// iteration, keep the running best, report every improvement of it, stop
// once consecutive generation costs settle within `tolerance` (for
// `patience` consecutive iterations) or the iteration ceiling is hit.

use tracing::{debug, info, warn};

use crate::cipher::{decode, sample_cost, Decoded, BITS_PER_BYTE};
use crate::config::SearchConfig;
use crate::error::{GaussError, Result};
use crate::optimizer::{GaussianSearch, Optimizer, Sample};

/// Handed to the caller after every improving iteration.
#[derive(Clone, Copy, Debug)]
pub struct Progress<'a> {
    pub iteration: usize,
    pub cost: f64,
    pub plaintext: &'a [u8],
}

#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub best: Sample,
    pub decoded: Decoded,
    pub iterations: usize,
    /// Running best cost after each iteration; never increases.
    pub history: Vec<f64>,
    /// False when the ceiling stopped the loop.
    pub converged: bool,
}

pub fn run_search<P>(ciphertext: &[u8], cfg: &SearchConfig, on_improve: P) -> Result<SearchOutcome>
where
    P: FnMut(&Progress<'_>),
{
    cfg.validate()?;
    if ciphertext.is_empty() {
        return Err(GaussError::Validation("ciphertext is empty".into()));
    }

    let dim = ciphertext.len() * BITS_PER_BYTE;
    let mut opt = GaussianSearch::new(dim, cfg.optimizer.clone(), |v: &[f64]| sample_cost(v, ciphertext))?;
    debug!(dims = opt.dim(), bytes = ciphertext.len(), "search started");
    let out = drive(&mut opt, ciphertext, cfg, on_improve)?;
    debug!(generations = opt.generation(), converged = out.converged, "search finished");
    Ok(out)
}

/// The loop itself, over any optimizer.
pub fn drive<O, P>(opt: &mut O, ciphertext: &[u8], cfg: &SearchConfig, mut on_improve: P) -> Result<SearchOutcome>
where
    O: Optimizer,
    P: FnMut(&Progress<'_>),
{
    let mut history = Vec::new();
    let mut best: Option<Sample> = None;
    let mut prev_cost: Option<f64> = None;
    let mut stalled = 0usize;
    let mut converged = false;

    for iteration in 1..=cfg.max_iterations {
        let s = opt.iterate()?;
        let cost = s.cost;

        let settled = prev_cost.is_some_and(|prev| (prev - cost).abs() < cfg.tolerance);
        prev_cost = Some(cost);
        stalled = if settled { stalled + 1 } else { 0 };
        let stop = settled && stalled >= cfg.patience;

        if best.as_ref().map_or(true, |b| cost < b.cost) {
            if !stop {
                let d = decode(&s.vector, ciphertext)?;
                info!(iteration, cost, "best cost improved");
                on_improve(&Progress {
                    iteration,
                    cost,
                    plaintext: &d.plaintext,
                });
            }
            best = Some(s);
        }
        if let Some(b) = &best {
            history.push(b.cost);
        }

        if stop {
            info!(iteration, cost, "search converged");
            converged = true;
            break;
        }
    }

    if !converged {
        warn!(
            max_iterations = cfg.max_iterations,
            "search hit the iteration ceiling before converging"
        );
    }

    let best = best.ok_or_else(|| GaussError::Validation("search ran zero iterations".into()))?;
    let decoded = decode(&best.vector, ciphertext)?;
    Ok(SearchOutcome {
        best,
        decoded,
        iterations: history.len(),
        history,
        converged,
    })
}

//! Scenario runner for repeated seeded projections
//!
//! Runs one configuration over many independent random paths. Each trial
//! owns its generator, seeded from a deterministic per-trial seed, so a
//! batch reproduces exactly regardless of thread scheduling.

use crate::error::{ProjectionError, Result};
use crate::projection::{PortfolioSimulator, SimulationSummary};
use log::info;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;

/// Percentiles reported for the distribution of final property
pub const REPORTED_PERCENTILES: [f64; 5] = [5.0, 25.0, 50.0, 75.0, 95.0];

/// Result of one seeded trial
#[derive(Debug, Clone, Serialize)]
pub struct TrialOutcome {
    pub seed: u64,
    pub summary: SimulationSummary,
}

/// Distribution of outcomes across trials
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub trials: u32,
    pub mean_final_property: f64,
    pub mean_total_roi: f64,
    /// (percentile, final property) pairs
    pub percentiles: Vec<(f64, f64)>,
    pub best_seed: u64,
    pub worst_seed: u64,
}

/// Batch runner around a validated simulator
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    simulator: PortfolioSimulator,
}

impl ScenarioRunner {
    pub fn new(simulator: PortfolioSimulator) -> Self {
        Self { simulator }
    }

    /// Per-trial seeds derived from one base seed
    pub fn trial_seeds(base_seed: u64, trials: u32) -> Vec<u64> {
        let mut rng = StdRng::seed_from_u64(base_seed);
        (0..trials).map(|_| rng.next_u64()).collect()
    }

    /// Run every trial in parallel; the first failure aborts the batch
    pub fn run_trials(&self, base_seed: u64, trials: u32) -> Result<Vec<TrialOutcome>> {
        if trials == 0 {
            return Err(ProjectionError::invalid("scenario run needs at least one trial"));
        }

        Self::trial_seeds(base_seed, trials)
            .par_iter()
            .map(|&seed| -> Result<TrialOutcome> {
                let mut rng = StdRng::seed_from_u64(seed);
                let result = self.simulator.simulate(&mut rng)?;
                Ok(TrialOutcome {
                    seed,
                    summary: result.summary(),
                })
            })
            .collect()
    }

    /// Run the batch and summarize the distribution of outcomes
    pub fn run(&self, base_seed: u64, trials: u32) -> Result<ScenarioSummary> {
        let mut outcomes = self.run_trials(base_seed, trials)?;
        outcomes.sort_by(|a, b| {
            a.summary
                .final_property
                .partial_cmp(&b.summary.final_property)
                .unwrap_or(Ordering::Equal)
        });

        let n = outcomes.len();
        let mean_final_property =
            outcomes.iter().map(|o| o.summary.final_property).sum::<f64>() / n as f64;
        let mean_total_roi = outcomes.iter().map(|o| o.summary.total_roi).sum::<f64>() / n as f64;

        let percentiles = REPORTED_PERCENTILES
            .iter()
            .map(|&p| {
                let idx = ((p / 100.0) * (n - 1) as f64).round() as usize;
                (p, outcomes[idx].summary.final_property)
            })
            .collect();

        info!("Completed {} trials from base seed {}", n, base_seed);

        Ok(ScenarioSummary {
            trials: n as u32,
            mean_final_property,
            mean_total_roi,
            percentiles,
            best_seed: outcomes[n - 1].seed,
            worst_seed: outcomes[0].seed,
        })
    }
}

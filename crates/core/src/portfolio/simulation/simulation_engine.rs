//! Per-path GBM simulation and batch aggregation.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rayon::prelude::*;

use crate::constants::{
    MONTHS_PER_YEAR, REPRESENTATIVE_PATH_PERCENTILES, SIMULATION_PERCENTILES,
};
use crate::errors::Result;

use super::{
    percentile_table, select_representative_paths, PathOutcome, SimulationConfig, SimulationResult,
};

/// Runs `config.n_sims` independent paths and aggregates them.
///
/// Paths run in parallel. Each path seeds its own generator from the run seed
/// and its index, so a seeded run is reproducible regardless of scheduling.
pub fn simulate(config: &SimulationConfig) -> Result<SimulationResult> {
    config.validate()?;

    let base_seed = config.seed.unwrap_or_else(rand::random);
    debug!(
        "Simulating {} paths over {} years ({} steps), seed {}",
        config.n_sims,
        config.years,
        config.steps(),
        base_seed
    );

    let outcomes: Vec<PathOutcome> = (0..config.n_sims)
        .into_par_iter()
        .map(|index| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(u64::from(index)));
            simulate_path(config, &mut rng)
        })
        .collect();

    Ok(summarize(config, &outcomes))
}

/// Simulates one path month by month.
///
/// Each step adds the contribution to value and cost basis, applies a GBM
/// monthly return, then the taxed dividend (added to value and cost basis
/// only under DRIP). Non-DRIP dividends leave the simulation as paid-out
/// cash. At the horizon, capital-gains tax applies to the unrealized gain
/// only, and the net value is deflated to today's purchasing power.
pub fn simulate_path<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> PathOutcome {
    let steps = config.steps();
    let mu_m = config.monthly_drift();
    let sigma_m = config.monthly_volatility();
    let monthly_yield = config.annual_div_yield / f64::from(MONTHS_PER_YEAR);

    let mut value = config.initial_value;
    let mut cost = config.initial_value;
    let mut trajectory = Vec::with_capacity(steps as usize);

    for _ in 0..steps {
        value += config.monthly_contribution;
        cost += config.monthly_contribution;

        let z: f64 = rng.sample(StandardNormal);
        let r = (mu_m + sigma_m * z).exp() - 1.0;
        value += value * r;

        let div_income = value * monthly_yield;
        let div_net = div_income * (1.0 - config.div_tax_rate);
        if config.drip {
            value += div_net;
            cost += div_net;
        }

        trajectory.push(value);
    }

    let capital_gains_tax = (value - cost).max(0.0) * config.cg_tax_rate;
    let net_value = value - capital_gains_tax;

    PathOutcome {
        terminal_value: net_value / config.inflation_factor(),
        final_nominal_value: value,
        final_cost_basis: cost,
        capital_gains_tax,
        trajectory,
    }
}

/// Sorts terminal values and extracts the percentile table and representative paths.
pub fn summarize(config: &SimulationConfig, outcomes: &[PathOutcome]) -> SimulationResult {
    let mut terminal_values: Vec<f64> = outcomes.iter().map(|o| o.terminal_value).collect();
    terminal_values.sort_by(f64::total_cmp);

    let mean_terminal_value = if terminal_values.is_empty() {
        0.0
    } else {
        terminal_values.iter().sum::<f64>() / terminal_values.len() as f64
    };

    SimulationResult {
        percentiles: percentile_table(&terminal_values, &SIMULATION_PERCENTILES),
        representative_paths: select_representative_paths(
            outcomes,
            &REPRESENTATIVE_PATH_PERCENTILES,
        ),
        terminal_values,
        mean_terminal_value,
        n_sims: config.n_sims,
        years: config.years,
    }
}

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_SIMULATION_COUNT, DEFAULT_SIMULATION_YEARS, LOW_CONFIDENCE_SIMULATION_COUNT,
    MONTHS_PER_YEAR,
};
use crate::errors::{ConfigurationError, Result};
use crate::portfolio::returns::ReturnStatistics;

use super::nearest_rank;

fn default_years() -> u32 {
    DEFAULT_SIMULATION_YEARS
}

fn default_n_sims() -> u32 {
    DEFAULT_SIMULATION_COUNT
}

/// Inputs for a projection run. All rates are fractions (0.10 = 10%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Starting portfolio value in base currency
    pub initial_value: f64,
    /// Annualized drift (μ)
    pub annual_mu: f64,
    /// Annualized volatility (σ)
    pub annual_sigma: f64,
    #[serde(default)]
    pub annual_div_yield: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
    #[serde(default = "default_years")]
    pub years: u32,
    #[serde(default = "default_n_sims")]
    pub n_sims: u32,
    /// Reinvest net dividends into the portfolio
    #[serde(default)]
    pub drip: bool,
    #[serde(default)]
    pub inflation_rate: f64,
    #[serde(default)]
    pub div_tax_rate: f64,
    #[serde(default)]
    pub cg_tax_rate: f64,
    /// Annual wealth-tax drag, subtracted from μ
    #[serde(default)]
    pub wealth_tax_drag: f64,
    /// Fixed seed for reproducible runs; a random seed is drawn when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            initial_value: 10_000.0,
            annual_mu: 0.07,
            annual_sigma: 0.15,
            annual_div_yield: 0.0,
            monthly_contribution: 0.0,
            years: DEFAULT_SIMULATION_YEARS,
            n_sims: DEFAULT_SIMULATION_COUNT,
            drip: false,
            inflation_rate: 0.0,
            div_tax_rate: 0.0,
            cg_tax_rate: 0.0,
            wealth_tax_drag: 0.0,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Config whose drift and volatility come from historical daily returns.
    pub fn from_statistics(initial_value: f64, stats: &ReturnStatistics) -> Self {
        SimulationConfig {
            initial_value,
            annual_mu: stats.annualized_mean,
            annual_sigma: stats.annualized_volatility,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.initial_value.is_finite() && self.initial_value > 0.0) {
            return Err(ConfigurationError::NonPositiveInitialValue(self.initial_value).into());
        }
        if self.years == 0 {
            return Err(ConfigurationError::ZeroHorizon.into());
        }
        if self.years.checked_mul(MONTHS_PER_YEAR).is_none() {
            return Err(ConfigurationError::HorizonTooLong(self.years).into());
        }
        if self.n_sims == 0 {
            return Err(ConfigurationError::ZeroSimulations.into());
        }
        if !(self.annual_sigma.is_finite() && self.annual_sigma >= 0.0) {
            return Err(ConfigurationError::InvalidVolatility(self.annual_sigma).into());
        }

        for (field, value) in [
            ("annualMu", self.annual_mu),
            ("annualDivYield", self.annual_div_yield),
            ("monthlyContribution", self.monthly_contribution),
            ("wealthTaxDrag", self.wealth_tax_drag),
        ] {
            if !value.is_finite() {
                return Err(ConfigurationError::NonFinite { field, value }.into());
            }
        }

        for (field, value) in [
            ("divTaxRate", self.div_tax_rate),
            ("cgTaxRate", self.cg_tax_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigurationError::TaxRateOutOfRange { field, value }.into());
            }
        }

        if !(self.inflation_rate.is_finite() && self.inflation_rate > -1.0) {
            return Err(ConfigurationError::InvalidInflationRate(self.inflation_rate).into());
        }

        Ok(())
    }

    /// Drift after wealth-tax drag.
    pub fn effective_mu(&self) -> f64 {
        self.annual_mu - self.wealth_tax_drag
    }

    /// Monthly step count. Saturates for horizons `validate` rejects.
    pub fn steps(&self) -> u32 {
        self.years.saturating_mul(MONTHS_PER_YEAR)
    }

    /// Monthly log drift with the Itô correction: (μ − σ²/2) / 12.
    pub fn monthly_drift(&self) -> f64 {
        (self.effective_mu() - 0.5 * self.annual_sigma.powi(2)) / f64::from(MONTHS_PER_YEAR)
    }

    /// σ / √12
    pub fn monthly_volatility(&self) -> f64 {
        self.annual_sigma / f64::from(MONTHS_PER_YEAR).sqrt()
    }

    /// Divisor that converts a nominal terminal value into today's purchasing power.
    pub fn inflation_factor(&self) -> f64 {
        (1.0 + self.inflation_rate).powf(f64::from(self.years))
    }
}

/// Outcome of a single simulated path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathOutcome {
    /// After capital-gains tax and inflation adjustment
    pub terminal_value: f64,
    /// Nominal value at the horizon, before tax
    pub final_nominal_value: f64,
    pub final_cost_basis: f64,
    pub capital_gains_tax: f64,
    /// Nominal value recorded after every monthly step
    pub trajectory: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentileValue {
    pub percentile: u8,
    pub value: f64,
}

/// The full trajectory of the simulation that ranked at a given percentile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepresentativePath {
    pub percentile: u8,
    pub terminal_value: f64,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Terminal values of all paths, ascending
    pub terminal_values: Vec<f64>,
    pub percentiles: Vec<PercentileValue>,
    pub representative_paths: Vec<RepresentativePath>,
    pub mean_terminal_value: f64,
    pub n_sims: u32,
    pub years: u32,
}

impl SimulationResult {
    /// Nearest-rank percentile over all terminal values. `None` for `p >= 100`.
    pub fn percentile(&self, p: f64) -> Option<f64> {
        nearest_rank(&self.terminal_values, p)
    }

    pub fn path(&self, percentile: u8) -> Option<&RepresentativePath> {
        self.representative_paths
            .iter()
            .find(|p| p.percentile == percentile)
    }

    /// Share of paths whose terminal value is at least `target`.
    pub fn probability_of_reaching(&self, target: f64) -> f64 {
        if self.terminal_values.is_empty() {
            return 0.0;
        }
        let below = self.terminal_values.partition_point(|v| *v < target);
        (self.terminal_values.len() - below) as f64 / self.terminal_values.len() as f64
    }

    pub fn is_low_confidence(&self) -> bool {
        self.n_sims < LOW_CONFIDENCE_SIMULATION_COUNT
    }
}

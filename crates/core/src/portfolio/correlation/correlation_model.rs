//! Correlation matrix models and classification bands.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Strength band of a pairwise correlation.
///
/// Thresholds: `>= 0.7` high, `0.3..0.7` medium, `0..0.3` low, `< 0` negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CorrelationBand {
    /// Moves together; little diversification benefit
    High,
    Medium,
    /// Diversified
    Low,
    /// Moves against; acts as a hedge
    Negative,
}

impl CorrelationBand {
    pub const HIGH_THRESHOLD: f64 = 0.7;
    pub const MEDIUM_THRESHOLD: f64 = 0.3;

    pub fn classify(correlation: f64) -> Self {
        if correlation >= Self::HIGH_THRESHOLD {
            CorrelationBand::High
        } else if correlation >= Self::MEDIUM_THRESHOLD {
            CorrelationBand::Medium
        } else if correlation >= 0.0 {
            CorrelationBand::Low
        } else {
            CorrelationBand::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CorrelationBand::High => "HIGH",
            CorrelationBand::Medium => "MEDIUM",
            CorrelationBand::Low => "LOW",
            CorrelationBand::Negative => "NEGATIVE",
        }
    }
}

/// A defined off-diagonal cell of a correlation matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationPair {
    pub symbol_a: String,
    pub symbol_b: String,
    pub correlation: f64,
    pub band: CorrelationBand,
}

/// Symmetric N×N correlation table.
///
/// The diagonal is always `Some(1.0)`. A cell is `None` when the pair lacks
/// enough overlapping history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationMatrix {
    pub symbols: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    fn index_of(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s == symbol)
    }

    /// Correlation between two symbols, if both are present and the cell is defined.
    pub fn get(&self, symbol_a: &str, symbol_b: &str) -> Option<f64> {
        let i = self.index_of(symbol_a)?;
        let j = self.index_of(symbol_b)?;
        self.values[i][j]
    }

    /// Every defined cell above the diagonal.
    pub fn pairs(&self) -> Vec<CorrelationPair> {
        let n = self.len();
        let mut pairs = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if let Some(correlation) = self.values[i][j] {
                    pairs.push(CorrelationPair {
                        symbol_a: self.symbols[i].clone(),
                        symbol_b: self.symbols[j].clone(),
                        correlation,
                        band: CorrelationBand::classify(correlation),
                    });
                }
            }
        }
        pairs
    }

    pub fn pairs_in_band(&self, band: CorrelationBand) -> Vec<CorrelationPair> {
        self.pairs().into_iter().filter(|p| p.band == band).collect()
    }

    /// Mean of all defined off-diagonal cells. Lower means better diversified.
    pub fn average_correlation(&self) -> Option<f64> {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return None;
        }
        Some(pairs.iter().map(|p| p.correlation).sum::<f64>() / pairs.len() as f64)
    }
}

/// Price-history window requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Lookback {
    OneMonth,
    ThreeMonths,
    SixMonths,
    #[default]
    OneYear,
    TwoYears,
    FiveYears,
}

impl Lookback {
    pub fn months(&self) -> u32 {
        match self {
            Lookback::OneMonth => 1,
            Lookback::ThreeMonths => 3,
            Lookback::SixMonths => 6,
            Lookback::OneYear => 12,
            Lookback::TwoYears => 24,
            Lookback::FiveYears => 60,
        }
    }

    /// First date of the window ending on `as_of`.
    pub fn start_date(&self, as_of: NaiveDate) -> NaiveDate {
        as_of
            .checked_sub_months(Months::new(self.months()))
            .unwrap_or(NaiveDate::MIN)
    }
}

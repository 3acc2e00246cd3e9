use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily close in the portfolio's base currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        PricePoint { date, price }
    }
}

/// Two equal-length daily return vectors computed over the dates both series share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignedReturns {
    pub returns_a: Vec<f64>,
    pub returns_b: Vec<f64>,
    /// Number of synchronized price pairs the returns were derived from.
    pub aligned_points: usize,
}

impl AlignedReturns {
    pub fn len(&self) -> usize {
        self.returns_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns_a.is_empty()
    }
}

/// Annualized drift and volatility estimated from daily closes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnStatistics {
    pub annualized_mean: f64,
    pub annualized_volatility: f64,
    pub observations: usize,
}

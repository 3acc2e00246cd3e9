use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single holding as seen by the analytics engines.
///
/// Positions are produced by the host from transaction history and are never
/// mutated here. All amounts are in the portfolio's base currency; the cost
/// basis is accumulated at the FX rate of each acquisition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub value_in_base_currency: Decimal,
    pub quantity: Decimal,
    pub cost_basis_in_base_currency: Decimal,
}

impl Position {
    pub fn new(symbol: &str, value: Decimal, quantity: Decimal, cost_basis: Decimal) -> Self {
        Position {
            symbol: symbol.to_string(),
            value_in_base_currency: value,
            quantity,
            cost_basis_in_base_currency: cost_basis,
        }
    }

    /// Market value minus cost basis. Negative when the position is under water.
    pub fn unrealized_gain(&self) -> Decimal {
        self.value_in_base_currency - self.cost_basis_in_base_currency
    }
}

/// Sum of all position values.
pub fn total_value(positions: &[Position]) -> Decimal {
    positions.iter().map(|p| p.value_in_base_currency).sum()
}

/// Sum of all position cost bases.
pub fn total_cost_basis(positions: &[Position]) -> Decimal {
    positions.iter().map(|p| p.cost_basis_in_base_currency).sum()
}

/// Portfolio value as a float, for seeding a simulation's initial value.
pub fn portfolio_initial_value(positions: &[Position]) -> f64 {
    total_value(positions).to_f64().unwrap_or(0.0)
}

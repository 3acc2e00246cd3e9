//! Allocation models for target-weight reconciliation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

/// Host-persisted target for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAllocation {
    pub symbol: String,
    /// Fraction of the total post-cash portfolio value (0.25 = 25%)
    pub target_weight: Decimal,
    /// Sector, region or currency label used for group roll-ups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl TargetAllocation {
    pub fn new(symbol: &str, target_weight: Decimal) -> Self {
        TargetAllocation {
            symbol: symbol.to_string(),
            target_weight,
            group: None,
        }
    }

    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    /// Structural checks only. Targets that do not sum to 100% are accepted.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(ValidationError::MissingField("symbol".to_string()).into());
        }
        if self.target_weight < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "Target weight for {} cannot be negative: {}",
                self.symbol, self.target_weight
            ))
            .into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AllocationActionType {
    Buy,
    Sell,
    Hold,
}

impl AllocationActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationActionType::Buy => "BUY",
            AllocationActionType::Sell => "SELL",
            AllocationActionType::Hold => "HOLD",
        }
    }
}

/// Per-position reconciliation of current against target weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationAction {
    pub symbol: String,
    pub current_value: Decimal,
    /// Fraction of the current (pre-cash) portfolio value
    pub current_weight: Decimal,
    pub target_weight: Decimal,
    /// Target weight applied to the post-cash total
    pub target_value: Decimal,
    /// Relative deviation from target, in percent
    pub drift_pct: Decimal,
    /// Signed amount to trade: positive buys, negative sells
    pub delta: Decimal,
    pub action: AllocationActionType,
}

/// Roll-up of allocation actions sharing a sector, region or currency label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAllocation {
    pub group: String,
    pub symbols: Vec<String>,
    pub current_value: Decimal,
    pub current_weight: Decimal,
    pub target_weight: Decimal,
    pub target_value: Decimal,
    pub delta: Decimal,
    pub drift_pct: Decimal,
}

/// Suggested share of incoming cash for one BUY action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashDeployment {
    pub symbol: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalancingPlan {
    /// Current positions plus new cash
    pub total_value: Decimal,
    pub new_cash: Decimal,
    /// Sum of all target weights; hosts warn when this is far from 1
    pub target_weight_sum: Decimal,
    pub actions: Vec<AllocationAction>,
    pub cash_deployments: Vec<CashDeployment>,
}

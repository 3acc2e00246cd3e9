//! Drift, buy/sell sizing and new-cash distribution against target weights.

use std::collections::{BTreeMap, HashMap};

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::{UNKNOWN_GROUP, ZERO_TARGET_DRIFT_PCT};
use crate::errors::{Result, ValidationError};
use crate::portfolio::positions::{total_value, Position};

use super::{
    AllocationAction, AllocationActionType, CashDeployment, GroupAllocation, RebalancingPlan,
    TargetAllocation,
};

/// Relative deviation of `current_weight` from `target_weight`, in percent.
///
/// A held weight against a zero target is reported as -100. Zero against zero is 0.
/// Drift that does not fit in a `Decimal` saturates at `Decimal::MAX`/`MIN`.
pub fn drift_pct(current_weight: Decimal, target_weight: Decimal) -> Decimal {
    if target_weight > Decimal::ZERO {
        let deviation = current_weight.saturating_sub(target_weight);
        match deviation.checked_div(target_weight) {
            Some(ratio) => ratio.saturating_mul(dec!(100)),
            None if deviation.is_sign_negative() => Decimal::MIN,
            None => Decimal::MAX,
        }
    } else if current_weight > Decimal::ZERO {
        ZERO_TARGET_DRIFT_PCT
    } else {
        Decimal::ZERO
    }
}

fn classify(delta: Decimal) -> AllocationActionType {
    if delta > Decimal::ZERO {
        AllocationActionType::Buy
    } else if delta < Decimal::ZERO {
        AllocationActionType::Sell
    } else {
        AllocationActionType::Hold
    }
}

/// Reconciles each position against its target weight.
///
/// Current weights are shares of the position total; target values are shares
/// of the position total plus `new_cash`. Positions without a target are
/// treated as a zero target.
pub fn compute_actions(
    positions: &[Position],
    targets: &HashMap<String, TargetAllocation>,
    new_cash: Decimal,
) -> Vec<AllocationAction> {
    let positions_value = total_value(positions);
    let total = positions_value.saturating_add(new_cash);

    debug!(
        "Computing allocation actions for {} positions, total {} (new cash {})",
        positions.len(),
        total,
        new_cash
    );

    positions
        .iter()
        .map(|position| {
            let current_value = position.value_in_base_currency;
            let current_weight = if positions_value > Decimal::ZERO {
                current_value
                    .checked_div(positions_value)
                    .unwrap_or(Decimal::ZERO)
            } else {
                Decimal::ZERO
            };
            let target_weight = targets
                .get(&position.symbol)
                .map(|t| t.target_weight)
                .unwrap_or(Decimal::ZERO);
            let target_value = total.saturating_mul(target_weight);
            let delta = target_value.saturating_sub(current_value);

            AllocationAction {
                symbol: position.symbol.clone(),
                current_value,
                current_weight,
                target_weight,
                target_value,
                drift_pct: drift_pct(current_weight, target_weight),
                delta,
                action: classify(delta),
            }
        })
        .collect()
}

/// Rolls actions up by a host-supplied group label.
///
/// Group weights, values and deltas are plain sums of their members. Symbols
/// without a label are grouped under "Unknown". Groups are sorted by current
/// value, largest first.
pub fn group_allocations<F>(actions: &[AllocationAction], label_for: F) -> Vec<GroupAllocation>
where
    F: Fn(&str) -> Option<String>,
{
    let mut groups: BTreeMap<String, GroupAllocation> = BTreeMap::new();

    for action in actions {
        let label = label_for(&action.symbol).unwrap_or_else(|| UNKNOWN_GROUP.to_string());
        let group = groups
            .entry(label.clone())
            .or_insert_with(|| GroupAllocation {
                group: label,
                symbols: Vec::new(),
                current_value: Decimal::ZERO,
                current_weight: Decimal::ZERO,
                target_weight: Decimal::ZERO,
                target_value: Decimal::ZERO,
                delta: Decimal::ZERO,
                drift_pct: Decimal::ZERO,
            });

        group.symbols.push(action.symbol.clone());
        group.current_value += action.current_value;
        group.current_weight += action.current_weight;
        group.target_weight += action.target_weight;
        group.target_value += action.target_value;
        group.delta += action.delta;
    }

    let mut allocations: Vec<GroupAllocation> = groups
        .into_values()
        .map(|mut g| {
            g.drift_pct = drift_pct(g.current_weight, g.target_weight);
            g
        })
        .collect();

    allocations.sort_by(|a, b| b.current_value.cmp(&a.current_value));
    allocations
}

/// Labeler that reads each symbol's group from its target allocation.
pub fn group_label_from_targets(
    targets: &HashMap<String, TargetAllocation>,
) -> impl Fn(&str) -> Option<String> + '_ {
    move |symbol: &str| targets.get(symbol).and_then(|t| t.group.clone())
}

/// Splits `new_cash` across BUY actions in proportion to their deltas.
///
/// Empty when there is no positive cash or no BUY action. Actions themselves
/// are left untouched.
pub fn distribute_cash(actions: &[AllocationAction], new_cash: Decimal) -> Vec<CashDeployment> {
    if new_cash <= Decimal::ZERO {
        return Vec::new();
    }

    let buys: Vec<&AllocationAction> = actions
        .iter()
        .filter(|a| a.action == AllocationActionType::Buy)
        .collect();
    let total_buy_demand = buys
        .iter()
        .fold(Decimal::ZERO, |acc, a| acc.saturating_add(a.delta));

    if total_buy_demand <= Decimal::ZERO {
        return Vec::new();
    }

    buys.into_iter()
        .map(|a| CashDeployment {
            symbol: a.symbol.clone(),
            amount: a
                .delta
                .checked_div(total_buy_demand)
                .unwrap_or(Decimal::ZERO)
                .saturating_mul(new_cash),
        })
        .collect()
}

pub fn is_drift_flagged(drift_pct: Decimal, threshold: Decimal) -> bool {
    drift_pct.abs() > threshold
}

/// Actions whose drift magnitude exceeds `threshold` percent.
pub fn flagged_actions(actions: &[AllocationAction], threshold: Decimal) -> Vec<&AllocationAction> {
    actions
        .iter()
        .filter(|a| is_drift_flagged(a.drift_pct, threshold))
        .collect()
}

pub fn target_weight_sum<'a, I>(targets: I) -> Decimal
where
    I: IntoIterator<Item = &'a TargetAllocation>,
{
    targets.into_iter().map(|t| t.target_weight).sum()
}

/// Validates targets and indexes them by symbol, rejecting duplicates.
pub fn targets_by_symbol(
    targets: &[TargetAllocation],
) -> Result<HashMap<String, TargetAllocation>> {
    let mut by_symbol = HashMap::with_capacity(targets.len());
    for target in targets {
        target.validate()?;
        if by_symbol
            .insert(target.symbol.clone(), target.clone())
            .is_some()
        {
            return Err(ValidationError::DuplicateSymbol(target.symbol.clone()).into());
        }
    }
    Ok(by_symbol)
}

/// Computes actions and cash deployments for a full rebalancing pass.
pub fn build_rebalancing_plan(
    positions: &[Position],
    targets: &[TargetAllocation],
    new_cash: Decimal,
) -> Result<RebalancingPlan> {
    if new_cash < Decimal::ZERO {
        return Err(ValidationError::InvalidInput(format!(
            "New cash cannot be negative: {}",
            new_cash
        ))
        .into());
    }

    let by_symbol = targets_by_symbol(targets)?;
    let actions = compute_actions(positions, &by_symbol, new_cash);
    let cash_deployments = distribute_cash(&actions, new_cash);

    Ok(RebalancingPlan {
        total_value: total_value(positions) + new_cash,
        new_cash,
        target_weight_sum: target_weight_sum(targets),
        actions,
        cash_deployments,
    })
}

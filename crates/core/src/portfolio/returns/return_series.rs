use std::collections::HashMap;

use chrono::NaiveDate;

use crate::constants::{MIN_ALIGNED_PRICE_POINTS, MIN_RETURN_PAIRS, TRADING_DAYS_PER_YEAR};
use crate::errors::CalculatorError;

use super::{AlignedReturns, PricePoint, ReturnStatistics};

fn fractional_change(previous: f64, current: f64) -> f64 {
    (current - previous) / previous
}

/// Day-over-day fractional change of a price series.
///
/// Non-finite returns (a zero or NaN previous price) are dropped rather than
/// coerced to zero, so the output has at most `prices.len() - 1` elements.
pub fn daily_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .map(|w| fractional_change(w[0], w[1]))
        .filter(|r| r.is_finite())
        .collect()
}

/// Pairs up the prices of `a` and `b` on the dates both contain, in `a`'s order.
pub fn align_price_series(a: &[PricePoint], b: &[PricePoint]) -> Vec<(f64, f64)> {
    let lookup: HashMap<NaiveDate, f64> = b.iter().map(|p| (p.date, p.price)).collect();

    a.iter()
        .filter_map(|p| lookup.get(&p.date).map(|&price_b| (p.price, price_b)))
        .collect()
}

/// Aligns two price series and derives their paired daily returns.
///
/// Returns are computed over the synchronized pairs, not the original series.
/// An index where either side's return is non-finite is excluded from both
/// vectors.
pub fn aligned_returns(
    a: &[PricePoint],
    b: &[PricePoint],
) -> std::result::Result<AlignedReturns, CalculatorError> {
    let pairs = align_price_series(a, b);
    if pairs.len() < MIN_ALIGNED_PRICE_POINTS {
        return Err(CalculatorError::InsufficientPricePoints {
            found: pairs.len(),
            required: MIN_ALIGNED_PRICE_POINTS,
        });
    }

    let mut returns_a = Vec::with_capacity(pairs.len() - 1);
    let mut returns_b = Vec::with_capacity(pairs.len() - 1);

    for w in pairs.windows(2) {
        let ra = fractional_change(w[0].0, w[1].0);
        let rb = fractional_change(w[0].1, w[1].1);
        if ra.is_finite() && rb.is_finite() {
            returns_a.push(ra);
            returns_b.push(rb);
        }
    }

    if returns_a.len() < MIN_RETURN_PAIRS {
        return Err(CalculatorError::InsufficientReturnPairs {
            found: returns_a.len(),
            required: MIN_RETURN_PAIRS,
        });
    }

    Ok(AlignedReturns {
        returns_a,
        returns_b,
        aligned_points: pairs.len(),
    })
}

/// Estimates annualized drift and volatility from a series of daily closes.
///
/// Uses the arithmetic mean of daily returns and the sample standard
/// deviation, scaled by 252 and sqrt(252). Returns `None` when fewer than two
/// valid returns are available.
pub fn annualized_statistics(history: &[PricePoint]) -> Option<ReturnStatistics> {
    let prices: Vec<f64> = history.iter().map(|p| p.price).collect();
    let returns = daily_returns(&prices);
    if returns.len() < 2 {
        return None;
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);

    Some(ReturnStatistics {
        annualized_mean: mean * TRADING_DAYS_PER_YEAR,
        annualized_volatility: variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt(),
        observations: returns.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(start: NaiveDate, prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint::new(start + chrono::Days::new(i as u64), p))
            .collect()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_daily_returns_has_one_fewer_element() {
        let returns = daily_returns(&[100.0, 110.0, 99.0]);
        assert_eq!(returns.len(), 2);
        assert!((returns[0] - 0.10).abs() < 1e-12);
        assert!((returns[1] + 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_daily_returns_drops_non_finite() {
        let returns = daily_returns(&[100.0, 0.0, 50.0, f64::NAN, 60.0]);
        // 100 -> 0 is -100% (finite); 0 -> 50 and both NaN steps are dropped
        assert_eq!(returns, vec![-1.0]);
    }

    #[test]
    fn test_align_preserves_first_series_order() {
        let a = vec![
            PricePoint::new(day(3), 3.0),
            PricePoint::new(day(1), 1.0),
            PricePoint::new(day(2), 2.0),
        ];
        let b = vec![PricePoint::new(day(1), 10.0), PricePoint::new(day(3), 30.0)];

        let pairs = align_price_series(&a, &b);
        assert_eq!(pairs, vec![(3.0, 30.0), (1.0, 10.0)]);
    }

    #[test]
    fn test_aligned_returns_uses_only_shared_dates() {
        let a = series(day(1), &[100.0; 15]);
        // b misses every other day, so only 8 dates overlap
        let b: Vec<PricePoint> = series(day(1), &[50.0; 15])
            .into_iter()
            .step_by(2)
            .collect();

        let err = aligned_returns(&a, &b).unwrap_err();
        assert_eq!(
            err,
            CalculatorError::InsufficientPricePoints {
                found: 8,
                required: MIN_ALIGNED_PRICE_POINTS
            }
        );
    }

    #[test]
    fn test_aligned_returns_excludes_index_from_both_sides() {
        let a = series(
            day(1),
            &[100.0, 101.0, 0.0, 103.0, 104.0, 105.0, 106.0, 107.0, 108.0, 109.0],
        );
        let b = series(
            day(1),
            &[50.0, 51.0, 52.0, 53.0, 54.0, 55.0, 56.0, 57.0, 58.0, 59.0],
        );

        let aligned = aligned_returns(&a, &b).unwrap();
        // 9 raw return pairs, the 0.0 -> 103.0 step is dropped
        assert_eq!(aligned.aligned_points, 10);
        assert_eq!(aligned.len(), 8);
        assert_eq!(aligned.returns_a.len(), aligned.returns_b.len());
        assert!((aligned.returns_b[2] - (54.0 - 53.0) / 53.0).abs() < 1e-12);
    }

    #[test]
    fn test_aligned_returns_requires_five_valid_pairs() {
        // Alternating zero prices leave only four finite return pairs
        let a = series(day(1), &[0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0]);
        let b = series(day(1), &[10.0; 10]);

        let err = aligned_returns(&a, &b).unwrap_err();
        assert_eq!(
            err,
            CalculatorError::InsufficientReturnPairs {
                found: 4,
                required: MIN_RETURN_PAIRS
            }
        );
    }

    #[test]
    fn test_annualized_statistics_of_constant_growth() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 * 1.001f64.powi(i)).collect();
        let stats = annualized_statistics(&series(day(1), &prices)).unwrap();

        assert_eq!(stats.observations, 29);
        assert!((stats.annualized_mean - 0.001 * 252.0).abs() < 1e-9);
        assert!(stats.annualized_volatility < 1e-9);
    }

    #[test]
    fn test_annualized_statistics_needs_two_returns() {
        assert!(annualized_statistics(&series(day(1), &[100.0, 101.0])).is_none());
    }
}

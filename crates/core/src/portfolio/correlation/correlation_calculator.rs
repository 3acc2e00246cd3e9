//! Pearson correlation over aligned daily returns.

use std::collections::HashMap;

use log::debug;

use crate::portfolio::returns::{aligned_returns, PricePoint};

use super::CorrelationMatrix;

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        0.0
    } else {
        xs.iter().sum::<f64>() / xs.len() as f64
    }
}

/// Pearson correlation coefficient of two return vectors.
///
/// Only the common prefix is used if the lengths differ. A series with no
/// variance yields exactly `0.0`. The result is clamped to `[-1, 1]`.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let (a, b) = (&a[..n], &b[..n]);

    let mean_a = mean(a);
    let mean_b = mean(b);

    let mut sum_products = 0.0;
    let mut sum_sq_a = 0.0;
    let mut sum_sq_b = 0.0;

    for (x, y) in a.iter().zip(b) {
        let da = x - mean_a;
        let db = y - mean_b;
        sum_products += da * db;
        sum_sq_a += da * da;
        sum_sq_b += db * db;
    }

    if sum_sq_a == 0.0 || sum_sq_b == 0.0 {
        return 0.0;
    }

    (sum_products / (sum_sq_a * sum_sq_b).sqrt()).clamp(-1.0, 1.0)
}

/// Correlation of two price series' daily returns over their shared dates.
///
/// `None` when the series overlap on too few dates or yield too few valid returns.
pub fn correlate_series(a: &[PricePoint], b: &[PricePoint]) -> Option<f64> {
    match aligned_returns(a, b) {
        Ok(aligned) => Some(pearson(&aligned.returns_a, &aligned.returns_b)),
        Err(e) => {
            debug!("Correlation unavailable: {}", e);
            None
        }
    }
}

/// Builds the correlation matrix for `symbols` in the given order.
///
/// Symbols without history get `None` off-diagonal cells. Each unordered pair
/// is aligned once and mirrored.
pub fn build_correlation_matrix(
    symbols: &[String],
    histories: &HashMap<String, Vec<PricePoint>>,
) -> CorrelationMatrix {
    let n = symbols.len();
    debug!("Building {}x{} correlation matrix", n, n);

    let mut values: Vec<Vec<Option<f64>>> = vec![vec![None; n]; n];

    for i in 0..n {
        values[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let cell = match (histories.get(&symbols[i]), histories.get(&symbols[j])) {
                (Some(a), Some(b)) => correlate_series(a, b),
                _ => None,
            };
            values[i][j] = cell;
            values[j][i] = cell;
        }
    }

    CorrelationMatrix {
        symbols: symbols.to_vec(),
        values,
    }
}

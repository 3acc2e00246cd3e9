//! Nearest-rank percentile extraction and representative path selection.

use super::{PathOutcome, PercentileValue, RepresentativePath};

/// Index `floor(p / 100 * n)` into a sample of size `n`.
fn rank_index(n: usize, percentile: f64) -> usize {
    ((percentile / 100.0) * n as f64).floor() as usize
}

/// Nearest-rank percentile of an ascending sample, without interpolation.
///
/// The rank is `floor(p / 100 * n)`, so `p = 100` indexes one past the end
/// and yields `None`. Negative or non-finite percentiles also yield `None`.
pub fn nearest_rank(sorted: &[f64], percentile: f64) -> Option<f64> {
    if !percentile.is_finite() || percentile < 0.0 {
        return None;
    }
    sorted.get(rank_index(sorted.len(), percentile)).copied()
}

pub fn percentile_table(sorted: &[f64], percentiles: &[u8]) -> Vec<PercentileValue> {
    percentiles
        .iter()
        .filter_map(|&p| {
            nearest_rank(sorted, f64::from(p)).map(|value| PercentileValue {
                percentile: p,
                value,
            })
        })
        .collect()
}

/// Picks, for each percentile, the trajectory of the path that ranked there.
///
/// Paths are ordered by their own terminal value with a stable sort, so the
/// selected path's terminal value equals the nearest-rank percentile of the
/// terminal values.
pub fn select_representative_paths(
    outcomes: &[PathOutcome],
    percentiles: &[u8],
) -> Vec<RepresentativePath> {
    let mut order: Vec<usize> = (0..outcomes.len()).collect();
    order.sort_by(|&a, &b| {
        outcomes[a]
            .terminal_value
            .total_cmp(&outcomes[b].terminal_value)
    });

    percentiles
        .iter()
        .filter_map(|&p| {
            let index = *order.get(rank_index(order.len(), f64::from(p)))?;
            let outcome = &outcomes[index];
            Some(RepresentativePath {
                percentile: p,
                terminal_value: outcome.terminal_value,
                values: outcome.trajectory.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(terminal_value: f64) -> PathOutcome {
        PathOutcome {
            terminal_value,
            final_nominal_value: terminal_value,
            final_cost_basis: 0.0,
            capital_gains_tax: 0.0,
            trajectory: vec![terminal_value / 2.0, terminal_value],
        }
    }

    #[test]
    fn test_nearest_rank_indexing() {
        let sorted: Vec<f64> = (1..=10).map(f64::from).collect();

        assert_eq!(nearest_rank(&sorted, 0.0), Some(1.0));
        assert_eq!(nearest_rank(&sorted, 10.0), Some(2.0));
        assert_eq!(nearest_rank(&sorted, 50.0), Some(6.0));
        assert_eq!(nearest_rank(&sorted, 95.0), Some(10.0));
        assert_eq!(nearest_rank(&sorted, 100.0), None);
        assert_eq!(nearest_rank(&[], 50.0), None);
        assert_eq!(nearest_rank(&sorted, f64::NAN), None);
        assert_eq!(nearest_rank(&sorted, f64::INFINITY), None);
        assert_eq!(nearest_rank(&sorted, -5.0), None);
    }

    #[test]
    fn test_percentile_table_skips_out_of_range() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        let table = percentile_table(&sorted, &[25, 50, 100]);

        assert_eq!(
            table,
            vec![
                PercentileValue { percentile: 25, value: 2.0 },
                PercentileValue { percentile: 50, value: 3.0 },
            ]
        );
    }

    #[test]
    fn test_representative_path_is_an_actual_trajectory() {
        let outcomes: Vec<PathOutcome> = [50.0, 10.0, 40.0, 20.0, 30.0]
            .into_iter()
            .map(outcome)
            .collect();

        let paths = select_representative_paths(&outcomes, &[10, 50, 90]);

        assert_eq!(paths.len(), 3);
        assert_eq!(paths[0].terminal_value, 10.0);
        assert_eq!(paths[1].terminal_value, 30.0);
        assert_eq!(paths[1].values, vec![15.0, 30.0]);
        assert_eq!(paths[2].terminal_value, 50.0);
    }
}

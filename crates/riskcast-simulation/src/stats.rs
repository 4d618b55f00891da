//! Summary statistics over a simulated cost distribution.

use std::collections::BTreeMap;

use statrs::statistics::Statistics;

use riskcast_core::config::SimulationConfig;
use riskcast_core::errors::{RiskError, RiskResult};
use riskcast_core::{CostStatistics, SimulationSample};

/// Mean, spread, percentiles and budget-overrun rates of `samples`.
///
/// Percentiles interpolate linearly between closest ranks. Standard
/// deviation is the sample estimate (n - 1) and zero for a single sample.
pub fn analyze(samples: &[SimulationSample], config: &SimulationConfig) -> RiskResult<CostStatistics> {
    if samples.is_empty() {
        return Err(RiskError::invalid("cannot analyze an empty sample set"));
    }
    let n = samples.len() as f64;

    let mut totals: Vec<f64> = samples.iter().map(|s| s.total_cost).collect();
    let mean = totals.iter().mean();
    let std_dev = if totals.len() > 1 {
        totals.iter().std_dev()
    } else {
        0.0
    };
    totals.sort_by(f64::total_cmp);

    let over = config.over_budget_threshold();
    let severe = config.severe_over_budget_threshold();
    let fraction_above = |threshold: f64| totals.iter().filter(|&&t| t > threshold).count() as f64 / n;

    let mut driver_totals: BTreeMap<String, f64> = BTreeMap::new();
    let mut occurrence_counts: BTreeMap<String, usize> = BTreeMap::new();
    for sample in samples {
        for (driver, added) in &sample.contributions {
            *driver_totals.entry(driver.clone()).or_default() += added;
        }
        for (factor, &occurred) in &sample.occurrences {
            *occurrence_counts.entry(factor.clone()).or_default() += usize::from(occurred);
        }
    }

    Ok(CostStatistics {
        sample_count: samples.len(),
        mean,
        median: median(&totals),
        std_dev,
        percentile_10: percentile(&totals, 0.10),
        percentile_50: percentile(&totals, 0.50),
        percentile_90: percentile(&totals, 0.90),
        percentile_95: percentile(&totals, 0.95),
        prob_over_budget: fraction_above(over),
        prob_over_budget_20: fraction_above(severe),
        driver_mean_contribution: driver_totals
            .into_iter()
            .map(|(driver, sum)| (driver, sum / n))
            .collect(),
        occurrence_frequency: occurrence_counts
            .into_iter()
            .map(|(factor, count)| (factor, count as f64 / n))
            .collect(),
    })
}

/// Linear interpolation at rank `q * (len - 1)`. `sorted` must be non-empty.
fn percentile(sorted: &[f64], q: f64) -> f64 {
    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_interpolates_between_ranks() {
        let sorted = [100.0, 105.0, 111.0, 115.0, 125.0];
        assert!((percentile(&sorted, 0.10) - 102.0).abs() < 1e-9);
        assert!((percentile(&sorted, 0.90) - 121.0).abs() < 1e-9);
        assert!((percentile(&sorted, 0.95) - 123.0).abs() < 1e-9);
        assert_eq!(percentile(&sorted, 0.0), 100.0);
        assert_eq!(percentile(&sorted, 1.0), 125.0);
    }

    #[test]
    fn median_averages_middle_pair() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(median(&[1.0, 2.0, 3.0]), 2.0);
    }
}

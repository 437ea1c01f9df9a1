//! Extreme price events: negative prices and the expensive tail.

use indexmap::IndexMap;
use serde::Serialize;

use super::stats;
use crate::models::observation::PriceSeries;

/// One class of extreme observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventBucket {
    pub count: usize,
    /// Fraction of all observations falling in this bucket, 0.0-1.0.
    pub share: f64,
    /// Mean price of the bucket's observations.
    pub mean_price: Option<f64>,
    /// Occurrences per hour of day, ordered by hour.
    pub by_hour: Vec<(u32, usize)>,
}

impl EventBucket {
    fn from_matches(matches: &[(u32, f64)], total: usize) -> Self {
        let mut by_hour: IndexMap<u32, usize> = IndexMap::new();
        for &(hour, _) in matches {
            *by_hour.entry(hour).or_default() += 1;
        }
        by_hour.sort_keys();
        let prices: Vec<f64> = matches.iter().map(|&(_, p)| p).collect();
        Self {
            count: matches.len(),
            share: matches.len() as f64 / total as f64,
            mean_price: (!prices.is_empty()).then(|| stats::mean(&prices)),
            by_hour: by_hour.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeEvents {
    /// 5th percentile of all prices.
    pub p05: f64,
    /// 95th percentile of all prices.
    pub p95: f64,
    /// Observations with a price below zero.
    pub negative: EventBucket,
    /// Observations with a price strictly above the 95th percentile.
    pub spikes: EventBucket,
}

pub fn analyze(series: &PriceSeries) -> ExtremeEvents {
    let prices = series.prices();
    let p05 = stats::percentile(&prices, 0.05);
    let p95 = stats::percentile(&prices, 0.95);

    let mut negative = Vec::new();
    let mut spikes = Vec::new();
    for obs in &series.observations {
        if obs.price < 0.0 {
            negative.push((obs.local_hour(), obs.price));
        }
        if obs.price > p95 {
            spikes.push((obs.local_hour(), obs.price));
        }
    }

    let total = series.len();
    ExtremeEvents {
        p05,
        p95,
        negative: EventBucket::from_matches(&negative, total),
        spikes: EventBucket::from_matches(&spikes, total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{midnight, synthetic_series};

    #[test]
    fn flat_series_has_no_extremes() {
        let series = synthetic_series(midnight(2023, 6, 1), 48, |_| 50.0);
        let events = analyze(&series);
        assert_eq!(events.p05, 50.0);
        assert_eq!(events.p95, 50.0);
        assert_eq!(events.negative.count, 0);
        assert!(events.negative.mean_price.is_none());
        // Nothing is strictly above a flat percentile.
        assert_eq!(events.spikes.count, 0);
    }

    #[test]
    fn negative_prices_counted_with_hours() {
        // Hours 3 and 4 dip below zero on both days.
        let series = synthetic_series(midnight(2023, 6, 1), 48, |h| {
            match h % 24 {
                3 => -5.0,
                4 => -1.0,
                _ => 40.0,
            }
        });
        let events = analyze(&series);
        assert_eq!(events.negative.count, 4);
        assert!((events.negative.share - 4.0 / 48.0).abs() < 1e-12);
        assert_eq!(events.negative.mean_price, Some(-3.0));
        assert_eq!(events.negative.by_hour, vec![(3, 2), (4, 2)]);
    }

    #[test]
    fn spike_bucket_uses_strict_p95_cutoff() {
        // 100 observations: 0.0..=99.0. p95 = 94.05, so 95..=99 are spikes.
        let series = synthetic_series(midnight(2023, 6, 1), 100, |h| h as f64);
        let events = analyze(&series);
        assert!((events.p95 - 94.05).abs() < 1e-9);
        assert_eq!(events.spikes.count, 5);
        assert_eq!(events.spikes.mean_price, Some(97.0));
    }
}

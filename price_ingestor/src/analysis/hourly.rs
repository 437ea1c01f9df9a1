//! Hour-of-day price pattern.

use indexmap::IndexMap;
use serde::Serialize;

use super::stats::{self, SummaryStats};
use super::AnalysisWindows;
use crate::models::observation::PriceSeries;

/// Summary statistics for one hour of the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourStats {
    pub hour: u32,
    pub stats: SummaryStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyPattern {
    /// One entry per hour present in the data, ordered by hour.
    pub by_hour: Vec<HourStats>,
    /// Hours with the highest mean price, most expensive first (at most 5).
    pub peak_hours: Vec<u32>,
    /// Hours with the lowest mean price, cheapest first (at most 5).
    pub valley_hours: Vec<u32>,
    /// Mean price over the solar-production window, if any hour falls in it.
    pub solar_window_mean: Option<f64>,
    /// Mean price over the remaining hours, if any fall outside the window.
    pub other_hours_mean: Option<f64>,
}

pub fn analyze(series: &PriceSeries, windows: &AnalysisWindows) -> HourlyPattern {
    let mut groups: IndexMap<u32, Vec<f64>> = IndexMap::new();
    for obs in &series.observations {
        groups.entry(obs.local_hour()).or_default().push(obs.price);
    }
    groups.sort_keys();

    let by_hour: Vec<HourStats> = groups
        .iter()
        .filter_map(|(&hour, prices)| {
            stats::summarize(prices).map(|stats| HourStats { hour, stats })
        })
        .collect();

    let mut ranked: Vec<(u32, f64)> =
        by_hour.iter().map(|h| (h.hour, h.stats.mean)).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    let peak_hours: Vec<u32> = ranked.iter().take(5).map(|&(h, _)| h).collect();
    let valley_hours: Vec<u32> =
        ranked.iter().rev().take(5).map(|&(h, _)| h).collect();

    let mut solar = Vec::new();
    let mut other = Vec::new();
    for obs in &series.observations {
        if windows.solar_production.contains(obs.local_hour()) {
            solar.push(obs.price);
        } else {
            other.push(obs.price);
        }
    }

    HourlyPattern {
        by_hour,
        peak_hours,
        valley_hours,
        solar_window_mean: (!solar.is_empty()).then(|| stats::mean(&solar)),
        other_hours_mean: (!other.is_empty()).then(|| stats::mean(&other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{midnight, synthetic_series};

    #[test]
    fn groups_by_hour_and_ranks_extremes() {
        // Two days; price equals the hour, so hour 23 is the most expensive.
        let series = synthetic_series(midnight(2023, 6, 1), 48, |h| (h % 24) as f64);
        let pattern = analyze(&series, &AnalysisWindows::default());

        assert_eq!(pattern.by_hour.len(), 24);
        assert_eq!(pattern.by_hour[7].hour, 7);
        assert_eq!(pattern.by_hour[7].stats.mean, 7.0);
        assert_eq!(pattern.peak_hours, vec![23, 22, 21, 20, 19]);
        assert_eq!(pattern.valley_hours, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn solar_window_split() {
        let series = synthetic_series(midnight(2023, 6, 1), 24, |h| (h % 24) as f64);
        let pattern = analyze(&series, &AnalysisWindows::default());
        // Hours 7..=19 mean = 13; the other 11 hours mean = (0+..+6 + 20+..+23)/11.
        assert!((pattern.solar_window_mean.unwrap() - 13.0).abs() < 1e-9);
        let other = (0..7).chain(20..24).map(|h| h as f64).sum::<f64>() / 11.0;
        assert!((pattern.other_hours_mean.unwrap() - other).abs() < 1e-9);
    }

    #[test]
    fn fewer_than_five_hours_present() {
        let series = synthetic_series(midnight(2023, 6, 1), 3, |h| h as f64);
        let pattern = analyze(&series, &AnalysisWindows::default());
        assert_eq!(pattern.peak_hours, vec![2, 1, 0]);
        assert_eq!(pattern.valley_hours, vec![0, 1, 2]);
    }
}

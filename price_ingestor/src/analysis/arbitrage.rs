//! Daily arbitrage potential: the intraday spread a perfectly timed
//! buy-low/sell-high cycle could have captured.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use super::stats;
use crate::models::observation::PriceSeries;

const MWH_PER_KWH: f64 = 1000.0;

/// Best possible intraday spread for one day. Prices are EUR/MWh; the
/// spread is also carried per kWh since storage round-trips are sized in kWh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySpread {
    pub date: NaiveDate,
    pub min_price: f64,
    pub max_price: f64,
    pub spread: f64,
    pub spread_kwh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArbitragePotential {
    /// Spread per day, in date order.
    pub daily: Vec<DailySpread>,
    pub mean_spread: f64,
    pub median_spread: f64,
    pub max_spread: f64,
    pub mean_spread_kwh: f64,
    pub median_spread_kwh: f64,
    pub max_spread_kwh: f64,
    /// Days with the widest spread, widest first (at most 10).
    pub best_days: Vec<DailySpread>,
}

pub fn analyze(series: &PriceSeries) -> ArbitragePotential {
    let mut days: IndexMap<NaiveDate, (f64, f64)> = IndexMap::new();
    for obs in &series.observations {
        let entry = days
            .entry(obs.local_date())
            .or_insert((f64::INFINITY, f64::NEG_INFINITY));
        entry.0 = entry.0.min(obs.price);
        entry.1 = entry.1.max(obs.price);
    }
    days.sort_keys();

    let daily: Vec<DailySpread> = days
        .into_iter()
        .map(|(date, (min_price, max_price))| {
            let spread = max_price - min_price;
            DailySpread {
                date,
                min_price,
                max_price,
                spread,
                spread_kwh: spread / MWH_PER_KWH,
            }
        })
        .collect();

    let spreads: Vec<f64> = daily.iter().map(|d| d.spread).collect();
    let mut ranked = daily.clone();
    ranked.sort_by(|a, b| b.spread.total_cmp(&a.spread));
    ranked.truncate(10);

    let mean_spread = stats::mean(&spreads);
    let median_spread = stats::median(&spreads);
    let max_spread = spreads.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    ArbitragePotential {
        mean_spread,
        median_spread,
        max_spread,
        mean_spread_kwh: mean_spread / MWH_PER_KWH,
        median_spread_kwh: median_spread / MWH_PER_KWH,
        max_spread_kwh: max_spread / MWH_PER_KWH,
        best_days: ranked,
        daily,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::{midnight, synthetic_series};

    #[test]
    fn spread_is_max_minus_min_per_day() {
        // Day 1 spans 0..23, day 2 is flat at 50.
        let series = synthetic_series(midnight(2023, 6, 1), 48, |h| {
            if h < 24 { h as f64 } else { 50.0 }
        });
        let result = analyze(&series);
        assert_eq!(result.daily.len(), 2);
        assert_eq!(result.daily[0].spread, 23.0);
        assert_eq!(result.daily[1].spread, 0.0);
        assert_eq!(result.mean_spread, 11.5);
        assert_eq!(result.median_spread, 11.5);
        assert_eq!(result.max_spread, 23.0);
    }

    #[test]
    fn spreads_are_carried_per_kwh_too() {
        let series = synthetic_series(midnight(2023, 6, 1), 48, |h| {
            if h < 24 { h as f64 } else { 50.0 }
        });
        let result = analyze(&series);
        assert_eq!(result.daily[0].spread_kwh, 0.023);
        assert_eq!(result.daily[1].spread_kwh, 0.0);
        assert_eq!(result.mean_spread_kwh, 0.0115);
        assert_eq!(result.median_spread_kwh, 0.0115);
        assert_eq!(result.max_spread_kwh, 0.023);
    }

    #[test]
    fn best_days_ranked_and_capped_at_ten() {
        // 14 days; the spread of day d is d (0-based), so day 13 is widest.
        let series = synthetic_series(midnight(2023, 6, 1), 24 * 14, |h| {
            let day = h / 24;
            if h % 24 == 0 { 0.0 } else { day as f64 }
        });
        let result = analyze(&series);
        assert_eq!(result.best_days.len(), 10);
        assert_eq!(result.best_days[0].spread, 13.0);
        assert_eq!(result.best_days[0].date, midnight(2023, 6, 14).date_naive());
        assert!(result.best_days.windows(2).all(|w| w[0].spread >= w[1].spread));
    }

    #[test]
    fn negative_prices_widen_the_spread() {
        let series = synthetic_series(midnight(2023, 6, 1), 24, |h| {
            match h {
                3 => -10.0,
                18 => 120.0,
                _ => 40.0,
            }
        });
        let result = analyze(&series);
        assert_eq!(result.daily[0].min_price, -10.0);
        assert_eq!(result.daily[0].max_price, 120.0);
        assert_eq!(result.daily[0].spread, 130.0);
    }
}

//! Daily metric derivation.
//!
//! Groups a normalized series by (calendar date, country) and computes the
//! wholesale extrema and mean, the per-kWh variants, and, where tax
//! parameters exist, the all-in consumer price.

use chrono::NaiveDate;
use indexmap::IndexMap;
use tracing::warn;

use crate::models::{
    country::{TaxConfig, TaxTable},
    daily_metric::DailyMetric,
    observation::PriceSeries,
};

const MWH_PER_KWH: f64 = 1000.0;

/// Rounds to 5 decimal places for reporting stability.
fn round5(value: f64) -> f64 {
    (value * 100_000.0).round() / 100_000.0
}

/// All-in consumer price in EUR/kWh: additive taxes, then VAT gross-up.
///
/// `(wholesale_kwh + energy_tax + renewable_energy_tax) * (1 + vat_rate)`,
/// rounded to 5 decimals.
pub fn all_in_price_kwh(wholesale_kwh: f64, tax: &TaxConfig) -> f64 {
    let pre_vat = wholesale_kwh + tax.energy_tax + tax.renewable_energy_tax;
    round5(pre_vat * (1.0 + tax.vat_rate))
}

/// Derives one [`DailyMetric`] per (calendar date, country) group present in
/// the input.
///
/// The grouping date is taken from each observation's current representation,
/// which is why normalization must precede aggregation; DST days with 23 or
/// 25 observations are aggregated like any other group. The mean is the
/// unweighted arithmetic mean; each hour counts equally, which matches
/// time-weighting exactly as long as samples are uniformly hourly.
///
/// Negative prices are valid extrema and are never filtered. A country
/// missing from `taxes` gets no all-in price (logged, non-fatal). An empty
/// series produces an empty vector. Output is sorted by (date, country).
pub fn daily_metrics(series: &PriceSeries, taxes: &TaxTable) -> Vec<DailyMetric> {
    let mut groups: IndexMap<(NaiveDate, String), Vec<f64>> = IndexMap::new();
    for obs in &series.observations {
        groups
            .entry((obs.local_date(), obs.country.clone()))
            .or_default()
            .push(obs.price);
    }

    let mut warned_countries: Vec<String> = Vec::new();
    let mut metrics: Vec<DailyMetric> = groups
        .into_iter()
        .map(|((date, country), prices)| {
            let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
            let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let mean = prices.iter().sum::<f64>() / prices.len() as f64;
            let mean_kwh = mean / MWH_PER_KWH;

            let all_in = match taxes.get(&country) {
                Some(tax) => Some(all_in_price_kwh(mean_kwh, tax)),
                None => {
                    if !warned_countries.contains(&country) {
                        warn!(%country, "no tax configuration; all-in price omitted");
                        warned_countries.push(country.clone());
                    }
                    None
                }
            };

            DailyMetric {
                date,
                country,
                min_price_mwh: min,
                max_price_mwh: max,
                weighted_avg_mwh: mean,
                min_price_kwh: min / MWH_PER_KWH,
                max_price_kwh: max / MWH_PER_KWH,
                weighted_avg_kwh: mean_kwh,
                all_in_price_kwh: all_in,
            }
        })
        .collect();

    metrics.sort_by(|a, b| (a.date, &a.country).cmp(&(b.date, &b.country)));
    metrics
}

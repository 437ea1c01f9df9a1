//! Solar-timing comparison: midday solar-peak prices against the evening
//! demand peak, day by day.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use super::stats;
use super::AnalysisWindows;
use crate::models::observation::PriceSeries;

/// One day's solar-peak and evening-peak means.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarDay {
    pub date: NaiveDate,
    pub solar_peak_mean: f64,
    pub evening_peak_mean: f64,
    /// Evening mean minus solar mean; positive when evening power is dearer.
    pub evening_premium: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarTiming {
    /// Days where both windows had observations, in date order. Days missing
    /// either window are excluded rather than compared against nothing.
    pub days: Vec<SolarDay>,
    pub mean_solar_peak: Option<f64>,
    pub mean_evening_peak: Option<f64>,
    /// Mean premium over the days where the evening window was dearer, i.e.
    /// the average benefit of shifting consumption into the solar peak on the
    /// days where shifting pays off. `None` when no such day exists.
    pub mean_favorable_premium: Option<f64>,
    /// Fraction of included days on which the evening window was dearer.
    pub share_evening_dearer: Option<f64>,
}

pub fn analyze(series: &PriceSeries, windows: &AnalysisWindows) -> SolarTiming {
    let mut per_day: IndexMap<NaiveDate, (Vec<f64>, Vec<f64>)> = IndexMap::new();
    for obs in &series.observations {
        let hour = obs.local_hour();
        let entry = per_day.entry(obs.local_date()).or_default();
        if windows.solar_peak.contains(hour) {
            entry.0.push(obs.price);
        }
        if windows.evening_peak.contains(hour) {
            entry.1.push(obs.price);
        }
    }
    per_day.sort_keys();

    let days: Vec<SolarDay> = per_day
        .into_iter()
        .filter(|(_, (solar, evening))| !solar.is_empty() && !evening.is_empty())
        .map(|(date, (solar, evening))| {
            let solar_peak_mean = stats::mean(&solar);
            let evening_peak_mean = stats::mean(&evening);
            SolarDay {
                date,
                solar_peak_mean,
                evening_peak_mean,
                evening_premium: evening_peak_mean - solar_peak_mean,
            }
        })
        .collect();

    if days.is_empty() {
        return SolarTiming {
            days,
            mean_solar_peak: None,
            mean_evening_peak: None,
            mean_favorable_premium: None,
            share_evening_dearer: None,
        };
    }

    let solar: Vec<f64> = days.iter().map(|d| d.solar_peak_mean).collect();
    let evening: Vec<f64> = days.iter().map(|d| d.evening_peak_mean).collect();
    let favorable: Vec<f64> = days
        .iter()
        .map(|d| d.evening_premium)
        .filter(|p| *p > 0.0)
        .collect();

    SolarTiming {
        mean_solar_peak: Some(stats::mean(&solar)),
        mean_evening_peak: Some(stats::mean(&evening)),
        mean_favorable_premium: (!favorable.is_empty()).then(|| stats::mean(&favorable)),
        share_evening_dearer: Some(favorable.len() as f64 / days.len() as f64),
        days,
    }
}

//! Weekday versus weekend price pattern.

use chrono::{Datelike, Weekday};
use indexmap::IndexMap;
use serde::Serialize;

use super::stats::{self, SummaryStats};
use crate::models::observation::PriceSeries;

fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Mean price per hour for one partition of the week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyMean {
    pub hour: u32,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayPattern {
    pub weekday: Option<SummaryStats>,
    pub weekend: Option<SummaryStats>,
    /// Hourly mean profile on Monday-Friday, ordered by hour.
    pub weekday_by_hour: Vec<HourlyMean>,
    /// Hourly mean profile on Saturday-Sunday, ordered by hour.
    pub weekend_by_hour: Vec<HourlyMean>,
}

pub fn analyze(series: &PriceSeries) -> WeekdayPattern {
    let mut weekday_prices = Vec::new();
    let mut weekend_prices = Vec::new();
    let mut weekday_hours: IndexMap<u32, Vec<f64>> = IndexMap::new();
    let mut weekend_hours: IndexMap<u32, Vec<f64>> = IndexMap::new();

    for obs in &series.observations {
        let hour = obs.local_hour();
        if is_weekend(obs.timestamp.weekday()) {
            weekend_prices.push(obs.price);
            weekend_hours.entry(hour).or_default().push(obs.price);
        } else {
            weekday_prices.push(obs.price);
            weekday_hours.entry(hour).or_default().push(obs.price);
        }
    }
    weekday_hours.sort_keys();
    weekend_hours.sort_keys();

    let profile = |groups: IndexMap<u32, Vec<f64>>| -> Vec<HourlyMean> {
        groups
            .into_iter()
            .map(|(hour, prices)| HourlyMean { hour, mean: stats::mean(&prices) })
            .collect()
    };

    WeekdayPattern {
        weekday: stats::summarize(&weekday_prices),
        weekend: stats::summarize(&weekend_prices),
        weekday_by_hour: profile(weekday_hours),
        weekend_by_hour: profile(weekend_hours),
    }
}

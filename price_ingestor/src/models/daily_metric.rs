//! Derived daily price metrics.

use chrono::NaiveDate;

/// Daily price metrics for one (calendar date, country) group.
///
/// Recomputed fresh each run from the observations; never mutated in place.
/// The calendar date is taken from the series' current representation, so a
/// local-time series yields local calendar days.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyMetric {
    /// Calendar day in the series' representation.
    pub date: NaiveDate,
    /// Two-letter country code.
    pub country: String,

    /// Lowest hourly wholesale price of the day, EUR/MWh.
    pub min_price_mwh: f64,
    /// Highest hourly wholesale price of the day, EUR/MWh.
    pub max_price_mwh: f64,
    /// Arithmetic mean of the day's hourly prices, EUR/MWh.
    ///
    /// Historically named "weighted average": with uniform hourly sampling
    /// the unweighted mean equals the time-weighted one. If a source ever
    /// supplies irregular intervals this must become a true time-weighted
    /// average.
    pub weighted_avg_mwh: f64,

    /// `min_price_mwh / 1000`, EUR/kWh.
    pub min_price_kwh: f64,
    /// `max_price_mwh / 1000`, EUR/kWh.
    pub max_price_kwh: f64,
    /// `weighted_avg_mwh / 1000`, EUR/kWh.
    pub weighted_avg_kwh: f64,

    /// All-in consumer price, EUR/kWh, rounded to 5 decimals.
    ///
    /// Present only when tax parameters exist for the country; never
    /// defaulted to zero.
    pub all_in_price_kwh: Option<f64>,
}

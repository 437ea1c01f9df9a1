//! Descriptive pattern analysis of a normalized price series.
//!
//! Six independent, read-only reductions over the same immutable input:
//! hour-of-day, seasonal, weekday/weekend, extreme events, daily arbitrage
//! potential, and solar-timing comparison. Computing one view never affects
//! another. All views are retrospective statistics; nothing here predicts
//! anything.

pub mod arbitrage;
pub mod extremes;
pub mod hourly;
pub mod report;
pub mod seasonal;
pub mod solar;
pub mod stats;
pub mod weekday;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::observation::PriceSeries;

pub use arbitrage::ArbitragePotential;
pub use extremes::ExtremeEvents;
pub use hourly::HourlyPattern;
pub use seasonal::SeasonalPattern;
pub use solar::SolarTiming;
pub use weekday::WeekdayPattern;

/// Analysis over an empty series is undefined, not zero.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("cannot analyze an empty price series for {country}")]
    EmptySeries { country: String },
}

/// An inclusive hour-of-day window, e.g. 11–15.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub start: u32,
    pub end: u32,
}

impl HourWindow {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.start && hour <= self.end
    }
}

/// Hour windows driving the solar-related comparisons.
///
/// The defaults match the reference analysis for Dutch latitudes; they are
/// configuration because the right boundaries depend on climate and latitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisWindows {
    /// Hours during which solar panels meaningfully produce.
    pub solar_production: HourWindow,
    /// Hours of peak solar production.
    pub solar_peak: HourWindow,
    /// Hours of peak evening demand.
    pub evening_peak: HourWindow,
}

impl Default for AnalysisWindows {
    fn default() -> Self {
        Self {
            solar_production: HourWindow::new(7, 19),
            solar_peak: HourWindow::new(11, 15),
            evening_peak: HourWindow::new(17, 21),
        }
    }
}

/// The complete set of analysis views for one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceAnalysis {
    pub hourly: HourlyPattern,
    pub seasonal: SeasonalPattern,
    pub weekday: WeekdayPattern,
    pub extremes: ExtremeEvents,
    pub arbitrage: ArbitragePotential,
    pub solar: SolarTiming,
}

/// Runs all six views over `series`.
///
/// The series must be normalized to the representation the caller wants the
/// hour/date groupings expressed in. Errors on an empty series; callers must
/// check emptiness rather than expect zeroed statistics.
pub fn analyze(
    series: &PriceSeries,
    windows: &AnalysisWindows,
) -> Result<PriceAnalysis, AnalysisError> {
    if series.is_empty() {
        return Err(AnalysisError::EmptySeries { country: series.country.clone() });
    }
    Ok(PriceAnalysis {
        hourly: hourly::analyze(series, windows),
        seasonal: seasonal::analyze(series),
        weekday: weekday::analyze(series),
        extremes: extremes::analyze(series),
        arbitrage: arbitrage::analyze(series),
        solar: solar::analyze(series, windows),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::models::observation::{PriceObservation, PriceSeries, TimeRepresentation};
    use chrono::{DateTime, Duration, TimeZone, Utc};

    /// Hourly series starting at `start`, with prices produced by `f(index)`.
    pub fn synthetic_series(start: DateTime<Utc>, hours: usize, f: impl Fn(usize) -> f64) -> PriceSeries {
        let observations = (0..hours)
            .map(|h| PriceObservation {
                timestamp: (start + Duration::hours(h as i64)).fixed_offset(),
                price: f(h),
                country: "NL".to_string(),
            })
            .collect();
        PriceSeries {
            country: "NL".to_string(),
            representation: TimeRepresentation::Utc,
            observations,
        }
    }

    pub fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }
}

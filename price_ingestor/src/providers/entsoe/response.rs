use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::normalize::de_timestamp_utc;

/// One point of the day-ahead series as delivered on the wire.
#[derive(Deserialize, Debug)]
pub struct DayAheadPoint {
    /// Start of the delivery hour. Timestamps without an explicit offset are
    /// taken as UTC; timestamps with an offset are converted.
    #[serde(rename = "ts", deserialize_with = "de_timestamp_utc")]
    pub timestamp: DateTime<Utc>,

    /// Wholesale price in EUR/MWh.
    #[serde(rename = "price")]
    pub price: f64,
}

/// Response envelope for a day-ahead price query.
///
/// An empty `points` array is the platform's explicit "no data" answer.
#[derive(Deserialize, Debug)]
pub struct DayAheadResponse {
    #[serde(default)]
    pub points: Vec<DayAheadPoint>,
}

/// Error body shape used by the platform for non-2xx answers.
#[derive(Deserialize, Debug)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

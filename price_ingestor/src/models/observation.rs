//! Canonical in-memory representation of an hourly price observation.
//!
//! These structs are the standard output of every
//! [`PriceProvider`](crate::providers::PriceProvider) implementation and the
//! input to every downstream stage, regardless of the upstream market API.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use chrono_tz::Tz;

/// A raw (timestamp, price) pair as returned by a provider.
///
/// Timestamps are always UTC at the wire boundary; representation conversion
/// happens later, in [`normalize`](crate::normalize).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Start of the delivery hour (UTC).
    pub timestamp: DateTime<Utc>,

    /// Wholesale day-ahead price in EUR/MWh. Negative prices are valid.
    pub price: f64,
}

/// The timezone representation a series is expressed in.
///
/// Conversion never changes price magnitude, only the wall-clock label and
/// therefore the calendar date used for daily grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRepresentation {
    /// Timestamps rendered in UTC.
    Utc,
    /// Timestamps rendered in a country's civil timezone.
    Local(Tz),
}

impl TimeRepresentation {
    /// Filename suffix identifying this representation, e.g. `utc` or
    /// `local_CET`. The abbreviation is taken from the zone's current offset.
    pub fn file_suffix(&self) -> String {
        match self {
            TimeRepresentation::Utc => "utc".to_string(),
            TimeRepresentation::Local(tz) => {
                format!("local_{}", Utc::now().with_timezone(tz).format("%Z"))
            }
        }
    }
}

/// A single hourly price observation, immutable once retrieved.
///
/// The timestamp carries an explicit offset so the observation is
/// self-describing in either representation.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceObservation {
    /// Start of the delivery hour, with the offset of the series'
    /// current [`TimeRepresentation`].
    pub timestamp: DateTime<FixedOffset>,

    /// Wholesale day-ahead price in EUR/MWh.
    pub price: f64,

    /// Two-letter country code, e.g. `NL`.
    pub country: String,
}

impl PriceObservation {
    /// Calendar date of the observation in its current representation.
    ///
    /// This is the grouping key for daily metrics, which is why
    /// normalization must run before aggregation.
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    /// Hour of day (0-23) in the current representation.
    pub fn local_hour(&self) -> u32 {
        use chrono::Timelike;
        self.timestamp.time().hour()
    }
}

/// An ordered series of observations for one country and one retrieval run.
///
/// Invariant: timestamps are strictly increasing (chunk assembly deduplicates
/// inclusive boundary overlap, keeping the first occurrence). Gaps at hourly
/// spacing are a data-quality condition, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    /// Two-letter country code the series belongs to.
    pub country: String,

    /// Representation the timestamps are currently expressed in.
    pub representation: TimeRepresentation,

    /// The observations, strictly increasing in timestamp.
    pub observations: Vec<PriceObservation>,
}

impl PriceSeries {
    /// An empty UTC series for `country`.
    pub fn empty(country: &str) -> Self {
        Self {
            country: country.to_string(),
            representation: TimeRepresentation::Utc,
            observations: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// All prices in series order.
    pub fn prices(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.price).collect()
    }
}

//! Timezone normalization of price series.
//!
//! What this module provides:
//! - [`to_representation`]: re-express a series in UTC or in a country's
//!   civil timezone. Prices are untouched; only the wall-clock label (and
//!   therefore the calendar date used for daily grouping) changes.
//! - [`parse_timestamp_utc`]: parse wire timestamps. A timestamp with an
//!   explicit offset is converted to UTC; a naive timestamp is assumed to
//!   already be UTC, never reinterpreted.
//!
//! Normalization is the safety-critical step before aggregation: grouping
//! must use the timestamp as rendered in the requested representation, or a
//! daylight-saving transition shifts an hour into the wrong calendar day.
//! A local-time day containing a DST transition has 23 or 25 hourly
//! observations; downstream stages accept this as-is.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::models::observation::{PriceObservation, PriceSeries, TimeRepresentation};

/// A wire timestamp that is neither RFC 3339 nor a naive date-time.
#[derive(Debug, Error)]
#[error("Unparseable timestamp: {0}")]
pub struct TimestampParseError(pub String);

/// Parses a timestamp string to UTC.
///
/// `2023-06-01T10:00:00+02:00` converts to `2023-06-01T08:00:00Z`;
/// `2023-06-01T08:00:00` (no offset) is assumed UTC.
pub fn parse_timestamp_utc(s: &str) -> Result<DateTime<Utc>, TimestampParseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(naive.and_utc());
    }
    Err(TimestampParseError(s.to_string()))
}

/// Serde adapter around [`parse_timestamp_utc`].
pub fn de_timestamp_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp_utc(&raw).map_err(serde::de::Error::custom)
}

/// Returns a new series with every timestamp expressed in `target`.
///
/// Idempotent: normalizing an already-UTC series to UTC yields an equivalent
/// series, and local→UTC→local recovers the original timestamps exactly
/// (each observation is an instant; only its rendering changes).
pub fn to_representation(series: &PriceSeries, target: TimeRepresentation) -> PriceSeries {
    let observations = series
        .observations
        .iter()
        .map(|obs| PriceObservation {
            timestamp: match target {
                TimeRepresentation::Utc => obs.timestamp.with_timezone(&Utc).fixed_offset(),
                TimeRepresentation::Local(tz) => obs.timestamp.with_timezone(&tz).fixed_offset(),
            },
            price: obs.price,
            country: obs.country.clone(),
        })
        .collect();

    PriceSeries {
        country: series.country.clone(),
        representation: target,
        observations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Amsterdam;

    fn hourly_utc_series(start: DateTime<Utc>, hours: usize) -> PriceSeries {
        let observations = (0..hours)
            .map(|h| PriceObservation {
                timestamp: (start + chrono::Duration::hours(h as i64)).fixed_offset(),
                price: h as f64,
                country: "NL".to_string(),
            })
            .collect();
        PriceSeries {
            country: "NL".to_string(),
            representation: TimeRepresentation::Utc,
            observations,
        }
    }

    #[test]
    fn parse_offset_timestamp_converts() {
        let got = parse_timestamp_utc("2023-06-01T10:00:00+02:00").unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2023, 6, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn parse_naive_timestamp_assumes_utc() {
        let got = parse_timestamp_utc("2023-06-01 08:00:00").unwrap();
        assert_eq!(got, Utc.with_ymd_and_hms(2023, 6, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn parse_garbage_is_an_error() {
        assert!(parse_timestamp_utc("yesterday-ish").is_err());
    }

    #[test]
    fn utc_to_utc_is_identity() {
        let series = hourly_utc_series(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(), 24);
        let normalized = to_representation(&series, TimeRepresentation::Utc);
        assert_eq!(series, normalized);
    }

    #[test]
    fn local_roundtrip_recovers_timestamps() {
        let series = hourly_utc_series(Utc.with_ymd_and_hms(2023, 3, 25, 20, 0, 0).unwrap(), 48);
        let local = to_representation(&series, TimeRepresentation::Local(Amsterdam));
        let back = to_representation(&local, TimeRepresentation::Utc);
        assert_eq!(series.observations, back.observations);
    }

    #[test]
    fn conversion_never_touches_prices() {
        let series = hourly_utc_series(Utc.with_ymd_and_hms(2023, 7, 1, 0, 0, 0).unwrap(), 24);
        let local = to_representation(&series, TimeRepresentation::Local(Amsterdam));
        assert_eq!(series.prices(), local.prices());
    }

    #[test]
    fn spring_forward_day_has_23_local_hours() {
        // Amsterdam skips 02:00-03:00 local on 2023-03-26. Generate UTC hours
        // covering the whole local day and count observations dated 03-26.
        let series = hourly_utc_series(Utc.with_ymd_and_hms(2023, 3, 25, 20, 0, 0).unwrap(), 40);
        let local = to_representation(&series, TimeRepresentation::Local(Amsterdam));
        let day = chrono::NaiveDate::from_ymd_opt(2023, 3, 26).unwrap();
        let count = local
            .observations
            .iter()
            .filter(|o| o.local_date() == day)
            .count();
        assert_eq!(count, 23);
    }

    #[test]
    fn fall_back_day_has_25_local_hours() {
        // Amsterdam repeats 02:00-03:00 local on 2023-10-29.
        let series = hourly_utc_series(Utc.with_ymd_and_hms(2023, 10, 28, 20, 0, 0).unwrap(), 40);
        let local = to_representation(&series, TimeRepresentation::Local(Amsterdam));
        let day = chrono::NaiveDate::from_ymd_opt(2023, 10, 29).unwrap();
        let count = local
            .observations
            .iter()
            .filter(|o| o.local_date() == day)
            .count();
        assert_eq!(count, 25);
    }
}

//! Universal request parameters for day-ahead price queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parameters for one provider request.
///
/// Vendor-agnostic: the market domain identifier comes from the country
/// table, and the time range is half-open `[start, end)` in UTC. Each
/// provider maps these onto its own API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRequest {
    /// Market domain identifier (EIC code), e.g. `10YNL----------L`.
    pub domain: String,

    /// Start of the requested range (inclusive, UTC).
    pub start: DateTime<Utc>,

    /// End of the requested range (exclusive, UTC).
    pub end: DateTime<Utc>,
}

//! ENTSO-E transparency platform day-ahead price client.

mod provider;
mod response;

pub use provider::{DEFAULT_BASE_URL, EntsoeProvider};
pub use response::{DayAheadPoint, DayAheadResponse};

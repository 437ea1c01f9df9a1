use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::{env_or, require_env};
use snafu::ResultExt;
use tracing::debug;

use crate::models::{observation::PricePoint, request::PriceRequest};
use crate::providers::entsoe::response::{ApiErrorBody, DayAheadResponse};
use crate::providers::{
    ApiSnafu, ClientBuildSnafu, MissingTokenSnafu, PriceProvider, ProviderError,
    ProviderInitError, TransportSnafu,
};

/// Default endpoint of the day-ahead price API.
pub const DEFAULT_BASE_URL: &str = "https://web-api.tp.entsoe.eu/api/day-ahead";

/// Environment variable holding the API security token.
pub const TOKEN_ENV_VAR: &str = "ENTSOE_API_KEY";

/// Environment variable overriding the endpoint (useful for test fixtures).
pub const BASE_URL_ENV_VAR: &str = "ENTSOE_API_URL";

/// Timestamp format the platform expects for period boundaries.
const PERIOD_FORMAT: &str = "%Y%m%d%H%M";

/// Day-ahead price client for the ENTSO-E transparency platform.
///
/// The security token is kept in a [`SecretString`] and only attached to the
/// outgoing request; it is never logged or serialized.
pub struct EntsoeProvider {
    client: Client,
    base_url: String,
    token: SecretString,
}

impl EntsoeProvider {
    /// Creates a provider reading the token from `ENTSOE_API_KEY`.
    pub fn new() -> Result<Self, ProviderInitError> {
        let token = SecretString::new(require_env(TOKEN_ENV_VAR).context(MissingTokenSnafu)?.into());
        Self::with_token(token)
    }

    /// Creates a provider with an explicit token; the endpoint still honors
    /// the `ENTSOE_API_URL` override.
    pub fn with_token(token: SecretString) -> Result<Self, ProviderInitError> {
        Self::with_token_and_base_url(token, env_or(BASE_URL_ENV_VAR, DEFAULT_BASE_URL))
    }

    /// Creates a provider with an explicit token and endpoint.
    pub fn with_token_and_base_url(
        token: SecretString,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderInitError> {
        let client = Client::builder().build().context(ClientBuildSnafu)?;
        Ok(Self { client, base_url: base_url.into(), token })
    }
}

#[async_trait]
impl PriceProvider for EntsoeProvider {
    async fn fetch_day_ahead(
        &self,
        request: &PriceRequest,
    ) -> Result<Vec<PricePoint>, ProviderError> {
        let query: Vec<(&str, String)> = vec![
            ("documentType", "A44".to_string()),
            ("in_Domain", request.domain.clone()),
            ("out_Domain", request.domain.clone()),
            ("periodStart", request.start.format(PERIOD_FORMAT).to_string()),
            ("periodEnd", request.end.format(PERIOD_FORMAT).to_string()),
            ("securityToken", self.token.expose_secret().to_string()),
        ];

        debug!(domain = %request.domain, start = %request.start, end = %request.end,
               "requesting day-ahead prices");

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .context(TransportSnafu)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            // The platform answers 404 for ranges with nothing published.
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if body.to_lowercase().contains("no matching data") {
                // Valid-but-empty result, not a failure.
                return Ok(Vec::new());
            }
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| match (b.code, b.message) {
                    (Some(code), Some(msg)) => Some(format!("{code}: {msg}")),
                    (_, Some(msg)) => Some(msg),
                    (Some(code), None) => Some(code),
                    _ => None,
                })
                .unwrap_or(body);
            return ApiSnafu { status, message }.fail();
        }

        let decoded = response
            .json::<DayAheadResponse>()
            .await
            .context(TransportSnafu)?;

        let points = decoded
            .points
            .into_iter()
            .map(|p| PricePoint { timestamp: p.timestamp, price: p.price })
            .collect();
        Ok(points)
    }
}

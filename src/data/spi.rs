use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    data::error::FetchError,
    domain::{
        field::Field,
        spi::{Comparison, CurrentIndex, Forecast, ForecastSummary, OperationKind, QueryParams},
    },
};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the SPI analytics service.
#[derive(Debug, Clone)]
pub struct SpiClient {
    client: Client,
    base_url: String,
}

impl Default for SpiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SpiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("reqwest client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_current(&self, params: &QueryParams) -> Result<CurrentIndex, FetchError> {
        self.get(OperationKind::Current, &params.current_query())
            .await
    }

    pub async fn fetch_comparison(&self, params: &QueryParams) -> Result<Comparison, FetchError> {
        self.get(OperationKind::Comparison, &params.comparison_query())
            .await
    }

    pub async fn fetch_forecast(&self, params: &QueryParams) -> Result<Forecast, FetchError> {
        self.get(OperationKind::Forecast, &params.forecast_query())
            .await
    }

    /// Compact SARIMA summary; shares the forecast endpoint's parameters.
    pub async fn fetch_summary(&self, params: &QueryParams) -> Result<ForecastSummary, FetchError> {
        self.get(OperationKind::Summary, &params.forecast_query())
            .await
    }

    pub async fn fetch_fields(&self) -> Result<Vec<Field>, FetchError> {
        self.get(OperationKind::Fields, &[]).await
    }

    /// `id` must already be path safe, see `is_valid_field_id`.
    pub async fn fetch_field(&self, id: &str) -> Result<Field, FetchError> {
        let path = format!("{}/{id}", OperationKind::Field.path());
        self.get_path(OperationKind::Field, &path, &[]).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        kind: OperationKind,
        query: &[(&'static str, String)],
    ) -> Result<T, FetchError> {
        self.get_path(kind, kind.path(), query).await
    }

    async fn get_path<T: DeserializeOwned>(
        &self,
        kind: OperationKind,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{path}", self.base_url);
        debug!(operation = kind.label(), %url, "issuing request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|source| FetchError::Transport { kind, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(FetchError::from_error_body(kind, status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|source| FetchError::Decode { kind, source })
    }
}

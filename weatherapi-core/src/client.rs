use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt::Debug;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::ClientConfig,
    error::ApiError,
    model::{AlertsReport, CurrentConditions, LocationQuery, Outcome, RawResponse, Reply},
};

#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    /// One GET to `current.json` with air quality requested.
    async fn fetch_current(
        &self,
        location: &LocationQuery,
    ) -> Result<Reply<CurrentConditions>, ApiError>;

    /// One GET to `alerts.json`.
    async fn fetch_alerts(&self, location: &LocationQuery)
    -> Result<Reply<AlertsReport>, ApiError>;
}

/// WeatherAPI.com client. Holds no state besides its configuration, so
/// repeated calls are independent of each other.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    config: ClientConfig,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config, http: Client::new() }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get<T>(&self, url: &str, query: &[(&str, &str)]) -> Result<Reply<T>, ApiError>
    where
        T: for<'a> TryFrom<&'a Value, Error = ApiError>,
    {
        let res = self.http.get(url).query(query).send().await?;

        let status = res.status();
        let headers = res.headers().clone();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "received response");

        let outcome = if status == StatusCode::OK {
            let raw: Value = serde_json::from_str(&body)?;
            let data = T::try_from(&raw)?;
            Outcome::Success { raw, data }
        } else {
            warn!(%status, "WeatherAPI.com request was not successful");
            Outcome::Failure
        };

        Ok(Reply { http: RawResponse { status, headers, body }, outcome })
    }
}

#[async_trait]
impl WeatherApi for WeatherApiClient {
    #[instrument(skip_all, fields(location = %location))]
    async fn fetch_current(
        &self,
        location: &LocationQuery,
    ) -> Result<Reply<CurrentConditions>, ApiError> {
        let url = self.config.current_url();
        info!(%url, "fetching current conditions");

        self.get(
            &url,
            &[("key", self.config.api_key.as_str()), ("q", location.as_str()), ("aqi", "yes")],
        )
        .await
    }

    #[instrument(skip_all, fields(location = %location))]
    async fn fetch_alerts(
        &self,
        location: &LocationQuery,
    ) -> Result<Reply<AlertsReport>, ApiError> {
        let url = self.config.alerts_url();
        info!(%url, "fetching alerts");

        self.get(&url, &[("key", self.config.api_key.as_str()), ("q", location.as_str())]).await
    }
}

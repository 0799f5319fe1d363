//! api.weather.gov client: `/points` lookup, then the forecast URL it names.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::core::tool::ForecastFetcher;
use crate::domain::{
    FetchError, ForecastKind, ForecastResponse, GridpointForecastResponse,
    HourlyForecastResponse, PointResponse,
};
use crate::infra::config::UpstreamConfig;
use crate::infra::http::headers::{add_standard_headers, generate_request_id};
use crate::infra::logging::log_metric;
use crate::infra::runtime::limits::make_http_client;

#[derive(Clone)]
pub struct NwsClient {
    base: String,
    http: Client,
    user_agent: String,
}

impl NwsClient {
    pub fn new(base: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::from_config(&UpstreamConfig::with_base_url(base))
    }

    pub fn from_config(cfg: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            base: cfg.base_url.clone(),
            http: make_http_client(cfg)?,
            user_agent: cfg.user_agent.clone(),
        })
    }

    /// Resolve a coordinate to its forecast office gridpoint URLs.
    pub async fn points(
        &self,
        latitude: &str,
        longitude: &str,
        request_id: &str,
    ) -> Result<PointResponse, FetchError> {
        let url = format!(
            "{}/points/{},{}",
            self.base.trim_end_matches('/'),
            latitude,
            longitude
        );
        self.get_json(&url, request_id).await
    }

    async fn fetch_kind<T: DeserializeOwned>(
        &self,
        kind: ForecastKind,
        latitude: &str,
        longitude: &str,
    ) -> Result<T, FetchError> {
        let request_id = generate_request_id();
        let start = Instant::now();
        let res = async {
            let point = self.points(latitude, longitude, &request_id).await?;
            tracing::debug!(
                request_id = %request_id,
                grid_id = point.grid_id.as_deref().unwrap_or("-"),
                grid_x = point.grid_x.as_deref().unwrap_or("-"),
                grid_y = point.grid_y.as_deref().unwrap_or("-"),
                "point resolved"
            );
            self.get_json(kind.select_url(&point), &request_id).await
        }
        .await;
        match &res {
            Ok(_) => log_metric(
                kind.tool_name(),
                "upstream_latency_ms",
                start.elapsed().as_millis() as f64,
            ),
            Err(e) => {
                tracing::debug!(request_id = %request_id, error = %e, "nws fetch failed");
                log_metric(kind.tool_name(), "upstream_error_total", 1.0);
            }
        }
        res
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        request_id: &str,
    ) -> Result<T, FetchError> {
        tracing::debug!(endpoint = %url, request_id = %request_id, "nws request");
        let (builder, _rid) = add_standard_headers(
            self.http.get(url),
            &self.user_agent,
            Some(request_id.to_string()),
        );
        let resp = builder.send().await.map_err(|e| FetchError::Request {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        resp.json::<T>().await.map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl ForecastFetcher for NwsClient {
    async fn forecast(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<ForecastResponse, FetchError> {
        self.fetch_kind(ForecastKind::Forecast, latitude, longitude)
            .await
    }

    async fn hourly_forecast(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<HourlyForecastResponse, FetchError> {
        self.fetch_kind(ForecastKind::HourlyForecast, latitude, longitude)
            .await
    }

    async fn gridpoint_forecast(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<GridpointForecastResponse, FetchError> {
        self.fetch_kind(ForecastKind::GridpointForecast, latitude, longitude)
            .await
    }
}

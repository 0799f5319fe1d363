use async_trait::async_trait;

use crate::domain::{
    CoordinateInput, FetchError, ForecastKind, ForecastPayload, ForecastResponse,
    GridpointForecastResponse, HourlyForecastResponse,
};

/// Upstream forecast source. Implementations resolve the coordinate to a
/// gridpoint and fetch one representation; errors are returned as-is.
#[async_trait]
pub trait ForecastFetcher: Send + Sync + 'static {
    async fn forecast(&self, latitude: &str, longitude: &str)
        -> Result<ForecastResponse, FetchError>;

    async fn hourly_forecast(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<HourlyForecastResponse, FetchError>;

    async fn gridpoint_forecast(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<GridpointForecastResponse, FetchError>;
}

impl ForecastKind {
    /// Run the fetch operation belonging to this kind and tag the result.
    pub async fn fetch(
        self,
        fetcher: &dyn ForecastFetcher,
        coords: &CoordinateInput,
    ) -> Result<ForecastPayload, FetchError> {
        let (lat, lon) = (coords.latitude.as_str(), coords.longitude.as_str());
        Ok(match self {
            ForecastKind::Forecast => ForecastPayload::Summary(fetcher.forecast(lat, lon).await?),
            ForecastKind::HourlyForecast => {
                ForecastPayload::Hourly(fetcher.hourly_forecast(lat, lon).await?)
            }
            ForecastKind::GridpointForecast => {
                ForecastPayload::Gridpoint(fetcher.gridpoint_forecast(lat, lon).await?)
            }
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory fetcher for handler tests.

    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Serves canned documents; any latitude listed in `failing` gets a 404.
    #[derive(Default)]
    pub struct StubFetcher {
        pub summary: ForecastResponse,
        pub hourly: HourlyForecastResponse,
        pub gridpoint: GridpointForecastResponse,
        pub failing: Vec<String>,
        pub calls: Mutex<Vec<(&'static str, String, String)>>,
        pub in_flight_max: AtomicUsize,
        pub in_flight: AtomicUsize,
        pub delay_ms: u64,
    }

    impl StubFetcher {
        async fn enter(&self, op: &'static str, lat: &str, lon: &str) -> Result<(), FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push((op, lat.to_string(), lon.to_string()));
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.in_flight_max.fetch_max(now, Ordering::SeqCst);
            if self.delay_ms > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            if self.failing.iter().any(|f| f == lat) {
                return Err(FetchError::Status {
                    url: format!("stub://points/{lat},{lon}"),
                    status: 404,
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ForecastFetcher for StubFetcher {
        async fn forecast(&self, lat: &str, lon: &str) -> Result<ForecastResponse, FetchError> {
            self.enter("forecast", lat, lon).await?;
            Ok(self.summary.clone())
        }

        async fn hourly_forecast(
            &self,
            lat: &str,
            lon: &str,
        ) -> Result<HourlyForecastResponse, FetchError> {
            self.enter("hourly", lat, lon).await?;
            Ok(self.hourly.clone())
        }

        async fn gridpoint_forecast(
            &self,
            lat: &str,
            lon: &str,
        ) -> Result<GridpointForecastResponse, FetchError> {
            self.enter("gridpoint", lat, lon).await?;
            Ok(self.gridpoint.clone())
        }
    }

    /// Never completes; used to exercise cancellation.
    pub struct HangingFetcher;

    #[async_trait]
    impl ForecastFetcher for HangingFetcher {
        async fn forecast(&self, _: &str, _: &str) -> Result<ForecastResponse, FetchError> {
            std::future::pending().await
        }
        async fn hourly_forecast(
            &self,
            _: &str,
            _: &str,
        ) -> Result<HourlyForecastResponse, FetchError> {
            std::future::pending().await
        }
        async fn gridpoint_forecast(
            &self,
            _: &str,
            _: &str,
        ) -> Result<GridpointForecastResponse, FetchError> {
            std::future::pending().await
        }
    }
}

pub mod forecast;

use rmcp::schemars;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use forecast::{
    ForecastPayload, ForecastPeriod, ForecastResponse, GridpointForecastResponse,
    GridpointTimeSeries, HourlyForecastResponse, PointResponse, QuantitativeValue,
    TimeSeriesValue,
};

/// Why an upstream forecast could not be turned into a tool result.
///
/// Every variant ends up as the same protocol failure; the variants only
/// exist so the message says what went wrong.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    #[error("upstream status {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("malformed upstream response from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("failed to encode forecast: {0}")]
    Encode(String),
    #[error("forecast request cancelled")]
    Cancelled,
}

impl FetchError {
    pub fn encode(e: serde_json::Error) -> Self {
        FetchError::Encode(e.to_string())
    }
}

/// Latitude/longitude pair exactly as the caller sent it. Bounds are left to NWS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CoordinateInput {
    #[schemars(description = "Latitude of the location, in decimal degrees (e.g. \"37.3918\")")]
    pub latitude: String,
    #[schemars(description = "Longitude of the location, in decimal degrees (e.g. \"-122.0601\")")]
    pub longitude: String,
}

impl CoordinateInput {
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }
}

/// The three forecast representations, one per registered tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastKind {
    Forecast,
    HourlyForecast,
    GridpointForecast,
}

impl ForecastKind {
    pub const ALL: [ForecastKind; 3] = [
        ForecastKind::Forecast,
        ForecastKind::HourlyForecast,
        ForecastKind::GridpointForecast,
    ];

    pub fn tool_name(self) -> &'static str {
        match self {
            ForecastKind::Forecast => "Forecast",
            ForecastKind::HourlyForecast => "HourlyForecast",
            ForecastKind::GridpointForecast => "GridpointForecast",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ForecastKind::Forecast => "Basic 7 Day Weather Forecast",
            ForecastKind::HourlyForecast => "Basic Hourly 7 Day Weather Forecast",
            ForecastKind::GridpointForecast => {
                "Detailed 7 Day Weather Forecast with Raw Timeseries Data"
            }
        }
    }

    /// Which URL of a `/points` lookup holds this representation.
    pub fn select_url(self, point: &PointResponse) -> &str {
        match self {
            ForecastKind::Forecast => &point.forecast,
            ForecastKind::HourlyForecast => &point.forecast_hourly,
            ForecastKind::GridpointForecast => &point.forecast_grid_data,
        }
    }
}

impl std::fmt::Display for ForecastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tool_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_string_coordinates() {
        let c: CoordinateInput =
            serde_json::from_value(json!({"latitude": "37.3918", "longitude": "-122.0601"}))
                .unwrap();
        assert_eq!(c, CoordinateInput::new("37.3918", "-122.0601"));
    }

    #[test]
    fn out_of_range_coordinates_are_passed_through() {
        let c: CoordinateInput =
            serde_json::from_value(json!({"latitude": "999", "longitude": "abc"})).unwrap();
        assert_eq!(c.latitude, "999");
        assert_eq!(c.longitude, "abc");
    }

    #[test]
    fn rejects_missing_or_non_string_fields() {
        let missing = serde_json::from_value::<CoordinateInput>(json!({"longitude": "1"}));
        assert!(missing.unwrap_err().to_string().contains("latitude"));

        let numeric =
            serde_json::from_value::<CoordinateInput>(json!({"latitude": "1", "longitude": 2.5}));
        assert!(numeric.is_err());
    }

    #[test]
    fn schema_describes_both_coordinates_as_required_strings() {
        let schema = serde_json::to_value(schemars::schema_for!(CoordinateInput)).unwrap();
        for field in ["latitude", "longitude"] {
            let prop = &schema["properties"][field];
            assert_eq!(prop["type"], "string", "{field}");
            assert!(prop["description"].as_str().unwrap().contains("decimal degrees"));
        }
        let required: Vec<_> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert!(required.contains(&"latitude") && required.contains(&"longitude"));
    }

    #[test]
    fn tool_names_are_unique_and_fixed() {
        let names: Vec<_> = ForecastKind::ALL.iter().map(|k| k.tool_name()).collect();
        assert_eq!(names, ["Forecast", "HourlyForecast", "GridpointForecast"]);
        assert_eq!(
            ForecastKind::HourlyForecast.description(),
            "Basic Hourly 7 Day Weather Forecast"
        );
    }

    #[test]
    fn each_kind_selects_its_own_url() {
        let point = PointResponse {
            forecast: "f".into(),
            forecast_hourly: "h".into(),
            forecast_grid_data: "g".into(),
            ..Default::default()
        };
        assert_eq!(ForecastKind::Forecast.select_url(&point), "f");
        assert_eq!(ForecastKind::HourlyForecast.select_url(&point), "h");
        assert_eq!(ForecastKind::GridpointForecast.select_url(&point), "g");
    }

    #[test]
    fn fetch_error_messages_are_readable() {
        let e = FetchError::Status {
            url: "http://x/points/1,2".into(),
            status: 404,
        };
        assert_eq!(e.to_string(), "upstream status 404 for http://x/points/1,2");
        assert_eq!(FetchError::Cancelled.to_string(), "forecast request cancelled");
    }
}

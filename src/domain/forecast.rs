//! NWS JSON-LD document shapes (requested with `Accept: application/ld+json`,
//! so every document is flat, without the GeoJSON `properties` wrapper).

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Result of `GET /points/{lat},{lon}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointResponse {
    pub forecast: String,
    pub forecast_hourly: String,
    pub forecast_grid_data: String,
    #[serde(default)]
    pub grid_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub grid_x: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub grid_y: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,
}

/// Day/night (or hourly) forecast document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_generator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_times: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<QuantitativeValue>,
    #[serde(default)]
    pub periods: Vec<ForecastPeriod>,
}

/// The hourly endpoint returns the same document at one-hour granularity.
pub type HourlyForecastResponse = ForecastResponse;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_daytime: Option<bool>,
    #[serde(
        default,
        deserialize_with = "scalar_or_quantity",
        skip_serializing_if = "Option::is_none"
    )]
    pub temperature: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_trend: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability_of_precipitation: Option<QuantitativeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dewpoint: Option<QuantitativeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_humidity: Option<QuantitativeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_forecast: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_forecast: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesValue {
    /// ISO-8601 instant plus duration, e.g. `2025-06-01T12:00:00+00:00/PT1H`.
    #[serde(default)]
    pub valid_time: String,
    #[serde(default)]
    pub value: Option<Number>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridpointTimeSeries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,
    #[serde(default)]
    pub values: Vec<TimeSeriesValue>,
}

/// Raw gridpoint data: one time-series per forecast element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridpointForecastResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_times: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<QuantitativeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_office: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub grid_x: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub grid_y: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<GridpointTimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dewpoint: Option<GridpointTimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_temperature: Option<GridpointTimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_temperature: Option<GridpointTimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_humidity: Option<GridpointTimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apparent_temperature: Option<GridpointTimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_index: Option<GridpointTimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_chill: Option<GridpointTimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sky_cover: Option<GridpointTimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_direction: Option<GridpointTimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<GridpointTimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_gust: Option<GridpointTimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability_of_precipitation: Option<GridpointTimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantitative_precipitation: Option<GridpointTimeSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snowfall_amount: Option<GridpointTimeSeries>,
}

/// One fetched forecast. Serializes as the bare upstream-shaped object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForecastPayload {
    Summary(ForecastResponse),
    Hourly(HourlyForecastResponse),
    Gridpoint(GridpointForecastResponse),
}

// Periods carry temperature either as a bare number or, behind the NWS
// `forecast_temperature_qv` feature flag, as `{"value": n, "unitCode": ..}`.
fn scalar_or_quantity<'de, D>(de: D) -> Result<Option<Number>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(de)?;
    let scalar = match raw {
        Some(Value::Object(mut map)) => map.remove("value"),
        other => other,
    };
    match scalar {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n)),
        Some(other) => Err(de::Error::custom(format!(
            "expected a numeric temperature, got {other}"
        ))),
    }
}

// Gridpoint indices are strings in `/gridpoints` documents and numbers in `/points`.
fn string_or_number<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(de)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected a grid index, got {other}"
        ))),
    }
}

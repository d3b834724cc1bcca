//! Weather summary, trend and assistant models
//!
//! Field names mirror the backend's JSON, which uses camelCase for the
//! analysis payload and snake_case for the assistant endpoint.

use super::location::{Coordinate, LocationInfo};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One measured quantity averaged over the historical window
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricSummary {
    /// Averaged value in `unit`
    pub avg_value: f64,
    /// Unit of measure, e.g. "°C" or "km/h"
    pub unit: String,
    /// Human-readable description of the metric
    pub description: String,
}

/// Precipitation likelihood over the historical window
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PrecipitationSummary {
    /// Probability of precipitation, 0-100
    pub probability: f64,
    /// Always "%"
    pub unit: String,
    /// Human-readable description
    pub description: String,
}

/// Categorical label summarizing overall conditions
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherType {
    Hot,
    Cold,
    Humid,
    Windy,
    Muggy,
    Comfortable,
}

impl fmt::Display for WeatherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Hot => "Hot",
            Self::Cold => "Cold",
            Self::Humid => "Humid",
            Self::Windy => "Windy",
            Self::Muggy => "Muggy",
            Self::Comfortable => "Comfortable",
        };
        write!(f, "{label}")
    }
}

/// Weather-type classification with its feels-like approximation
///
/// Optional in the backend response; derived from the other summary
/// fields when absent.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherTypeClassification {
    /// The categorical label
    #[serde(rename = "type")]
    pub weather_type: WeatherType,
    /// Feels-like temperature approximation
    pub heat_index: f64,
    /// Always "°C"
    pub unit: String,
    /// Human-readable description
    pub description: String,
}

/// Aggregate weather summary for one completed analysis
///
/// Immutable within one response; a new fetch replaces it atomically.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherSummary {
    pub avg_temperature: MetricSummary,
    pub max_temperature: MetricSummary,
    pub min_temperature: MetricSummary,
    pub precipitation: PrecipitationSummary,
    pub wind_speed: MetricSummary,
    pub humidity: MetricSummary,
    /// Absent when the backend leaves classification to the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_type: Option<WeatherTypeClassification>,
}

/// One historical year in the trend series
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub year: i32,
    pub avg_temperature: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub precipitation: f64,
    pub wind_speed: f64,
    pub humidity: f64,
    pub weather_type: String,
}

/// Full analysis response: location, summary and trend series
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub location: LocationInfo,
    pub summary: WeatherSummary,
    pub trend_data: Vec<TrendPoint>,
}

/// Structured error body returned by the backend on failure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
}

impl ApiErrorBody {
    /// Best available human-readable message: `message`, falling back to
    /// `error`; empty when neither is usable
    #[must_use]
    pub fn best_message(&self) -> &str {
        if !self.message.is_empty() {
            &self.message
        } else {
            &self.error
        }
    }
}

/// Health probe response
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

/// Request body for the assistant endpoint
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssistantRequest {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_data: Option<AnalysisResult>,
}

/// Response from the assistant endpoint
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AssistantResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analysis_result_deserializes_camel_case() {
        let body = json!({
            "location": { "name": "Taipei, Taiwan", "lat": 25.0330, "lon": 121.5654 },
            "summary": {
                "avgTemperature": { "avgValue": 28.0, "unit": "°C", "description": "Historical average temperature" },
                "maxTemperature": { "avgValue": 32.0, "unit": "°C", "description": "Historical average maximum temperature" },
                "minTemperature": { "avgValue": 24.0, "unit": "°C", "description": "Historical average minimum temperature" },
                "precipitation": { "probability": 65.0, "unit": "%", "description": "Probability of precipitation" },
                "windSpeed": { "avgValue": 15.0, "unit": "km/h", "description": "Historical average wind speed" },
                "humidity": { "avgValue": 75.0, "unit": "%", "description": "Historical average relative humidity" },
                "weatherType": { "type": "Muggy", "heatIndex": 31.2, "unit": "°C", "description": "Weather type: Muggy, feels like: 31.2°C" }
            },
            "trendData": [
                { "year": 2020, "avgTemperature": 28.5, "maxTemperature": 32.5, "minTemperature": 24.5,
                  "precipitation": 10.0, "windSpeed": 16.0, "humidity": 81.0, "weatherType": "Hot" }
            ]
        });

        let result: AnalysisResult = serde_json::from_value(body).unwrap();
        assert_eq!(result.location.name, "Taipei, Taiwan");
        assert_eq!(result.summary.avg_temperature.avg_value, 28.0);
        let wt = result.summary.weather_type.as_ref().unwrap();
        assert_eq!(wt.weather_type, WeatherType::Muggy);
        assert_eq!(wt.heat_index, 31.2);
        assert_eq!(result.trend_data.len(), 1);
        assert_eq!(result.trend_data[0].year, 2020);
    }

    #[test]
    fn test_missing_weather_type_is_preserved_as_absent() {
        let body = json!({
            "location": { "name": "X", "lat": 0.0, "lon": 0.0 },
            "summary": {
                "avgTemperature": { "avgValue": 20.0, "unit": "°C", "description": "" },
                "maxTemperature": { "avgValue": 25.0, "unit": "°C", "description": "" },
                "minTemperature": { "avgValue": 15.0, "unit": "°C", "description": "" },
                "precipitation": { "probability": 10.0, "unit": "%", "description": "" },
                "windSpeed": { "avgValue": 5.0, "unit": "km/h", "description": "" },
                "humidity": { "avgValue": 50.0, "unit": "%", "description": "" }
            },
            "trendData": []
        });

        let result: AnalysisResult = serde_json::from_value(body).unwrap();
        assert!(result.summary.weather_type.is_none());
    }

    #[test]
    fn test_error_body_message_fallback() {
        let with_message = ApiErrorBody {
            error: "bad_request".to_string(),
            message: "Latitude out of range".to_string(),
            timestamp: String::new(),
        };
        assert_eq!(with_message.best_message(), "Latitude out of range");

        let error_only = ApiErrorBody {
            error: "internal_error".to_string(),
            message: String::new(),
            timestamp: String::new(),
        };
        assert_eq!(error_only.best_message(), "internal_error");
    }

    #[test]
    fn test_assistant_request_omits_absent_context() {
        let request = AssistantRequest {
            question: "Will it rain?".to_string(),
            location: None,
            weather_data: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("location").is_none());
        assert!(value.get("weather_data").is_none());
    }
}

//! Deterministic sample dataset
//!
//! Generates a plausible analysis result without touching the network:
//! temperatures scale with distance from a reference latitude, wind with
//! longitude, and precipitation/humidity follow a seasonal curve keyed to
//! the requested month. Used by the demo binary's offline mode and by
//! tests that need a full [`AnalysisResult`].

use crate::config::RiskThresholds;
use crate::models::{
    AnalysisResult, Coordinate, LocationInfo, MetricSummary, PrecipitationSummary, TrendPoint,
    WeatherSummary,
};
use crate::risk;
use chrono::{Datelike, NaiveDate};

const BASE_AVG_TEMP: f64 = 28.0;
const BASE_MAX_TEMP: f64 = 32.0;
const BASE_MIN_TEMP: f64 = 24.0;
const BASE_WIND_SPEED: f64 = 15.0;
const BASE_PRECIPITATION: f64 = 65.0;
const BASE_HUMIDITY: f64 = 75.0;

/// Reference point the scaling factors are anchored to
const REFERENCE_LAT: f64 = 25.0;
const REFERENCE_LON: f64 = 121.0;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn metric(value: f64, unit: &str, description: &str) -> MetricSummary {
    MetricSummary {
        avg_value: value,
        unit: unit.to_string(),
        description: description.to_string(),
    }
}

/// Generate a deterministic analysis result for a location and date
#[must_use]
pub fn sample_analysis(
    coordinate: Coordinate,
    start_date: NaiveDate,
    trend_years: u32,
    thresholds: &RiskThresholds,
) -> AnalysisResult {
    let lat_factor = (coordinate.lat - REFERENCE_LAT).abs() / 10.0;
    let lon_factor = (coordinate.lon - REFERENCE_LON).abs() / 10.0;
    // month0 keeps the seasonal curve aligned with the upstream dashboard
    let seasonal = (f64::from(start_date.month0()) / 12.0 * std::f64::consts::TAU).sin() * 10.0;

    let avg_temp = round1(BASE_AVG_TEMP + lat_factor * 2.0);
    let max_temp = round1(BASE_MAX_TEMP + lat_factor * 2.0);
    let min_temp = round1(BASE_MIN_TEMP + lat_factor * 2.0);
    let wind_speed = round1(BASE_WIND_SPEED + lon_factor);
    let precipitation = (BASE_PRECIPITATION + seasonal).round();
    let humidity = (BASE_HUMIDITY + seasonal).round();

    let mut summary = WeatherSummary {
        avg_temperature: metric(avg_temp, "°C", "Historical average temperature"),
        max_temperature: metric(max_temp, "°C", "Historical average maximum temperature"),
        min_temperature: metric(min_temp, "°C", "Historical average minimum temperature"),
        precipitation: PrecipitationSummary {
            probability: precipitation,
            unit: "%".to_string(),
            description: "Probability of precipitation".to_string(),
        },
        wind_speed: metric(wind_speed, "km/h", "Historical average wind speed"),
        humidity: metric(humidity, "%", "Historical average relative humidity"),
        weather_type: None,
    };
    summary.weather_type = Some(risk::classify_weather_type(&summary, thresholds));

    let trend_data = sample_trend(&summary, start_date.year(), trend_years, thresholds);

    AnalysisResult {
        location: LocationInfo {
            name: coordinate.format(),
            lat: coordinate.lat,
            lon: coordinate.lon,
        },
        summary,
        trend_data,
    }
}

/// One trend point per historical year, oldest first, with a small
/// deterministic wobble around the summary values
fn sample_trend(
    summary: &WeatherSummary,
    end_year: i32,
    trend_years: u32,
    thresholds: &RiskThresholds,
) -> Vec<TrendPoint> {
    let years = i32::try_from(trend_years).unwrap_or(1).max(1);

    (0..years)
        .map(|i| {
            let year = end_year - years + i;
            let wobble = f64::from(i % 5) * 0.2 - 0.4;
            let humidity_wobble = f64::from(i % 7) - 3.0;

            let avg_temperature = round1(summary.avg_temperature.avg_value + wobble);
            let max_temperature = round1(summary.max_temperature.avg_value + wobble);
            let min_temperature = round1(summary.min_temperature.avg_value + wobble);
            let wind_speed = round1(summary.wind_speed.avg_value + f64::from(i % 3) - 1.0);
            let humidity = (summary.humidity.avg_value + humidity_wobble).round();
            let precipitation = (summary.precipitation.probability + humidity_wobble).round();

            let point_summary = WeatherSummary {
                avg_temperature: metric(avg_temperature, "°C", ""),
                max_temperature: metric(max_temperature, "°C", ""),
                min_temperature: metric(min_temperature, "°C", ""),
                precipitation: PrecipitationSummary {
                    probability: precipitation,
                    unit: "%".to_string(),
                    description: String::new(),
                },
                wind_speed: metric(wind_speed, "km/h", ""),
                humidity: metric(humidity, "%", ""),
                weather_type: None,
            };
            let weather_type = risk::derive_weather_type(&point_summary, thresholds);

            TrendPoint {
                year,
                avg_temperature,
                max_temperature,
                min_temperature,
                precipitation,
                wind_speed,
                humidity,
                weather_type: weather_type.to_string(),
            }
        })
        .collect()
}

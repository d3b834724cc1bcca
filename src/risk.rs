//! Risk classification for weather summaries
//!
//! Derives per-metric Low/Medium/High tiers, the categorical weather type
//! and the heat-index approximation. All functions are pure and
//! deterministic; thresholds come from [`RiskThresholds`] so deployments
//! can tune them without touching this module.
//!
//! Every comparison is strict: a value exactly at a threshold stays in
//! the lower tier.

use crate::config::RiskThresholds;
use crate::models::{WeatherSummary, WeatherType, WeatherTypeClassification};
use std::fmt;

/// A Low/Medium/High classification derived from a metric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        };
        write!(f, "{label}")
    }
}

/// Per-metric tiers for one weather summary
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub max_temperature: RiskTier,
    pub precipitation: RiskTier,
    pub wind_speed: RiskTier,
    pub humidity: RiskTier,
    /// Tier derived from the categorical weather type
    pub comfort: RiskTier,
    /// The classification the comfort tier was derived from; filled in
    /// locally when the backend left it absent
    pub weather_type: WeatherTypeClassification,
}

/// Tier a value against a Medium and a High threshold
#[must_use]
pub fn tier(value: f64, medium: f64, high: f64) -> RiskTier {
    if value > high {
        RiskTier::High
    } else if value > medium {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Tier implied by a categorical weather type
#[must_use]
pub fn comfort_tier(weather_type: WeatherType) -> RiskTier {
    match weather_type {
        WeatherType::Hot | WeatherType::Muggy => RiskTier::High,
        WeatherType::Humid | WeatherType::Windy => RiskTier::Medium,
        WeatherType::Cold | WeatherType::Comfortable => RiskTier::Low,
    }
}

/// Derive the categorical weather type from summary metrics
///
/// Rules are evaluated in fixed priority order; the first match wins.
/// Muggy requires both the average-temperature band and the humidity
/// floor.
#[must_use]
pub fn derive_weather_type(summary: &WeatherSummary, thresholds: &RiskThresholds) -> WeatherType {
    let avg_temp = summary.avg_temperature.avg_value;
    let max_temp = summary.max_temperature.avg_value;
    let min_temp = summary.min_temperature.avg_value;
    let humidity = summary.humidity.avg_value;
    let wind_speed = summary.wind_speed.avg_value;
    let precipitation = summary.precipitation.probability;

    if max_temp > thresholds.hot_max_temp && humidity > thresholds.hot_humidity {
        WeatherType::Hot
    } else if min_temp < thresholds.cold_min_temp {
        WeatherType::Cold
    } else if precipitation > thresholds.humid_precipitation || humidity > thresholds.humid_humidity
    {
        WeatherType::Humid
    } else if wind_speed > thresholds.windy_wind {
        WeatherType::Windy
    } else if avg_temp >= thresholds.muggy_avg_temp_low
        && avg_temp <= thresholds.muggy_avg_temp_high
        && humidity > thresholds.muggy_humidity
    {
        WeatherType::Muggy
    } else {
        WeatherType::Comfortable
    }
}

/// Approximate the feels-like temperature, rounded to one decimal
#[must_use]
pub fn heat_index(avg_temp: f64, humidity: f64) -> f64 {
    ((avg_temp + humidity * 0.1) * 10.0).round() / 10.0
}

/// Build a full weather-type classification for a summary
///
/// Used when the backend response carries no `weatherType` field.
#[must_use]
pub fn classify_weather_type(
    summary: &WeatherSummary,
    thresholds: &RiskThresholds,
) -> WeatherTypeClassification {
    let weather_type = derive_weather_type(summary, thresholds);
    let heat_index = heat_index(
        summary.avg_temperature.avg_value,
        summary.humidity.avg_value,
    );

    WeatherTypeClassification {
        weather_type,
        heat_index,
        unit: "°C".to_string(),
        description: format!("Weather type: {weather_type}, feels like: {heat_index}°C"),
    }
}

/// Assess all risk tiers for a weather summary
///
/// When the summary carries a backend-supplied weather type it is used
/// verbatim; otherwise one is derived here.
#[must_use]
pub fn assess(summary: &WeatherSummary, thresholds: &RiskThresholds) -> RiskAssessment {
    let weather_type = summary
        .weather_type
        .clone()
        .unwrap_or_else(|| classify_weather_type(summary, thresholds));

    RiskAssessment {
        max_temperature: tier(
            summary.max_temperature.avg_value,
            thresholds.max_temp_medium,
            thresholds.max_temp_high,
        ),
        precipitation: tier(
            summary.precipitation.probability,
            thresholds.precipitation_medium,
            thresholds.precipitation_high,
        ),
        wind_speed: tier(
            summary.wind_speed.avg_value,
            thresholds.wind_medium,
            thresholds.wind_high,
        ),
        humidity: tier(
            summary.humidity.avg_value,
            thresholds.humidity_medium,
            thresholds.humidity_high,
        ),
        comfort: comfort_tier(weather_type.weather_type),
        weather_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MetricSummary, PrecipitationSummary};
    use rstest::rstest;

    fn thresholds() -> RiskThresholds {
        RiskThresholds::default()
    }

    fn metric(value: f64, unit: &str) -> MetricSummary {
        MetricSummary {
            avg_value: value,
            unit: unit.to_string(),
            description: String::new(),
        }
    }

    fn summary(
        avg_temp: f64,
        max_temp: f64,
        min_temp: f64,
        precipitation: f64,
        wind_speed: f64,
        humidity: f64,
    ) -> WeatherSummary {
        WeatherSummary {
            avg_temperature: metric(avg_temp, "°C"),
            max_temperature: metric(max_temp, "°C"),
            min_temperature: metric(min_temp, "°C"),
            precipitation: PrecipitationSummary {
                probability: precipitation,
                unit: "%".to_string(),
                description: String::new(),
            },
            wind_speed: metric(wind_speed, "km/h"),
            humidity: metric(humidity, "%"),
            weather_type: None,
        }
    }

    #[rstest]
    #[case(36.0, RiskTier::High)]
    #[case(35.0001, RiskTier::High)]
    #[case(35.0, RiskTier::Medium)]
    #[case(30.0001, RiskTier::Medium)]
    #[case(30.0, RiskTier::Low)]
    #[case(20.0, RiskTier::Low)]
    fn test_max_temperature_tier_boundaries(#[case] value: f64, #[case] expected: RiskTier) {
        let t = thresholds();
        assert_eq!(tier(value, t.max_temp_medium, t.max_temp_high), expected);
    }

    #[rstest]
    #[case(71.0, RiskTier::High)]
    #[case(70.0, RiskTier::Medium)]
    #[case(40.0, RiskTier::Low)]
    fn test_precipitation_tier_boundaries(#[case] value: f64, #[case] expected: RiskTier) {
        let t = thresholds();
        assert_eq!(
            tier(value, t.precipitation_medium, t.precipitation_high),
            expected
        );
    }

    #[rstest]
    #[case(WeatherType::Hot, RiskTier::High)]
    #[case(WeatherType::Muggy, RiskTier::High)]
    #[case(WeatherType::Humid, RiskTier::Medium)]
    #[case(WeatherType::Windy, RiskTier::Medium)]
    #[case(WeatherType::Cold, RiskTier::Low)]
    #[case(WeatherType::Comfortable, RiskTier::Low)]
    fn test_comfort_tier(#[case] weather_type: WeatherType, #[case] expected: RiskTier) {
        assert_eq!(comfort_tier(weather_type), expected);
    }

    #[test]
    fn test_hot_rule_wins_first() {
        // Hot matches even though the Humid rule would match too
        let s = summary(27.0, 32.0, 20.0, 2.0, 5.0, 65.0);
        assert_eq!(derive_weather_type(&s, &thresholds()), WeatherType::Hot);
    }

    #[test]
    fn test_cold_before_humid() {
        let s = summary(12.0, 18.0, 5.0, 10.0, 5.0, 85.0);
        assert_eq!(derive_weather_type(&s, &thresholds()), WeatherType::Cold);
    }

    #[test]
    fn test_humid_on_precipitation_alone() {
        let s = summary(20.0, 25.0, 15.0, 6.0, 5.0, 50.0);
        assert_eq!(derive_weather_type(&s, &thresholds()), WeatherType::Humid);
    }

    #[test]
    fn test_windy() {
        let s = summary(20.0, 25.0, 15.0, 2.0, 22.0, 50.0);
        assert_eq!(derive_weather_type(&s, &thresholds()), WeatherType::Windy);
    }

    #[test]
    fn test_muggy_requires_temperature_band() {
        // Humidity above 70 alone is not enough; the average temperature
        // must sit inside [25, 30]
        let warm = summary(27.0, 29.0, 20.0, 2.0, 5.0, 72.0);
        assert_eq!(derive_weather_type(&warm, &thresholds()), WeatherType::Muggy);

        let cool = summary(22.0, 28.0, 15.0, 2.0, 5.0, 72.0);
        assert_eq!(
            derive_weather_type(&cool, &thresholds()),
            WeatherType::Comfortable
        );
    }

    #[test]
    fn test_comfortable_fallback() {
        let s = summary(20.0, 25.0, 15.0, 2.0, 5.0, 50.0);
        assert_eq!(
            derive_weather_type(&s, &thresholds()),
            WeatherType::Comfortable
        );
    }

    #[test]
    fn test_heat_index_rounds_to_one_decimal() {
        assert_eq!(heat_index(28.0, 75.0), 35.5);
        assert_eq!(heat_index(27.33, 61.0), 33.4);
    }

    #[test]
    fn test_classify_fills_description() {
        let s = summary(27.0, 32.0, 20.0, 2.0, 5.0, 65.0);
        let classification = classify_weather_type(&s, &thresholds());
        assert_eq!(classification.weather_type, WeatherType::Hot);
        assert_eq!(classification.unit, "°C");
        assert_eq!(
            classification.description,
            format!(
                "Weather type: Hot, feels like: {}°C",
                classification.heat_index
            )
        );
    }

    #[test]
    fn test_assess_uses_backend_weather_type_when_present() {
        let mut s = summary(20.0, 25.0, 15.0, 2.0, 5.0, 50.0);
        s.weather_type = Some(WeatherTypeClassification {
            weather_type: WeatherType::Muggy,
            heat_index: 31.2,
            unit: "°C".to_string(),
            description: String::new(),
        });

        let assessment = assess(&s, &thresholds());
        // Backend classification wins over the locally derivable Comfortable
        assert_eq!(assessment.comfort, RiskTier::High);
        assert_eq!(assessment.weather_type.weather_type, WeatherType::Muggy);
    }

    #[test]
    fn test_assess_full_summary() {
        let s = summary(28.0, 36.0, 24.0, 65.0, 16.0, 86.0);
        let assessment = assess(&s, &thresholds());
        assert_eq!(assessment.max_temperature, RiskTier::High);
        assert_eq!(assessment.precipitation, RiskTier::Medium);
        assert_eq!(assessment.wind_speed, RiskTier::Medium);
        assert_eq!(assessment.humidity, RiskTier::High);
        // max 36 with humidity 86 derives Hot
        assert_eq!(assessment.comfort, RiskTier::High);
    }
}

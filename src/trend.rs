//! Trend range aggregation
//!
//! Computes the min/max envelope of a trend series for summary display.
//! Input order is irrelevant and the input is never mutated.

use crate::models::TrendPoint;

/// Observed minimum and maximum of one quantity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    fn fold(values: impl Iterator<Item = f64>) -> Option<Self> {
        values.fold(None, |range, value| {
            Some(match range {
                None => Self {
                    min: value,
                    max: value,
                },
                Some(range) => Self {
                    min: range.min.min(value),
                    max: range.max.max(value),
                },
            })
        })
    }
}

/// Min/max ranges over a trend series
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSummary {
    /// Number of data points in the series
    pub count: usize,
    /// First and last observed year
    pub year_min: i32,
    pub year_max: i32,
    pub avg_temperature: ValueRange,
    pub max_temperature: ValueRange,
    pub wind_speed: ValueRange,
    pub humidity: ValueRange,
}

/// Summarize a trend series, or report no data for an empty one
///
/// An empty series is a defined state, not an error: the caller renders
/// it as "no data" rather than crashing on an empty reduction.
#[must_use]
pub fn summarize(points: &[TrendPoint]) -> Option<TrendSummary> {
    if points.is_empty() {
        return None;
    }

    let year_min = points.iter().map(|p| p.year).min()?;
    let year_max = points.iter().map(|p| p.year).max()?;

    Some(TrendSummary {
        count: points.len(),
        year_min,
        year_max,
        avg_temperature: ValueRange::fold(points.iter().map(|p| p.avg_temperature))?,
        max_temperature: ValueRange::fold(points.iter().map(|p| p.max_temperature))?,
        wind_speed: ValueRange::fold(points.iter().map(|p| p.wind_speed))?,
        humidity: ValueRange::fold(points.iter().map(|p| p.humidity))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(year: i32, avg: f64, max: f64, wind: f64, humidity: f64) -> TrendPoint {
        TrendPoint {
            year,
            avg_temperature: avg,
            max_temperature: max,
            min_temperature: avg - 4.0,
            precipitation: 10.0,
            wind_speed: wind,
            humidity,
            weather_type: "Comfortable".to_string(),
        }
    }

    #[test]
    fn test_ranges_over_two_points() {
        let points = vec![
            point(2020, 28.5, 32.5, 16.0, 81.0),
            point(2022, 28.7, 32.7, 14.0, 77.0),
        ];

        let summary = summarize(&points).unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.year_min, 2020);
        assert_eq!(summary.year_max, 2022);
        assert_eq!(summary.avg_temperature.min, 28.5);
        assert_eq!(summary.avg_temperature.max, 28.7);
        assert_eq!(summary.wind_speed.min, 14.0);
        assert_eq!(summary.wind_speed.max, 16.0);
        assert_eq!(summary.humidity.max, 81.0);
    }

    #[test]
    fn test_order_does_not_matter() {
        let ascending = vec![point(2019, 27.0, 31.0, 12.0, 70.0), point(2021, 29.0, 33.0, 18.0, 80.0)];
        let descending: Vec<_> = ascending.iter().rev().cloned().collect();
        assert_eq!(summarize(&ascending), summarize(&descending));
    }

    #[test]
    fn test_single_point_collapses_ranges() {
        let points = vec![point(2024, 29.5, 33.5, 16.0, 84.0)];
        let summary = summarize(&points).unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.year_min, summary.year_max);
        assert_eq!(summary.max_temperature.min, summary.max_temperature.max);
    }

    #[test]
    fn test_empty_series_reports_no_data() {
        assert!(summarize(&[]).is_none());
    }
}

//! Parameter validation and normalization
//!
//! Pure functions turning raw user input (coordinate, date strings, year
//! counts) into a validated [`AnalysisParams`] or a classified validation
//! error. Validation failures never reach the network.

use crate::config::AnalysisConfig;
use crate::error::ClimascopeError;
use crate::models::Coordinate;
use chrono::NaiveDate;

/// Validated, normalized parameters for one analysis request
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisParams {
    pub coordinate: Coordinate,
    pub date_range: DateRange,
    /// Number of past years averaged into the summary metrics
    pub history_years: u32,
    /// Number of past years shown in the trend series
    pub trend_years: u32,
}

/// A start date with an optional end date, start ≤ end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Compact `YYYYMMDD` form of the start date, as transmitted to the
    /// backend
    #[must_use]
    pub fn start_compact(&self) -> String {
        self.start.format("%Y%m%d").to_string()
    }

    /// Compact form of the end date, only when distinct from the start
    #[must_use]
    pub fn end_compact(&self) -> Option<String> {
        self.end
            .filter(|end| *end != self.start)
            .map(|end| end.format("%Y%m%d").to_string())
    }
}

/// Validate a coordinate against the geographic bounds
pub fn validate_coordinate(coordinate: &Coordinate) -> Result<(), ClimascopeError> {
    if !(-90.0..=90.0).contains(&coordinate.lat) {
        return Err(ClimascopeError::invalid_coordinate(format!(
            "latitude must be between -90 and 90, got: {}",
            coordinate.lat
        )));
    }

    if !(-180.0..=180.0).contains(&coordinate.lon) {
        return Err(ClimascopeError::invalid_coordinate(format!(
            "longitude must be between -180 and 180, got: {}",
            coordinate.lon
        )));
    }

    Ok(())
}

/// Validate a year count against the configured bounds
pub fn validate_years(years: u32, bounds: &AnalysisConfig) -> Result<(), ClimascopeError> {
    if years < bounds.min_years || years > bounds.max_years {
        return Err(ClimascopeError::invalid_range(format!(
            "year count must be between {} and {}, got: {}",
            bounds.min_years, bounds.max_years, years
        )));
    }
    Ok(())
}

/// Normalize a date string to its compact `YYYYMMDD` form
///
/// Separator characters are stripped; the remainder must be exactly 8
/// digits forming a real calendar date.
pub fn normalize_date(raw: &str) -> Result<String, ClimascopeError> {
    let date = parse_date(raw)?;
    Ok(date.format("%Y%m%d").to_string())
}

/// Parse a date string in ISO (`YYYY-MM-DD`) or compact (`YYYYMMDD`) form
pub fn parse_date(raw: &str) -> Result<NaiveDate, ClimascopeError> {
    let compact: String = raw
        .chars()
        .filter(|c| !matches!(c, '-' | '/' | '.' | ' '))
        .collect();

    if compact.len() != 8 || !compact.chars().all(|c| c.is_ascii_digit()) {
        return Err(ClimascopeError::invalid_date_format(format!(
            "expected YYYY-MM-DD, got: {raw}"
        )));
    }

    NaiveDate::parse_from_str(&compact, "%Y%m%d").map_err(|_| {
        ClimascopeError::invalid_date_format(format!("not a valid calendar date: {raw}"))
    })
}

/// Back-format a compact `YYYYMMDD` date for display as `YYYY-MM-DD`
pub fn display_date(compact: &str) -> Result<String, ClimascopeError> {
    let date = parse_date(compact)?;
    Ok(date.format("%Y-%m-%d").to_string())
}

impl AnalysisParams {
    /// Validate raw inputs into a normalized parameter set
    ///
    /// `end_date` may be omitted, in which case the range covers the start
    /// date only. Both year counts are checked against `bounds`.
    pub fn validated(
        coordinate: Coordinate,
        start_date: &str,
        end_date: Option<&str>,
        history_years: u32,
        trend_years: u32,
        bounds: &AnalysisConfig,
    ) -> Result<Self, ClimascopeError> {
        validate_coordinate(&coordinate)?;
        validate_years(history_years, bounds)?;
        validate_years(trend_years, bounds)?;

        let start = parse_date(start_date)?;
        let end = end_date.map(parse_date).transpose()?;

        if let Some(end) = end {
            if start > end {
                return Err(ClimascopeError::invalid_date_range(format!(
                    "start date {start} is after end date {end}"
                )));
            }
        }

        Ok(Self {
            coordinate,
            date_range: DateRange { start, end },
            history_years,
            trend_years,
        })
    }
}

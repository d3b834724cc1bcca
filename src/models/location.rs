//! Location models for geographic coordinates and metadata

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair identifying an analysis location
///
/// Immutable once selected; a new selection replaces it wholesale.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl Coordinate {
    /// Create a new coordinate without validation; bounds are enforced by
    /// the parameter validator before any request is issued
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Format as a display string with 4 decimal places
    #[must_use]
    pub fn format(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lon)
    }
}

/// A named location as returned by the analysis backend
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LocationInfo {
    /// Display name (city, region, etc.)
    pub name: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl LocationInfo {
    /// The coordinate of this location
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_format() {
        let coord = Coordinate::new(25.033, 121.5654);
        assert_eq!(coord.format(), "25.0330, 121.5654");
    }

    #[test]
    fn test_location_info_coordinate() {
        let info = LocationInfo {
            name: "Taipei, Taiwan".to_string(),
            lat: 25.033,
            lon: 121.5654,
        };
        assert_eq!(info.coordinate(), Coordinate::new(25.033, 121.5654));
    }
}

//! Climascope - historical weather-risk analysis client
//!
//! This library provides the core pipeline behind a weather-risk
//! dashboard: parameter validation, timeout-bounded analysis requests
//! with last-request-wins sequencing, derived risk tiers and weather-type
//! classification, trend range aggregation, and assistant prompt
//! composition.

pub mod api;
pub mod assistant;
pub mod config;
pub mod error;
pub mod geocode;
pub mod models;
pub mod params;
pub mod risk;
pub mod sample;
pub mod trend;

// Re-export core types for the public API
pub use api::{AnalysisSession, WeatherApiClient};
pub use assistant::{AssistantClient, FALLBACK_ANSWER, INITIAL_ANALYSIS_QUESTION};
pub use config::{AnalysisConfig, ApiConfig, ClimascopeConfig, RiskThresholds};
pub use error::ClimascopeError;
pub use geocode::{PlaceCandidate, PlaceSearchClient, SuggestSession};
pub use models::{
    AnalysisResult, AssistantRequest, AssistantResponse, Coordinate, HealthStatus, LocationInfo,
    TrendPoint, WeatherSummary, WeatherType,
};
pub use params::{AnalysisParams, DateRange};
pub use risk::{RiskAssessment, RiskTier};
pub use trend::TrendSummary;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ClimascopeError>;

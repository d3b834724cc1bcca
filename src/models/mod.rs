//! Data models for the weather analysis pipeline

pub mod location;
pub mod weather;

pub use location::{Coordinate, LocationInfo};
pub use weather::{
    AnalysisResult, ApiErrorBody, AssistantRequest, AssistantResponse, HealthStatus,
    MetricSummary, PrecipitationSummary, TrendPoint, WeatherSummary, WeatherType,
    WeatherTypeClassification,
};

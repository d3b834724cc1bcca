//! AI assistant prompt composition and client
//!
//! The prompt composer is a pure string builder embedding location and
//! summary statistics around the user's verbatim question. The client
//! posts to the backend assistant endpoint under the same timeout and
//! classification discipline as the analysis call; its failures degrade
//! to a canned answer rather than blocking the chat surface.

use crate::config::ClimascopeConfig;
use crate::error::ClimascopeError;
use crate::models::{AnalysisResult, AssistantRequest, AssistantResponse, Coordinate, WeatherSummary};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Question sent once when weather data first becomes available
pub const INITIAL_ANALYSIS_QUESTION: &str = "Please analyze the current weather data and provide \
insights about the weather conditions, risks, and recommendations for outdoor activities.";

/// Canned answer shown when the assistant call fails
pub const FALLBACK_ANSWER: &str = "I'm ready to help you with weather analysis! Please ask me \
any questions about the current weather conditions.";

/// Compose a structured prompt around a free-text question
///
/// Embeds the location name (or "Not specified"), the coordinate to 4
/// decimal places and the headline summary statistics, then constrains
/// the expected answer shape.
#[must_use]
pub fn compose_prompt(
    question: &str,
    location_name: Option<&str>,
    coordinate: &Coordinate,
    summary: &WeatherSummary,
) -> String {
    let name = location_name.unwrap_or("Not specified");

    format!(
        "You are a weather-risk assistant analyzing historical conditions.\n\
         \n\
         Location: {name} ({coords})\n\
         Max temperature: {max_temp} {max_unit}\n\
         Precipitation probability: {precip} {precip_unit}\n\
         Wind speed: {wind} {wind_unit}\n\
         \n\
         Question: {question}\n\
         \n\
         Answer with a short risk summary of 2-4 sentences, followed by \
         1-2 practical recommendations.",
        coords = coordinate.format(),
        max_temp = summary.max_temperature.avg_value,
        max_unit = summary.max_temperature.unit,
        precip = summary.precipitation.probability,
        precip_unit = summary.precipitation.unit,
        wind = summary.wind_speed.avg_value,
        wind_unit = summary.wind_speed.unit,
    )
}

/// Client for the backend assistant endpoint
pub struct AssistantClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl AssistantClient {
    /// Create a new assistant client from configuration
    pub fn new(config: &ClimascopeConfig) -> Result<Self, ClimascopeError> {
        let client = Client::builder()
            .user_agent(concat!("climascope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClimascopeError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api.resolved_base_url(),
            timeout: config.api.assistant_timeout(),
        })
    }

    /// Ask with the full structured request
    #[instrument(skip(self, request), fields(question_len = request.question.len()))]
    pub async fn ask(
        &self,
        request: &AssistantRequest,
    ) -> Result<AssistantResponse, ClimascopeError> {
        let url = format!("{}/api/v1/weather/assistant", self.base_url);
        debug!("Assistant request to {}", url);

        match tokio::time::timeout(self.timeout, self.post_question(&url, request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ClimascopeError::timeout(self.timeout)),
        }
    }

    /// Ask with only a question
    pub async fn quick_ask(&self, question: &str) -> Result<AssistantResponse, ClimascopeError> {
        self.ask(&AssistantRequest {
            question: question.to_string(),
            location: None,
            weather_data: None,
        })
        .await
    }

    /// Ask with location context
    pub async fn ask_with_location(
        &self,
        question: &str,
        location: Coordinate,
    ) -> Result<AssistantResponse, ClimascopeError> {
        self.ask(&AssistantRequest {
            question: question.to_string(),
            location: Some(location),
            weather_data: None,
        })
        .await
    }

    /// Ask with location and the full analysis snapshot
    pub async fn ask_with_data(
        &self,
        question: &str,
        location: Coordinate,
        weather_data: AnalysisResult,
    ) -> Result<AssistantResponse, ClimascopeError> {
        self.ask(&AssistantRequest {
            question: question.to_string(),
            location: Some(location),
            weather_data: Some(weather_data),
        })
        .await
    }

    /// Ask, degrading to the canned fallback answer on any failure
    pub async fn ask_or_fallback(&self, request: &AssistantRequest) -> AssistantResponse {
        match self.ask(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Assistant call failed, degrading to fallback: {}", e);
                AssistantResponse {
                    answer: FALLBACK_ANSWER.to_string(),
                    sources: None,
                    confidence: None,
                    timestamp: String::new(),
                }
            }
        }
    }

    async fn post_question(
        &self,
        url: &str,
        request: &AssistantRequest,
    ) -> Result<AssistantResponse, ClimascopeError> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClimascopeError::timeout(self.timeout)
                } else {
                    ClimascopeError::network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClimascopeError::network(e.to_string()))?;

        if !status.is_success() {
            return Err(ClimascopeError::remote(
                status.as_u16(),
                Self::error_detail(&body, status.as_u16()),
            ));
        }

        serde_json::from_str(&body).map_err(|e| ClimascopeError::malformed(e.to_string()))
    }

    /// Surface the backend's `detail` field: a plain string verbatim, a
    /// structured value stringified, the raw body otherwise
    fn error_detail(body: &str, status: u16) -> String {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
            if let Some(detail) = value.get("detail") {
                return match detail.as_str() {
                    Some(text) => text.to_string(),
                    None => detail.to_string(),
                };
            }
        }
        if body.trim().is_empty() {
            format!("HTTP {status}: request failed")
        } else {
            body.to_string()
        }
    }
}

//! Weather analysis API client
//!
//! HTTP client for the weather-analysis backend with per-call timeout
//! budgets, single-attempt semantics and failure classification, plus a
//! session wrapper enforcing last-request-wins sequencing. The upstream
//! aggregation is expensive, so the analysis budget is much longer than
//! the health probe's.

use crate::config::ClimascopeConfig;
use crate::error::ClimascopeError;
use crate::models::{AnalysisResult, ApiErrorBody, HealthStatus};
use crate::params::AnalysisParams;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Client for the weather-analysis backend
///
/// One outbound attempt per invocation; retries are always a new
/// user-initiated action.
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    health_timeout: Duration,
    analysis_timeout: Duration,
}

impl WeatherApiClient {
    /// Create a new client from configuration
    pub fn new(config: &ClimascopeConfig) -> Result<Self, ClimascopeError> {
        let client = Client::builder()
            .user_agent(concat!("climascope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClimascopeError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api.resolved_base_url(),
            health_timeout: config.api.health_timeout(),
            analysis_timeout: config.api.analysis_timeout(),
        })
    }

    /// The base URL this client talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the backend's health endpoint
    #[instrument(skip(self))]
    pub async fn check_health(&self) -> Result<HealthStatus, ClimascopeError> {
        let url = self.endpoint("/")?;
        self.get_json(url, self.health_timeout).await
    }

    /// Fetch the weather analysis for a validated parameter set
    ///
    /// The parsed result is returned unchanged: an absent weather type
    /// stays absent for the risk classifier to fill in.
    #[instrument(skip(self, params), fields(lat = params.coordinate.lat, lon = params.coordinate.lon))]
    pub async fn analyze(&self, params: &AnalysisParams) -> Result<AnalysisResult, ClimascopeError> {
        let mut url = self.endpoint("/api/v1/weather/analysis")?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("lat", &params.coordinate.lat.to_string());
            query.append_pair("lon", &params.coordinate.lon.to_string());
            query.append_pair("start_date", &params.date_range.start_compact());
            if let Some(end) = params.date_range.end_compact() {
                query.append_pair("end_date", &end);
            }
            query.append_pair("years", &params.history_years.to_string());
            query.append_pair("trend_years", &params.trend_years.to_string());
        }

        debug!("Analysis request URL: {}", url);
        let start_time = Instant::now();

        let result: AnalysisResult = self.get_json(url, self.analysis_timeout).await?;

        let elapsed = start_time.elapsed();
        info!(
            "Retrieved analysis with {} trend points in {:.3}s",
            result.trend_data.len(),
            elapsed.as_secs_f64()
        );
        if elapsed.as_secs() > 5 {
            warn!("Slow analysis response: {:.3}s", elapsed.as_secs_f64());
        }

        Ok(result)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClimascopeError> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ClimascopeError::config(format!("Invalid base URL: {e}")))
    }

    /// Issue one GET within the given budget and classify the outcome
    ///
    /// Classification priority: timeout, then non-2xx status (body message
    /// when parseable, HTTP-status generic otherwise), then a 2xx body
    /// that fails to parse as `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        budget: Duration,
    ) -> Result<T, ClimascopeError> {
        match tokio::time::timeout(budget, self.fetch_json(url)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ClimascopeError::timeout(budget)),
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClimascopeError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ClimascopeError::timeout(self.analysis_timeout)
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
            let generic = format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("request failed")
            );
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .map(|parsed| parsed.best_message().to_string())
                .filter(|m| !m.is_empty())
                .unwrap_or(generic);
            warn!("Backend returned HTTP {}: {}", status.as_u16(), message);
            return Err(ClimascopeError::remote(status.as_u16(), message));
        }

        serde_json::from_str(&body).map_err(|e| ClimascopeError::malformed(e.to_string()))
    }
}

/// Last-request-wins coordinator for analysis fetches
///
/// Each parameter change supersedes the previous one: the stale in-flight
/// task is aborted before the new request is issued, so only the result of
/// the most recent submission can ever be committed as the session's
/// current snapshot.
pub struct AnalysisSession {
    client: Arc<WeatherApiClient>,
    generation: Arc<AtomicU64>,
    inflight: Mutex<Option<JoinHandle<()>>>,
    latest: Arc<Mutex<Option<AnalysisResult>>>,
}

impl AnalysisSession {
    /// Create a session around a configured client
    #[must_use]
    pub fn new(client: WeatherApiClient) -> Self {
        Self {
            client: Arc::new(client),
            generation: Arc::new(AtomicU64::new(0)),
            inflight: Mutex::new(None),
            latest: Arc::new(Mutex::new(None)),
        }
    }

    /// Submit a parameter set, cancelling any outstanding request
    ///
    /// The receiver resolves with the analysis outcome, with
    /// [`ClimascopeError::Superseded`] when a newer submission won the
    /// race, or is dropped when the task was aborted outright.
    pub fn submit(
        &self,
        params: AnalysisParams,
    ) -> oneshot::Receiver<Result<AnalysisResult, ClimascopeError>> {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (tx, rx) = oneshot::channel();

        // Cancel the stale request before issuing the new one
        if let Some(stale) = self.inflight.lock().unwrap().take() {
            debug!("Superseding in-flight analysis request");
            stale.abort();
        }

        let client = Arc::clone(&self.client);
        let generation = Arc::clone(&self.generation);
        let latest = Arc::clone(&self.latest);

        let handle = tokio::spawn(async move {
            let outcome = client.analyze(&params).await;

            // Commit only if no newer submission has arrived; the check
            // and store happen under one lock so a late response cannot
            // clobber newer state.
            let mut snapshot = latest.lock().unwrap();
            if generation.load(Ordering::SeqCst) != my_generation {
                let _ = tx.send(Err(ClimascopeError::Superseded));
                return;
            }
            if let Ok(result) = &outcome {
                *snapshot = Some(result.clone());
            }
            drop(snapshot);
            let _ = tx.send(outcome);
        });

        *self.inflight.lock().unwrap() = Some(handle);
        rx
    }

    /// The committed result of the most recent successful fetch
    #[must_use]
    pub fn latest(&self) -> Option<AnalysisResult> {
        self.latest.lock().unwrap().clone()
    }

    /// Discard the current snapshot and cancel any in-flight request,
    /// e.g. when the results view is closed or a new selection starts
    pub fn clear(&self) {
        if let Some(stale) = self.inflight.lock().unwrap().take() {
            stale.abort();
        }
        *self.latest.lock().unwrap() = None;
    }
}

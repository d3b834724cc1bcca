//! Place-search and reverse-geocoding collaborator
//!
//! Thin client for a third-party place-search service. Both directions
//! are best-effort: a failed reverse lookup degrades to showing the raw
//! coordinates instead of an address, and suggestion lookups follow the
//! same debounce-and-cancel discipline as the analysis session so a new
//! keystroke supersedes an older in-flight search.

use crate::config::ClimascopeConfig;
use crate::error::ClimascopeError;
use crate::models::Coordinate;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

/// Default public place-search service
const PLACE_SEARCH_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Maximum number of ranked candidates returned by a forward search
const MAX_CANDIDATES: usize = 3;

/// One ranked place-search candidate
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCandidate {
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
}

/// The service returns coordinates as strings
#[derive(Debug, Deserialize)]
struct RawPlace {
    display_name: String,
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct RawReverse {
    display_name: Option<String>,
}

impl RawPlace {
    fn parse(self) -> Option<PlaceCandidate> {
        Some(PlaceCandidate {
            display_name: self.display_name,
            lat: self.lat.parse().ok()?,
            lon: self.lon.parse().ok()?,
        })
    }
}

/// Client for forward and reverse place lookups
pub struct PlaceSearchClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl PlaceSearchClient {
    /// Create a new place-search client from configuration
    pub fn new(config: &ClimascopeConfig) -> Result<Self, ClimascopeError> {
        Self::with_base_url(config, PLACE_SEARCH_BASE_URL)
    }

    /// Create a client against a specific service base URL
    pub fn with_base_url(
        config: &ClimascopeConfig,
        base_url: &str,
    ) -> Result<Self, ClimascopeError> {
        let client = Client::builder()
            .user_agent(concat!("climascope/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClimascopeError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            timeout: config.api.geocode_timeout(),
        })
    }

    /// Forward search: free-text query to up to 3 ranked candidates
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, ClimascopeError> {
        let url = format!(
            "{}/search?q={}&format=json&limit={}",
            self.base_url,
            urlencoding::encode(query),
            MAX_CANDIDATES
        );

        let raw: Vec<RawPlace> = self.get_json(&url).await?;
        let candidates: Vec<PlaceCandidate> =
            raw.into_iter().filter_map(RawPlace::parse).collect();
        debug!("Found {} candidates for '{}'", candidates.len(), query);
        Ok(candidates)
    }

    /// Reverse lookup: coordinate to a display address
    ///
    /// Best-effort; any failure degrades to the coordinate string.
    #[instrument(skip(self))]
    pub async fn reverse(&self, coordinate: Coordinate) -> String {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.base_url, coordinate.lat, coordinate.lon
        );

        match self.get_json::<RawReverse>(&url).await {
            Ok(reverse) => reverse
                .display_name
                .unwrap_or_else(|| coordinate.format()),
            Err(e) => {
                warn!("Reverse lookup failed, showing raw coordinates: {}", e);
                coordinate.format()
            }
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ClimascopeError> {
        let fetch = async {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| ClimascopeError::network(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(ClimascopeError::remote(
                    status.as_u16(),
                    format!("place search returned HTTP {}", status.as_u16()),
                ));
            }

            response
                .json::<T>()
                .await
                .map_err(|e| ClimascopeError::malformed(e.to_string()))
        };

        match tokio::time::timeout(self.timeout, fetch).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ClimascopeError::timeout(self.timeout)),
        }
    }
}

/// Debounced, self-cancelling suggestion lookups
///
/// Each submitted query waits out the debounce window before hitting the
/// service; a newer query aborts the older task, so at most one lookup is
/// ever in flight.
pub struct SuggestSession {
    client: Arc<PlaceSearchClient>,
    debounce: Duration,
    inflight: Mutex<Option<JoinHandle<()>>>,
}

impl SuggestSession {
    /// Create a session around a place-search client
    #[must_use]
    pub fn new(client: PlaceSearchClient, debounce: Duration) -> Self {
        Self {
            client: Arc::new(client),
            debounce,
            inflight: Mutex::new(None),
        }
    }

    /// Submit a query, cancelling any pending or in-flight lookup
    ///
    /// The receiver is dropped when a newer query supersedes this one.
    pub fn submit(
        &self,
        query: String,
    ) -> oneshot::Receiver<Result<Vec<PlaceCandidate>, ClimascopeError>> {
        let (tx, rx) = oneshot::channel();

        if let Some(stale) = self.inflight.lock().unwrap().take() {
            stale.abort();
        }

        let client = Arc::clone(&self.client);
        let debounce = self.debounce;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            let _ = tx.send(client.search(&query).await);
        });

        *self.inflight.lock().unwrap() = Some(handle);
        rx
    }
}

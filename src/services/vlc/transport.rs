use std::{fmt, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::trace;

use super::{TransportError, health::StatusReporter};
use crate::{VlcDeckError, config::PlayerConfig};

/// Status snapshot endpoint, also the target of every command.
pub const STATUS_PATH: &str = "/requests/status.json";
/// Playlist tree endpoint.
pub const PLAYLIST_PATH: &str = "/requests/playlist.json";

/// Base URL and credential of one configured player.
///
/// Rebuilt from scratch whenever the configuration changes.
#[derive(Clone, PartialEq, Eq)]
pub struct Connection {
    base_url: String,
    password: Option<String>,
}

impl Connection {
    /// Creates a connection for `base_url`; an empty password disables auth.
    pub fn new(base_url: impl Into<String>, password: &str) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            password: (!password.is_empty()).then(|| password.to_string()),
        }
    }

    /// Creates a connection from the player section of the config.
    pub fn from_config(player: &PlayerConfig) -> Self {
        Self::new(player.base_url(), &player.password)
    }

    /// Full URL for a request path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Issues GET requests against the player.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches `path` (including any query string) and returns the body of a 200 response.
    ///
    /// # Errors
    /// `Unauthorized` for 401, `Remote` for other statuses, `Network` when no
    /// response arrived.
    async fn get(&self, path: &str) -> Result<Vec<u8>, TransportError>;
}

/// `reqwest`-backed transport with HTTP Basic auth (empty user name).
pub struct HttpTransport {
    client: Client,
    connection: Connection,
}

impl HttpTransport {
    /// Builds the HTTP client for `connection`.
    ///
    /// # Errors
    /// Returns error if the underlying client cannot be constructed.
    pub fn new(connection: Connection, timeout: Duration) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| VlcDeckError::Client(e.to_string()))?;

        Ok(Self { client, connection })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        let url = self.connection.url(path);
        trace!("GET {url}");

        let mut request = self.client.get(&url);
        if let Some(password) = &self.connection.password {
            request = request.basic_auth("", Some(password));
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .bytes()
                .await
                .map(|body| body.to_vec())
                .map_err(|e| TransportError::Network(e.to_string())),
            StatusCode::UNAUTHORIZED => Err(TransportError::Unauthorized),
            status => Err(TransportError::Remote(
                status
                    .canonical_reason()
                    .map_or_else(|| status.to_string(), str::to_string),
            )),
        }
    }
}

/// Transport wrapper that feeds every outcome into the shared status reporter.
#[derive(Clone)]
pub struct ReportingTransport {
    inner: Arc<dyn Transport>,
    reporter: Arc<StatusReporter>,
}

impl ReportingTransport {
    /// Wraps `inner`, reporting through `reporter`.
    pub fn new(inner: Arc<dyn Transport>, reporter: Arc<StatusReporter>) -> Self {
        Self { inner, reporter }
    }

    /// Issues the request and reports its connectivity outcome.
    ///
    /// # Errors
    /// Passes through the inner transport's error.
    pub async fn get(&self, path: &str) -> Result<Vec<u8>, TransportError> {
        let result = self.inner.get(path).await;

        match &result {
            Ok(_) => self.reporter.success(),
            Err(err) => self.reporter.failure(err),
        }

        result
    }

    /// Stops reporting outcomes, including those of requests in flight.
    pub fn close(&self) {
        self.reporter.close();
    }
}
